//! Finite mixture models fit by Gibbs sampling
//!
//! A [`MixtureModel`] owns `k` components, the mixture weights, and one
//! [`LabelAssignment`] per dataset. Each sweep redraws, in order,
//!
//! 1. every component from the observations currently labeled with it,
//! 2. the weights from the label counts,
//! 3. every label from its conditional posterior.
mod config;
mod labels;

pub use config::MixtureConfig;
pub use labels::LabelAssignment;

use itertools::Itertools;
use rand::Rng;

use crate::data::CategoricalSuffStat;
use crate::dist::{Categorical, Gaussian};
use crate::result::{Error, Result};
use crate::traits::{GibbsResamplable, HasSuffStat, SuffStat};

/// A finite mixture of `Fx` components over data of type `X`.
///
/// # Example
///
/// Fit a two-component Gaussian mixture.
///
/// ```
/// use mixgibbs::prelude::*;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut rng = SmallRng::seed_from_u64(0xABCD);
///
/// let left = Gaussian::new(-5.0, 1.0, 0.0, 1.0).unwrap();
/// let right = Gaussian::new(5.0, 1.0, 0.0, 1.0).unwrap();
/// let mut xs: Vec<f64> = left.sample(100, &mut rng).unwrap();
/// let ys: Vec<f64> = right.sample(100, &mut rng).unwrap();
/// xs.extend(ys);
///
/// let config = MixtureConfig::symmetric(2, 1.0, 0.0, 25.0, 1.0);
/// let mut model = MixtureModel::gaussian(&config, &mut rng).unwrap();
/// model.add_data(&xs, &mut rng).unwrap();
/// model.run(50, &mut rng).unwrap();
///
/// let mut mus: Vec<f64> =
///     model.components().iter().map(|c| c.mu()).collect();
/// mus.sort_by(|a, b| a.partial_cmp(b).unwrap());
///
/// assert!((mus[0] + 5.0).abs() < 1.0);
/// assert!((mus[1] - 5.0).abs() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct MixtureModel<'a, X, Fx> {
    components: Vec<Fx>,
    weights: Categorical,
    assignments: Vec<LabelAssignment<'a, X>>,
}

impl<'a, X> MixtureModel<'a, X, Gaussian>
where
    Gaussian: GibbsResamplable<X>,
{
    /// A Gaussian mixture with every parameter drawn from the priors in
    /// `config`
    pub fn gaussian<R: Rng>(
        config: &MixtureConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let components = (0..config.k)
            .map(|_| {
                Gaussian::from_prior(
                    config.sigmasq,
                    config.mu_0,
                    config.etasq_0,
                    rng,
                )
            })
            .collect::<Result<Vec<Gaussian>>>()?;
        let weights = Categorical::symmetric(config.k, config.alpha, rng)?;
        MixtureModel::new(components, weights)
    }
}

impl<'a, X, Fx> MixtureModel<'a, X, Fx>
where
    Fx: GibbsResamplable<X> + Clone,
{
    /// Create a mixture from existing components and weights
    ///
    /// There must be at least one component and exactly one weight per
    /// component.
    pub fn new(components: Vec<Fx>, weights: Categorical) -> Result<Self> {
        if components.is_empty() {
            Err(Error::invalid_parameter(
                "at least one component is required",
            ))
        } else if weights.k() != components.len() {
            Err(Error::invalid_configuration(format!(
                "weights over {} categories given for {} components",
                weights.k(),
                components.len()
            )))
        } else {
            Ok(MixtureModel {
                components,
                weights,
                assignments: Vec::new(),
            })
        }
    }

    /// The number of components
    #[inline]
    pub fn k(&self) -> usize {
        self.components.len()
    }

    #[inline]
    pub fn components(&self) -> &[Fx] {
        &self.components
    }

    #[inline]
    pub fn weights(&self) -> &Categorical {
        &self.weights
    }

    #[inline]
    pub fn assignments(&self) -> &[LabelAssignment<'a, X>] {
        &self.assignments
    }

    /// The number of datasets added with [`add_data`](Self::add_data)
    #[inline]
    pub fn n_datasets(&self) -> usize {
        self.assignments.len()
    }

    /// The labels of the dataset at `ix`, if there is one
    pub fn labels(&self, ix: usize) -> Option<&[usize]> {
        self.assignments.get(ix).map(|asgn| asgn.labels())
    }

    /// Attach a dataset with labels drawn from the current weights. Returns
    /// the index of the new assignment.
    pub fn add_data<R: Rng>(
        &mut self,
        xs: &'a [X],
        rng: &mut R,
    ) -> Result<usize> {
        let asgn =
            LabelAssignment::new(xs, &self.components, &self.weights, rng)?;
        self.assignments.push(asgn);
        Ok(self.assignments.len() - 1)
    }

    /// Attach a dataset with explicit labels. Returns the index of the new
    /// assignment.
    pub fn add_labeled_data(
        &mut self,
        xs: &'a [X],
        labels: Vec<usize>,
    ) -> Result<usize> {
        let asgn = LabelAssignment::with_labels(xs, self.k(), labels)?;
        self.assignments.push(asgn);
        Ok(self.assignments.len() - 1)
    }

    /// One sufficient statistic per component from the current labels
    fn component_stats(&self) -> Result<Vec<<Fx as HasSuffStat<X>>::Stat>> {
        let mut stats: Vec<<Fx as HasSuffStat<X>>::Stat> = self
            .components
            .iter()
            .map(|cpnt| cpnt.empty_suffstat())
            .collect();

        self.assignments.iter().try_for_each(|asgn| {
            asgn.iter().try_for_each(|(x, zi)| stats[zi].observe(x))
        })?;

        Ok(stats)
    }

    fn label_stat(&self) -> Result<CategoricalSuffStat> {
        let mut stat = CategoricalSuffStat::new(self.k());
        self.assignments.iter().try_for_each(|asgn| {
            asgn.labels()
                .iter()
                .try_for_each(|zi| SuffStat::<usize>::observe(&mut stat, zi))
        })?;
        Ok(stat)
    }

    /// Run one Gibbs sweep: components, then weights, then labels.
    ///
    /// Each step is committed only if it succeeds, so a failing step leaves
    /// the model as it was after the previous step.
    pub fn resample_model<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        // 1. components
        let stats = self.component_stats()?;
        let mut components = self.components.clone();
        components
            .iter_mut()
            .zip(stats.iter())
            .try_for_each(|(cpnt, stat)| cpnt.resample_stat(stat, rng))?;
        self.components = components;

        // 2. weights
        let stat = self.label_stat()?;
        let mut weights = self.weights.clone();
        <Categorical as GibbsResamplable<usize>>::resample_stat(
            &mut weights,
            &stat,
            rng,
        )?;
        self.weights = weights;

        // 3. labels
        let mut assignments = self.assignments.clone();
        assignments.iter_mut().try_for_each(|asgn| {
            asgn.resample(&self.components, &self.weights, rng)
        })?;
        self.assignments = assignments;

        log::debug!(
            "sweep: k = {}, datasets = {}, weights = [{}]",
            self.k(),
            self.n_datasets(),
            self.weights
                .weights()
                .iter()
                .map(|w| format!("{w:.3}"))
                .join(", ")
        );
        Ok(())
    }

    /// Run `n_iters` sweeps, stopping at the first that fails
    pub fn run<R: Rng>(&mut self, n_iters: usize, rng: &mut R) -> Result<()> {
        (0..n_iters).try_for_each(|_| self.resample_model(rng))
    }

    /// The complete-data log likelihood of every dataset under the current
    /// components, weights and labels,
    /// `Σ_n ln π_{z_n} + ln f_{z_n}(x_n)`.
    ///
    /// Computed from the per-component and label sufficient statistics.
    pub fn ln_score(&self) -> Result<f64> {
        let ln_f_data: f64 = self
            .components
            .iter()
            .zip(self.component_stats()?.iter())
            .map(|(cpnt, stat)| <Fx as HasSuffStat<X>>::ln_f_stat(cpnt, stat))
            .sum();
        let ln_f_labels = <Categorical as HasSuffStat<usize>>::ln_f_stat(
            &self.weights,
            &self.label_stat()?,
        );
        Ok(ln_f_data + ln_f_labels)
    }
}
