use rand::Rng;

use crate::dist::Categorical;
use crate::misc::{ln_pflip, normalize_ln_weights};
use crate::result::{Error, Result};
use crate::traits::Distribution;

/// Latent component labels for one dataset.
///
/// Borrows the dataset for its whole life. The components and weights are
/// owned elsewhere, usually by a
/// [`MixtureModel`](crate::mixture::MixtureModel), and passed in for each
/// operation, so the labels never copy or outlive them.
///
/// # Example
///
/// ```
/// use mixgibbs::prelude::*;
/// use mixgibbs::mixture::LabelAssignment;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut rng = SmallRng::seed_from_u64(0x1234);
///
/// let components = vec![
///     Gaussian::new(-5.0, 1.0, 0.0, 10.0).unwrap(),
///     Gaussian::new(5.0, 1.0, 0.0, 10.0).unwrap(),
/// ];
/// let weights = Categorical::new(&[0.5, 0.5], vec![1.0; 2]).unwrap();
///
/// let xs: Vec<f64> = vec![-5.2, -4.9, 5.1, 4.8];
/// let mut asgn =
///     LabelAssignment::new(&xs, &components, &weights, &mut rng).unwrap();
///
/// asgn.resample(&components, &weights, &mut rng).unwrap();
/// assert_eq!(asgn.labels(), &[0, 0, 1, 1]);
/// ```
#[derive(Debug, PartialEq)]
pub struct LabelAssignment<'a, X> {
    /// The observations
    data: &'a [X],
    /// The number of components
    k: usize,
    /// The component label of each observation
    z: Vec<usize>,
}

// Only the labels are owned, so cloning never requires `X: Clone`
impl<'a, X> Clone for LabelAssignment<'a, X> {
    fn clone(&self) -> Self {
        LabelAssignment {
            data: self.data,
            k: self.k,
            z: self.z.clone(),
        }
    }
}

fn check_config<X, Fx: Distribution<X>>(
    k: usize,
    components: &[Fx],
    weights: &Categorical,
) -> Result<()> {
    if components.len() != k {
        Err(Error::invalid_configuration(format!(
            "{} components given for k = {k}",
            components.len()
        )))
    } else if weights.k() != k {
        Err(Error::invalid_configuration(format!(
            "weights over {} categories given for k = {k}",
            weights.k()
        )))
    } else {
        Ok(())
    }
}

impl<'a, X> LabelAssignment<'a, X> {
    /// Create labels for `data` by drawing each from `weights`
    ///
    /// # Arguments
    /// - data: the observations
    /// - components: one distribution per mixture component
    /// - weights: the prior over labels. Must have one category per component.
    pub fn new<Fx, R>(
        data: &'a [X],
        components: &[Fx],
        weights: &Categorical,
        rng: &mut R,
    ) -> Result<Self>
    where
        Fx: Distribution<X>,
        R: Rng,
    {
        let k = components.len();
        if k == 0 {
            return Err(Error::invalid_parameter(
                "at least one component is required",
            ));
        }
        check_config(k, components, weights)?;

        let z = <Categorical as Distribution<usize>>::sample(
            weights,
            data.len(),
            rng,
        )?;
        Ok(LabelAssignment { data, k, z })
    }

    /// Create labels for `data` from existing labels
    ///
    /// # Example
    ///
    /// ```
    /// # use mixgibbs::mixture::LabelAssignment;
    /// # use mixgibbs::result::ErrorKind;
    /// let xs: Vec<f64> = vec![0.1, 0.2, 0.3];
    ///
    /// let asgn = LabelAssignment::with_labels(&xs, 2, vec![0, 1, 1]).unwrap();
    /// assert_eq!(asgn.counts(), vec![1, 2]);
    ///
    /// // Labels must be in [0, k)
    /// let err =
    ///     LabelAssignment::with_labels(&xs, 2, vec![0, 2, 1]).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    /// ```
    pub fn with_labels(
        data: &'a [X],
        k: usize,
        z: Vec<usize>,
    ) -> Result<Self> {
        if k == 0 {
            return Err(Error::invalid_parameter(
                "k must be greater than zero",
            ));
        }
        if z.len() != data.len() {
            return Err(Error::invalid_configuration(format!(
                "{} labels given for {} observations",
                z.len(),
                data.len()
            )));
        }
        if let Some(zi) = z.iter().find(|&&zi| zi >= k) {
            return Err(Error::invalid_configuration(format!(
                "label {zi} out of range for k = {k}"
            )));
        }
        Ok(LabelAssignment { data, k, z })
    }

    /// The observations
    #[inline]
    pub fn data(&self) -> &'a [X] {
        self.data
    }

    /// The number of observations
    #[inline]
    pub fn n(&self) -> usize {
        self.data.len()
    }

    /// The number of components
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// The label of each observation
    #[inline]
    pub fn labels(&self) -> &[usize] {
        &self.z
    }

    /// The number of observations assigned to each component
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.k];
        self.z.iter().for_each(|&zi| counts[zi] += 1);
        counts
    }

    /// Iterate over `(observation, label)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&'a X, usize)> + '_ {
        self.data.iter().zip(self.z.iter().copied())
    }

    /// The unnormalized log responsibility, `ln π_k + ln f_k(x_n)`, of each
    /// component for each observation, as one row per component.
    fn ln_scores<Fx: Distribution<X>>(
        &self,
        components: &[Fx],
        weights: &Categorical,
    ) -> Result<Vec<Vec<f64>>> {
        check_config(self.k, components, weights)?;
        components
            .iter()
            .zip(weights.ln_weights().iter())
            .map(|(cpnt, &ln_w)| {
                cpnt.log_likelihood(self.data).map(|lls| {
                    lls.iter().map(|ll| ll + ln_w).collect::<Vec<f64>>()
                })
            })
            .collect()
    }

    /// The posterior probability that each observation was generated by each
    /// component, one row of `k` probabilities per observation.
    ///
    /// # Example
    ///
    /// ```
    /// use mixgibbs::prelude::*;
    /// use mixgibbs::mixture::LabelAssignment;
    ///
    /// let components = vec![
    ///     Gaussian::new(-1.0, 1.0, 0.0, 1.0).unwrap(),
    ///     Gaussian::new(1.0, 1.0, 0.0, 1.0).unwrap(),
    /// ];
    /// let weights = Categorical::new(&[0.5, 0.5], vec![1.0; 2]).unwrap();
    ///
    /// let xs: Vec<f64> = vec![0.0];
    /// let asgn = LabelAssignment::with_labels(&xs, 2, vec![0]).unwrap();
    ///
    /// // Equidistant from both means
    /// let rs = asgn.responsibilities(&components, &weights).unwrap();
    /// assert!((rs[0][0] - 0.5).abs() < 1E-12);
    /// ```
    pub fn responsibilities<Fx: Distribution<X>>(
        &self,
        components: &[Fx],
        weights: &Categorical,
    ) -> Result<Vec<Vec<f64>>> {
        let scores = self.ln_scores(components, weights)?;
        (0..self.n())
            .map(|ix| {
                let ln_ws: Vec<f64> = scores.iter().map(|s| s[ix]).collect();
                normalize_ln_weights(&ln_ws)
            })
            .collect()
    }

    /// Redraw every label from its conditional posterior given the current
    /// `components` and `weights`.
    ///
    /// Each label is drawn independently with the parameters held fixed.
    pub fn resample<Fx, R>(
        &mut self,
        components: &[Fx],
        weights: &Categorical,
        rng: &mut R,
    ) -> Result<()>
    where
        Fx: Distribution<X>,
        R: Rng,
    {
        let scores = self.ln_scores(components, weights)?;

        // Draw into a scratch vector so a failure leaves the labels intact
        let mut ln_ws: Vec<f64> = vec![0.0; self.k];
        let z = (0..self.n())
            .map(|ix| {
                ln_ws
                    .iter_mut()
                    .zip(scores.iter())
                    .for_each(|(w, s)| *w = s[ix]);
                ln_pflip(&ln_ws, 1, false, rng).map(|zs| zs[0])
            })
            .collect::<Result<Vec<usize>>>()?;

        self.z = z;
        Ok(())
    }
}
