//! Categorical distribution of x<sub>k</sub> in {0, 1, ..., k-1} with a
//! Dirichlet prior on its weights
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use rand::Rng;

use crate::consts::SIMPLEX_TOL;
use crate::data::{CategoricalDatum, CategoricalSuffStat};
use crate::dist::Dirichlet;
use crate::impl_display;
use crate::misc::{ln_pflip, vec_to_string};
use crate::result::{Error, Result};
use crate::traits::{Distribution, GibbsResamplable, HasSuffStat};

/// [Categorical distribution](https://en.wikipedia.org/wiki/Categorical_distribution)
/// over unordered values in [0, k), with weights π ~ Dir(α).
///
/// Used both as the prior over mixture labels and as a mixture component.
///
/// # Example
///
/// ```
/// use mixgibbs::prelude::*;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut rng = SmallRng::seed_from_u64(0x1234);
///
/// let cat = Categorical::new(&[0.1, 0.2, 0.7], vec![1.0; 3]).unwrap();
/// assert!((cat.ln_f(&2_usize).unwrap() - 0.7_f64.ln()).abs() < 1E-12);
///
/// // 3 is not a category
/// assert!(cat.ln_f(&3_usize).is_err());
///
/// let xs: Vec<usize> = cat.sample(100, &mut rng).unwrap();
/// assert!(xs.iter().all(|&x| x < 3));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Categorical {
    /// The weights, π
    weights: Vec<f64>,
    // Cached ln(π) for the likelihood
    ln_weights: Vec<f64>,
    /// Prior on the weights
    prior: Dirichlet,
}

impl Categorical {
    /// Construct a new Categorical distribution from weights
    ///
    /// # Arguments
    /// - weights: A vector describing the proportional likelihood of each
    ///   outcome. The weights must all be non-negative, but do not need to sum
    ///   to 1 because they will be normalized in the constructor.
    /// - alpha: The Dirichlet concentration on the weights. Must have the same
    ///   length as `weights`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mixgibbs::dist::Categorical;
    /// let cat =
    ///     Categorical::new(&[4.0, 2.0, 3.0, 1.0], vec![1.0; 4]).unwrap();
    /// assert!((cat.weights()[0] - 0.4).abs() < 1E-12);
    ///
    /// // alpha and the weights must agree on k
    /// assert!(Categorical::new(&[0.5, 0.5], vec![1.0; 3]).is_err());
    /// ```
    pub fn new(weights: &[f64], alpha: Vec<f64>) -> Result<Self> {
        let prior = Dirichlet::new(alpha)?;
        if weights.len() != prior.k() {
            return Err(Error::invalid_parameter(format!(
                "{} weights given with {} alphas",
                weights.len(),
                prior.k()
            )));
        }

        weights.iter().enumerate().try_for_each(|(ix, &weight)| {
            if weight < 0.0 {
                Err(Error::invalid_parameter(format!(
                    "negative weight at index {ix}: {weight}"
                )))
            } else if !weight.is_finite() {
                Err(Error::invalid_parameter(format!(
                    "non-finite weight at index {ix}: {weight}"
                )))
            } else {
                Ok(())
            }
        })?;

        let norm: f64 = weights.iter().sum();
        if norm <= 0.0 {
            return Err(Error::invalid_parameter("weights sum to zero"));
        }

        let normed: Vec<f64> = weights.iter().map(|w| w / norm).collect();
        Ok(Categorical::from_parts_unchecked(normed, prior))
    }

    /// Construct a Categorical with weights drawn from Dir(`alpha`)
    ///
    /// # Example
    ///
    /// ```
    /// # use mixgibbs::dist::Categorical;
    /// let mut rng = rand::thread_rng();
    /// let cat =
    ///     Categorical::from_prior(vec![1.0, 2.0, 0.5], &mut rng).unwrap();
    ///
    /// assert_eq!(cat.k(), 3);
    /// assert!((cat.weights().iter().sum::<f64>() - 1.0).abs() < 1E-10);
    /// ```
    pub fn from_prior<R: Rng>(alpha: Vec<f64>, rng: &mut R) -> Result<Self> {
        let prior = Dirichlet::new(alpha)?;
        let weights = prior.draw(rng)?;
        Ok(Categorical::from_parts_unchecked(weights, prior))
    }

    /// Construct a Categorical over [0, k) with weights drawn from a
    /// symmetric Dirichlet, Dir(`alpha`, ..., `alpha`)
    pub fn symmetric<R: Rng>(
        k: usize,
        alpha: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if k == 0 {
            return Err(Error::invalid_parameter("k must be greater than zero"));
        }
        Categorical::from_prior(vec![alpha; k], rng)
    }

    fn from_parts_unchecked(weights: Vec<f64>, prior: Dirichlet) -> Self {
        let ln_weights = weights.iter().map(|w| w.ln()).collect();
        Categorical {
            weights,
            ln_weights,
            prior,
        }
    }

    /// Get the number of possible outcomes
    #[inline]
    pub fn k(&self) -> usize {
        self.weights.len()
    }

    /// The weights, π
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The log weights, ln(π)
    #[inline]
    pub fn ln_weights(&self) -> &[f64] {
        &self.ln_weights
    }

    /// The Dirichlet concentration on the weights, α
    #[inline]
    pub fn alpha(&self) -> &[f64] {
        self.prior.alphas()
    }

    /// The prior on the weights
    #[inline]
    pub fn prior(&self) -> &Dirichlet {
        &self.prior
    }

    /// Draw `n` category indices and encode them as `X`.
    ///
    /// Fails up front if `X` cannot hold the largest index, `k - 1`, so a
    /// narrow datum type never wraps.
    fn draw_categories<X, R>(&self, n: usize, rng: &mut R) -> Result<Vec<X>>
    where
        X: CategoricalDatum,
        R: Rng,
    {
        let max_ix = self.k() - 1;
        if X::from_category(max_ix).is_none() {
            return Err(Error::domain(format!(
                "category {max_ix} cannot be represented as {}",
                std::any::type_name::<X>()
            )));
        }

        ln_pflip(&self.ln_weights, n, true, rng)?
            .into_iter()
            .map(|ix| {
                X::from_category(ix).ok_or_else(|| {
                    Error::domain(format!("unrepresentable category {ix}"))
                })
            })
            .collect()
    }
}

impl From<&Categorical> for String {
    fn from(cat: &Categorical) -> String {
        format!(
            "Categorical({}; π: {}) | π ~ {}",
            cat.k(),
            vec_to_string(&cat.weights, 5),
            String::from(&cat.prior)
        )
    }
}

impl_display!(Categorical);

impl<X: CategoricalDatum> Distribution<X> for Categorical {
    fn draw<R: Rng>(&self, rng: &mut R) -> Result<X> {
        self.draw_categories(1, rng).map(|xs| xs[0])
    }

    fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Result<Vec<X>> {
        self.draw_categories(n, rng)
    }

    fn ln_f(&self, x: &X) -> Result<f64> {
        let ix = x.category_in(self.k())?;
        Ok(self.ln_weights[ix])
    }
}

impl<X: CategoricalDatum> HasSuffStat<X> for Categorical {
    type Stat = CategoricalSuffStat;

    fn empty_suffstat(&self) -> Self::Stat {
        CategoricalSuffStat::new(self.k())
    }

    fn ln_f_stat(&self, stat: &Self::Stat) -> f64 {
        self.ln_weights
            .iter()
            .zip(stat.counts().iter())
            .filter(|(_, &ct)| ct > 0.0)
            .map(|(&w, &ct)| ct * w)
            .sum()
    }
}

impl<X: CategoricalDatum> GibbsResamplable<X> for Categorical {
    fn resample_stat<R: Rng>(
        &mut self,
        stat: &Self::Stat,
        rng: &mut R,
    ) -> Result<()> {
        if stat.k() != self.k() {
            return Err(Error::dimension_mismatch(self.k(), stat.k()));
        }

        let weights = self.prior.posterior(stat.counts())?.draw(rng)?;
        if weights.iter().any(|w| !(0.0..=1.0).contains(w))
            || (weights.iter().sum::<f64>() - 1.0).abs() > SIMPLEX_TOL
        {
            return Err(Error::invariant(format!(
                "resampled weights {} are not a distribution",
                vec_to_string(&weights, 5)
            )));
        }

        self.ln_weights = weights.iter().map(|w| w.ln()).collect();
        self.weights = weights;
        log::trace!("resampled weights from n = {}", stat.n());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ErrorKind;
    use crate::traits::SuffStat;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;
    use special::Gamma as _;

    const TOL: f64 = 1E-12;
    const N_TRIES: usize = 5;
    const X2_PVAL: f64 = 0.2;

    crate::test_basic_impls!(
        Categorical::new(&[1.0, 2.0, 3.0], vec![1.0; 3]).unwrap()
    );

    fn uniform(k: usize) -> Categorical {
        Categorical::new(&vec![1.0; k], vec![1.0; k]).unwrap()
    }

    /// Pearson's chi-squared statistic and its p-value
    fn x2_test(f_obs: &[u32], ps: &[f64]) -> (f64, f64) {
        let k = f_obs.len();
        let nf = f64::from(f_obs.iter().sum::<u32>());
        let x2 = f_obs.iter().zip(ps.iter()).fold(0.0, |acc, (&o, &p)| {
            let e = nf * p;
            (f64::from(o) - e).powi(2).mul_add(e.recip(), acc)
        });
        let df = (k - 1) as f64;
        let p = 1.0 - (x2 / 2.0).inc_gamma(df / 2.0);
        (x2, p)
    }

    #[test]
    fn x2_test_against_known_value() {
        let (x2, p) = x2_test(&[28, 31, 40, 35], &[0.25; 4]);
        assert::close(x2, 2.417_910_447_761_194, 1E-10);
        assert::close(p, 0.490_309_306_965_388_33, 1E-10);
    }

    #[test]
    fn new_normalizes_weights() {
        let cat = Categorical::new(&[2.0, 1.0, 2.0, 3.0, 2.0], vec![1.0; 5])
            .unwrap();
        assert::close(cat.weights().iter().sum::<f64>(), 1.0, TOL);
        assert::close(cat.weights()[3], 0.3, TOL);
    }

    #[test]
    fn new_rejects_bad_weights() {
        let errs = [
            Categorical::new(&[0.5, -0.5], vec![1.0; 2]),
            Categorical::new(&[0.5, f64::NAN], vec![1.0; 2]),
            Categorical::new(&[0.0, 0.0], vec![1.0; 2]),
            Categorical::new(&[0.5, 0.5], vec![1.0; 3]),
            Categorical::new(&[], vec![]),
            Categorical::new(&[0.5, 0.5], vec![1.0, 0.0]),
        ];
        for res in errs.iter() {
            let err = res.clone().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        }
    }

    #[test]
    fn symmetric_with_zero_k_is_invalid() {
        let mut rng = SmallRng::seed_from_u64(0x1234);
        let err = Categorical::symmetric(0, 1.0, &mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn from_prior_sets_alpha_before_drawing() {
        let mut rng = SmallRng::seed_from_u64(0x1234);
        let cat = Categorical::from_prior(vec![0.5, 1.5], &mut rng).unwrap();
        assert_eq!(cat.alpha(), &[0.5, 1.5]);
        assert_eq!(cat.k(), 2);
        assert::close(cat.weights().iter().sum::<f64>(), 1.0, 1E-10);
    }

    #[test]
    fn ln_f_should_be_ln_weight() {
        let cat = Categorical::new(&[2.0, 1.0, 2.0, 4.0, 3.0], vec![1.0; 5])
            .unwrap();
        assert::close(cat.ln_f(&0_u8).unwrap(), -1.791_759_469_228_055, TOL);
        assert::close(
            cat.ln_f(&1_u8).unwrap(),
            -2.484_906_649_788_000_4,
            TOL,
        );
        assert::close(cat.ln_f(&2_u8).unwrap(), -1.791_759_469_228_055, TOL);
        assert::close(
            cat.ln_f(&3_u8).unwrap(),
            -1.098_612_288_668_109_8,
            TOL,
        );
        assert::close(
            cat.ln_f(&4_u8).unwrap(),
            -1.386_294_361_119_890_6,
            TOL,
        );
    }

    #[test]
    fn log_likelihood_accepts_whole_floats() {
        let cat = Categorical::new(&[0.25, 0.75], vec![1.0; 2]).unwrap();
        let lls = cat.log_likelihood(&[1.0_f64, 0.0]).unwrap();
        assert::close(lls[0], 0.75_f64.ln(), TOL);
        assert::close(lls[1], 0.25_f64.ln(), TOL);
    }

    #[test]
    fn ln_f_outside_domain_is_an_error() {
        let cat = uniform(3);
        let err = cat.ln_f(&3_usize).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DomainError);
        let err = cat.ln_f(&0.5_f64).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DomainError);
        let err = cat.ln_f(&-1_i32).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DomainError);
    }

    #[test]
    fn resample_with_bad_labels_is_an_error() {
        let mut rng = SmallRng::seed_from_u64(0x1234);
        let mut cat = uniform(3);
        let err = cat.resample(&[0_usize, 1, 5], &mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DomainError);
        assert_eq!(cat, uniform(3));
    }

    #[test]
    fn resample_with_wrong_size_stat_is_dimension_mismatch() {
        let mut rng = SmallRng::seed_from_u64(0x1234);
        let mut cat = uniform(3);
        let stat = CategoricalSuffStat::new(4);
        let err = <Categorical as GibbsResamplable<usize>>::resample_stat(
            &mut cat, &stat, &mut rng,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn draw_should_return_numbers_in_0_to_k() {
        let mut rng = SmallRng::seed_from_u64(0x1234);
        let k = 5;
        let cat = uniform(k);
        let mut counts = vec![0; k];
        for _ in 0..1000 {
            let ix: usize = cat.draw(&mut rng).unwrap();
            counts[ix] += 1;
            assert!(ix < 5);
        }
        assert!(counts.iter().all(|&ct| ct > 0));
    }

    #[test]
    fn sample_should_return_the_correct_number_of_draws() {
        let mut rng = SmallRng::seed_from_u64(0x1234);
        let cat = uniform(5);
        let xs: Vec<u8> = cat.sample(103, &mut rng).unwrap();
        assert_eq!(xs.len(), 103);
    }

    #[test]
    fn zero_weight_categories_are_never_drawn() {
        let mut rng = SmallRng::seed_from_u64(0x1234);
        let cat = Categorical::new(&[0.0, 1.0, 0.0], vec![1.0; 3]).unwrap();
        let xs: Vec<usize> = cat.sample(500, &mut rng).unwrap();
        assert!(xs.iter().all(|&x| x == 1));
        assert_eq!(cat.ln_f(&0_usize).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn draw_test() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
        let cat =
            Categorical::new(&[1.0, 2.0, 3.0, 4.0], vec![1.0; 4]).unwrap();
        let ps: Vec<f64> = vec![0.1, 0.2, 0.3, 0.4];

        let passes = (0..N_TRIES).fold(0, |acc, _| {
            let mut f_obs: Vec<u32> = vec![0; 4];
            let xs: Vec<usize> = cat.sample(1000, &mut rng).unwrap();
            xs.iter().for_each(|&x| f_obs[x] += 1);
            let (_, p) = x2_test(&f_obs, &ps);
            if p > X2_PVAL {
                acc + 1
            } else {
                acc
            }
        });
        assert!(passes > 0);
    }

    #[test]
    fn ln_f_stat() {
        let data: Vec<u8> = vec![0, 1, 2, 1, 1, 0];
        let mut stat = CategoricalSuffStat::new(3);
        stat.observe_many(&data).unwrap();

        let cat = Categorical::new(&[0.3, 0.6, 0.1], vec![1.0; 3]).unwrap();

        let ln_f_base: f64 = cat.log_likelihood(&data).unwrap().iter().sum();
        let ln_f_stat: f64 =
            <Categorical as HasSuffStat<u8>>::ln_f_stat(&cat, &stat);

        assert::close(ln_f_base, ln_f_stat, TOL);
    }

    #[test]
    fn ln_f_stat_ignores_unobserved_zero_weights() {
        let cat = Categorical::new(&[0.0, 1.0], vec![1.0; 2]).unwrap();
        let stat = CategoricalSuffStat::from_parts_unchecked(2, vec![0.0, 2.0]);
        let ln_f = <Categorical as HasSuffStat<u8>>::ln_f_stat(&cat, &stat);
        assert::close(ln_f, 0.0, TOL);
    }

    #[test]
    fn resample_with_no_data_draws_from_prior() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0xABCD);
        let alpha = vec![1.0, 2.0, 3.0];
        let a0: f64 = alpha.iter().sum();
        let mut cat =
            Categorical::new(&[1.0, 1.0, 1.0], alpha.clone()).unwrap();
        let empty: Vec<usize> = vec![];

        let n = 10_000;
        let mut sums = vec![0.0; 3];
        let mut sq_sums = vec![0.0; 3];
        for _ in 0..n {
            cat.resample(&empty, &mut rng).unwrap();
            cat.weights().iter().enumerate().for_each(|(ix, &w)| {
                sums[ix] += w;
                sq_sums[ix] += w * w;
            });
        }

        let nf = n as f64;
        for ix in 0..3 {
            let mean = sums[ix] / nf;
            let var = sq_sums[ix] / nf - mean * mean;
            let a = alpha[ix];
            assert::close(mean, a / a0, 0.01);
            assert::close(var, a * (a0 - a) / (a0 * a0 * (a0 + 1.0)), 0.005);
        }
    }

    #[test]
    fn resample_recovers_true_weights() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
        let truth = Categorical::symmetric(6, 1.0, &mut rng).unwrap();
        let xs: Vec<usize> = truth.sample(10_000, &mut rng).unwrap();

        let mut cat = Categorical::symmetric(6, 1.0, &mut rng).unwrap();
        cat.resample(&xs, &mut rng).unwrap();

        let l1: f64 = cat
            .weights()
            .iter()
            .zip(truth.weights().iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        assert!(l1 < 0.05, "L1 distance {l1}");
    }

    #[test]
    fn narrow_datum_type_cannot_wrap() {
        let mut rng = SmallRng::seed_from_u64(0x1234);
        let mut weights = vec![0.0; 300];
        weights[299] = 1.0;
        let cat = Categorical::new(&weights, vec![1.0; 300]).unwrap();

        let err = Distribution::<u8>::sample(&cat, 10, &mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DomainError);
        let err = Distribution::<u8>::draw(&cat, &mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DomainError);

        let xs: Vec<u16> = cat.sample(10, &mut rng).unwrap();
        assert!(xs.iter().all(|&x| x == 299));
    }

    #[test]
    fn narrow_datum_type_is_fine_when_k_fits() {
        let mut rng = SmallRng::seed_from_u64(0x1234);
        let cat = uniform(256);
        let xs: Vec<u8> = cat.sample(1000, &mut rng).unwrap();
        assert_eq!(xs.len(), 1000);
    }

    #[test]
    fn symmetric_with_tiny_alpha_always_constructs() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
        for _ in 0..1000 {
            let cat = Categorical::symmetric(2, 1E-3, &mut rng).unwrap();
            assert::close(cat.weights().iter().sum::<f64>(), 1.0, 1E-10);
            assert!(cat.weights().iter().all(|w| (0.0..=1.0).contains(w)));
        }
    }
}
