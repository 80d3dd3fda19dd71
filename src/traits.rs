//! Capabilities shared by mixture components
use rand::Rng;

use crate::result::Result;

/// A distribution over `X` that can be sampled from and scored.
pub trait Distribution<X> {
    /// Single draw from the distribution
    ///
    /// Fails only if the draw cannot be represented as an `X`.
    fn draw<R: Rng>(&self, rng: &mut R) -> Result<X>;

    /// Multiple draws from the distribution
    ///
    /// # Example
    ///
    /// ```
    /// use mixgibbs::prelude::*;
    ///
    /// let mut rng = rand::thread_rng();
    /// let gauss = Gaussian::new(0.0, 1.0, 0.0, 2.0).unwrap();
    /// let xs: Vec<f64> = gauss.sample(10, &mut rng).unwrap();
    ///
    /// assert_eq!(xs.len(), 10);
    /// ```
    fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Result<Vec<X>> {
        (0..n).map(|_| self.draw(rng)).collect()
    }

    /// The normalized log density (or mass) of `x`
    ///
    /// Returns an error if `x` has the wrong dimensionality or lies outside
    /// the domain the distribution is defined on.
    fn ln_f(&self, x: &X) -> Result<f64>;

    /// The log density of each observation in `xs`, in order.
    fn log_likelihood(&self, xs: &[X]) -> Result<Vec<f64>> {
        xs.iter().map(|x| self.ln_f(x)).collect()
    }
}

/// The data for this distribution can be summarized by a statistic
pub trait HasSuffStat<X> {
    type Stat: SuffStat<X>;

    /// An statistic summarizing no data
    fn empty_suffstat(&self) -> Self::Stat;

    /// Return the log likelihood for the data represented by the sufficient
    /// statistic.
    fn ln_f_stat(&self, stat: &Self::Stat) -> f64;
}

/// Is a [sufficient statistic](https://en.wikipedia.org/wiki/Sufficient_statistic)
/// for a distribution.
///
/// # Example
///
/// ```
/// use mixgibbs::data::CategoricalSuffStat;
/// use mixgibbs::traits::SuffStat;
///
/// let mut stat = CategoricalSuffStat::new(3);
/// stat.observe_many(&[0_usize, 2, 2]).unwrap();
/// assert_eq!(stat.n(), 3);
///
/// // 3 is not a category when k = 3
/// assert!(stat.observe(&3_usize).is_err());
/// assert_eq!(stat.n(), 3);
/// ```
pub trait SuffStat<X> {
    /// Returns the number of observations
    fn n(&self) -> usize;

    /// Assimilate the datum `x` into the statistic
    ///
    /// The statistic is unchanged if `x` is rejected.
    fn observe(&mut self, x: &X) -> Result<()>;

    /// Assimilate several observations
    fn observe_many(&mut self, xs: &[X]) -> Result<()> {
        xs.iter().try_for_each(|x| self.observe(x))
    }
}

/// A component whose parameters can be redrawn from their conjugate
/// posterior.
pub trait GibbsResamplable<X>: Distribution<X> + HasSuffStat<X> {
    /// Replace the parameters with a single draw from the posterior given the
    /// data summarized in `stat`. An empty statistic draws from the prior.
    fn resample_stat<R: Rng>(
        &mut self,
        stat: &Self::Stat,
        rng: &mut R,
    ) -> Result<()>;

    /// Replace the parameters with a single draw from the posterior given
    /// `xs`.
    ///
    /// # Example
    ///
    /// ```
    /// use mixgibbs::prelude::*;
    /// use rand::SeedableRng;
    /// use rand::rngs::SmallRng;
    ///
    /// let mut rng = SmallRng::seed_from_u64(0x1234);
    /// let mut gauss = Gaussian::new(0.0, 1.0, 0.0, 100.0).unwrap();
    ///
    /// let xs: Vec<f64> = vec![4.9, 5.1, 5.0, 4.8, 5.2];
    /// gauss.resample(&xs, &mut rng).unwrap();
    ///
    /// assert!((gauss.mu() - 5.0).abs() < 2.0);
    /// ```
    fn resample<R: Rng>(&mut self, xs: &[X], rng: &mut R) -> Result<()> {
        let mut stat = self.empty_suffstat();
        stat.observe_many(xs)?;
        self.resample_stat(&stat, rng)
    }
}
