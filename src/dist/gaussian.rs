//! Gaussian with known variance and a Gaussian prior on its mean
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use rand::Rng;
use rand_distr::StandardNormal;

use crate::consts::HALF_LN_2PI;
use crate::data::GaussianSuffStat;
use crate::impl_display;
use crate::result::{Error, Result};
use crate::traits::{Distribution, GibbsResamplable, HasSuffStat};

/// Gaussian / [Normal distribution](https://en.wikipedia.org/wiki/Normal_distribution),
/// N(μ, σ²), with fixed variance σ² and a conjugate N(μ₀, η₀²) prior on μ.
///
/// # Examples
///
/// Draw μ from the prior, then update it with data.
///
/// ```
/// use mixgibbs::prelude::*;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut rng = SmallRng::seed_from_u64(0x1234);
///
/// let truth = Gaussian::new(3.0, 1.0, 0.0, 2.0).unwrap();
/// let xs: Vec<f64> = truth.sample(1000, &mut rng).unwrap();
///
/// let mut gauss = Gaussian::from_prior(1.0, 0.0, 2.0, &mut rng).unwrap();
/// gauss.resample(&xs, &mut rng).unwrap();
///
/// assert!((gauss.mu() - 3.0).abs() < 0.3);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde1", serde(try_from = "GaussianParameters"))]
#[cfg_attr(feature = "serde1", serde(into = "GaussianParameters"))]
pub struct Gaussian {
    /// Mean
    mu: f64,
    /// Fixed variance
    sigmasq: f64,
    /// Prior mean of `mu`
    mu_0: f64,
    /// Prior variance of `mu`
    etasq_0: f64,
    /// Cached sqrt(sigmasq)
    sigma: f64,
    /// Cached ln(sigma)
    ln_sigma: f64,
}

impl PartialEq for Gaussian {
    fn eq(&self, other: &Gaussian) -> bool {
        self.mu == other.mu
            && self.sigmasq == other.sigmasq
            && self.mu_0 == other.mu_0
            && self.etasq_0 == other.etasq_0
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct GaussianParameters {
    pub mu: f64,
    pub sigmasq: f64,
    pub mu_0: f64,
    pub etasq_0: f64,
}

impl TryFrom<GaussianParameters> for Gaussian {
    type Error = Error;

    fn try_from(params: GaussianParameters) -> Result<Self> {
        Gaussian::new(params.mu, params.sigmasq, params.mu_0, params.etasq_0)
    }
}

impl From<Gaussian> for GaussianParameters {
    fn from(gauss: Gaussian) -> Self {
        GaussianParameters {
            mu: gauss.mu,
            sigmasq: gauss.sigmasq,
            mu_0: gauss.mu_0,
            etasq_0: gauss.etasq_0,
        }
    }
}

fn check_hyper(sigmasq: f64, mu_0: f64, etasq_0: f64) -> Result<()> {
    if !(sigmasq > 0.0) {
        Err(Error::invalid_parameter(format!(
            "sigmasq ({sigmasq}) must be greater than zero"
        )))
    } else if !sigmasq.is_finite() {
        Err(Error::invalid_parameter(format!(
            "non-finite sigmasq: {sigmasq}"
        )))
    } else if !mu_0.is_finite() {
        Err(Error::invalid_parameter(format!("non-finite mu_0: {mu_0}")))
    } else if !(etasq_0 > 0.0) {
        Err(Error::invalid_parameter(format!(
            "etasq_0 ({etasq_0}) must be greater than zero"
        )))
    } else if !etasq_0.is_finite() {
        Err(Error::invalid_parameter(format!(
            "non-finite etasq_0: {etasq_0}"
        )))
    } else {
        Ok(())
    }
}

impl Gaussian {
    /// Create a new Gaussian with an explicit mean
    ///
    /// # Arguments
    /// - mu: mean
    /// - sigmasq: fixed variance
    /// - mu_0: prior mean of `mu`
    /// - etasq_0: prior variance of `mu`
    pub fn new(mu: f64, sigmasq: f64, mu_0: f64, etasq_0: f64) -> Result<Self> {
        check_hyper(sigmasq, mu_0, etasq_0)?;
        if !mu.is_finite() {
            return Err(Error::invalid_parameter(format!(
                "non-finite mu: {mu}"
            )));
        }
        Ok(Gaussian::new_unchecked(mu, sigmasq, mu_0, etasq_0))
    }

    /// Create a new Gaussian with `mu` drawn from its prior,
    /// N(`mu_0`, `etasq_0`).
    ///
    /// # Example
    ///
    /// ```rust
    /// # use mixgibbs::dist::Gaussian;
    /// let mut rng = rand::thread_rng();
    /// let gauss = Gaussian::from_prior(1.0, 0.0, 2.0, &mut rng).unwrap();
    ///
    /// assert!(gauss.mu().is_finite());
    /// assert!(Gaussian::from_prior(0.0, 0.0, 2.0, &mut rng).is_err());
    /// ```
    pub fn from_prior<R: Rng>(
        sigmasq: f64,
        mu_0: f64,
        etasq_0: f64,
        rng: &mut R,
    ) -> Result<Self> {
        check_hyper(sigmasq, mu_0, etasq_0)?;
        let mut gauss = Gaussian::new_unchecked(mu_0, sigmasq, mu_0, etasq_0);
        resample_mu(&mut gauss, &GaussianSuffStat::new(), rng)?;
        Ok(gauss)
    }

    /// Creates a new Gaussian without checking whether the parameters are
    /// valid.
    #[inline]
    pub fn new_unchecked(
        mu: f64,
        sigmasq: f64,
        mu_0: f64,
        etasq_0: f64,
    ) -> Self {
        let sigma = sigmasq.sqrt();
        Gaussian {
            mu,
            sigmasq,
            mu_0,
            etasq_0,
            sigma,
            ln_sigma: sigma.ln(),
        }
    }

    /// Get mu parameter
    ///
    /// # Example
    ///
    /// ```rust
    /// # use mixgibbs::dist::Gaussian;
    /// let gauss = Gaussian::new(2.0, 1.5, 0.0, 1.0).unwrap();
    ///
    /// assert_eq!(gauss.mu(), 2.0);
    /// ```
    #[inline]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// The fixed variance, σ²
    #[inline]
    pub fn sigmasq(&self) -> f64 {
        self.sigmasq
    }

    /// The standard deviation, σ
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Prior mean of `mu`
    #[inline]
    pub fn mu_0(&self) -> f64 {
        self.mu_0
    }

    /// Prior variance of `mu`
    #[inline]
    pub fn etasq_0(&self) -> f64 {
        self.etasq_0
    }

    /// The posterior mean and variance of `mu` given the data in `stat`
    ///
    /// # Example
    ///
    /// ```rust
    /// # use mixgibbs::dist::Gaussian;
    /// # use mixgibbs::data::GaussianSuffStat;
    /// let gauss = Gaussian::new(0.0, 1.0, 0.0, 1.0).unwrap();
    ///
    /// // No data: the prior
    /// let (m, v) = gauss.posterior(&GaussianSuffStat::new());
    /// assert_eq!((m, v), (0.0, 1.0));
    ///
    /// // One observation at 2 with equal prior and noise variance
    /// let stat = GaussianSuffStat::from_parts_unchecked(1, 2.0, 4.0);
    /// let (m, v) = gauss.posterior(&stat);
    /// assert!((m - 1.0).abs() < 1E-12);
    /// assert!((v - 0.5).abs() < 1E-12);
    /// ```
    pub fn posterior(&self, stat: &GaussianSuffStat) -> (f64, f64) {
        let n = stat.n() as f64;
        let v = (self.etasq_0.recip() + n / self.sigmasq).recip();
        let m = v * (self.mu_0 / self.etasq_0 + stat.sum_x() / self.sigmasq);
        (m, v)
    }

    #[inline]
    fn ln_f_f64(&self, x: f64) -> f64 {
        let k = (x - self.mu) / self.sigma;
        (0.5 * k).mul_add(-k, -self.ln_sigma) - HALF_LN_2PI
    }

    #[inline]
    fn draw_f64<R: Rng>(&self, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        self.sigma.mul_add(z, self.mu)
    }

    fn check_x(x: f64) -> Result<f64> {
        if x.is_finite() {
            Ok(x)
        } else {
            Err(Error::domain(format!("non-finite observation: {x}")))
        }
    }
}

impl From<&Gaussian> for String {
    fn from(gauss: &Gaussian) -> String {
        format!(
            "N(μ: {}, σ²: {}) | μ ~ N({}, {})",
            gauss.mu, gauss.sigmasq, gauss.mu_0, gauss.etasq_0
        )
    }
}

impl_display!(Gaussian);

macro_rules! impl_traits {
    ($kind:ty) => {
        impl Distribution<$kind> for Gaussian {
            fn draw<R: Rng>(&self, rng: &mut R) -> Result<$kind> {
                Ok(self.draw_f64(rng) as $kind)
            }

            fn ln_f(&self, x: &$kind) -> Result<f64> {
                Gaussian::check_x(f64::from(*x)).map(|xf| self.ln_f_f64(xf))
            }
        }

        impl HasSuffStat<$kind> for Gaussian {
            type Stat = GaussianSuffStat;

            fn empty_suffstat(&self) -> Self::Stat {
                GaussianSuffStat::new()
            }

            fn ln_f_stat(&self, stat: &Self::Stat) -> f64 {
                ln_f_stat(self, stat)
            }
        }

        impl GibbsResamplable<$kind> for Gaussian {
            fn resample_stat<R: Rng>(
                &mut self,
                stat: &Self::Stat,
                rng: &mut R,
            ) -> Result<()> {
                resample_mu(self, stat, rng)
            }
        }
    };
}

fn ln_f_stat(gauss: &Gaussian, stat: &GaussianSuffStat) -> f64 {
    let z = (2.0 * gauss.sigmasq).recip();
    let n = stat.n() as f64;
    let expterm = stat.sum_x_sq()
        + gauss
            .mu
            .mul_add(-2.0 * stat.sum_x(), n * gauss.mu * gauss.mu);
    -n.mul_add(gauss.ln_sigma + HALF_LN_2PI, z * expterm)
}

fn resample_mu<R: Rng>(
    gauss: &mut Gaussian,
    stat: &GaussianSuffStat,
    rng: &mut R,
) -> Result<()> {
    let (m, v) = gauss.posterior(stat);
    if !(v > 0.0 && v.is_finite()) || !m.is_finite() {
        return Err(Error::invariant(format!(
            "posterior N({m}, {v}) of mu is malformed"
        )));
    }
    let z: f64 = rng.sample(StandardNormal);
    gauss.mu = v.sqrt().mul_add(z, m);
    log::trace!("resampled mu = {} from n = {}", gauss.mu, stat.n());
    Ok(())
}

impl_traits!(f32);
impl_traits!(f64);

impl Distribution<Vec<f64>> for Gaussian {
    fn draw<R: Rng>(&self, rng: &mut R) -> Result<Vec<f64>> {
        Ok(vec![self.draw_f64(rng)])
    }

    fn ln_f(&self, x: &Vec<f64>) -> Result<f64> {
        let xf = crate::data::scalar_row(x)?;
        Gaussian::check_x(xf).map(|xf| self.ln_f_f64(xf))
    }
}

impl HasSuffStat<Vec<f64>> for Gaussian {
    type Stat = GaussianSuffStat;

    fn empty_suffstat(&self) -> Self::Stat {
        GaussianSuffStat::new()
    }

    fn ln_f_stat(&self, stat: &Self::Stat) -> f64 {
        ln_f_stat(self, stat)
    }
}

impl GibbsResamplable<Vec<f64>> for Gaussian {
    fn resample_stat<R: Rng>(
        &mut self,
        stat: &Self::Stat,
        rng: &mut R,
    ) -> Result<()> {
        resample_mu(self, stat, rng)
    }
}
