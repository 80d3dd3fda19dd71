#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::result::{Error, Result};

/// Hyperparameters of a finite Gaussian mixture with known component
/// variance.
///
/// # Example
///
/// ```
/// # use mixgibbs::mixture::MixtureConfig;
/// let config = MixtureConfig::symmetric(3, 1.0, 0.0, 10.0, 1.0);
/// assert!(config.validate().is_ok());
///
/// let bad = MixtureConfig { k: 0, ..config };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct MixtureConfig {
    /// The number of components
    pub k: usize,
    /// The known variance shared by every component
    pub sigmasq: f64,
    /// Prior mean of each component mean
    pub mu_0: f64,
    /// Prior variance of each component mean
    pub etasq_0: f64,
    /// Symmetric Dirichlet concentration of the mixture weights
    pub alpha: f64,
}

impl MixtureConfig {
    /// A mixture where every component shares the same priors
    pub fn symmetric(
        k: usize,
        sigmasq: f64,
        mu_0: f64,
        etasq_0: f64,
        alpha: f64,
    ) -> Self {
        MixtureConfig {
            k,
            sigmasq,
            mu_0,
            etasq_0,
            alpha,
        }
    }

    /// Check that every hyperparameter is usable
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            Err(Error::invalid_parameter("k must be greater than zero"))
        } else if !(self.sigmasq > 0.0 && self.sigmasq.is_finite()) {
            Err(Error::invalid_parameter(format!(
                "sigmasq ({}) must be positive and finite",
                self.sigmasq
            )))
        } else if !self.mu_0.is_finite() {
            Err(Error::invalid_parameter(format!(
                "non-finite mu_0: {}",
                self.mu_0
            )))
        } else if !(self.etasq_0 > 0.0 && self.etasq_0.is_finite()) {
            Err(Error::invalid_parameter(format!(
                "etasq_0 ({}) must be positive and finite",
                self.etasq_0
            )))
        } else if !(self.alpha > 0.0 && self.alpha.is_finite()) {
            Err(Error::invalid_parameter(format!(
                "alpha ({}) must be positive and finite",
                self.alpha
            )))
        } else {
            Ok(())
        }
    }
}

impl Default for MixtureConfig {
    fn default() -> Self {
        MixtureConfig::symmetric(2, 1.0, 0.0, 1.0, 1.0)
    }
}
