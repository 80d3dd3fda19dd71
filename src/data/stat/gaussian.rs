#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::result::{Error, Result};
use crate::traits::SuffStat;

/// Gaussian sufficient statistic.
///
/// Holds the number of observations, their sum, and the sum of their squared
/// values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct GaussianSuffStat {
    /// Number of observations
    n: usize,
    /// Sum of `x`
    sum_x: f64,
    /// Sum of `x^2`
    sum_x_sq: f64,
}

impl GaussianSuffStat {
    #[inline]
    pub fn new() -> Self {
        GaussianSuffStat {
            n: 0,
            sum_x: 0.0,
            sum_x_sq: 0.0,
        }
    }

    /// Create a sufficient statistic from components without checking whether
    /// they are valid.
    #[inline]
    pub fn from_parts_unchecked(n: usize, sum_x: f64, sum_x_sq: f64) -> Self {
        GaussianSuffStat { n, sum_x, sum_x_sq }
    }

    /// Get the number of observations
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Get the sample mean. Zero if there are no observations.
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.sum_x / self.n as f64
        }
    }

    /// Sum of `x`
    #[inline]
    pub fn sum_x(&self) -> f64 {
        self.sum_x
    }

    /// Sum of `x^2`
    #[inline]
    pub fn sum_x_sq(&self) -> f64 {
        self.sum_x_sq
    }

    #[inline]
    fn observe_f64(&mut self, x: f64) {
        self.n += 1;
        self.sum_x += x;
        self.sum_x_sq = x.mul_add(x, self.sum_x_sq);
    }
}

impl Default for GaussianSuffStat {
    fn default() -> Self {
        GaussianSuffStat::new()
    }
}

#[inline]
fn check_finite(x: f64) -> Result<f64> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(Error::domain(format!("non-finite observation: {x}")))
    }
}

/// Extract the value of a one-dimensional row
#[inline]
pub(crate) fn scalar_row(row: &[f64]) -> Result<f64> {
    match row {
        [x] => Ok(*x),
        _ => Err(Error::dimension_mismatch(1, row.len())),
    }
}

macro_rules! impl_gaussian_suffstat {
    ($kind:ty) => {
        impl SuffStat<$kind> for GaussianSuffStat {
            fn n(&self) -> usize {
                self.n
            }

            fn observe(&mut self, x: &$kind) -> Result<()> {
                check_finite(f64::from(*x)).map(|xf| self.observe_f64(xf))
            }
        }
    };
}

impl_gaussian_suffstat!(f32);
impl_gaussian_suffstat!(f64);

impl SuffStat<Vec<f64>> for GaussianSuffStat {
    fn n(&self) -> usize {
        self.n
    }

    fn observe(&mut self, x: &Vec<f64>) -> Result<()> {
        let xf = scalar_row(x).and_then(check_finite)?;
        self.observe_f64(xf);
        Ok(())
    }
}
