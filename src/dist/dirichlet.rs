//! Dirichlet distribution over simplexes
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use rand::distributions::Open01;
use rand::Rng;
use rand_distr::Gamma as RGamma;

use crate::consts::SIMPLEX_TOL;
use crate::impl_display;
use crate::misc::{normalize_ln_weights, vec_to_string};
use crate::result::{Error, Result};

/// [Dirichlet distribution](https://en.wikipedia.org/wiki/Dirichlet_distribution)
/// over points on the k-simplex.
///
/// Serves as the conjugate prior of the `Categorical` weights.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Dirichlet {
    /// A `Vec` of real numbers in (0, ∞)
    alphas: Vec<f64>,
}

impl Dirichlet {
    /// Creates a `Dirichlet` with a given `alphas` vector
    ///
    /// # Example
    ///
    /// ```
    /// # use mixgibbs::dist::Dirichlet;
    /// assert!(Dirichlet::new(vec![1.0, 2.0]).is_ok());
    /// assert!(Dirichlet::new(vec![]).is_err());
    /// assert!(Dirichlet::new(vec![1.0, 0.0]).is_err());
    /// ```
    pub fn new(alphas: Vec<f64>) -> Result<Self> {
        if alphas.is_empty() {
            return Err(Error::invalid_parameter("alphas is empty"));
        }

        alphas.iter().enumerate().try_for_each(|(ix, &alpha)| {
            if alpha <= 0.0 {
                Err(Error::invalid_parameter(format!(
                    "alpha ({alpha}) at index {ix} must be greater than zero"
                )))
            } else if !alpha.is_finite() {
                Err(Error::invalid_parameter(format!(
                    "non-finite alpha at index {ix}: {alpha}"
                )))
            } else {
                Ok(())
            }
        })?;

        Ok(Dirichlet { alphas })
    }

    /// Creates a new Dirichlet without checking whether the parameters are
    /// valid.
    pub(crate) fn new_unchecked(alphas: Vec<f64>) -> Self {
        Dirichlet { alphas }
    }

    /// Creates a `Dirichlet` where all alphas are identical.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mixgibbs::dist::Dirichlet;
    /// let dir = Dirichlet::symmetric(1.0, 4).unwrap();
    /// assert_eq!(*dir.alphas(), vec![1.0, 1.0, 1.0, 1.0]);
    /// ```
    pub fn symmetric(alpha: f64, k: usize) -> Result<Self> {
        if k == 0 {
            Err(Error::invalid_parameter("k must be greater than zero"))
        } else {
            Dirichlet::new(vec![alpha; k])
        }
    }

    /// The length of `alphas` / the number of categories
    pub fn k(&self) -> usize {
        self.alphas.len()
    }

    /// Get a reference to the weights vector, `alphas`
    pub fn alphas(&self) -> &Vec<f64> {
        &self.alphas
    }

    /// The posterior after observing `counts` of each category
    ///
    /// # Example
    ///
    /// ```
    /// # use mixgibbs::dist::Dirichlet;
    /// let dir = Dirichlet::symmetric(1.0, 3).unwrap();
    /// let post = dir.posterior(&[2.0, 0.0, 5.0]).unwrap();
    /// assert_eq!(*post.alphas(), vec![3.0, 1.0, 6.0]);
    /// ```
    pub fn posterior(&self, counts: &[f64]) -> Result<Self> {
        if counts.len() != self.k() {
            return Err(Error::invalid_parameter(format!(
                "{} counts given for a Dirichlet with k = {}",
                counts.len(),
                self.k()
            )));
        }
        let alphas = self
            .alphas
            .iter()
            .zip(counts.iter())
            .map(|(&a, &ct)| a + ct)
            .collect();
        Ok(Dirichlet::new_unchecked(alphas))
    }

    /// Draw a point on the simplex.
    ///
    /// The Gamma variates are drawn and normalized in log space, so small
    /// concentrations do not underflow to an all-zero draw. Each draw is
    /// checked to lie on the simplex. A draw that does not is reported as
    /// an `InternalInvariantViolation`.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Result<Vec<f64>> {
        let ln_xs = self
            .alphas
            .iter()
            .map(|&alpha| ln_gamma_draw(alpha, rng))
            .collect::<Result<Vec<f64>>>()?;

        let weights = normalize_ln_weights(&ln_xs)?;
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > SIMPLEX_TOL {
            return Err(Error::invariant(format!(
                "Dirichlet draw sums to {sum}"
            )));
        }

        Ok(weights)
    }
}

/// Log of a Gamma(alpha, 1) variate.
///
/// Shapes below one use the boost G(α) = G(α + 1) U^(1/α), which keeps the
/// log finite where the variate itself would round to zero.
fn ln_gamma_draw<R: Rng>(alpha: f64, rng: &mut R) -> Result<f64> {
    let shape = if alpha < 1.0 { alpha + 1.0 } else { alpha };
    let gamma = RGamma::new(shape, 1.0).map_err(|err| {
        Error::invariant(format!("invalid gamma shape {shape}: {err}"))
    })?;
    let ln_g = rng.sample(gamma).ln();
    if alpha < 1.0 {
        let u: f64 = rng.sample(Open01);
        Ok(ln_g + u.ln() / alpha)
    } else {
        Ok(ln_g)
    }
}

impl From<&Dirichlet> for String {
    fn from(dir: &Dirichlet) -> String {
        format!("Dir(α: {})", vec_to_string(&dir.alphas, 5))
    }
}

impl_display!(Dirichlet);
