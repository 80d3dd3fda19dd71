//! Gibbs sampling for finite Bayesian mixture models.
//!
//! Components are conjugate pairs of a likelihood and a prior over its
//! parameters. Each implements [`traits::Distribution`] to be evaluated and
//! sampled, and [`traits::GibbsResamplable`] to have its parameters redrawn
//! from their posterior given the data assigned to it. A
//! [`mixture::MixtureModel`] coordinates the components, the mixture weights
//! and the latent labels of the data.
//!
//! # Example
//!
//! ```
//! use mixgibbs::prelude::*;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut rng = SmallRng::seed_from_u64(0x1234);
//!
//! // Gaussian with known variance 1 and a N(0, 2) prior on its mean
//! let mut gauss = Gaussian::new(0.0, 1.0, 0.0, 2.0).unwrap();
//!
//! let truth = Gaussian::new(3.0, 1.0, 0.0, 2.0).unwrap();
//! let xs: Vec<f64> = truth.sample(1000, &mut rng).unwrap();
//!
//! gauss.resample(&xs, &mut rng).unwrap();
//! assert!((gauss.mu() - 3.0).abs() < 0.2);
//! ```
pub mod consts;
pub mod data;
pub mod dist;
pub mod misc;
pub mod mixture;
pub mod prelude;
pub mod result;
pub mod traits;

#[cfg(test)]
mod test;

pub use result::{Error, ErrorKind, Result};

/// Implement `Display` through the `From<&T> for String` conversion every
/// distribution provides.
#[macro_export]
macro_rules! impl_display {
    ($kind: ty) => {
        impl ::std::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", String::from(self))
            }
        }
    };
}
