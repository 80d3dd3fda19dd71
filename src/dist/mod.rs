//! Probability distributions
mod categorical;
mod dirichlet;
mod gaussian;

pub use categorical::Categorical;
pub use dirichlet::Dirichlet;
pub use gaussian::{Gaussian, GaussianParameters};
