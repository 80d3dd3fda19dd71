mod categorical;
mod gaussian;

pub use categorical::CategoricalSuffStat;
pub use gaussian::GaussianSuffStat;

pub(crate) use gaussian::scalar_row;
