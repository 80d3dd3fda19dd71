//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::data::{CategoricalSuffStat, GaussianSuffStat};
#[doc(no_inline)]
pub use crate::dist::*;
#[doc(no_inline)]
pub use crate::mixture::{LabelAssignment, MixtureConfig, MixtureModel};
#[doc(no_inline)]
pub use crate::result::{Error, ErrorKind, Result};
#[doc(no_inline)]
pub use crate::traits::*;
