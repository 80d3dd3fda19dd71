//! Data types and sufficient statistics
mod stat;

pub use stat::CategoricalSuffStat;
pub use stat::GaussianSuffStat;

pub(crate) use stat::scalar_row;

use num_traits::{FromPrimitive, ToPrimitive};

use crate::result::{Error, Result};

/// The trait that must be implemented by all data used with the
/// `Categorical` distribution
///
/// # Example
///
/// ```
/// use mixgibbs::data::CategoricalDatum;
///
/// assert_eq!(2_u8.category(), Some(2));
/// assert_eq!(2.0_f64.category(), Some(2));
/// assert_eq!(2.5_f64.category(), None);
/// assert_eq!((-1_i32).category(), None);
/// ```
pub trait CategoricalDatum: Sized + Sync + Copy {
    /// The category index this value encodes, or `None` if the value is not a
    /// non-negative integer
    fn category(&self) -> Option<usize>;

    /// Encode a category index, or `None` if this type cannot represent it
    fn from_category(ix: usize) -> Option<Self>;

    /// The category index of this value if it is in [0, k)
    fn category_in(&self, k: usize) -> Result<usize> {
        match self.category() {
            Some(ix) if ix < k => Ok(ix),
            Some(ix) => Err(Error::domain(format!(
                "category {ix} out of range for k = {k}"
            ))),
            None => Err(Error::domain(
                "categories must be non-negative integers",
            )),
        }
    }
}

macro_rules! impl_categorical_datum_int {
    ($kind:ty) => {
        impl CategoricalDatum for $kind {
            fn category(&self) -> Option<usize> {
                self.to_usize()
            }

            fn from_category(ix: usize) -> Option<Self> {
                <$kind as FromPrimitive>::from_usize(ix)
            }
        }
    };
}

impl_categorical_datum_int!(u8);
impl_categorical_datum_int!(u16);
impl_categorical_datum_int!(u32);
impl_categorical_datum_int!(u64);
impl_categorical_datum_int!(usize);
impl_categorical_datum_int!(i32);
impl_categorical_datum_int!(i64);

impl CategoricalDatum for f64 {
    fn category(&self) -> Option<usize> {
        if self.fract() == 0.0 {
            self.to_usize()
        } else {
            None
        }
    }

    fn from_category(ix: usize) -> Option<Self> {
        // Above 2^53 not every index survives the conversion
        <f64 as FromPrimitive>::from_usize(ix)
            .filter(|x| x.category() == Some(ix))
    }
}
