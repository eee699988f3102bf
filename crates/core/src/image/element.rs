//! Scalar element trait for generic pixel/voxel values

use num_traits::{NumCast, Zero};
use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::Sub;

/// Trait for types that can be stored in a scalar image.
///
/// Every implementing type provides the two sentinels used by morphological
/// filters as "outside" fill values: dilation pads with [`min_value`] and
/// erosion pads with [`max_value`]. For floating-point types the sentinels are
/// the infinities, so they never win against a real sample.
///
/// [`min_value`]: ScalarElement::min_value
/// [`max_value`]: ScalarElement::max_value
pub trait ScalarElement:
    Copy
    + Clone
    + Debug
    + PartialOrd
    + PartialEq
    + NumCast
    + Zero
    + Sub<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Lowest value of this type (dilation sentinel)
    fn min_value() -> Self;

    /// Highest value of this type (erosion sentinel)
    fn max_value() -> Self;

    /// Whether this type is a floating point type
    fn is_float() -> bool;

    /// Total ordering, consistent with `PartialOrd` on non-NaN values
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Convert self to f64
    fn to_f64(self) -> Option<f64> {
        NumCast::from(self)
    }
}

macro_rules! impl_scalar_element_int {
    ($t:ty) => {
        impl ScalarElement for $t {
            fn min_value() -> Self {
                <$t>::MIN
            }

            fn max_value() -> Self {
                <$t>::MAX
            }

            fn is_float() -> bool {
                false
            }

            fn total_cmp(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }
        }
    };
}

macro_rules! impl_scalar_element_float {
    ($t:ty) => {
        impl ScalarElement for $t {
            fn min_value() -> Self {
                <$t>::NEG_INFINITY
            }

            fn max_value() -> Self {
                <$t>::INFINITY
            }

            fn is_float() -> bool {
                true
            }

            fn total_cmp(&self, other: &Self) -> Ordering {
                <$t>::total_cmp(self, other)
            }
        }
    };
}

impl_scalar_element_int!(i8);
impl_scalar_element_int!(i16);
impl_scalar_element_int!(i32);
impl_scalar_element_int!(i64);
impl_scalar_element_int!(u8);
impl_scalar_element_int!(u16);
impl_scalar_element_int!(u32);
impl_scalar_element_int!(u64);
impl_scalar_element_float!(f32);
impl_scalar_element_float!(f64);
