pub mod alpha_mask;
pub mod mask;

pub use alpha_mask::ClipToMask;
pub use mask::rounded_rect_mask;

use num_traits::{Bounded, NumCast};
use std::any::TypeId;

pub(crate) fn is_floating_point<T: 'static>() -> bool {
    TypeId::of::<T>() == TypeId::of::<f32>()
}

pub fn get_max_value<T: Bounded + NumCast + 'static>() -> T {
    if is_floating_point::<T>() {
        T::from(1.0).unwrap_or_else(T::max_value)
    } else {
        T::max_value()
    }
}
