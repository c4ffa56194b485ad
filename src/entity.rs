use core::fmt::Debug;
use core::ops::{AddAssign, MulAssign, SubAssign};

/// Element type that can be stored in a matrix and used in the matrix multiplication kernels.
///
/// Implemented for the native signed integers and floating point types. The `Pod` bound allows
/// temporary tiles of this type to be carved out of a [`PodStack`](dyn_stack::PodStack).
pub trait Entity:
    bytemuck::Pod
    + num_traits::Num
    + AddAssign
    + SubAssign
    + MulAssign
    + PartialOrd
    + Debug
    + Send
    + Sync
    + 'static
{
}

/// Element type the factorizations operate on.
pub trait RealField: Entity + num_traits::Float {}

macro_rules! impl_entity {
    ($($ty: ty),* $(,)?) => {
        $(impl Entity for $ty {})*
    };
}

impl_entity!(i32, i64, f32, f64);

impl RealField for f32 {}
impl RealField for f64 {}
