//! Internal helpers shared by the kernels.

/// Helpers for splitting work between threads.
pub mod thread;

#[doc(hidden)]
pub(crate) trait DivCeil: Sized {
    fn msrv_div_ceil(self, rhs: Self) -> Self;
}

impl DivCeil for usize {
    #[inline]
    fn msrv_div_ceil(self, rhs: Self) -> Self {
        let d = self / rhs;
        let r = self % rhs;
        if r > 0 {
            d + 1
        } else {
            d
        }
    }
}
