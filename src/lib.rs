//! `dense-kernels` provides building blocks for dense linear algebra: a blocked, parallel
//! matrix multiplication and in-place LU (partial and full pivoting), Cholesky and Householder
//! QR factorizations with tolerance-based rank detection.
//!
//! All routines work directly on caller-owned buffers through the [`MatRef`] and [`MatMut`]
//! views. The factorizations overwrite their input with the packed factors and return the
//! numerical rank they observed, while the matrix multiplication accumulates into a
//! caller-supplied output matrix.
//!
//! # Example
//! ```
//! use dense_kernels::{linalg::matmul::gemm, mat, Mat, Parallelism};
//!
//! let a = mat![[1.0, 2.0], [3.0, 4.0]];
//! let b = mat![[5.0, 6.0], [7.0, 8.0]];
//! let mut c = Mat::<f64>::zeros(2, 2);
//!
//! gemm(c.as_mut(), a.as_ref(), b.as_ref(), 1, Parallelism::None).unwrap();
//! assert_eq!(c, mat![[19.0, 22.0], [43.0, 50.0]]);
//! ```

#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use core::sync::atomic::AtomicUsize;
use equator::{assert, debug_assert};

pub use dyn_stack;
pub use reborrow;

#[cfg(feature = "perf-warn")]
#[macro_export]
#[doc(hidden)]
macro_rules! __perf_warn {
    ($name: ident) => {{
        #[inline(always)]
        #[allow(non_snake_case)]
        fn $name() -> &'static ::core::sync::atomic::AtomicBool {
            static $name: ::core::sync::atomic::AtomicBool =
                ::core::sync::atomic::AtomicBool::new(false);
            &$name
        }
        ::core::matches!(
            $name().compare_exchange(
                false,
                true,
                ::core::sync::atomic::Ordering::Relaxed,
                ::core::sync::atomic::Ordering::Relaxed,
            ),
            Ok(_)
        )
    }};
}

mod entity;
pub mod linalg;
pub mod mat;
pub mod perm;
pub mod utils;

pub use entity::{Entity, RealField};
pub use mat::{Mat, MatMut, MatRef};

/// Errors that abort a whole operation before any of its outputs are modified.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum KernelError {
    /// The size of the required workspace overflows `usize`.
    SizeOverflow,
    /// Memory allocation for the workspace failed.
    OutOfMemory,
}

impl core::fmt::Display for KernelError {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

impl std::error::Error for KernelError {}

impl From<dyn_stack::SizeOverflow> for KernelError {
    #[inline]
    fn from(value: dyn_stack::SizeOverflow) -> Self {
        _ = value;
        KernelError::SizeOverflow
    }
}

/// Parallelism strategy that can be passed to the routines in the library that can make use of
/// multiple threads.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Parallelism {
    /// No parallelism.
    ///
    /// The code is executed sequentially on the same thread that calls a function
    /// and passes this argument.
    None,
    /// Rayon parallelism. Only available with the `rayon` feature.
    ///
    /// The code is possibly executed in parallel on the current thread, as well as the currently
    /// active rayon thread pool.
    ///
    /// The contained value is an upper bound on the number of workers an implementation spawns.
    /// A value of `0` is treated as equivalent to `rayon::current_num_threads()`.
    #[cfg(feature = "rayon")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
    Rayon(usize),
}

/// 0: Disable
/// 1: None
/// n >= 2: Rayon(n - 2)
///
/// default: Rayon(0)
static GLOBAL_PARALLELISM: AtomicUsize = {
    #[cfg(feature = "rayon")]
    {
        AtomicUsize::new(2)
    }
    #[cfg(not(feature = "rayon"))]
    {
        AtomicUsize::new(1)
    }
};

/// Causes functions that access global parallelism settings to panic.
pub fn disable_global_parallelism() {
    GLOBAL_PARALLELISM.store(0, core::sync::atomic::Ordering::Relaxed);
}

/// Sets the global parallelism settings.
pub fn set_global_parallelism(parallelism: Parallelism) {
    let value = match parallelism {
        Parallelism::None => 1,
        #[cfg(feature = "rayon")]
        Parallelism::Rayon(n) => n.saturating_add(2),
    };
    GLOBAL_PARALLELISM.store(value, core::sync::atomic::Ordering::Relaxed);
}

/// Gets the global parallelism settings.
///
/// # Panics
/// Panics if global parallelism is disabled.
#[track_caller]
pub fn get_global_parallelism() -> Parallelism {
    let value = GLOBAL_PARALLELISM.load(core::sync::atomic::Ordering::Relaxed);
    match value {
        0 => panic!("Global parallelism is disabled."),
        1 => Parallelism::None,
        #[cfg(feature = "rayon")]
        n => Parallelism::Rayon(n - 2),
        #[cfg(not(feature = "rayon"))]
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;

    #[test]
    fn test_global_parallelism() {
        let before = get_global_parallelism();

        set_global_parallelism(Parallelism::None);
        assert!(get_global_parallelism() == Parallelism::None);

        #[cfg(feature = "rayon")]
        {
            set_global_parallelism(Parallelism::Rayon(3));
            assert!(get_global_parallelism() == Parallelism::Rayon(3));
        }

        set_global_parallelism(before);
        assert!(get_global_parallelism() == before);
    }

    #[test]
    fn test_error_display() {
        assert!(KernelError::OutOfMemory.to_string() == "OutOfMemory");
        assert!(KernelError::from(dyn_stack::SizeOverflow) == KernelError::SizeOverflow);
    }
}
