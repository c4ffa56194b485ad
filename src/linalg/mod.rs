//! Linear algebra module.
//!
//! Contains the blocked matrix multiplication and the in-place factorizations, along with the
//! routines that reconstruct or solve with their results.
//!
//! # Memory allocation
//! The routines in this module never allocate the matrices they operate on: the factorizations
//! overwrite their input in place, and the matrix multiplication accumulates into a caller
//! supplied output.
//!
//! However, some algorithms need temporary space for intermediate computations, so they take a
//! [`stack: PodStack`](dyn_stack::PodStack) parameter. A [`PodStack`] is a thin wrapper over a
//! slice of memory bytes, that may come from any valid source (heap allocation, fixed-size array
//! on the stack, etc.). The functions taking a [`PodStack`] parameter have a corresponding
//! function with a similar name ending in `_req` that returns the memory requirements of the
//! algorithm. For example: [`matmul::matmul_blocked`] and [`matmul::matmul_blocked_req`].
//!
//! The memory stack may be reused in user-code to avoid repeated allocations, and it is also
//! possible to compute the sum ([`dyn_stack::StackReq::all_of`]) or union
//! ([`dyn_stack::StackReq::any_of`]) of multiple requirements, in order to combine them into a
//! single allocation.
//!
//! After computing a [`dyn_stack::StackReq`], one can query its size and alignment to allocate the
//! required memory. The simplest way to do so is through [`dyn_stack::GlobalPodBuffer::try_new`],
//! which reports allocation failure instead of aborting.

use crate::{Entity, KernelError, MatMut};
use dyn_stack::{GlobalPodBuffer, PodStack, SizeOverflow, StackReq};

pub mod householder;
pub mod matmul;
pub mod triangular_solve;

pub mod cholesky;
pub mod lu;
pub mod qr;

/// Returns the stack requirements for creating a temporary matrix with the given dimensions.
#[inline]
pub fn temp_mat_req<E: Entity>(nrows: usize, ncols: usize) -> Result<StackReq, SizeOverflow> {
    let len = nrows.checked_mul(ncols).ok_or(SizeOverflow)?;
    StackReq::try_new::<E>(len)
}

/// Creates a temporary matrix of zero values, from the given memory stack.
///
/// # Panics
/// Panics if the stack is too small to hold the matrix (see [`temp_mat_req`]).
#[track_caller]
pub fn temp_mat_zeroed<E: Entity>(
    nrows: usize,
    ncols: usize,
    stack: PodStack<'_>,
) -> (MatMut<'_, E>, PodStack<'_>) {
    let len = nrows * ncols;
    let (data, stack) = stack.make_with(len, |_| E::zero());
    (MatMut::from_row_major_slice_mut(data, nrows, ncols), stack)
}

/// Allocates a buffer large enough for `req`, reporting failure as a [`KernelError`] instead of
/// aborting the process.
#[inline]
pub(crate) fn try_alloc(req: StackReq) -> Result<GlobalPodBuffer, KernelError> {
    GlobalPodBuffer::try_new(req).map_err(|_| KernelError::OutOfMemory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_mat() {
        let req = temp_mat_req::<f64>(3, 4).unwrap();
        let mut mem = GlobalPodBuffer::new(req);
        let (m, _) = temp_mat_zeroed::<f64>(3, 4, PodStack::new(&mut mem));
        assert!(m.shape() == (3, 4));
        assert!(m.read(2, 3) == 0.0);

        assert!(temp_mat_req::<f64>(usize::MAX, 2).is_err());
    }
}
