use crate::{assert, utils::thread::for_each_raw, utils::DivCeil, Entity, Parallelism};
use std::sync::{Mutex, PoisonError};

/// Computes the inner product of `lhs` and `rhs` by splitting the vectors into blocks of
/// `block_size` elements, summing every block independently, possibly in parallel, and adding
/// the partial sums together.
///
/// Returns zero for empty vectors.
///
/// # Panics
///
/// - Panics if `lhs` and `rhs` do not have the same length.
/// - Panics if `block_size` is zero.
///
/// # Example
///
/// ```
/// use dense_kernels::{linalg::matmul::inner_prod_blocked, Parallelism};
///
/// let a = [1, 2, 3, 4, 5];
/// let b = [5, 4, 3, 2, 1];
/// assert_eq!(inner_prod_blocked(&a, &b, 2, Parallelism::None), 35);
/// ```
#[track_caller]
pub fn inner_prod_blocked<E: Entity>(
    lhs: &[E],
    rhs: &[E],
    block_size: usize,
    parallelism: Parallelism,
) -> E {
    assert!(all(lhs.len() == rhs.len(), block_size > 0));

    let n = lhs.len();
    let n_blocks = n.msrv_div_ceil(block_size);
    if n_blocks == 0 {
        return E::zero();
    }

    let sum = Mutex::new(E::zero());
    for_each_raw(
        n_blocks,
        |block| {
            let start = block * block_size;
            let end = Ord::min(start + block_size, n);
            let mut partial = E::zero();
            for (&a, &b) in lhs[start..end].iter().zip(&rhs[start..end]) {
                partial += a * b;
            }
            *sum.lock().unwrap_or_else(PoisonError::into_inner) += partial;
        },
        parallelism,
    );
    sum.into_inner().unwrap_or_else(PoisonError::into_inner)
}
