//! Matrix multiplication.
//!
//! [`matmul_blocked`] splits the product into three dimensional blocks (see [`tile`]) and hands
//! the resulting tasks to a bounded set of workers. Every worker owns one tile buffer carved from
//! the caller's [`PodStack`], computes each of its partial products into that buffer, then adds
//! the buffer into the output while holding the lock that guards it.
//!
//! All the routines in this module accumulate into their output: they compute
//! `acc += lhs * rhs`, so callers that want the plain product must zero `acc` first.

use crate::{
    assert,
    linalg::try_alloc,
    utils::thread::{for_each_chunk_mut, parallelism_degree},
    Entity, KernelError, MatMut, MatRef, Parallelism,
};
use dyn_stack::{PodStack, SizeOverflow, StackReq};
use reborrow::*;
use std::sync::{Mutex, PoisonError};

mod dot;
pub mod tile;

pub use dot::inner_prod_blocked;
use tile::TileSchedule;

/// Computes `acc += lhs * rhs` with a plain sequential triple loop.
///
/// # Panics
///
/// Panics if the matrix dimensions are not compatible for matrix multiplication, i.e.
/// - `acc.nrows() == lhs.nrows()`
/// - `acc.ncols() == rhs.ncols()`
/// - `lhs.ncols() == rhs.nrows()`
///
/// # Example
///
/// ```
/// use dense_kernels::{linalg::matmul::matmul, mat, Mat};
///
/// let lhs = mat![[1, 2], [3, 4]];
/// let rhs = mat![[1, 0], [1, 1]];
/// let mut acc = Mat::<i64>::identity(2, 2);
///
/// matmul(acc.as_mut(), lhs.as_ref(), rhs.as_ref());
/// assert_eq!(acc, mat![[4, 2], [7, 5]]);
/// ```
#[track_caller]
pub fn matmul<E: Entity>(acc: MatMut<'_, E>, lhs: MatRef<'_, E>, rhs: MatRef<'_, E>) {
    assert!(all(
        acc.nrows() == lhs.nrows(),
        acc.ncols() == rhs.ncols(),
        lhs.ncols() == rhs.nrows(),
    ));
    let mut acc = acc;
    for i in 0..lhs.nrows() {
        let dst = acc.rb_mut().row_mut(i);
        for (&a, rhs_row) in lhs.row(i).iter().zip(rhs.rows()) {
            for (d, &b) in dst.iter_mut().zip(rhs_row) {
                *d += a * b;
            }
        }
    }
}

#[inline]
fn n_workers(n_tasks: usize, parallelism: Parallelism) -> usize {
    Ord::min(parallelism_degree(parallelism), n_tasks)
}

/// Computes the size and alignment of the workspace required by [`matmul_blocked`] for the
/// product of an `l×m` matrix with an `m×n` matrix.
///
/// The workspace holds one `block_size×block_size` tile (clipped to the output shape) per
/// worker, and the number of workers is bounded by the requested parallelism.
///
/// # Panics
/// Panics if `block_size` is zero.
#[track_caller]
pub fn matmul_blocked_req<E: Entity>(
    l: usize,
    m: usize,
    n: usize,
    block_size: usize,
    parallelism: Parallelism,
) -> Result<StackReq, SizeOverflow> {
    let schedule = TileSchedule::new(l, m, n, block_size);
    let n_workers = n_workers(schedule.n_tasks(), parallelism);
    let (tile_rows, tile_cols) = schedule.max_tile_shape();
    let tile_len = tile_rows.checked_mul(tile_cols).ok_or(SizeOverflow)?;
    StackReq::try_new::<E>(tile_len.checked_mul(n_workers).ok_or(SizeOverflow)?)
}

/// Computes `acc += lhs * rhs` by splitting the product into blocks of `block_size` along every
/// dimension, and computing the block products in parallel.
///
/// The result does not depend on `block_size` nor on the number of workers, up to the rounding
/// differences caused by the summation order for floating point types.
///
/// # Panics
///
/// - Panics if the matrix dimensions are not compatible for matrix multiplication, i.e.
///   - `acc.nrows() == lhs.nrows()`
///   - `acc.ncols() == rhs.ncols()`
///   - `lhs.ncols() == rhs.nrows()`
/// - Panics if `block_size` is zero.
/// - Panics if the provided memory in `stack` is insufficient (see [`matmul_blocked_req`]).
#[track_caller]
pub fn matmul_blocked<E: Entity>(
    acc: MatMut<'_, E>,
    lhs: MatRef<'_, E>,
    rhs: MatRef<'_, E>,
    block_size: usize,
    parallelism: Parallelism,
    stack: PodStack<'_>,
) {
    assert!(all(
        acc.nrows() == lhs.nrows(),
        acc.ncols() == rhs.ncols(),
        lhs.ncols() == rhs.nrows(),
    ));

    let schedule = TileSchedule::new(lhs.nrows(), lhs.ncols(), rhs.ncols(), block_size);
    let n_tasks = schedule.n_tasks();
    if n_tasks == 0 {
        return;
    }

    let n_workers = n_workers(n_tasks, parallelism);
    let (tile_rows, tile_cols) = schedule.max_tile_shape();
    let tile_len = tile_rows * tile_cols;

    #[cfg(feature = "perf-warn")]
    if n_tasks > 1 && block_size < 8 && crate::__perf_warn!(GEMM_WARN) {
        log::warn!(target: "dense_kernels_perf", "blocked GEMM with block size {block_size} schedules {n_tasks} tasks with tiny tiles.");
    }

    log::trace!(
        "blocked GEMM: {}x{}x{} with block size {}, {:?} blocks, {} tasks on {} workers",
        lhs.nrows(),
        lhs.ncols(),
        rhs.ncols(),
        block_size,
        schedule.block_counts(),
        n_tasks,
        n_workers,
    );

    let (tiles, _) = stack.make_with(n_workers * tile_len, |_| E::zero());
    let acc = Mutex::new(acc);

    for_each_chunk_mut(
        tiles,
        tile_len,
        |worker, tile| {
            for idx in (worker..n_tasks).step_by(n_workers) {
                let block = schedule.block(idx);
                let mut tmp = MatMut::from_row_major_slice_mut(
                    &mut tile[..block.nrows * block.ncols],
                    block.nrows,
                    block.ncols,
                );
                tmp.fill_zero();
                matmul(
                    tmp.rb_mut(),
                    lhs.submatrix(block.row_start, block.depth_start, block.nrows, block.depth),
                    rhs.submatrix(block.depth_start, block.col_start, block.depth, block.ncols),
                );

                let mut guard = acc.lock().unwrap_or_else(PoisonError::into_inner);
                let mut dst = guard.rb_mut().submatrix_mut(
                    block.row_start,
                    block.col_start,
                    block.nrows,
                    block.ncols,
                );
                for (i, src) in tmp.rb().rows().enumerate() {
                    for (d, &s) in dst.rb_mut().row_mut(i).iter_mut().zip(src) {
                        *d += s;
                    }
                }
            }
        },
        parallelism,
    );
}

/// Computes `acc += lhs * rhs` with [`matmul_blocked`], allocating the required workspace.
///
/// The workspace is allocated before any work starts, so when an error is returned `acc` is left
/// untouched.
///
/// # Errors
///
/// - [`KernelError::SizeOverflow`] if the workspace size does not fit in a `usize`.
/// - [`KernelError::OutOfMemory`] if the workspace allocation fails.
///
/// # Panics
///
/// - Panics if the matrix dimensions are not compatible for matrix multiplication.
/// - Panics if `block_size` is zero.
///
/// # Example
///
/// ```
/// use dense_kernels::{linalg::matmul::gemm, mat, Mat, Parallelism};
///
/// let a = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
/// let b = mat![[1.0], [0.0], [-1.0]];
/// let mut c = Mat::<f64>::zeros(2, 1);
///
/// gemm(c.as_mut(), a.as_ref(), b.as_ref(), 2, Parallelism::None).unwrap();
/// assert_eq!(c, mat![[-2.0], [-2.0]]);
/// ```
#[track_caller]
pub fn gemm<E: Entity>(
    acc: MatMut<'_, E>,
    lhs: MatRef<'_, E>,
    rhs: MatRef<'_, E>,
    block_size: usize,
    parallelism: Parallelism,
) -> Result<(), KernelError> {
    assert!(all(
        acc.nrows() == lhs.nrows(),
        acc.ncols() == rhs.ncols(),
        lhs.ncols() == rhs.nrows(),
    ));
    let req = matmul_blocked_req::<E>(
        lhs.nrows(),
        lhs.ncols(),
        rhs.ncols(),
        block_size,
        parallelism,
    )?;
    let mut mem = try_alloc(req)?;
    matmul_blocked(
        acc,
        lhs,
        rhs,
        block_size,
        parallelism,
        PodStack::new(&mut mem),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;
    use crate::Mat;
    use assert_approx_eq::assert_approx_eq;
    use rand::prelude::*;

    fn naive<E: Entity>(lhs: &Mat<E>, rhs: &Mat<E>) -> Mat<E> {
        Mat::from_fn(lhs.nrows(), rhs.ncols(), |i, j| {
            let mut sum = E::zero();
            for k in 0..lhs.ncols() {
                sum += lhs.read(i, k) * rhs.read(k, j);
            }
            sum
        })
    }

    fn random_f64(rng: &mut StdRng, nrows: usize, ncols: usize) -> Mat<f64> {
        Mat::from_fn(nrows, ncols, |_, _| rng.gen::<f64>() - 0.5)
    }

    fn parallelisms() -> Vec<Parallelism> {
        #[cfg(feature = "rayon")]
        {
            vec![
                Parallelism::None,
                Parallelism::Rayon(1),
                Parallelism::Rayon(3),
                Parallelism::Rayon(0),
            ]
        }
        #[cfg(not(feature = "rayon"))]
        {
            vec![Parallelism::None]
        }
    }

    #[test]
    fn test_blocked_matches_naive() {
        let rng = &mut StdRng::seed_from_u64(0);
        for (l, m, n) in [(1, 1, 1), (3, 5, 7), (8, 8, 8), (13, 4, 9), (2, 17, 3)] {
            let a = random_f64(rng, l, m);
            let b = random_f64(rng, m, n);
            let expected = naive(&a, &b);

            for block_size in 1..=Ord::max(l, Ord::max(m, n)) + 1 {
                for parallelism in parallelisms() {
                    let mut c = Mat::<f64>::zeros(l, n);
                    gemm(c.as_mut(), a.as_ref(), b.as_ref(), block_size, parallelism).unwrap();
                    for i in 0..l {
                        for j in 0..n {
                            assert_approx_eq!(c.read(i, j), expected.read(i, j));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_integer_is_exact() {
        let rng = &mut StdRng::seed_from_u64(0);
        let a = Mat::<i64>::from_fn(9, 6, |_, _| rng.gen_range(-10..10));
        let b = Mat::<i64>::from_fn(6, 11, |_, _| rng.gen_range(-10..10));
        let expected = naive(&a, &b);
        for block_size in [1, 2, 4, 5, 11, 64] {
            for parallelism in parallelisms() {
                let mut c = Mat::<i64>::zeros(9, 11);
                gemm(c.as_mut(), a.as_ref(), b.as_ref(), block_size, parallelism).unwrap();
                assert!(c == expected);
            }
        }
    }

    #[test]
    fn test_accumulates() {
        let a = Mat::<i32>::from_fn(4, 3, |i, j| (i + 2 * j) as i32);
        let b = Mat::<i32>::from_fn(3, 5, |i, j| i as i32 - j as i32);
        let once = naive(&a, &b);

        let mut c = Mat::<i32>::zeros(4, 5);
        gemm(c.as_mut(), a.as_ref(), b.as_ref(), 2, Parallelism::None).unwrap();
        gemm(c.as_mut(), a.as_ref(), b.as_ref(), 2, Parallelism::None).unwrap();
        assert!(c == Mat::from_fn(4, 5, |i, j| 2 * once.read(i, j)));
    }

    #[test]
    fn test_single_block() {
        let a = Mat::<i64>::from_fn(3, 4, |i, j| (i * 4 + j) as i64);
        let b = Mat::<i64>::from_fn(4, 2, |i, j| (i + j) as i64);

        let schedule = TileSchedule::new(3, 4, 2, 4);
        assert!(schedule.n_tasks() == 1);

        let mut c = Mat::<i64>::zeros(3, 2);
        gemm(c.as_mut(), a.as_ref(), b.as_ref(), 4, Parallelism::None).unwrap();
        assert!(c == naive(&a, &b));
    }

    #[test]
    fn test_empty_dimensions() {
        let a = Mat::<f64>::zeros(3, 0);
        let b = Mat::<f64>::zeros(0, 2);
        let mut c = Mat::<f64>::from_fn(3, 2, |_, _| 1.0);
        gemm(c.as_mut(), a.as_ref(), b.as_ref(), 2, Parallelism::None).unwrap();
        assert!(c == Mat::from_fn(3, 2, |_, _| 1.0));
    }

    #[test]
    fn test_workspace_req() {
        let req = matmul_blocked_req::<f64>(10, 10, 10, 4, Parallelism::None).unwrap();
        assert!(req.size_bytes() >= 16 * core::mem::size_of::<f64>());

        assert!(matmul_blocked_req::<f64>(usize::MAX, 1, usize::MAX, usize::MAX, Parallelism::None)
            .is_err());
    }

    #[test]
    fn test_strided_views() {
        let big = Mat::<i64>::from_fn(6, 6, |i, j| (i * 6 + j) as i64);
        let a = big.as_ref().submatrix(1, 1, 3, 2);
        let b = big.as_ref().submatrix(2, 3, 2, 3);

        let mut out = Mat::<i64>::zeros(5, 5);
        gemm(
            out.as_mut().submatrix_mut(1, 1, 3, 3),
            a,
            b,
            1,
            Parallelism::None,
        )
        .unwrap();

        let expected = naive(&a.to_owned(), &b.to_owned());
        assert!(out.as_ref().submatrix(1, 1, 3, 3) == expected.as_ref());
        assert!(out.read(0, 0) == 0 && out.read(4, 4) == 0);
    }
}
