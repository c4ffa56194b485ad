//! Row and column permutations.
//!
//! A permutation of `0..n` is stored as a plain `&[usize]` slice, where entry `i` holds the index
//! of the original row (or column) that ends up at position `i`. The pivoting factorizations only
//! ever swap entries of such a slice, so the caller is responsible for initializing it, usually
//! through [`init_identity`].

use crate::{assert, Entity, MatMut, MatRef};
use reborrow::*;

/// Fills `perm` with the identity permutation.
///
/// # Example
///
/// ```
/// use dense_kernels::perm::init_identity;
///
/// let mut perm = [7, 7, 7];
/// init_identity(&mut perm);
/// assert_eq!(perm, [0, 1, 2]);
/// ```
#[inline]
pub fn init_identity(perm: &mut [usize]) {
    for (i, p) in perm.iter_mut().enumerate() {
        *p = i;
    }
}

/// Checks whether `perm` is a permutation of `0..perm.len()`.
pub fn is_permutation(perm: &[usize]) -> bool {
    let n = perm.len();
    let mut seen = vec![false; n];
    for &p in perm {
        if p >= n || seen[p] {
            return false;
        }
        seen[p] = true;
    }
    true
}

/// Swaps the two rows at indices `a` and `b` in the given matrix.
///
/// # Panics
///
/// Panics if either `a` or `b` is out of bounds.
///
/// # Example
///
/// ```
/// use dense_kernels::{mat, perm::swap_rows_idx};
///
/// let mut m = mat![
///     [1.0, 2.0, 3.0],
///     [4.0, 5.0, 6.0],
///     [7.0, 8.0, 9.0],
///     [10.0, 14.0, 12.0],
/// ];
///
/// swap_rows_idx(m.as_mut(), 0, 2);
///
/// let swapped = mat![
///     [7.0, 8.0, 9.0],
///     [4.0, 5.0, 6.0],
///     [1.0, 2.0, 3.0],
///     [10.0, 14.0, 12.0],
/// ];
///
/// assert_eq!(m, swapped);
/// ```
#[track_caller]
#[inline]
pub fn swap_rows_idx<E: Entity>(mat: MatMut<'_, E>, a: usize, b: usize) {
    assert!(all(a < mat.nrows(), b < mat.nrows()));
    if a != b {
        let (a, b) = mat.two_rows_mut(a, b);
        a.swap_with_slice(b);
    }
}

/// Swaps the two columns at indices `a` and `b` in the given matrix.
///
/// # Panics
///
/// Panics if either `a` or `b` is out of bounds.
///
/// # Example
///
/// ```
/// use dense_kernels::{mat, perm::swap_cols_idx};
///
/// let mut m = mat![
///     [1.0, 2.0, 3.0],
///     [4.0, 5.0, 6.0],
///     [7.0, 8.0, 9.0],
///     [10.0, 14.0, 12.0],
/// ];
///
/// swap_cols_idx(m.as_mut(), 0, 2);
///
/// let swapped = mat![
///     [3.0, 2.0, 1.0],
///     [6.0, 5.0, 4.0],
///     [9.0, 8.0, 7.0],
///     [12.0, 14.0, 10.0],
/// ];
///
/// assert_eq!(m, swapped);
/// ```
#[track_caller]
#[inline]
pub fn swap_cols_idx<E: Entity>(mat: MatMut<'_, E>, a: usize, b: usize) {
    let mut mat = mat;
    assert!(all(a < mat.ncols(), b < mat.ncols()));
    if a != b {
        for i in 0..mat.nrows() {
            mat.rb_mut().row_mut(i).swap(a, b);
        }
    }
}

/// Computes a permutation of the rows of the source matrix using the given permutation, and
/// stores the result in the destination matrix, so that row `i` of `dst` is row `perm[i]` of
/// `src`.
///
/// # Panics
///
/// - Panics if the matrices do not have the same shape.
/// - Panics if the size of the permutation doesn't match the number of rows of the matrices.
#[track_caller]
pub fn permute_rows<E: Entity>(dst: MatMut<'_, E>, src: MatRef<'_, E>, perm: &[usize]) {
    let mut dst = dst;
    assert!(all(
        src.nrows() == dst.nrows(),
        src.ncols() == dst.ncols(),
        perm.len() == dst.nrows(),
    ));
    for (i, &p) in perm.iter().enumerate() {
        dst.rb_mut().row_mut(i).copy_from_slice(src.row(p));
    }
}

/// Computes a permutation of the columns of the source matrix using the given permutation, and
/// stores the result in the destination matrix, so that column `j` of `dst` is column `perm[j]`
/// of `src`.
///
/// # Panics
///
/// - Panics if the matrices do not have the same shape.
/// - Panics if the size of the permutation doesn't match the number of columns of the matrices.
#[track_caller]
pub fn permute_cols<E: Entity>(dst: MatMut<'_, E>, src: MatRef<'_, E>, perm: &[usize]) {
    let mut dst = dst;
    assert!(all(
        src.nrows() == dst.nrows(),
        src.ncols() == dst.ncols(),
        perm.len() == dst.ncols(),
    ));
    for i in 0..dst.nrows() {
        let src_row = src.row(i);
        let dst_row = dst.rb_mut().row_mut(i);
        for (d, &p) in dst_row.iter_mut().zip(perm) {
            *d = src_row[p];
        }
    }
}
