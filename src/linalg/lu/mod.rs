//! The LU decomposition of a matrix $A$ is such that:
//! $$PAQ^\top = LU,$$
//! where $P$ and $Q$ are permutation matrices, $L$ is a unit lower triangular matrix, and $U$ is
//! an upper triangular matrix. With partial pivoting, $Q$ is the identity.
//!
//! Both variants factorize the matrix in place: $L$ is stored in the strictly lower triangular
//! half of the matrix with an implicit unit diagonal, and $U$ is stored in the upper triangular
//! half. Elimination stops at the first step whose pivot magnitude falls below the caller's
//! tolerance, and the index of that step is reported as the numerical rank.

use crate::{
    debug_assert,
    linalg::{matmul::matmul, temp_mat_req, temp_mat_zeroed},
    MatMut, MatRef, RealField,
};
use dyn_stack::{PodStack, SizeOverflow, StackReq};
use reborrow::*;

pub mod full_pivoting;
pub mod partial_pivoting;

/// Pivoting strategy of an LU factorization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pivoting {
    /// Rows are swapped so that the pivot is the entry of largest magnitude in its column.
    Partial,
    /// Rows and columns are swapped so that the pivot is the entry of largest magnitude in the
    /// whole trailing submatrix.
    Full,
}

/// Computes the LU decomposition of `matrix` in place, with the given pivoting strategy, and
/// returns its numerical rank.
///
/// `row_perm` (and `col_perm` for full pivoting) must hold the identity permutation on entry, the
/// factorization only swaps its entries. On return, row `i` of the factors corresponds to row
/// `row_perm[i]` of the original matrix, and column `j` to column `col_perm[j]`.
///
/// The returned rank is `min(nrows, ncols)` on success, or the index of the first step whose pivot
/// magnitude is below `tolerance`. In the latter case, the rows and columns from that step on are
/// only partially reduced, and the matrix does not hold a valid factorization.
///
/// # Panics
///
/// - Panics if `row_perm.len() != matrix.nrows()`.
/// - Panics if `pivoting` is [`Pivoting::Full`] and `col_perm` is `None`, or if
/// `col_perm.len() != matrix.ncols()`.
///
/// # Example
///
/// ```
/// use dense_kernels::{
///     linalg::lu::{lu_in_place, Pivoting},
///     mat,
///     perm::init_identity,
/// };
///
/// let mut a = mat![[1.0, 2.0], [3.0, 4.0]];
/// let mut row_perm = [0; 2];
/// init_identity(&mut row_perm);
///
/// let rank = lu_in_place(a.as_mut(), &mut row_perm, None, Pivoting::Partial, 1e-12);
/// assert_eq!(rank, 2);
/// assert_eq!(row_perm, [1, 0]);
/// ```
#[track_caller]
pub fn lu_in_place<E: RealField>(
    matrix: MatMut<'_, E>,
    row_perm: &mut [usize],
    col_perm: Option<&mut [usize]>,
    pivoting: Pivoting,
    tolerance: E,
) -> usize {
    match pivoting {
        Pivoting::Partial => {
            partial_pivoting::compute::lu_in_place(matrix, row_perm, tolerance).rank
        }
        Pivoting::Full => {
            let col_perm = col_perm.unwrap_or_else(|| {
                panic!("full pivoting LU requires a column permutation");
            });
            full_pivoting::compute::lu_in_place(matrix, row_perm, col_perm, tolerance).rank
        }
    }
}

/// Subtracts multiples of row `step` from the rows below it so that column `step` becomes zero
/// below the diagonal, and stores the multipliers in place of the eliminated entries.
#[inline]
pub(crate) fn eliminate_below<E: RealField>(matrix: MatMut<'_, E>, step: usize) {
    debug_assert!(step < Ord::min(matrix.nrows(), matrix.ncols()));
    let (top, bot) = matrix.split_at_row_mut(step + 1);
    let pivot_row = top.into_const().row(step);
    let pivot = pivot_row[step];
    let mut bot = bot;
    for j in 0..bot.nrows() {
        let row = bot.rb_mut().row_mut(j);
        let factor = row[step] / pivot;
        row[step] = factor;
        for (r, &p) in row[step + 1..].iter_mut().zip(&pivot_row[step + 1..]) {
            *r -= factor * p;
        }
    }
}

/// Computes the size and alignment of the workspace required by [`lu_product`].
pub(crate) fn lu_product_req<E: RealField>(
    nrows: usize,
    ncols: usize,
) -> Result<StackReq, SizeOverflow> {
    let size = Ord::min(nrows, ncols);
    StackReq::try_all_of([
        temp_mat_req::<E>(nrows, size)?,
        temp_mat_req::<E>(size, ncols)?,
        temp_mat_req::<E>(nrows, ncols)?,
    ])
}

/// Unpacks the factors stored in `lu_factors` and multiplies them together, returning the product
/// $LU$ as a temporary matrix allocated from `stack`.
pub(crate) fn lu_product<'a, E: RealField>(
    lu_factors: MatRef<'_, E>,
    stack: PodStack<'a>,
) -> (MatMut<'a, E>, PodStack<'a>) {
    let m = lu_factors.nrows();
    let n = lu_factors.ncols();
    let size = Ord::min(m, n);

    let (mut product, stack) = temp_mat_zeroed::<E>(m, n, stack);
    let (mut l, stack) = temp_mat_zeroed::<E>(m, size, stack);
    let (mut u, stack) = temp_mat_zeroed::<E>(size, n, stack);

    for i in 0..m {
        for j in 0..Ord::min(i, size) {
            l.write(i, j, lu_factors.read(i, j));
        }
        if i < size {
            l.write(i, i, E::one());
        }
    }
    for i in 0..size {
        for j in i..n {
            u.write(i, j, lu_factors.read(i, j));
        }
    }

    matmul(product.rb_mut(), l.rb(), u.rb());
    (product, stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mat, perm::init_identity, Mat};

    #[test]
    fn test_dispatch() {
        let a = mat![[2.0, 1.0, 0.0], [4.0, 3.0, 1.0], [0.0, 1.0, 5.0f64]];

        let mut partial = a.clone();
        let mut row_perm = [0; 3];
        init_identity(&mut row_perm);
        let rank = lu_in_place(partial.as_mut(), &mut row_perm, None, Pivoting::Partial, 1e-12);
        assert!(rank == 3);

        let mut full = a.clone();
        let mut row_perm = [0; 3];
        let mut col_perm = [0; 3];
        init_identity(&mut row_perm);
        init_identity(&mut col_perm);
        let rank = lu_in_place(
            full.as_mut(),
            &mut row_perm,
            Some(&mut col_perm),
            Pivoting::Full,
            1e-12,
        );
        assert!(rank == 3);
        assert!(full.read(0, 0) == 5.0);
    }

    #[test]
    #[should_panic]
    fn test_full_pivoting_requires_col_perm() {
        let mut a = Mat::<f64>::identity(2, 2);
        let mut row_perm = [0, 1];
        lu_in_place(a.as_mut(), &mut row_perm, None, Pivoting::Full, 1e-12);
    }

    #[test]
    fn test_eliminate_below() {
        let mut a = mat![[2.0, 4.0], [1.0, 5.0], [4.0, 2.0]];
        eliminate_below(a.as_mut(), 0);
        assert!(a == mat![[2.0, 4.0], [0.5, 3.0], [2.0, -6.0]]);
    }
}
