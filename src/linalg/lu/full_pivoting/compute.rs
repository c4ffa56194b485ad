use crate::{
    assert,
    linalg::lu::eliminate_below,
    perm::{swap_cols_idx, swap_rows_idx},
    MatMut, MatRef, RealField,
};
use reborrow::*;

/// Information about the resulting LU factorization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FullPivLuInfo {
    /// Numerical rank of the matrix: `min(nrows, ncols)` if every pivot is above the tolerance,
    /// otherwise the index of the first step whose pivot is below it.
    pub rank: usize,
    /// Number of steps that could be performed, i.e. `min(nrows, ncols)`.
    pub size: usize,
    /// Number of row transpositions that were performed, can be used to compute the determinant
    /// of $P$.
    pub row_transposition_count: usize,
    /// Number of column transpositions that were performed, can be used to compute the
    /// determinant of $Q$.
    pub col_transposition_count: usize,
}

impl FullPivLuInfo {
    /// Returns `true` if the factorization ran to completion.
    #[inline]
    pub fn is_full_rank(&self) -> bool {
        self.rank == self.size
    }
}

/// Returns the position of the entry of largest magnitude in the trailing submatrix starting at
/// `(start, start)`, scanning row by row. Ties keep the first entry found.
#[inline]
fn best_pivot<E: RealField>(matrix: MatRef<'_, E>, start: usize) -> (usize, usize, E) {
    let mut best = (start, start, matrix.read(start, start).abs());
    for i in start..matrix.nrows() {
        for (j, value) in matrix.row(i).iter().enumerate().skip(start) {
            let value = value.abs();
            if best.2 < value {
                best = (i, j, value);
            }
        }
    }
    best
}

/// Computes the LU decomposition of the given matrix with full pivoting, replacing the matrix
/// with its factors in place.
///
/// The decomposition is such that:
/// $$PAQ^\top = LU,$$
/// where $P$ and $Q$ are permutation matrices, $L$ is a unit lower triangular matrix, and $U$ is
/// an upper triangular matrix.
///
/// $L$ is stored in the strictly lower triangular half of `matrix`, with an implicit unit
/// diagonal, $U$ is stored in the upper triangular half of `matrix`.
///
/// At step `i`, the entry of largest magnitude in the trailing submatrix is moved to position
/// `(i, i)` by swapping a row and a column. The submatrix is scanned row by row, and ties are
/// resolved in favor of the first entry found. If the magnitude of the pivot is below
/// `tolerance`, the factorization stops and reports `i` as the rank.
///
/// `row_perm` and `col_perm` must be initialized by the caller (usually to the identity), since
/// the factorization only swaps their entries. After the function returns, entry `(i, j)` of the
/// factors corresponds to entry `(row_perm[i], col_perm[j])` of the original matrix.
///
/// # Panics
///
/// - Panics if the length of `row_perm` is not equal to the number of rows of the matrix.
/// - Panics if the length of `col_perm` is not equal to the number of columns of the matrix.
#[track_caller]
pub fn lu_in_place<E: RealField>(
    matrix: MatMut<'_, E>,
    row_perm: &mut [usize],
    col_perm: &mut [usize],
    tolerance: E,
) -> FullPivLuInfo {
    assert!(all(
        row_perm.len() == matrix.nrows(),
        col_perm.len() == matrix.ncols(),
    ));

    let mut matrix = matrix;
    let size = Ord::min(matrix.nrows(), matrix.ncols());

    let mut info = FullPivLuInfo {
        rank: size,
        size,
        row_transposition_count: 0,
        col_transposition_count: 0,
    };

    for i in 0..size {
        let (pivot_row, pivot_col, max) = best_pivot(matrix.rb(), i);

        if pivot_row != i {
            row_perm.swap(i, pivot_row);
            swap_rows_idx(matrix.rb_mut(), i, pivot_row);
            info.row_transposition_count += 1;
        }
        if pivot_col != i {
            col_perm.swap(i, pivot_col);
            swap_cols_idx(matrix.rb_mut(), i, pivot_col);
            info.col_transposition_count += 1;
        }

        if max < tolerance {
            log::debug!("full pivoting LU stopped at step {i}/{size}: pivot {max:?} below tolerance");
            info.rank = i;
            return info;
        }

        eliminate_below(matrix.rb_mut(), i);
    }

    info
}
