use crate::{assert, MatMut, RealField};
use reborrow::*;

/// Info about the result of the $R^\top R$ factorization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LltInfo {
    /// Number of rows that were fully factorized: the dimension of the matrix on success,
    /// otherwise the index of the first diagonal entry that was below the tolerance.
    pub rank: usize,
    /// Dimension of the matrix.
    pub dimension: usize,
}

impl LltInfo {
    /// Returns `true` if the factorization ran to completion.
    #[inline]
    pub fn is_full_rank(&self) -> bool {
        self.rank == self.dimension
    }
}

/// Computes the Cholesky factor $R$ of a symmetric positive definite input matrix $A$ such that
/// $R$ is upper triangular, and
/// $$R^\top R == A.$$
///
/// The input matrix is interpreted as symmetric and only the upper triangular part is read. The
/// result is stored back in the upper half of the same matrix, and the strictly lower triangular
/// part is left untouched.
///
/// Row `i` is factorized once the updates of the previous rows have been applied to it. If its
/// diagonal entry is then below `tolerance` (negative values included), the factorization stops
/// and reports `i` as the rank, leaving the rows from `i` on partially updated.
///
/// # Panics
///
/// Panics if the input matrix is not square.
#[track_caller]
pub fn cholesky_in_place<E: RealField>(matrix: MatMut<'_, E>, tolerance: E) -> LltInfo {
    assert!(matrix.nrows() == matrix.ncols());

    let mut matrix = matrix;
    let n = matrix.nrows();

    for i in 0..n {
        let (top, bot) = matrix.rb_mut().split_at_row_mut(i + 1);
        let pivot_row = top.row_mut(i);
        let diag = pivot_row[i];

        if diag < tolerance {
            log::debug!("Cholesky stopped at row {i}/{n}: diagonal {diag:?} below tolerance");
            return LltInfo {
                rank: i,
                dimension: n,
            };
        }

        let mut bot = bot;
        for j in i + 1..n {
            let factor = pivot_row[j] / diag;
            let row = bot.rb_mut().row_mut(j - i - 1);
            for (r, &p) in row[j..].iter_mut().zip(&pivot_row[j..]) {
                *r -= factor * p;
            }
        }

        let scale = diag.sqrt();
        for value in &mut pivot_row[i..] {
            *value = *value / scale;
        }
    }

    LltInfo {
        rank: n,
        dimension: n,
    }
}
