use crate::{assert, linalg::lu::eliminate_below, perm::swap_rows_idx, MatMut, RealField};
use reborrow::*;

/// Information about the resulting LU factorization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PartialPivLuInfo {
    /// Numerical rank of the matrix: `min(nrows, ncols)` if every pivot is above the tolerance,
    /// otherwise the index of the first step whose pivot is below it.
    pub rank: usize,
    /// Number of steps that could be performed, i.e. `min(nrows, ncols)`.
    pub size: usize,
    /// Number of transpositions that were performed, can be used to compute the determinant of
    /// $P$.
    pub transposition_count: usize,
}

impl PartialPivLuInfo {
    /// Returns `true` if the factorization ran to completion.
    #[inline]
    pub fn is_full_rank(&self) -> bool {
        self.rank == self.size
    }
}

/// Computes the LU decomposition of the given matrix with partial pivoting, replacing the matrix
/// with its factors in place.
///
/// The decomposition is such that:
/// $$PA = LU,$$
/// where $P$ is a permutation matrix, $L$ is a unit lower triangular matrix, and $U$ is an upper
/// triangular matrix.
///
/// $L$ is stored in the strictly lower triangular half of `matrix`, with an implicit unit
/// diagonal, $U$ is stored in the upper triangular half of `matrix`.
///
/// At step `i`, the row whose entry in column `i` has the largest magnitude is swapped into
/// position `i`. Ties are resolved in favor of the topmost row. If the magnitude of the pivot is
/// below `tolerance`, the factorization stops and reports `i` as the rank.
///
/// `perm` must be initialized by the caller (usually to the identity), since the factorization
/// only swaps its entries. After the function returns, row `i` of the factors corresponds to row
/// `perm[i]` of the original matrix.
///
/// # Panics
///
/// Panics if the length of the permutation slice is not equal to the number of rows of the
/// matrix.
#[track_caller]
pub fn lu_in_place<E: RealField>(
    matrix: MatMut<'_, E>,
    perm: &mut [usize],
    tolerance: E,
) -> PartialPivLuInfo {
    assert!(perm.len() == matrix.nrows());

    let mut matrix = matrix;
    let m = matrix.nrows();
    let n = matrix.ncols();
    let size = Ord::min(m, n);

    let mut transposition_count = 0;
    for i in 0..size {
        let mut pivot = i;
        let mut max = matrix.read(i, i).abs();
        for j in i + 1..m {
            let value = matrix.read(j, i).abs();
            if max < value {
                pivot = j;
                max = value;
            }
        }

        if pivot != i {
            perm.swap(i, pivot);
            swap_rows_idx(matrix.rb_mut(), i, pivot);
            transposition_count += 1;
        }

        if max < tolerance {
            log::debug!("partial pivoting LU stopped at step {i}/{size}: pivot {max:?} below tolerance");
            return PartialPivLuInfo {
                rank: i,
                size,
                transposition_count,
            };
        }

        eliminate_below(matrix.rb_mut(), i);
    }

    PartialPivLuInfo {
        rank: size,
        size,
        transposition_count,
    }
}
