use crate::{assert, linalg::householder::apply_householder_on_the_right, MatMut, RealField};
use reborrow::*;

/// Information about the resulting Householder reduction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QrInfo {
    /// Numerical rank of the matrix: `min(nrows, ncols)` if every row norm is above the
    /// tolerance, otherwise the index of the first step whose row norm is below it.
    pub rank: usize,
    /// Rank of a matrix that is reported as full rank, i.e. `min(nrows, ncols)`.
    pub size: usize,
    /// Number of Householder reflections that were computed and stored in the matrix.
    pub householder_count: usize,
}

impl QrInfo {
    /// Returns `true` if the reduction ran to completion and every diagonal entry it examined was
    /// above the tolerance.
    #[inline]
    pub fn is_full_rank(&self) -> bool {
        self.rank == self.size
    }
}

/// Returns the number of Householder reflections a full reduction of an `nrows×ncols` matrix
/// computes, which is also the minimal length of the scales passed to [`qr_in_place`].
#[inline]
pub fn householder_count(nrows: usize, ncols: usize) -> usize {
    if ncols == 0 {
        0
    } else {
        Ord::min(nrows, ncols - 1)
    }
}

/// Reduces the given matrix in place with a sequence of Householder reflections applied from the
/// right, so that:
/// $$AH_0H_1\dots H_{k-1} = L,$$
/// where $L$ is lower trapezoidal.
///
/// At step `i`, the reflection $H_i$ maps the row segment `matrix[i, i..]` onto a multiple of the
/// first unit vector. The sign of the new diagonal entry is opposite to the sign of the original
/// one, and its magnitude is the norm of the segment. The essential part of the reflection is
/// stored in `matrix[i, i + 1..]` and its scale in `scales[i]`, so that $L$ is only found on and
/// to the left of the diagonal.
///
/// If the norm of the row segment is below `tolerance` at step `i`, the reduction stops and
/// reports `i` as the rank. When the reduction completes on a square matrix, the last diagonal
/// entry is also compared against `tolerance`.
///
/// # Panics
///
/// Panics if `scales.len()` is smaller than [`householder_count`]`(matrix.nrows(),
/// matrix.ncols())`.
#[track_caller]
pub fn qr_in_place<E: RealField>(matrix: MatMut<'_, E>, scales: &mut [E], tolerance: E) -> QrInfo {
    let m = matrix.nrows();
    let n = matrix.ncols();
    let count = householder_count(m, n);
    assert!(scales.len() >= count);

    let mut matrix = matrix;
    let size = Ord::min(m, n);

    for i in 0..count {
        let (top, bot) = matrix.rb_mut().split_at_row_mut(i + 1);
        let row = &mut top.row_mut(i)[i..];

        let mut norm2 = E::zero();
        for &x in row.iter() {
            norm2 += x * x;
        }
        let norm = norm2.sqrt();

        if norm < tolerance {
            log::debug!("Householder reduction stopped at step {i}/{count}: row norm {norm:?} below tolerance");
            return QrInfo {
                rank: i,
                size,
                householder_count: i,
            };
        }

        let signed_norm = if row[0] < E::zero() { -norm } else { norm };
        let u1 = row[0] + signed_norm;
        let beta = u1 / signed_norm;
        scales[i] = beta;
        row[0] = -signed_norm;
        for x in &mut row[1..] {
            *x = *x / u1;
        }

        let essential = &row[1..];
        let mut bot = bot;
        for j in 0..bot.nrows() {
            apply_householder_on_the_right(&mut bot.rb_mut().row_mut(j)[i..], essential, beta);
        }
    }

    let rank = if m == n && n > 0 && matrix.read(n - 1, n - 1).abs() < tolerance {
        log::debug!("Householder reduction: last diagonal entry below tolerance");
        n - 1
    } else {
        size
    };

    QrInfo {
        rank,
        size,
        householder_count: count,
    }
}
