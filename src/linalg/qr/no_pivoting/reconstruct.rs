use crate::{
    assert,
    linalg::householder::{
        apply_householder_sequence_on_the_right, apply_householder_sequence_transpose_on_the_right,
    },
    MatMut, MatRef, RealField,
};
use reborrow::*;

/// Computes `mat ← mat Q`, where $Q = H_0H_1\dots H_{k-1}$ is the orthogonal factor of the
/// reduction stored in `qr_factors` and `householder_scales`, and `k` is `householder_count`.
///
/// # Panics
///
/// - Panics if `mat.ncols() != qr_factors.ncols()`.
/// - Panics if `householder_count` exceeds the number of stored reflections.
#[track_caller]
pub fn apply_orthogonal_factor<E: RealField>(
    qr_factors: MatRef<'_, E>,
    householder_scales: &[E],
    householder_count: usize,
    mat: MatMut<'_, E>,
) {
    apply_householder_sequence_on_the_right(qr_factors, householder_scales, householder_count, mat)
}

/// Computes `mat ← mat Qᵀ`, where $Q = H_0H_1\dots H_{k-1}$ is the orthogonal factor of the
/// reduction stored in `qr_factors` and `householder_scales`, and `k` is `householder_count`.
///
/// # Panics
///
/// - Panics if `mat.ncols() != qr_factors.ncols()`.
/// - Panics if `householder_count` exceeds the number of stored reflections.
#[track_caller]
pub fn apply_orthogonal_factor_transpose<E: RealField>(
    qr_factors: MatRef<'_, E>,
    householder_scales: &[E],
    householder_count: usize,
    mat: MatMut<'_, E>,
) {
    apply_householder_sequence_transpose_on_the_right(
        qr_factors,
        householder_scales,
        householder_count,
        mat,
    )
}

/// Computes the explicit orthogonal factor $Q$ of the reduction and stores it in `dst`.
///
/// # Panics
///
/// - Panics if `dst` is not a square matrix of dimension `qr_factors.ncols()`.
/// - Panics if `householder_count` exceeds the number of stored reflections.
#[track_caller]
pub fn orthogonal_factor<E: RealField>(
    dst: MatMut<'_, E>,
    qr_factors: MatRef<'_, E>,
    householder_scales: &[E],
    householder_count: usize,
) {
    let n = qr_factors.ncols();
    assert!(all(dst.nrows() == n, dst.ncols() == n));
    let mut dst = dst;
    dst.fill_zero();
    for i in 0..n {
        dst.write(i, i, E::one());
    }
    apply_orthogonal_factor(
        qr_factors,
        householder_scales,
        householder_count,
        dst.rb_mut(),
    );
}

/// Computes the reconstructed matrix $A = LQ^\top$, given its Householder reduction, and stores
/// the result in `dst`.
///
/// # Panics
///
/// - Panics if the destination shape doesn't match the shape of the matrix.
/// - Panics if `householder_count` exceeds the number of stored reflections.
#[track_caller]
pub fn reconstruct<E: RealField>(
    dst: MatMut<'_, E>,
    qr_factors: MatRef<'_, E>,
    householder_scales: &[E],
    householder_count: usize,
) {
    assert!(all(
        dst.nrows() == qr_factors.nrows(),
        dst.ncols() == qr_factors.ncols(),
    ));
    let mut dst = dst;

    // dst <- L
    for i in 0..qr_factors.nrows() {
        let dst = dst.rb_mut().row_mut(i);
        let src = qr_factors.row(i);
        for (j, (d, &s)) in dst.iter_mut().zip(src).enumerate() {
            *d = if j <= i || i >= householder_count {
                s
            } else {
                E::zero()
            };
        }
    }

    // dst <- L Q^T
    apply_orthogonal_factor_transpose(
        qr_factors,
        householder_scales,
        householder_count,
        dst.rb_mut(),
    );
}
