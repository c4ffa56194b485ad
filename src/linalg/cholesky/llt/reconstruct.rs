use crate::{
    assert,
    linalg::{temp_mat_req, temp_mat_zeroed},
    MatMut, MatRef, RealField,
};
use dyn_stack::{PodStack, SizeOverflow, StackReq};
use reborrow::*;

/// Computes the size and alignment of required workspace for reconstructing the upper triangular
/// part of the a matrix in place, given its Cholesky decomposition.
pub fn reconstruct_upper_in_place_req<E: RealField>(
    dimension: usize,
) -> Result<StackReq, SizeOverflow> {
    temp_mat_req::<E>(dimension, dimension)
}

/// Computes the upper triangular part of the reconstructed matrix, given its Cholesky
/// decomposition, and stores the result in `dst`.
///
/// The strictly lower triangular part of `dst` is not accessed.
///
/// # Panics
///
/// - Panics if `cholesky_factor` is not a square matrix.
/// - Panics if the destination shape doesn't match the shape of the matrix.
#[track_caller]
pub fn reconstruct_upper<E: RealField>(dst: MatMut<'_, E>, cholesky_factor: MatRef<'_, E>) {
    let n = cholesky_factor.nrows();
    assert!(all(
        cholesky_factor.ncols() == n,
        dst.nrows() == n,
        dst.ncols() == n,
    ));

    let mut dst = dst;
    for i in 0..n {
        let dst = dst.rb_mut().row_mut(i);
        dst[i..].fill(E::zero());
        // (R^T R)[i, j] = sum over k <= i of R[k, i] R[k, j]
        for k in 0..=i {
            let r_ki = cholesky_factor.read(k, i);
            for (d, &r_kj) in dst[i..].iter_mut().zip(&cholesky_factor.row(k)[i..]) {
                *d += r_ki * r_kj;
            }
        }
    }
}

/// Computes the upper triangular part of the reconstructed matrix, given its Cholesky
/// decomposition, and stores the result in `cholesky_factor`.
///
/// # Panics
///
/// - Panics if `cholesky_factor` is not a square matrix.
/// - Panics if the provided memory in `stack` is insufficient (see
/// [`reconstruct_upper_in_place_req`]).
#[track_caller]
pub fn reconstruct_upper_in_place<E: RealField>(cholesky_factor: MatMut<'_, E>, stack: PodStack<'_>) {
    let mut cholesky_factor = cholesky_factor;
    let n = cholesky_factor.nrows();
    let (mut tmp, _) = temp_mat_zeroed::<E>(n, n, stack);
    reconstruct_upper(tmp.rb_mut(), cholesky_factor.rb());
    for i in 0..n {
        cholesky_factor.rb_mut().row_mut(i)[i..].copy_from_slice(&tmp.rb().row(i)[i..]);
    }
}
