use crate::{
    assert,
    linalg::lu::{lu_product, lu_product_req},
    MatMut, MatRef, RealField,
};
use dyn_stack::{PodStack, SizeOverflow, StackReq};
use reborrow::*;

/// Computes the reconstructed matrix, given its full pivoting LU decomposition,
/// and stores the result in `dst`.
///
/// # Panics
///
/// - Panics if the row permutation doesn't have the same dimension as the number of rows of the
/// matrix.
/// - Panics if the column permutation doesn't have the same dimension as the number of columns of
/// the matrix.
/// - Panics if the destination shape doesn't match the shape of the matrix.
/// - Panics if the provided memory in `stack` is insufficient (see [`reconstruct_req`]).
#[track_caller]
pub fn reconstruct<E: RealField>(
    dst: MatMut<'_, E>,
    lu_factors: MatRef<'_, E>,
    row_perm: &[usize],
    col_perm: &[usize],
    stack: PodStack<'_>,
) {
    assert!(all(
        dst.nrows() == lu_factors.nrows(),
        dst.ncols() == lu_factors.ncols(),
        row_perm.len() == lu_factors.nrows(),
        col_perm.len() == lu_factors.ncols(),
    ));
    let mut dst = dst;
    let (lu, _) = lu_product(lu_factors, stack);
    for (i, &p) in row_perm.iter().enumerate() {
        let dst = dst.rb_mut().row_mut(p);
        for (&q, &value) in col_perm.iter().zip(lu.rb().row(i)) {
            dst[q] = value;
        }
    }
}

/// Computes the size and alignment of required workspace for reconstructing a matrix out of place,
/// given its full pivoting LU decomposition.
pub fn reconstruct_req<E: RealField>(
    nrows: usize,
    ncols: usize,
) -> Result<StackReq, SizeOverflow> {
    lu_product_req::<E>(nrows, ncols)
}
