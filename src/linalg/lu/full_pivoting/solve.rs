use crate::{
    assert,
    linalg::{temp_mat_req, temp_mat_zeroed, triangular_solve::*},
    perm::permute_rows,
    MatMut, MatRef, RealField,
};
use dyn_stack::{PodStack, SizeOverflow, StackReq};
use reborrow::*;

/// Computes the size and alignment of required workspace for solving a linear system defined by a
/// matrix in place, given its full pivoting LU decomposition.
pub fn solve_in_place_req<E: RealField>(
    lu_dim: usize,
    rhs_ncols: usize,
) -> Result<StackReq, SizeOverflow> {
    temp_mat_req::<E>(lu_dim, rhs_ncols)
}

/// Given the LU factors of a full rank square matrix $A$ and a matrix $B$ stored in `rhs`, this
/// function computes the solution of the linear system:
/// $$AX = B.$$
///
/// The solution of the linear system is stored in `rhs`.
///
/// # Panics
///
/// - Panics if `lu_factors` is not a square matrix.
/// - Panics if `row_perm` or `col_perm` don't have the same dimension as `lu_factors`.
/// - Panics if `rhs` doesn't have the same number of rows as the dimension of `lu_factors`.
/// - Panics if the provided memory in `stack` is insufficient (see [`solve_in_place_req`]).
#[track_caller]
pub fn solve_in_place<E: RealField>(
    lu_factors: MatRef<'_, E>,
    row_perm: &[usize],
    col_perm: &[usize],
    rhs: MatMut<'_, E>,
    stack: PodStack<'_>,
) {
    let n = lu_factors.nrows();
    assert!(all(
        lu_factors.ncols() == n,
        row_perm.len() == n,
        col_perm.len() == n,
        rhs.nrows() == n,
    ));

    // LU = P A Q^T
    // X = Q^T U^-1 L^-1 P B

    let mut rhs = rhs;
    let (mut temp, _) = temp_mat_zeroed::<E>(n, rhs.ncols(), stack);

    permute_rows(temp.rb_mut(), rhs.rb(), row_perm);
    solve_unit_lower_triangular_in_place(lu_factors, temp.rb_mut());
    solve_upper_triangular_in_place(lu_factors, temp.rb_mut());

    for (j, &q) in col_perm.iter().enumerate() {
        rhs.rb_mut().row_mut(q).copy_from_slice(temp.rb().row(j));
    }
}
