use crate::{
    assert,
    linalg::triangular_solve::{
        solve_upper_triangular_in_place, solve_upper_triangular_transpose_in_place,
    },
    MatMut, MatRef, RealField,
};
use reborrow::*;

/// Given the Cholesky factor of a matrix $A$ and a matrix $B$ stored in `rhs`, this function
/// computes the solution of the linear system:
/// $$AX = B.$$
///
/// The solution of the linear system is stored in `rhs`.
///
/// # Panics
///
/// - Panics if `cholesky_factor` is not a square matrix.
/// - Panics if `rhs` doesn't have the same number of rows as the dimension of `cholesky_factor`.
///
/// # Example
///
/// ```
/// use dense_kernels::{linalg::cholesky::llt::{compute, solve}, mat};
///
/// let mut a = mat![[4.0, 2.0], [2.0, 3.0]];
/// let mut x = mat![[6.0], [5.0f64]];
///
/// assert_eq!(compute::cholesky_in_place(a.as_mut(), 1e-12).rank, 2);
/// solve::solve_in_place(a.as_ref(), x.as_mut());
///
/// assert!((x.read(0, 0) - 1.0).abs() < 1e-12);
/// assert!((x.read(1, 0) - 1.0).abs() < 1e-12);
/// ```
#[track_caller]
pub fn solve_in_place<E: RealField>(cholesky_factor: MatRef<'_, E>, rhs: MatMut<'_, E>) {
    assert!(all(
        cholesky_factor.nrows() == cholesky_factor.ncols(),
        rhs.nrows() == cholesky_factor.nrows(),
    ));
    let mut rhs = rhs;
    solve_upper_triangular_transpose_in_place(cholesky_factor, rhs.rb_mut());
    solve_upper_triangular_in_place(cholesky_factor, rhs.rb_mut());
}
