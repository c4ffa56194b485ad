//! Triangular solve module.
//!
//! The solvers work one right hand side row at a time, subtracting the contributions of the rows
//! that are already solved, so the triangular matrix is only ever read.

use crate::{assert, MatMut, MatRef, RealField};
use reborrow::*;

#[inline(always)]
fn sub_scaled<E: RealField>(dst: &mut [E], factor: E, src: &[E]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d -= factor * s;
    }
}

#[inline(always)]
fn div_by<E: RealField>(dst: &mut [E], value: E) {
    for d in dst {
        *d = *d / value;
    }
}

#[track_caller]
#[inline]
fn check_dims<E: RealField>(tri: MatRef<'_, E>, rhs: &MatMut<'_, E>) {
    assert!(all(tri.nrows() == tri.ncols(), rhs.nrows() == tri.ncols()));
}

/// Computes the solution of `triangular_lower×X = rhs`, and stores the result in `rhs`.
///
/// `triangular_lower` is interpreted as a unit lower triangular matrix: its diagonal is assumed to
/// be filled with ones, and neither the diagonal nor the strictly upper triangular part are
/// accessed.
///
/// # Panics
///
///  - Panics if `triangular_lower` is not a square matrix.
///  - Panics if `rhs.nrows() != triangular_lower.ncols()`
#[track_caller]
pub fn solve_unit_lower_triangular_in_place<E: RealField>(
    triangular_lower: MatRef<'_, E>,
    rhs: MatMut<'_, E>,
) {
    check_dims(triangular_lower, &rhs);
    let mut rhs = rhs;
    let n = triangular_lower.nrows();
    for i in 0..n {
        let (solved, rest) = rhs.rb_mut().split_at_row_mut(i);
        let solved = solved.into_const();
        let x = rest.row_mut(0);
        for (k, &l) in triangular_lower.row(i)[..i].iter().enumerate() {
            sub_scaled(x, l, solved.row(k));
        }
    }
}

/// Computes the solution of `triangular_upper×X = rhs`, and stores the result in `rhs`.
///
/// `triangular_upper` is interpreted as an upper triangular matrix (diagonal included).
/// Its strictly lower triangular part is not accessed.
///
/// # Panics
///
///  - Panics if `triangular_upper` is not a square matrix.
///  - Panics if `rhs.nrows() != triangular_upper.ncols()`
///
/// # Example
///
/// ```
/// use dense_kernels::{linalg::triangular_solve::solve_upper_triangular_in_place, mat};
///
/// let u = mat![[2.0, 1.0], [0.0, 4.0]];
/// let mut x = mat![[4.0], [8.0]];
///
/// solve_upper_triangular_in_place(u.as_ref(), x.as_mut());
/// assert_eq!(x, mat![[1.0], [2.0]]);
/// ```
#[track_caller]
pub fn solve_upper_triangular_in_place<E: RealField>(
    triangular_upper: MatRef<'_, E>,
    rhs: MatMut<'_, E>,
) {
    check_dims(triangular_upper, &rhs);
    let mut rhs = rhs;
    let n = triangular_upper.nrows();
    for i in (0..n).rev() {
        let (head, solved) = rhs.rb_mut().split_at_row_mut(i + 1);
        let solved = solved.into_const();
        let x = head.row_mut(i);
        let u = triangular_upper.row(i);
        for (k, &coeff) in u[i + 1..].iter().enumerate() {
            sub_scaled(x, coeff, solved.row(k));
        }
        div_by(x, u[i]);
    }
}

/// Computes the solution of `triangular_upper.transpose()×X = rhs`, and stores the result in
/// `rhs`.
///
/// `triangular_upper` is interpreted as an upper triangular matrix (diagonal included), so that
/// its transpose is lower triangular. Its strictly lower triangular part is not accessed.
///
/// # Panics
///
///  - Panics if `triangular_upper` is not a square matrix.
///  - Panics if `rhs.nrows() != triangular_upper.ncols()`
#[track_caller]
pub fn solve_upper_triangular_transpose_in_place<E: RealField>(
    triangular_upper: MatRef<'_, E>,
    rhs: MatMut<'_, E>,
) {
    check_dims(triangular_upper, &rhs);
    let mut rhs = rhs;
    let n = triangular_upper.nrows();
    for i in 0..n {
        let (solved, rest) = rhs.rb_mut().split_at_row_mut(i);
        let solved = solved.into_const();
        let x = rest.row_mut(0);
        for k in 0..i {
            sub_scaled(x, triangular_upper.read(k, i), solved.row(k));
        }
        div_by(x, triangular_upper.read(i, i));
    }
}
