//! Householder transformations.
//!
//! A Householder reflection is linear transformation that describes a reflection about a
//! hyperplane that crosses the origin of the space.
//!
//! In this crate the reflections act on row vectors from the right, and are written as
//! $$H = I - \beta ww^\top,$$
//! where the first component of $w$ is one. The remaining components of $w$ are called the
//! essential part of the reflection, and $\beta = 2 / (w^\top w)$ is its scale.
//!
//! A sequence of reflections $H_0, H_1, \dots, H_{k-1}$ is stored compactly in a matrix, where
//! the essential part of $H_i$ lies in row $i$ to the right of the diagonal, and the scales are
//! kept in a separate vector.

use crate::{assert, MatMut, MatRef, RealField};
use reborrow::*;

/// Computes `x ← x H` where `H` is the reflection described by `essential` and `beta`.
///
/// # Panics
/// Panics if `x.len() != essential.len() + 1`.
#[track_caller]
#[inline]
pub fn apply_householder_on_the_right<E: RealField>(x: &mut [E], essential: &[E], beta: E) {
    assert!(x.len() == essential.len() + 1);
    let (head, tail) = x.split_at_mut(1);
    let head = &mut head[0];

    let mut dot = *head;
    for (&a, &w) in tail.iter().zip(essential) {
        dot += a * w;
    }
    let k = dot * beta;
    *head -= k;
    for (a, &w) in tail.iter_mut().zip(essential) {
        *a -= k * w;
    }
}

/// Computes `mat ← mat H_0 H_1 … H_{count-1}`, where the reflections are stored in
/// `householder_basis` and `householder_scales`.
///
/// # Panics
///
/// - Panics if `mat.ncols() != householder_basis.ncols()`.
/// - Panics if `count` is larger than the number of rows of the basis, its number of columns, or
/// the number of scales.
#[track_caller]
pub fn apply_householder_sequence_on_the_right<E: RealField>(
    householder_basis: MatRef<'_, E>,
    householder_scales: &[E],
    count: usize,
    mat: MatMut<'_, E>,
) {
    check_sequence(householder_basis, householder_scales, count, &mat);
    let mut mat = mat;
    for k in 0..count {
        apply_one(householder_basis, householder_scales, k, mat.rb_mut());
    }
}

/// Computes `mat ← mat H_{count-1} … H_1 H_0`, where the reflections are stored in
/// `householder_basis` and `householder_scales`.
///
/// Since every reflection is symmetric, this is the product with the transpose of the sequence
/// applied by [`apply_householder_sequence_on_the_right`].
///
/// # Panics
///
/// - Panics if `mat.ncols() != householder_basis.ncols()`.
/// - Panics if `count` is larger than the number of rows of the basis, its number of columns, or
/// the number of scales.
#[track_caller]
pub fn apply_householder_sequence_transpose_on_the_right<E: RealField>(
    householder_basis: MatRef<'_, E>,
    householder_scales: &[E],
    count: usize,
    mat: MatMut<'_, E>,
) {
    check_sequence(householder_basis, householder_scales, count, &mat);
    let mut mat = mat;
    for k in (0..count).rev() {
        apply_one(householder_basis, householder_scales, k, mat.rb_mut());
    }
}

#[track_caller]
#[inline]
fn check_sequence<E: RealField>(
    householder_basis: MatRef<'_, E>,
    householder_scales: &[E],
    count: usize,
    mat: &MatMut<'_, E>,
) {
    assert!(all(
        mat.ncols() == householder_basis.ncols(),
        count <= householder_basis.nrows(),
        count <= householder_basis.ncols(),
        count <= householder_scales.len(),
    ));
}

#[inline]
fn apply_one<E: RealField>(
    householder_basis: MatRef<'_, E>,
    householder_scales: &[E],
    k: usize,
    mat: MatMut<'_, E>,
) {
    let mut mat = mat;
    let essential = &householder_basis.row(k)[k + 1..];
    let beta = householder_scales[k];
    for i in 0..mat.nrows() {
        apply_householder_on_the_right(&mut mat.rb_mut().row_mut(i)[k..], essential, beta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_reflection_is_involutive() {
        let essential = [0.5, -2.0];
        let beta = 2.0 / (1.0 + 0.25 + 4.0);
        let x = [1.0, 2.0, 3.0];

        let mut y = x;
        apply_householder_on_the_right(&mut y, &essential, beta);
        let norm = |v: &[f64]| v.iter().map(|a| a * a).sum::<f64>().sqrt();
        assert_approx_eq!(norm(&y), norm(&x));

        apply_householder_on_the_right(&mut y, &essential, beta);
        for (a, b) in y.iter().zip(&x) {
            assert_approx_eq!(*a, *b);
        }
    }
}
