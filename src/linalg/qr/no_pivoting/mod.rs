//! The Householder reduction decomposes a matrix $A$ into the product
//! $$A = LQ^\top,$$
//! where $Q$ is an orthogonal matrix (represented as a sequence of Householder reflections), and
//! $L$ is a lower trapezoidal matrix.
//!
//! The reduction acts on the rows of the matrix, so factorizing $B^\top$ yields the classical QR
//! decomposition $B = QR$ with $R = L^\top$.

/// Computing the decomposition.
pub mod compute;
/// Reconstructing the original matrix or the orthogonal factor from the decomposition.
pub mod reconstruct;

#[cfg(test)]
mod tests {
    use super::{compute::*, reconstruct::*};
    use crate::{linalg::matmul::matmul, mat, Mat};
    use assert_approx_eq::assert_approx_eq;
    use rand::prelude::*;

    fn random(rng: &mut StdRng, nrows: usize, ncols: usize) -> Mat<f64> {
        Mat::from_fn(nrows, ncols, |_, _| rng.gen::<f64>() - 0.5)
    }

    #[test]
    fn test_permutation_matrix() {
        let mut a = mat![[0.0, 1.0], [1.0, 0.0]];
        let mut scales = [0.0; 1];
        let info = qr_in_place(a.as_mut(), &mut scales, 1e-12);

        assert!(info.rank == 2);
        assert!(info.householder_count == 1);
        assert!(a == mat![[-1.0, 1.0], [0.0, -1.0]]);
        assert!(scales == [1.0]);
    }

    #[test]
    fn test_reconstruct() {
        let rng = &mut StdRng::seed_from_u64(0);
        for (m, n) in [(1, 1), (2, 2), (6, 6), (15, 15), (3, 7), (7, 3), (1, 4), (4, 1)] {
            let a = random(rng, m, n);
            let mut qr = a.clone();
            let mut scales = vec![0.0; householder_count(m, n)];
            let info = qr_in_place(qr.as_mut(), &mut scales, 1e-12);
            assert!(info.rank == Ord::min(m, n));
            assert!(info.is_full_rank());

            let mut dst = Mat::<f64>::zeros(m, n);
            reconstruct(dst.as_mut(), qr.as_ref(), &scales, info.householder_count);
            for i in 0..m {
                for j in 0..n {
                    assert_approx_eq!(dst.read(i, j), a.read(i, j));
                }
            }

            let mut q = Mat::<f64>::zeros(n, n);
            orthogonal_factor(q.as_mut(), qr.as_ref(), &scales, info.householder_count);
            let mut qtq = Mat::<f64>::zeros(n, n);
            matmul(qtq.as_mut(), q.transpose().as_ref(), q.as_ref());
            for i in 0..n {
                for j in 0..n {
                    assert_approx_eq!(qtq.read(i, j), if i == j { 1.0 } else { 0.0 });
                }
            }
        }
    }

    #[test]
    fn test_diagonal_is_row_norm() {
        let mut a = mat![[3.0, 4.0, 0.0], [1.0, 1.0, 1.0], [-2.0, 1.0, 2.0f64]];
        let mut scales = [0.0; 2];
        qr_in_place(a.as_mut(), &mut scales, 1e-12);
        assert_approx_eq!(a.read(0, 0), -5.0);
    }

    #[test]
    fn test_rank_deficient() {
        let mut a = mat![[1.0, 2.0], [2.0, 4.0]];
        let mut scales = [0.0; 1];
        let info = qr_in_place(a.as_mut(), &mut scales, 1e-10);
        assert!(info.rank == 1);
        assert!(!info.is_full_rank());

        let mut a = mat![[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]];
        let mut scales = [0.0; 2];
        let info = qr_in_place(a.as_mut(), &mut scales, 1e-10);
        assert!(info.rank == 0);
        assert!(info.householder_count == 0);
    }

    #[test]
    fn test_one_by_one() {
        let mut a = mat![[-3.0]];
        assert!(qr_in_place(a.as_mut(), &mut [], 1e-12).rank == 1);

        let mut a = mat![[1e-13]];
        assert!(qr_in_place(a.as_mut(), &mut [], 1e-12).rank == 0);
    }

    #[test]
    fn test_empty() {
        let mut a = Mat::<f64>::zeros(3, 0);
        let info = qr_in_place(a.as_mut(), &mut [], 1e-12);
        assert!(info.rank == 0);
        assert!(info.is_full_rank());
    }
}
