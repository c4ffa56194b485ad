//! The Cholesky decomposition of a symmetric positive definite matrix $A$ is such that:
//! $$A = R^\top R,$$
//! where $R$ is an upper triangular matrix.
//!
//! Only the upper triangular half of $A$ is read, and $R$ is stored back in its place. The
//! strictly lower triangular half is never accessed.

/// Computing the decomposition.
pub mod compute;
/// Reconstructing the original matrix from the decomposition.
pub mod reconstruct;
/// Solving a linear system using the decomposition.
pub mod solve;

#[cfg(test)]
mod tests {
    use super::{compute::*, reconstruct::*, solve::*};
    use crate::{linalg::matmul::matmul, mat, Mat};
    use assert_approx_eq::assert_approx_eq;
    use dyn_stack::{GlobalPodBuffer, PodStack};
    use rand::prelude::*;

    fn random_spd(rng: &mut StdRng, n: usize) -> Mat<f64> {
        let a = Mat::from_fn(n, n, |_, _| rng.gen::<f64>() - 0.5);
        let mut spd = Mat::from_fn(n, n, |i, j| if i == j { n as f64 } else { 0.0 });
        matmul(spd.as_mut(), a.transpose().as_ref(), a.as_ref());
        spd
    }

    #[test]
    fn test_two_by_two() {
        let a = mat![[4.0, 2.0], [f64::NAN, 3.0]];
        let mut r = a.clone();
        let info = cholesky_in_place(r.as_mut(), 1e-12);
        assert!(info.rank == 2);
        assert!(info.is_full_rank());

        assert_approx_eq!(r.read(0, 0), 2.0);
        assert_approx_eq!(r.read(0, 1), 1.0);
        assert_approx_eq!(r.read(1, 1), 2.0f64.sqrt());
        assert!(r.read(1, 0).is_nan());

        let mut dst = Mat::<f64>::zeros(2, 2);
        reconstruct_upper(dst.as_mut(), r.as_ref());
        assert_approx_eq!(dst.read(0, 0), 4.0);
        assert_approx_eq!(dst.read(0, 1), 2.0);
        assert_approx_eq!(dst.read(1, 1), 3.0);
        assert!(dst.read(1, 0) == 0.0);
    }

    #[test]
    fn test_reconstruct_random() {
        let rng = &mut StdRng::seed_from_u64(0);
        for n in [1, 2, 5, 16] {
            let a = random_spd(rng, n);
            let mut r = a.clone();
            assert!(cholesky_in_place(r.as_mut(), 1e-12).rank == n);

            reconstruct_upper_in_place(
                r.as_mut(),
                PodStack::new(&mut GlobalPodBuffer::new(
                    reconstruct_upper_in_place_req::<f64>(n).unwrap(),
                )),
            );
            for i in 0..n {
                for j in i..n {
                    assert_approx_eq!(r.read(i, j), a.read(i, j));
                }
            }
        }
    }

    #[test]
    fn test_not_positive_definite() {
        let mut a = mat![[1.0, 2.0], [2.0, 1.0]];
        let info = cholesky_in_place(a.as_mut(), 1e-12);
        assert!(info.rank == 1);
        assert!(!info.is_full_rank());

        let mut a = mat![[-4.0, 0.0], [0.0, 1.0]];
        assert!(cholesky_in_place(a.as_mut(), 1e-12).rank == 0);
    }

    #[test]
    fn test_one_by_one() {
        let mut a = mat![[9.0]];
        assert!(cholesky_in_place(a.as_mut(), 1e-12).rank == 1);
        assert!(a.read(0, 0) == 3.0);

        let mut a = mat![[1e-14]];
        assert!(cholesky_in_place(a.as_mut(), 1e-12).rank == 0);
    }

    #[test]
    fn test_solve() {
        let rng = &mut StdRng::seed_from_u64(0);
        let n = 9;
        let a = random_spd(rng, n);
        let b = Mat::from_fn(n, 3, |_, _| rng.gen::<f64>());

        let mut r = a.clone();
        assert!(cholesky_in_place(r.as_mut(), 1e-12).rank == n);

        let mut x = b.clone();
        solve_in_place(r.as_ref(), x.as_mut());

        let mut ax = Mat::<f64>::zeros(n, 3);
        matmul(ax.as_mut(), a.as_ref(), x.as_ref());
        for i in 0..n {
            for j in 0..3 {
                assert_approx_eq!(ax.read(i, j), b.read(i, j));
            }
        }
    }
}
