//! The full pivoting LU decomposition is such that:
//! $$PAQ^\top = LU,$$
//! where $P$ and $Q$ are permutation matrices, $L$ is a unit lower triangular matrix, and $U$ is
//! an upper triangular matrix.

/// Computing the decomposition.
pub mod compute;
/// Reconstructing the original matrix from the decomposition.
pub mod reconstruct;
/// Solving a linear system using the decomposition.
pub mod solve;

#[cfg(test)]
mod tests {
    use super::{compute::*, reconstruct::*, solve::*};
    use crate::{linalg::matmul::matmul, mat, perm::init_identity, Mat};
    use assert_approx_eq::assert_approx_eq;
    use dyn_stack::{GlobalPodBuffer, PodStack};
    use rand::prelude::*;

    fn random(rng: &mut StdRng, nrows: usize, ncols: usize) -> Mat<f64> {
        Mat::from_fn(nrows, ncols, |_, _| rng.gen::<f64>() - 0.5)
    }

    fn identities(m: usize, n: usize) -> (Vec<usize>, Vec<usize>) {
        let mut row_perm = vec![0; m];
        let mut col_perm = vec![0; n];
        init_identity(&mut row_perm);
        init_identity(&mut col_perm);
        (row_perm, col_perm)
    }

    #[test]
    fn test_reconstruct() {
        let rng = &mut StdRng::seed_from_u64(0);
        for (m, n) in [(1, 1), (5, 5), (12, 12), (4, 9), (9, 4)] {
            let a = random(rng, m, n);
            let mut lu = a.clone();
            let (mut row_perm, mut col_perm) = identities(m, n);

            let info = lu_in_place(lu.as_mut(), &mut row_perm, &mut col_perm, 1e-12);
            assert!(info.rank == Ord::min(m, n));
            assert!(info.is_full_rank());

            let mut dst = Mat::<f64>::zeros(m, n);
            reconstruct(
                dst.as_mut(),
                lu.as_ref(),
                &row_perm,
                &col_perm,
                PodStack::new(&mut GlobalPodBuffer::new(
                    reconstruct_req::<f64>(m, n).unwrap(),
                )),
            );
            for i in 0..m {
                for j in 0..n {
                    assert_approx_eq!(dst.read(i, j), a.read(i, j));
                }
            }
        }
    }

    #[test]
    fn test_pivot_is_global_maximum() {
        let mut a = mat![[1.0, 2.0, 0.5], [0.0, -1.0, 7.0], [3.0, -7.0, 1.0]];
        let (mut row_perm, mut col_perm) = identities(3, 3);
        let info = lu_in_place(a.as_mut(), &mut row_perm, &mut col_perm, 1e-12);

        // 7.0 at (1, 2) is scanned before -7.0 at (2, 1)
        assert!((row_perm[0], col_perm[0]) == (1, 2));
        assert!(a.read(0, 0) == 7.0);
        assert!(info.rank == 3);
    }

    #[test]
    fn test_ties_keep_first_entry() {
        // |-3| at (0, 1) comes before the equal magnitudes at (0, 2) and (1, 0)
        let mut a = mat![[1.0, -3.0, 3.0], [3.0, 0.0, -3.0], [0.0, 0.0, 1.0]];
        let (mut row_perm, mut col_perm) = identities(3, 3);
        let info = lu_in_place(a.as_mut(), &mut row_perm, &mut col_perm, 1e-12);

        assert!(a.read(0, 0) == -3.0);
        assert!(row_perm == [0, 1, 2]);
        assert!(col_perm == [1, 0, 2]);
        assert!(info.rank == 3);
    }

    #[test]
    fn test_rank_deficient() {
        let mut a = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [2.0, 4.0, 6.0]];
        let (mut row_perm, mut col_perm) = identities(3, 3);
        let info = lu_in_place(a.as_mut(), &mut row_perm, &mut col_perm, 1e-10);
        assert!(info.rank == 2);
        assert!(!info.is_full_rank());

        let mut z = Mat::<f64>::zeros(2, 3);
        let (mut row_perm, mut col_perm) = identities(2, 3);
        assert!(lu_in_place(z.as_mut(), &mut row_perm, &mut col_perm, 1e-10).rank == 0);
    }

    #[test]
    fn test_one_by_one() {
        let mut a = mat![[-2.0]];
        let (mut row_perm, mut col_perm) = identities(1, 1);
        assert!(lu_in_place(a.as_mut(), &mut row_perm, &mut col_perm, 1.0).rank == 1);

        let mut a = mat![[0.5]];
        assert!(lu_in_place(a.as_mut(), &mut row_perm, &mut col_perm, 1.0).rank == 0);
    }

    #[test]
    fn test_solve() {
        let rng = &mut StdRng::seed_from_u64(0);
        let n = 7;
        let k = 2;
        let a = random(rng, n, n);
        let b = random(rng, n, k);

        let mut lu = a.clone();
        let (mut row_perm, mut col_perm) = identities(n, n);
        assert!(lu_in_place(lu.as_mut(), &mut row_perm, &mut col_perm, 1e-12).rank == n);

        let mut x = b.clone();
        solve_in_place(
            lu.as_ref(),
            &row_perm,
            &col_perm,
            x.as_mut(),
            PodStack::new(&mut GlobalPodBuffer::new(
                solve_in_place_req::<f64>(n, k).unwrap(),
            )),
        );

        let mut ax = Mat::<f64>::zeros(n, k);
        matmul(ax.as_mut(), a.as_ref(), x.as_ref());
        for i in 0..n {
            for j in 0..k {
                assert_approx_eq!(ax.read(i, j), b.read(i, j));
            }
        }
    }
}
