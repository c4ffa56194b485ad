use criterion::{criterion_group, criterion_main, Criterion};
use dense_kernels::{
    linalg::{
        cholesky::llt::compute::cholesky_in_place,
        lu::{full_pivoting, partial_pivoting},
        matmul::{matmul_blocked, matmul_blocked_req},
        qr::no_pivoting::compute::{householder_count, qr_in_place},
    },
    perm::init_identity,
    Mat, Parallelism,
};
use dyn_stack::{GlobalPodBuffer, PodStack};
use rand::prelude::*;

fn random(rng: &mut StdRng, nrows: usize, ncols: usize) -> Mat<f64> {
    Mat::from_fn(nrows, ncols, |_, _| rng.gen::<f64>() - 0.5)
}

pub fn gemm(c: &mut Criterion) {
    let rng = &mut StdRng::seed_from_u64(0);
    for n in [64, 256, 512] {
        let a = random(rng, n, n);
        let b = random(rng, n, n);
        let mut acc = Mat::<f64>::zeros(n, n);

        for block_size in [16, 64, 128] {
            c.bench_function(&format!("st-gemm-{n}-bs{block_size}"), |bencher| {
                let mut mem = GlobalPodBuffer::new(
                    matmul_blocked_req::<f64>(n, n, n, block_size, Parallelism::None).unwrap(),
                );
                bencher.iter(|| {
                    matmul_blocked(
                        acc.as_mut(),
                        a.as_ref(),
                        b.as_ref(),
                        block_size,
                        Parallelism::None,
                        PodStack::new(&mut mem),
                    );
                })
            });

            c.bench_function(&format!("mt-gemm-{n}-bs{block_size}"), |bencher| {
                let parallelism = Parallelism::Rayon(0);
                let mut mem = GlobalPodBuffer::new(
                    matmul_blocked_req::<f64>(n, n, n, block_size, parallelism).unwrap(),
                );
                bencher.iter(|| {
                    matmul_blocked(
                        acc.as_mut(),
                        a.as_ref(),
                        b.as_ref(),
                        block_size,
                        parallelism,
                        PodStack::new(&mut mem),
                    );
                })
            });
        }
    }
}

pub fn factorizations(c: &mut Criterion) {
    let rng = &mut StdRng::seed_from_u64(0);
    for n in [64, 128, 256] {
        let a = random(rng, n, n);
        let spd = Mat::from_fn(n, n, |i, j| if i == j { n as f64 } else { 0.0 });

        c.bench_function(&format!("partial-piv-lu-{n}"), |bencher| {
            let mut perm = vec![0; n];
            bencher.iter(|| {
                let mut lu = a.clone();
                init_identity(&mut perm);
                partial_pivoting::compute::lu_in_place(lu.as_mut(), &mut perm, 1e-12)
            })
        });

        c.bench_function(&format!("full-piv-lu-{n}"), |bencher| {
            let mut row_perm = vec![0; n];
            let mut col_perm = vec![0; n];
            bencher.iter(|| {
                let mut lu = a.clone();
                init_identity(&mut row_perm);
                init_identity(&mut col_perm);
                full_pivoting::compute::lu_in_place(lu.as_mut(), &mut row_perm, &mut col_perm, 1e-12)
            })
        });

        c.bench_function(&format!("cholesky-{n}"), |bencher| {
            bencher.iter(|| {
                let mut r = spd.clone();
                cholesky_in_place(r.as_mut(), 1e-12)
            })
        });

        c.bench_function(&format!("householder-qr-{n}"), |bencher| {
            let mut scales = vec![0.0; householder_count(n, n)];
            bencher.iter(|| {
                let mut qr = a.clone();
                qr_in_place(qr.as_mut(), &mut scales, 1e-12)
            })
        });
    }
}

criterion_group!(benches, gemm, factorizations);
criterion_main!(benches);
