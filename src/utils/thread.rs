use crate::{assert, *};

/// Executes the tasks by passing the values in `0..n_tasks` to `op`, possibly in parallel, while
/// splitting the amount of parallelism between the tasks.
#[inline]
pub fn for_each_raw(n_tasks: usize, op: impl Send + Sync + Fn(usize), parallelism: Parallelism) {
    fn implementation(
        n_tasks: usize,
        op: &(dyn Send + Sync + Fn(usize)),
        parallelism: Parallelism,
    ) {
        if n_tasks == 1 {
            op(0);
            return;
        }

        match parallelism {
            Parallelism::None => (0..n_tasks).for_each(op),
            #[cfg(feature = "rayon")]
            Parallelism::Rayon(n_threads) => {
                let n_threads = if n_threads > 0 {
                    n_threads
                } else {
                    rayon::current_num_threads()
                };

                use rayon::prelude::*;
                let min_len = n_tasks / n_threads;
                (0..n_tasks)
                    .into_par_iter()
                    .with_min_len(min_len)
                    .for_each(op);
            }
        }
    }
    implementation(n_tasks, &op, parallelism);
}

/// Splits `buf` into consecutive chunks of `chunk_len` elements and passes each of them to `op`
/// along with its index, possibly in parallel.
///
/// Every worker owns its chunk for the whole call, so the chunks can serve as private scratch
/// space.
///
/// # Panics
/// Panics if `chunk_len` is zero.
#[track_caller]
#[inline]
pub fn for_each_chunk_mut<T: Send>(
    buf: &mut [T],
    chunk_len: usize,
    op: impl Send + Sync + Fn(usize, &mut [T]),
    parallelism: Parallelism,
) {
    assert!(chunk_len > 0);
    match parallelism {
        Parallelism::None => buf
            .chunks_mut(chunk_len)
            .enumerate()
            .for_each(|(idx, chunk)| op(idx, chunk)),
        #[cfg(feature = "rayon")]
        Parallelism::Rayon(_) => {
            use rayon::prelude::*;
            buf.par_chunks_mut(chunk_len)
                .enumerate()
                .for_each(|(idx, chunk)| op(idx, chunk));
        }
    }
}

/// The amount of threads that should ideally execute an operation with the given parallelism.
#[inline]
pub fn parallelism_degree(parallelism: Parallelism) -> usize {
    match parallelism {
        Parallelism::None => 1,
        #[cfg(feature = "rayon")]
        Parallelism::Rayon(0) => rayon::current_num_threads(),
        #[cfg(feature = "rayon")]
        Parallelism::Rayon(n_threads) => n_threads,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_for_each_visits_every_task() {
        let counter = AtomicUsize::new(0);
        let sum = AtomicUsize::new(0);
        for_each_raw(
            17,
            |i| {
                counter.fetch_add(1, Ordering::Relaxed);
                sum.fetch_add(i, Ordering::Relaxed);
            },
            get_global_parallelism(),
        );
        assert!(counter.load(Ordering::Relaxed) == 17);
        assert!(sum.load(Ordering::Relaxed) == 17 * 16 / 2);
    }

    #[test]
    fn test_for_each_chunk_mut() {
        let mut buf = vec![0usize; 10];
        for_each_chunk_mut(
            &mut buf,
            3,
            |idx, chunk| chunk.iter_mut().for_each(|x| *x = idx),
            Parallelism::None,
        );
        assert!(buf == [0, 0, 0, 1, 1, 1, 2, 2, 2, 3]);
    }
}
