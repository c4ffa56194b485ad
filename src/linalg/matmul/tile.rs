//! Partitioning of a blocked matrix multiplication into independent tasks.
//!
//! An `l×m` by `m×n` product is split along each of its three dimensions into blocks of
//! `block_size` elements, the last block of every dimension being clipped to the remainder. Every
//! `(row block, depth block, col block)` triple is one task, identified by its linear index
//! `(row_block * depth_blocks + depth_block) * col_blocks + col_block`.

use crate::{assert, utils::DivCeil};

/// One task of a blocked matrix multiplication: the product of the `(row_block, depth_block)` tile
/// of the left hand side with the `(depth_block, col_block)` tile of the right hand side, to be
/// accumulated into the `(row_block, col_block)` tile of the output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockDescriptor {
    /// Index of the block along the rows of the output.
    pub row_block: usize,
    /// Index of the block along the shared dimension.
    pub depth_block: usize,
    /// Index of the block along the columns of the output.
    pub col_block: usize,

    /// First row of the tile in the output and left hand side.
    pub row_start: usize,
    /// First index of the tile along the shared dimension.
    pub depth_start: usize,
    /// First column of the tile in the output and right hand side.
    pub col_start: usize,

    /// Number of rows of the tile, clipped at the matrix boundary.
    pub nrows: usize,
    /// Extent of the tile along the shared dimension, clipped at the matrix boundary.
    pub depth: usize,
    /// Number of columns of the tile, clipped at the matrix boundary.
    pub ncols: usize,
}

/// Block layout of an `l×m` by `m×n` multiplication.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileSchedule {
    l: usize,
    m: usize,
    n: usize,
    block_size: usize,
    row_blocks: usize,
    depth_blocks: usize,
    col_blocks: usize,
}

impl TileSchedule {
    /// Creates the schedule of the product of an `l×m` matrix with an `m×n` matrix.
    ///
    /// # Panics
    /// Panics if `block_size` is zero.
    #[track_caller]
    pub fn new(l: usize, m: usize, n: usize, block_size: usize) -> Self {
        assert!(block_size > 0);
        Self {
            l,
            m,
            n,
            block_size,
            row_blocks: l.msrv_div_ceil(block_size),
            depth_blocks: m.msrv_div_ceil(block_size),
            col_blocks: n.msrv_div_ceil(block_size),
        }
    }

    /// Returns the nominal block size.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the number of blocks along the rows, the shared dimension and the columns.
    #[inline]
    pub fn block_counts(&self) -> (usize, usize, usize) {
        (self.row_blocks, self.depth_blocks, self.col_blocks)
    }

    /// Returns the total number of tasks.
    ///
    /// This is zero whenever one of the dimensions is zero.
    #[inline]
    pub fn n_tasks(&self) -> usize {
        self.row_blocks
            .saturating_mul(self.depth_blocks)
            .saturating_mul(self.col_blocks)
    }

    /// Returns the largest tile extents, i.e. the dimensions of a full block clipped to the
    /// matrix shape.
    #[inline]
    pub fn max_tile_shape(&self) -> (usize, usize) {
        (
            Ord::min(self.block_size, self.l),
            Ord::min(self.block_size, self.n),
        )
    }

    /// Returns the descriptor of the task at index `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= self.n_tasks()`.
    #[track_caller]
    pub fn block(&self, idx: usize) -> BlockDescriptor {
        assert!(idx < self.n_tasks());
        let col_block = idx % self.col_blocks;
        let rest = idx / self.col_blocks;
        let depth_block = rest % self.depth_blocks;
        let row_block = rest / self.depth_blocks;

        let bs = self.block_size;
        let row_start = row_block * bs;
        let depth_start = depth_block * bs;
        let col_start = col_block * bs;

        BlockDescriptor {
            row_block,
            depth_block,
            col_block,
            row_start,
            depth_start,
            col_start,
            nrows: Ord::min(bs, self.l - row_start),
            depth: Ord::min(bs, self.m - depth_start),
            ncols: Ord::min(bs, self.n - col_start),
        }
    }

    /// Returns an iterator over all the tasks, in increasing index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = BlockDescriptor> + '_ {
        (0..self.n_tasks()).map(move |idx| self.block(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;

    #[test]
    fn test_block_counts() {
        let s = TileSchedule::new(5, 4, 3, 2);
        assert!(s.block_counts() == (3, 2, 2));
        assert!(s.n_tasks() == 12);

        let s = TileSchedule::new(5, 4, 3, 100);
        assert!(s.block_counts() == (1, 1, 1));
        assert!(s.max_tile_shape() == (5, 3));

        let s = TileSchedule::new(0, 4, 3, 2);
        assert!(s.n_tasks() == 0);
    }

    #[test]
    fn test_task_order_and_clipping() {
        let s = TileSchedule::new(5, 4, 3, 2);

        let first = s.block(0);
        assert!((first.row_block, first.depth_block, first.col_block) == (0, 0, 0));

        let b = s.block(1);
        assert!((b.row_block, b.depth_block, b.col_block) == (0, 0, 1));
        assert!((b.col_start, b.ncols) == (2, 1));

        let b = s.block(2);
        assert!((b.row_block, b.depth_block, b.col_block) == (0, 1, 0));

        let last = s.block(11);
        assert!((last.row_block, last.depth_block, last.col_block) == (2, 1, 1));
        assert!((last.row_start, last.nrows) == (4, 1));
        assert!((last.depth_start, last.depth) == (2, 2));
        assert!((last.col_start, last.ncols) == (2, 1));
    }

    #[test]
    fn test_tiles_cover_output_once_per_depth_block() {
        let (l, m, n) = (7, 5, 6);
        let s = TileSchedule::new(l, m, n, 3);
        let mut hits = vec![0usize; l * m * n];
        for b in s.iter() {
            for i in b.row_start..b.row_start + b.nrows {
                for k in b.depth_start..b.depth_start + b.depth {
                    for j in b.col_start..b.col_start + b.ncols {
                        hits[(i * m + k) * n + j] += 1;
                    }
                }
            }
        }
        assert!(hits.iter().all(|&h| h == 1));
    }
}
