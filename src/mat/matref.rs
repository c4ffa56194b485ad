use super::*;
use crate::assert;
use crate::Mat;

/// Immutable view over a matrix, similar to an immutable reference to a 2D strided
/// [prim@slice].
///
/// The rows of the view are contiguous, and consecutive rows are `row_stride` elements apart in
/// the underlying slice. `MatRef` is [`Copy`], so it can be passed by value freely.
pub struct MatRef<'a, E: Entity> {
    pub(super) data: &'a [E],
    pub(super) nrows: usize,
    pub(super) ncols: usize,
    pub(super) row_stride: usize,
}

impl<E: Entity> Copy for MatRef<'_, E> {}
impl<E: Entity> Clone for MatRef<'_, E> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'short, E: Entity> Reborrow<'short> for MatRef<'_, E> {
    type Target = MatRef<'short, E>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        *self
    }
}

impl<'short, E: Entity> ReborrowMut<'short> for MatRef<'_, E> {
    type Target = MatRef<'short, E>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        *self
    }
}

impl<'a, E: Entity> IntoConst for MatRef<'a, E> {
    type Target = MatRef<'a, E>;

    #[inline]
    fn into_const(self) -> Self::Target {
        self
    }
}

impl<'a, E: Entity> MatRef<'a, E> {
    /// Creates a `MatRef` over a contiguous row-major slice of length `nrows * ncols`.
    ///
    /// # Panics
    /// Panics if the length of the slice is not equal to `nrows * ncols`.
    #[track_caller]
    #[inline]
    pub fn from_row_major_slice(data: &'a [E], nrows: usize, ncols: usize) -> Self {
        assert!(Some(data.len()) == nrows.checked_mul(ncols));
        Self {
            data,
            nrows,
            ncols,
            row_stride: ncols,
        }
    }

    /// Creates a `MatRef` over a row-major slice where consecutive rows start `row_stride`
    /// elements apart.
    ///
    /// # Panics
    /// Panics if `row_stride < ncols`, or if the slice is too short to hold the matrix.
    #[track_caller]
    #[inline]
    pub fn from_row_major_slice_with_stride(
        data: &'a [E],
        nrows: usize,
        ncols: usize,
        row_stride: usize,
    ) -> Self {
        check_view(data.len(), nrows, ncols, row_stride);
        Self {
            data,
            nrows,
            ncols,
            row_stride,
        }
    }

    /// Returns the number of rows of the matrix.
    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of columns of the matrix.
    #[inline(always)]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns the number of rows and columns of the matrix.
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Returns the offset between the first elements of two successive rows in the matrix.
    #[inline(always)]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Reads the value of the element at the given indices.
    ///
    /// # Panics
    /// Panics if `row >= self.nrows()` or `col >= self.ncols()`.
    #[track_caller]
    #[inline(always)]
    pub fn read(&self, row: usize, col: usize) -> E {
        assert!(all(row < self.nrows, col < self.ncols));
        self.data[row * self.row_stride + col]
    }

    /// Returns the row at the given index as a slice.
    ///
    /// # Panics
    /// Panics if `row >= self.nrows()`.
    #[track_caller]
    #[inline]
    pub fn row(self, row: usize) -> &'a [E] {
        assert!(row < self.nrows);
        if self.ncols == 0 {
            return &[];
        }
        let start = row * self.row_stride;
        &self.data[start..start + self.ncols]
    }

    /// Returns an iterator over the rows of the matrix.
    #[inline]
    pub fn rows(self) -> impl DoubleEndedIterator<Item = &'a [E]> + ExactSizeIterator {
        (0..self.nrows).map(move |i| self.row(i))
    }

    /// Returns a view over the submatrix starting at `(row_start, col_start)`, with dimensions
    /// `(nrows, ncols)`.
    ///
    /// # Panics
    /// Panics if the submatrix is not fully contained in `self`.
    #[track_caller]
    #[inline]
    pub fn submatrix(self, row_start: usize, col_start: usize, nrows: usize, ncols: usize) -> Self {
        assert!(all(
            row_start <= self.nrows,
            col_start <= self.ncols,
            nrows <= self.nrows - row_start,
            ncols <= self.ncols - col_start,
        ));
        let data = if nrows == 0 || ncols == 0 {
            &self.data[..0]
        } else {
            let offset = row_start * self.row_stride + col_start;
            &self.data[offset..offset + required_len(nrows, ncols, self.row_stride)]
        };
        Self {
            data,
            nrows,
            ncols,
            row_stride: self.row_stride,
        }
    }

    /// Returns a view over the rows in `row_start..row_start + nrows`.
    #[track_caller]
    #[inline]
    pub fn subrows(self, row_start: usize, nrows: usize) -> Self {
        self.submatrix(row_start, 0, nrows, self.ncols)
    }

    /// Returns a newly allocated matrix holding a copy of the values of `self`.
    #[inline]
    pub fn to_owned(&self) -> Mat<E> {
        let this = *self;
        Mat::from_fn(self.nrows, self.ncols, |i, j| this.read(i, j))
    }
}

impl<E: Entity> core::ops::Index<(usize, usize)> for MatRef<'_, E> {
    type Output = E;

    #[track_caller]
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &E {
        assert!(all(row < self.nrows, col < self.ncols));
        &self.data[row * self.row_stride + col]
    }
}

impl<E: Entity> core::fmt::Debug for MatRef<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

impl<E: Entity> PartialEq for MatRef<'_, E> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.rows().zip(other.rows()).all(|(a, b)| a == b)
    }
}
