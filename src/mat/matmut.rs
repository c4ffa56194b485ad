use super::*;
use crate::assert;
use crate::Mat;

/// Mutable view over a matrix, similar to a mutable reference to a 2D strided [prim@slice].
///
/// # Move semantics
/// Since `MatMut` mutably borrows data, it cannot be [`Copy`]. This means that if we pass a
/// `MatMut` to a function that takes it by value, or use a method that consumes `self` like
/// [`MatMut::submatrix_mut`], this renders the original variable unusable.
/// ```compile_fail
/// use dense_kernels::{Mat, MatMut};
///
/// fn takes_matmut(view: MatMut<'_, f64>) {}
///
/// let mut matrix = Mat::<f64>::zeros(2, 2);
/// let view = matrix.as_mut();
///
/// takes_matmut(view); // `view` is moved (passed by value)
/// takes_matmut(view); // this fails to compile since `view` was moved
/// ```
/// The way to get around it is to use the [`reborrow::ReborrowMut`] trait, which allows us to
/// mutably borrow a `MatMut` to obtain another `MatMut` for the lifetime of the borrow.
/// It's also similarly possible to immutably borrow a `MatMut` to obtain a `MatRef` for the
/// lifetime of the borrow, using [`reborrow::Reborrow`].
/// ```
/// use dense_kernels::{Mat, MatMut, MatRef};
/// use reborrow::*;
///
/// fn takes_matmut(view: MatMut<'_, f64>) {}
/// fn takes_matref(view: MatRef<'_, f64>) {}
///
/// let mut matrix = Mat::<f64>::zeros(2, 2);
/// let mut view = matrix.as_mut();
///
/// takes_matmut(view.rb_mut());
/// takes_matmut(view.rb_mut());
/// takes_matref(view.rb());
/// // view is still usable here
/// ```
pub struct MatMut<'a, E: Entity> {
    pub(super) data: &'a mut [E],
    pub(super) nrows: usize,
    pub(super) ncols: usize,
    pub(super) row_stride: usize,
}

impl<'short, E: Entity> Reborrow<'short> for MatMut<'_, E> {
    type Target = MatRef<'short, E>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        MatRef {
            data: &*self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            row_stride: self.row_stride,
        }
    }
}

impl<'short, E: Entity> ReborrowMut<'short> for MatMut<'_, E> {
    type Target = MatMut<'short, E>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        MatMut {
            data: &mut *self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            row_stride: self.row_stride,
        }
    }
}

impl<'a, E: Entity> IntoConst for MatMut<'a, E> {
    type Target = MatRef<'a, E>;

    #[inline]
    fn into_const(self) -> Self::Target {
        MatRef {
            data: self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            row_stride: self.row_stride,
        }
    }
}

impl<'a, E: Entity> MatMut<'a, E> {
    /// Creates a `MatMut` over a contiguous row-major slice of length `nrows * ncols`.
    ///
    /// # Panics
    /// Panics if the length of the slice is not equal to `nrows * ncols`.
    #[track_caller]
    #[inline]
    pub fn from_row_major_slice_mut(data: &'a mut [E], nrows: usize, ncols: usize) -> Self {
        assert!(Some(data.len()) == nrows.checked_mul(ncols));
        Self {
            data,
            nrows,
            ncols,
            row_stride: ncols,
        }
    }

    /// Creates a `MatMut` over a row-major slice where consecutive rows start `row_stride`
    /// elements apart.
    ///
    /// # Panics
    /// Panics if `row_stride < ncols`, or if the slice is too short to hold the matrix.
    #[track_caller]
    #[inline]
    pub fn from_row_major_slice_with_stride_mut(
        data: &'a mut [E],
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
        self.rb().read(row, col)
    }

    /// Writes the value to the element at the given indices.
    ///
    /// # Panics
    /// Panics if `row >= self.nrows()` or `col >= self.ncols()`.
    #[track_caller]
    #[inline(always)]
    pub fn write(&mut self, row: usize, col: usize, value: E) {
        assert!(all(row < self.nrows, col < self.ncols));
        self.data[row * self.row_stride + col] = value;
    }

    /// Returns the row at the given index as a mutable slice.
    ///
    /// # Panics
    /// Panics if `row >= self.nrows()`.
    #[track_caller]
    #[inline]
    pub fn row_mut(self, row: usize) -> &'a mut [E] {
        assert!(row < self.nrows);
        if self.ncols == 0 {
            return &mut [];
        }
        let start = row * self.row_stride;
        &mut self.data[start..start + self.ncols]
    }

    /// Returns two distinct rows of the matrix as mutable slices.
    ///
    /// # Panics
    /// Panics if `a == b`, or if either index is out of bounds.
    #[track_caller]
    #[inline]
    pub fn two_rows_mut(self, a: usize, b: usize) -> (&'a mut [E], &'a mut [E]) {
        assert!(all(a != b, a < self.nrows, b < self.nrows));
        let ncols = self.ncols;
        let rs = self.row_stride;
        if ncols == 0 {
            return (&mut [], &mut []);
        }
        let (lo, hi) = (Ord::min(a, b), Ord::max(a, b));
        let (head, tail) = self.data.split_at_mut(hi * rs);
        let lo_row = &mut head[lo * rs..lo * rs + ncols];
        let hi_row = &mut tail[..ncols];
        if a < b {
            (lo_row, hi_row)
        } else {
            (hi_row, lo_row)
        }
    }

    /// Returns a view over the submatrix starting at `(row_start, col_start)`, with dimensions
    /// `(nrows, ncols)`.
    ///
    /// # Panics
    /// Panics if the submatrix is not fully contained in `self`.
    #[track_caller]
    #[inline]
    pub fn submatrix_mut(
        self,
        row_start: usize,
        col_start: usize,
        nrows: usize,
        ncols: usize,
    ) -> Self {
        assert!(all(
            row_start <= self.nrows,
            col_start <= self.ncols,
            nrows <= self.nrows - row_start,
            ncols <= self.ncols - col_start,
        ));
        let row_stride = self.row_stride;
        let data = if nrows == 0 || ncols == 0 {
            &mut self.data[..0]
        } else {
            let offset = row_start * row_stride + col_start;
            &mut self.data[offset..offset + required_len(nrows, ncols, row_stride)]
        };
        Self {
            data,
            nrows,
            ncols,
            row_stride,
        }
    }

    /// Splits the matrix horizontally at the given row into two parts: the rows in `0..row` and
    /// the rows in `row..self.nrows()`.
    ///
    /// # Panics
    /// Panics if `row > self.nrows()`.
    #[track_caller]
    #[inline]
    pub fn split_at_row_mut(self, row: usize) -> (Self, Self) {
        assert!(row <= self.nrows);
        let mid = Ord::min(row * self.row_stride, self.data.len());
        let (top, bot) = self.data.split_at_mut(mid);
        (
            Self {
                data: top,
                nrows: row,
                ncols: self.ncols,
                row_stride: self.row_stride,
            },
            Self {
                data: bot,
                nrows: self.nrows - row,
                ncols: self.ncols,
                row_stride: self.row_stride,
            },
        )
    }

    /// Fills the elements of `self` with zeros.
    #[inline]
    pub fn fill_zero(&mut self) {
        self.fill(E::zero())
    }

    /// Fills the elements of `self` with copies of `constant`.
    #[inline]
    pub fn fill(&mut self, constant: E) {
        for i in 0..self.nrows {
            self.rb_mut().row_mut(i).fill(constant);
        }
    }

    /// Copies the values from `other` into `self`.
    ///
    /// # Panics
    /// Panics if the two matrices do not have the same shape.
    #[track_caller]
    #[inline]
    pub fn copy_from(&mut self, other: MatRef<'_, E>) {
        assert!(all(self.nrows == other.nrows(), self.ncols == other.ncols()));
        for i in 0..self.nrows {
            self.rb_mut().row_mut(i).copy_from_slice(other.row(i));
        }
    }

    /// Returns a newly allocated matrix holding a copy of the values of `self`.
    #[inline]
    pub fn to_owned(&self) -> Mat<E> {
        self.rb().to_owned()
    }
}

impl<E: Entity> core::ops::Index<(usize, usize)> for MatMut<'_, E> {
    type Output = E;

    #[track_caller]
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &E {
        assert!(all(row < self.nrows, col < self.ncols));
        &self.data[row * self.row_stride + col]
    }
}

impl<E: Entity> core::ops::IndexMut<(usize, usize)> for MatMut<'_, E> {
    #[track_caller]
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut E {
        assert!(all(row < self.nrows, col < self.ncols));
        &mut self.data[row * self.row_stride + col]
    }
}

impl<E: Entity> core::fmt::Debug for MatMut<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.rb(), f)
    }
}
