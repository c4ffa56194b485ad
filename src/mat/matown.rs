use super::*;
use crate::assert;

/// Heap allocated matrix, similar to a 2D [`Vec`].
///
/// # Note
///
/// The memory layout of `Mat` is guaranteed to be row-major and contiguous, meaning that it has a
/// row stride equal to its number of columns.
///
/// Let us consider a 3×4 matrix
///
/// ```notcode
///  0 │ 1 │  2 │  3
/// ───┼───┼────┼───
///  4 │ 5 │  6 │  7
/// ───┼───┼────┼───
///  8 │ 9 │ 10 │ 11
/// ```
/// The memory representation of the data held by such a matrix is
///
/// ```notcode
/// 0 1 2 3 4 5 6 7 8 9 10 11
/// ```
#[derive(Clone)]
pub struct Mat<E: Entity> {
    data: Vec<E>,
    nrows: usize,
    ncols: usize,
}

impl<E: Entity> Default for Mat<E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Mat<E> {
    /// Returns an empty matrix of dimension `0×0`.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            nrows: 0,
            ncols: 0,
        }
    }

    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with the provided function.
    ///
    /// # Panics
    /// The function panics if the total number of elements overflows `usize`.
    #[inline]
    pub fn from_fn(nrows: usize, ncols: usize, f: impl FnMut(usize, usize) -> E) -> Self {
        let mut f = f;
        let len = nrows.checked_mul(ncols);
        assert!(len.is_some());
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with zeros.
    ///
    /// # Panics
    /// The function panics if the total number of elements overflows `usize`.
    #[inline]
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::from_fn(nrows, ncols, |_, _| E::zero())
    }

    /// Returns a new identity matrix with dimensions `(nrows, ncols)`.
    #[inline]
    pub fn identity(nrows: usize, ncols: usize) -> Self {
        Self::from_fn(nrows, ncols, |i, j| if i == j { E::one() } else { E::zero() })
    }

    /// Takes ownership of a row-major vector of length `nrows * ncols`.
    ///
    /// # Panics
    /// Panics if the length of the vector is not equal to `nrows * ncols`.
    #[track_caller]
    #[inline]
    pub fn from_row_major_vec(data: Vec<E>, nrows: usize, ncols: usize) -> Self {
        assert!(Some(data.len()) == nrows.checked_mul(ncols));
        Self { data, nrows, ncols }
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

    /// Returns the underlying row-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[E] {
        &self.data
    }

    /// Returns the underlying row-major storage.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [E] {
        &mut self.data
    }

    /// Consumes the matrix and returns its row-major storage.
    #[inline]
    pub fn into_vec(self) -> Vec<E> {
        self.data
    }

    /// Returns a view over the matrix.
    #[inline]
    pub fn as_ref(&self) -> MatRef<'_, E> {
        MatRef {
            data: &self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            row_stride: self.ncols,
        }
    }

    /// Returns a mutable view over the matrix.
    #[inline]
    pub fn as_mut(&mut self) -> MatMut<'_, E> {
        MatMut {
            data: &mut self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            row_stride: self.ncols,
        }
    }

    /// Reads the value of the element at the given indices.
    ///
    /// # Panics
    /// Panics if `row >= self.nrows()` or `col >= self.ncols()`.
    #[track_caller]
    #[inline(always)]
    pub fn read(&self, row: usize, col: usize) -> E {
        self.as_ref().read(row, col)
    }

    /// Writes the value to the element at the given indices.
    ///
    /// # Panics
    /// Panics if `row >= self.nrows()` or `col >= self.ncols()`.
    #[track_caller]
    #[inline(always)]
    pub fn write(&mut self, row: usize, col: usize, value: E) {
        self.as_mut().write(row, col, value)
    }

    /// Returns the transpose of the matrix, as a newly allocated matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        let this = self.as_ref();
        Self::from_fn(self.ncols, self.nrows, |i, j| this.read(j, i))
    }
}

impl<E: Entity> core::ops::Index<(usize, usize)> for Mat<E> {
    type Output = E;

    #[track_caller]
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &E {
        assert!(all(row < self.nrows, col < self.ncols));
        &self.data[row * self.ncols + col]
    }
}

impl<E: Entity> core::ops::IndexMut<(usize, usize)> for Mat<E> {
    #[track_caller]
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut E {
        assert!(all(row < self.nrows, col < self.ncols));
        &mut self.data[row * self.ncols + col]
    }
}

impl<E: Entity> core::fmt::Debug for Mat<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.as_ref(), f)
    }
}

impl<E: Entity> PartialEq for Mat<E> {
    fn eq(&self, other: &Self) -> bool {
        self.as_ref() == other.as_ref()
    }
}
