//! Dense matrix storage and views.
//!
//! A matrix is a rectangular grid of values stored in row-major order inside a single contiguous
//! buffer. Element `(i, j)` of a view lives at offset `i * row_stride + j` of the underlying
//! slice, and every access is bounds checked against the view's shape.
//!
//! - [`Mat`] owns its storage.
//! - [`MatRef`] is a shared view, similar to a `&[E]` with a 2D shape.
//! - [`MatMut`] is a mutable view, similar to a `&mut [E]` with a 2D shape.
//!
//! Views can be created over caller-owned buffers with [`MatRef::from_row_major_slice`] and
//! [`MatMut::from_row_major_slice_mut`], so that the routines of this crate can operate on memory
//! they do not own.

use crate::{assert, Entity};
use reborrow::*;

mod matmut;
mod matown;
mod matref;

pub use matmut::MatMut;
pub use matown::Mat;
pub use matref::MatRef;

/// Minimum slice length needed to hold a `nrows × ncols` matrix with the given row stride.
#[inline]
pub(crate) fn required_len(nrows: usize, ncols: usize, row_stride: usize) -> usize {
    if nrows == 0 || ncols == 0 {
        0
    } else {
        (nrows - 1) * row_stride + ncols
    }
}

#[track_caller]
#[inline]
pub(crate) fn check_view(len: usize, nrows: usize, ncols: usize, row_stride: usize) {
    assert!(all(
        row_stride >= ncols,
        nrows.checked_mul(row_stride).is_some(),
        len >= required_len(nrows, ncols, row_stride),
    ));
}

/// Creates a [`Mat`] containing the arguments.
///
/// ```
/// use dense_kernels::mat;
///
/// let matrix = mat![
///     [1.0, 5.0, 9.0],
///     [2.0, 6.0, 10.0],
///     [3.0, 7.0, 11.0],
///     [4.0, 8.0, 12.0f64],
/// ];
///
/// assert_eq!(matrix.read(0, 0), 1.0);
/// assert_eq!(matrix.read(1, 0), 2.0);
/// assert_eq!(matrix.read(2, 0), 3.0);
/// assert_eq!(matrix.read(3, 0), 4.0);
///
/// assert_eq!(matrix.read(0, 1), 5.0);
/// assert_eq!(matrix.read(1, 1), 6.0);
/// assert_eq!(matrix.read(2, 1), 7.0);
/// assert_eq!(matrix.read(3, 1), 8.0);
///
/// assert_eq!(matrix.read(0, 2), 9.0);
/// assert_eq!(matrix.read(1, 2), 10.0);
/// assert_eq!(matrix.read(2, 2), 11.0);
/// assert_eq!(matrix.read(3, 2), 12.0);
/// ```
#[macro_export]
macro_rules! mat {
    () => {
        $crate::Mat::new()
    };

    ($([$($v: expr),* $(,)?]),+ $(,)?) => {{
        let rows = [$([$($v),*]),+];
        let nrows = rows.len();
        let ncols = rows[0].len();
        $crate::Mat::from_fn(nrows, ncols, |i, j| rows[i][j])
    }};
}
