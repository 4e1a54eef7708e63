//! Rectangular integer matrices backed by a row-major buffer.
//!
//! [`Matrix`] is the value handed between the tabular adapters, the random
//! generator and [`crate::GraphAdapter`]. Rectangularity is checked once at
//! construction; every accessor afterwards relies on it.

use crate::{Result, error::ShapeError};

/// A rectangular matrix of `i64` cells stored in row-major order.
///
/// The column count is kept even when there are no rows, so a `0 × 3`
/// matrix and a `0 × 0` matrix are distinct values.
///
/// # Examples
/// ```
/// use adjacency_core::Matrix;
///
/// let matrix = Matrix::from_nested(vec![vec![1, 2, 3], vec![4, 5, 6]])?;
/// assert_eq!(matrix.shape(), (2, 3));
/// assert_eq!(matrix.get(1, 2), Some(6));
/// assert!(!matrix.is_square());
/// # Ok::<(), adjacency_core::ShapeError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<i64>,
}

impl Matrix {
    pub(crate) fn from_parts(rows: usize, cols: usize, values: Vec<i64>) -> Self {
        debug_assert_eq!(values.len(), rows.saturating_mul(cols));
        Self { rows, cols, values }
    }

    /// Builds a matrix from nested rows, copying the values verbatim.
    ///
    /// An empty outer sequence yields a `0 × 0` matrix.
    ///
    /// # Errors
    /// Returns [`ShapeError::NonRectangular`] naming the first row whose
    /// length differs from row 0.
    ///
    /// # Examples
    /// ```
    /// use adjacency_core::{Matrix, ShapeError};
    ///
    /// let err = Matrix::from_nested(vec![vec![1, 2], vec![3]]).unwrap_err();
    /// assert_eq!(err, ShapeError::NonRectangular { row: 1, expected: 2, actual: 1 });
    /// ```
    pub fn from_nested(data: Vec<Vec<i64>>) -> Result<Self> {
        let Some((first, rest)) = data.split_first() else {
            return Ok(Self::default());
        };
        let cols = first.len();
        if let Some((offset, row)) = rest.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(ShapeError::NonRectangular {
                row: offset + 1,
                expected: cols,
                actual: row.len(),
            });
        }
        let rows = data.len();
        let values = data.into_iter().flatten().collect();
        Ok(Self::from_parts(rows, cols, values))
    }

    /// Builds a matrix from a flat row-major buffer.
    ///
    /// # Errors
    /// Returns [`ShapeError::LengthMismatch`] when `values` does not hold
    /// exactly `rows * cols` cells and [`ShapeError::CapacityOverflow`] when
    /// that product does not fit in `usize`.
    ///
    /// # Examples
    /// ```
    /// use adjacency_core::Matrix;
    ///
    /// let matrix = Matrix::from_row_major(2, 2, vec![0, 1, 1, 0])?;
    /// assert_eq!(matrix.row(1), Some(&[1, 0][..]));
    /// # Ok::<(), adjacency_core::ShapeError>(())
    /// ```
    pub fn from_row_major(rows: usize, cols: usize, values: Vec<i64>) -> Result<Self> {
        let expected = cell_count(rows, cols)?;
        if values.len() != expected {
            return Err(ShapeError::LengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self::from_parts(rows, cols, values))
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns whether the matrix has as many rows as columns.
    ///
    /// The `0 × 0` matrix is square.
    #[must_use]
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns whether the matrix holds no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the cell at `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        if col >= self.cols {
            return None;
        }
        self.row(row).and_then(|cells| cells.get(col)).copied()
    }

    /// Returns row `index` as a slice, or `None` when out of bounds.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[i64]> {
        if index >= self.rows {
            return None;
        }
        let start = index.checked_mul(self.cols)?;
        let end = start.checked_add(self.cols)?;
        self.values.get(start..end)
    }

    /// Iterates over the rows in order.
    pub fn rows_iter(&self) -> impl ExactSizeIterator<Item = &[i64]> + '_ {
        (0..self.rows).map(|index| self.row(index).unwrap_or_default())
    }

    /// Returns the underlying row-major buffer.
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    /// Copies the matrix back into nested rows.
    ///
    /// # Examples
    /// ```
    /// use adjacency_core::Matrix;
    ///
    /// let nested = vec![vec![0, 1], vec![1, 0]];
    /// let matrix = Matrix::from_nested(nested.clone())?;
    /// assert_eq!(matrix.to_nested(), nested);
    /// # Ok::<(), adjacency_core::ShapeError>(())
    /// ```
    #[must_use]
    pub fn to_nested(&self) -> Vec<Vec<i64>> {
        self.rows_iter().map(<[i64]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<i64>>> for Matrix {
    type Error = ShapeError;

    fn try_from(data: Vec<Vec<i64>>) -> Result<Self> {
        Self::from_nested(data)
    }
}

pub(crate) fn cell_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or(ShapeError::CapacityOverflow { rows, cols })
}
