//! Validated square adjacency matrices.
//!
//! Distances and capacities share one representation: an `N x N` grid of
//! non-negative [`Weight`] values stored row-major. Construction is the only
//! place shape is checked, so every component can index freely afterwards.

use crate::error::MatrixError;

/// Non-negative edge weight, distance or capacity.
pub type Weight = u32;

/// An `N x N` matrix of [`Weight`] values with `N >= 1`.
///
/// # Examples
/// ```
/// use colonet_core::SquareMatrix;
///
/// let matrix = SquareMatrix::try_from_rows(vec![vec![0, 3], vec![3, 0]])?;
/// assert_eq!(matrix.order(), 2);
/// assert_eq!(matrix.get(0, 1), 3);
/// # Ok::<(), colonet_core::MatrixError>(())
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SquareMatrix {
    order: usize,
    cells: Vec<Weight>,
}

impl SquareMatrix {
    /// Builds a matrix from its rows.
    ///
    /// # Errors
    /// Returns [`MatrixError::Empty`] when `rows` is empty and
    /// [`MatrixError::NotSquare`] when any row length differs from the row
    /// count.
    pub fn try_from_rows(rows: Vec<Vec<Weight>>) -> Result<Self, MatrixError> {
        let order = rows.len();
        if order == 0 {
            return Err(MatrixError::Empty);
        }

        let mut cells = Vec::with_capacity(order.saturating_mul(order));
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != order {
                return Err(MatrixError::NotSquare {
                    row,
                    len: values.len(),
                    expected: order,
                });
            }
            cells.extend(values);
        }

        Ok(Self { order, cells })
    }

    /// Builds an `order x order` matrix filled with zeros.
    ///
    /// # Errors
    /// Returns [`MatrixError::Empty`] when `order == 0`.
    pub fn zeros(order: usize) -> Result<Self, MatrixError> {
        if order == 0 {
            return Err(MatrixError::Empty);
        }
        Ok(Self {
            order,
            cells: vec![0; order.saturating_mul(order)],
        })
    }

    /// Returns the number of rows (and columns).
    #[must_use]
    #[rustfmt::skip]
    pub fn order(&self) -> usize { self.order }

    /// Returns the entry at (`row`, `col`).
    ///
    /// # Panics
    /// Panics when either index is `>= self.order()`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Weight {
        assert!(row < self.order, "row {row} out of range");
        assert!(col < self.order, "column {col} out of range");
        self.cells[row * self.order + col]
    }

    /// Overwrites the entry at (`row`, `col`).
    ///
    /// # Panics
    /// Panics when either index is `>= self.order()`.
    pub fn set(&mut self, row: usize, col: usize, value: Weight) {
        assert!(row < self.order, "row {row} out of range");
        assert!(col < self.order, "column {col} out of range");
        self.cells[row * self.order + col] = value;
    }

    /// Returns one row as a slice.
    ///
    /// # Panics
    /// Panics when `row >= self.order()`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Weight] {
        let start = row * self.order;
        &self.cells[start..start + self.order]
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[Weight]> {
        self.cells.chunks_exact(self.order)
    }

    /// Returns `true` when `m[i][j] == m[j][i]` for every pair.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.order).all(|i| ((i + 1)..self.order).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Checks the distance-matrix convention that every self-distance is 0.
    ///
    /// # Errors
    /// Returns [`MatrixError::NonZeroDiagonal`] for the first offending node.
    pub fn validate_distances(&self) -> Result<(), MatrixError> {
        match (0..self.order).find(|&index| self.get(index, index) != 0) {
            Some(index) => Err(MatrixError::NonZeroDiagonal {
                index,
                value: self.get(index, index),
            }),
            None => Ok(()),
        }
    }
}
