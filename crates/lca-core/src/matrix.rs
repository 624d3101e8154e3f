//! Dense matrices and matrix spaces over a ground ring.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, LcaError};
use crate::ring::{Ring, Scalar};

fn matrix_error(code: &str, message: impl Into<String>) -> LcaError {
    LcaError::InvalidInput(ErrorInfo::new(code, message))
}

/// Dense row-major matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix<T> {
    nrows: usize,
    ncols: usize,
    entries: Vec<T>,
}

impl<T> Matrix<T> {
    /// Builds a matrix from its rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, LcaError> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        let mut entries = Vec::with_capacity(nrows * ncols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(LcaError::InvalidInput(
                    ErrorInfo::new("ragged-rows", "all matrix rows must have the same length")
                        .with_context("row", idx.to_string())
                        .with_context("expected", ncols.to_string())
                        .with_context("actual", row.len().to_string()),
                ));
            }
            entries.extend(row);
        }
        Ok(Self {
            nrows,
            ncols,
            entries,
        })
    }

    /// Builds a matrix from a generating function over `(row, col)`.
    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut entries = Vec::with_capacity(nrows * ncols);
        for row in 0..nrows {
            for col in 0..ncols {
                entries.push(f(row, col));
            }
        }
        Self {
            nrows,
            ncols,
            entries,
        }
    }

    /// Returns `(nrows, ncols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns true when the matrix has as many rows as columns.
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Returns the entry at `(row, col)` if it is in range.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.nrows && col < self.ncols {
            self.entries.get(row * self.ncols + col)
        } else {
            None
        }
    }

    /// Iterates over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks(0) panics; a matrix without columns has no entries to chunk.
        self.entries.chunks(self.ncols.max(1))
    }

    /// Applies `f` entrywise.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            nrows: self.nrows,
            ncols: self.ncols,
            entries: self.entries.iter().map(f).collect(),
        }
    }

    /// Applies a fallible `f` entrywise, stopping at the first error.
    pub fn try_map<U, E>(&self, f: impl FnMut(&T) -> Result<U, E>) -> Result<Matrix<U>, E> {
        Ok(Matrix {
            nrows: self.nrows,
            ncols: self.ncols,
            entries: self.entries.iter().map(f).collect::<Result<_, _>>()?,
        })
    }

    /// Clones the entries back into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.rows().map(<[T]>::to_vec).collect()
    }
}

impl<T: PartialEq> Matrix<T> {
    /// Square and equal to its transpose.
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for row in 0..n {
            for col in (row + 1)..n {
                if self.entries[row * n + col] != self.entries[col * n + row] {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: Clone> Matrix<T> {
    /// Square matrix with `one` on the diagonal and `zero` elsewhere.
    pub fn diagonal(n: usize, zero: T, one: T) -> Self {
        Self::from_fn(n, n, |row, col| {
            if row == col {
                one.clone()
            } else {
                zero.clone()
            }
        })
    }

    /// The `n x n` identity matrix over `ring`.
    pub fn identity<R>(ring: &R, n: usize) -> Self
    where
        R: Ring<Element = T>,
    {
        Self::diagonal(n, ring.zero(), ring.one())
    }
}

impl<T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nrows == 0 || self.ncols == 0 {
            return write!(f, "{} x {} empty matrix", self.nrows, self.ncols);
        }
        let rendered: Vec<String> = self.entries.iter().map(ToString::to_string).collect();
        let width = rendered.iter().map(String::len).max().unwrap_or(0);
        for (row_idx, row) in rendered.chunks(self.ncols).enumerate() {
            if row_idx > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (col_idx, entry) in row.iter().enumerate() {
                if col_idx > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{entry:>width$}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// The space of `nrows x ncols` matrices over a ring.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixSpace<R: Ring> {
    ring: R,
    nrows: usize,
    ncols: usize,
}

impl<R: Ring> MatrixSpace<R> {
    /// Creates the matrix space `Mat(nrows x ncols, ring)`.
    pub fn new(ring: R, nrows: usize, ncols: usize) -> Self {
        Self { ring, nrows, ncols }
    }

    /// Square matrix space `Mat(n x n, ring)`.
    pub fn square(ring: R, n: usize) -> Self {
        Self::new(ring, n, n)
    }

    /// Returns the base ring.
    pub fn base_ring(&self) -> &R {
        &self.ring
    }

    /// Returns `(nrows, ncols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// True when the dimensions agree and every entry coerces into the ring.
    pub fn contains(&self, matrix: &Matrix<Scalar>) -> bool {
        self.coerce(matrix).is_ok()
    }

    /// Converts a rational matrix into an element of this space.
    pub fn coerce(&self, matrix: &Matrix<Scalar>) -> Result<Matrix<R::Element>, LcaError> {
        if matrix.dimensions() != self.dimensions() {
            return Err(LcaError::InvalidInput(
                ErrorInfo::new(
                    "dimension-mismatch",
                    format!(
                        "expected a {} x {} matrix, got {} x {}",
                        self.nrows,
                        self.ncols,
                        matrix.nrows(),
                        matrix.ncols()
                    ),
                )
                .with_context("ring", self.ring.name()),
            ));
        }
        matrix.try_map(|entry| self.ring.coerce(entry))
    }

    /// Identity element of a square space.
    pub fn identity(&self) -> Result<Matrix<R::Element>, LcaError> {
        if self.nrows != self.ncols {
            return Err(matrix_error(
                "not-square",
                "identity requires a square matrix space",
            ));
        }
        Ok(Matrix::identity(&self.ring, self.nrows))
    }
}

impl<R: Ring> Display for MatrixSpace<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Full MatrixSpace of {} by {} dense matrices over {}",
            self.nrows,
            self.ncols,
            self.ring.name()
        )
    }
}
