//! Core matrix type

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};

use lasr_core::vector;
use lasr_core::LasrError;
use serde::{Deserialize, Serialize};

/// Reduction / orientation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dim {
    /// Operate on each row
    #[default]
    Row,
    /// Operate on each column
    Column,
}

/// Which half of a square factor to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Triangle {
    #[default]
    Upper,
    Lower,
}

/// Dense matrix of `f64` stored row-major in one contiguous buffer.
///
/// Element `(i, j)` lives at `flat[i * cols + j]`. Both dimensions are
/// always positive and `flat.len() == rows * cols`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix", into = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    flat: Vec<f64>,
}

/// Unvalidated wire form of [`Matrix`]
#[derive(Serialize, Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    flat: Vec<f64>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = LasrError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Matrix::from_flat(raw.rows, raw.cols, raw.flat)
    }
}

impl From<Matrix> for RawMatrix {
    fn from(m: Matrix) -> Self {
        RawMatrix {
            rows: m.rows,
            cols: m.cols,
            flat: m.flat,
        }
    }
}

impl Matrix {
    /// `rows × cols` matrix with every element set to `value`.
    ///
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, cols: usize, value: f64) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "matrix dimensions must be positive, got {}×{}",
            rows,
            cols
        );
        Matrix {
            rows,
            cols,
            flat: vec![value; rows * cols],
        }
    }

    /// Wrap a row-major buffer
    pub fn from_flat(rows: usize, cols: usize, flat: Vec<f64>) -> Result<Self, LasrError> {
        if rows == 0 || cols == 0 {
            return Err(LasrError::invalid_argument(format!(
                "matrix dimensions must be positive, got {}×{}",
                rows, cols
            )));
        }
        if flat.len() != rows * cols {
            return Err(LasrError::dimension_mismatch(format!(
                "{}×{} matrix needs {} elements, got {}",
                rows,
                cols,
                rows * cols,
                flat.len()
            )));
        }
        Ok(Matrix { rows, cols, flat })
    }

    /// Build from a list of rows; every row must have the same length
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Self, LasrError> {
        if data.is_empty() || data[0].is_empty() {
            return Err(LasrError::invalid_argument("matrix: empty data"));
        }
        let rows = data.len();
        let cols = data[0].len();
        let mut flat = Vec::with_capacity(rows * cols);
        for (i, row) in data.into_iter().enumerate() {
            if row.len() != cols {
                return Err(LasrError::dimension_mismatch(format!(
                    "matrix: row {} has {} elements, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            flat.extend(row);
        }
        Ok(Matrix { rows, cols, flat })
    }

    /// Single-column matrix
    pub fn from_column(values: Vec<f64>) -> Result<Self, LasrError> {
        let rows = values.len();
        Self::from_flat(rows, 1, values)
    }

    /// Single-row matrix
    pub fn from_row(values: Vec<f64>) -> Result<Self, LasrError> {
        let cols = values.len();
        Self::from_flat(1, cols, values)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major backing buffer
    pub fn as_flat(&self) -> &[f64] {
        &self.flat
    }

    pub fn into_flat(self) -> Vec<f64> {
        self.flat
    }

    /// Matrix of the same shape over a new buffer of equal length
    pub(crate) fn with_flat(&self, flat: Vec<f64>) -> Matrix {
        assert_eq!(flat.len(), self.flat.len(), "buffer length must match shape");
        Matrix {
            rows: self.rows,
            cols: self.cols,
            flat,
        }
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}×{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Element at `(row, col)`. Panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.flat[self.offset(row, col)]
    }

    /// Overwrite element at `(row, col)`. Panics when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let k = self.offset(row, col);
        self.flat[k] = value;
    }

    /// Copy of row `i`
    pub fn row(&self, i: usize) -> Vec<f64> {
        assert!(i < self.rows, "row {} out of bounds for {} rows", i, self.rows);
        self.flat[i * self.cols..(i + 1) * self.cols].to_vec()
    }

    /// Replace row `i`; `values` must hold exactly `cols` elements
    pub fn set_row(&mut self, i: usize, values: &[f64]) {
        assert!(i < self.rows, "row {} out of bounds for {} rows", i, self.rows);
        assert_eq!(values.len(), self.cols, "row length must equal column count");
        let cols = self.cols;
        self.flat[i * cols..(i + 1) * cols].copy_from_slice(values);
    }

    /// Copy of column `j`
    pub fn col(&self, j: usize) -> Vec<f64> {
        assert!(j < self.cols, "column {} out of bounds for {} columns", j, self.cols);
        self.flat.iter().skip(j).step_by(self.cols).copied().collect()
    }

    /// Replace column `j`; `values` must hold exactly `rows` elements
    pub fn set_col(&mut self, j: usize, values: &[f64]) {
        assert!(j < self.cols, "column {} out of bounds for {} columns", j, self.cols);
        assert_eq!(values.len(), self.rows, "column length must equal row count");
        let cols = self.cols;
        for (i, &v) in values.iter().enumerate() {
            self.flat[i * cols + j] = v;
        }
    }

    /// Iterate over rows as slices
    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.flat.chunks_exact(self.cols)
    }

    /// Same shape and every element within `tol`
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.shape() == other.shape()
            && self.flat.iter().zip(&other.flat).all(|(a, b)| (a - b).abs() <= tol)
    }
}

impl<const R: usize, const C: usize> From<[[f64; C]; R]> for Matrix {
    fn from(data: [[f64; C]; R]) -> Self {
        assert!(R > 0 && C > 0, "matrix dimensions must be positive");
        Matrix {
            rows: R,
            cols: C,
            flat: data.iter().flatten().copied().collect(),
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.flat[self.offset(row, col)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        let k = self.offset(row, col);
        &mut self.flat[k]
    }
}

/// Flat row-major access
impl Index<usize> for Matrix {
    type Output = f64;

    fn index(&self, k: usize) -> &f64 {
        &self.flat[k]
    }
}

impl IndexMut<usize> for Matrix {
    fn index_mut(&mut self, k: usize) -> &mut f64 {
        &mut self.flat[k]
    }
}

/// Equal dimensions and every element within `lasr_core::EPS`
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && vector::approx_eq_all(&self.flat, &other.flat)
    }
}

/// Ordering holds only when it holds for every element pair; matrices of
/// different shape are unordered.
impl PartialOrd for Matrix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self < other {
            Some(Ordering::Less)
        } else if self > other {
            Some(Ordering::Greater)
        } else {
            None
        }
    }

    fn lt(&self, other: &Self) -> bool {
        self.shape() == other.shape() && vector::all_lt(&self.flat, &other.flat)
    }

    fn le(&self, other: &Self) -> bool {
        self.shape() == other.shape() && vector::all_le(&self.flat, &other.flat)
    }

    fn gt(&self, other: &Self) -> bool {
        self.shape() == other.shape() && vector::all_gt(&self.flat, &other.flat)
    }

    fn ge(&self, other: &Self) -> bool {
        self.shape() == other.shape() && vector::all_ge(&self.flat, &other.flat)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{}", v)?;
            }
        }
        Ok(())
    }
}
