//! Row-major ↔ column-major adapter
//!
//! A matrix is stored row-major. Transposing it yields a buffer whose bytes
//! are the column-major layout of the original, which is what the kernels in
//! [`crate::kernel`] consume. `to_cols` is applied before a kernel call and
//! `to_rows` to every column-major result.

use crate::algebra::transpose;
use crate::types::{Dim, Matrix};

/// Interpret `m` as stored along `d` and return its row-major form
pub fn to_rows(m: &Matrix, d: Dim) -> Matrix {
    match d {
        Dim::Row => m.clone(),
        Dim::Column => transpose(m),
    }
}

/// Return `m` re-laid along columns when `d` is `Row`
pub fn to_cols(m: &Matrix, d: Dim) -> Matrix {
    match d {
        Dim::Row => transpose(m),
        Dim::Column => m.clone(),
    }
}

/// Column-major buffer of `m`
pub(crate) fn col_major(m: &Matrix) -> Vec<f64> {
    to_cols(m, Dim::Row).into_flat()
}

/// Row-major matrix from a column-major `rows × cols` buffer
pub(crate) fn from_col_major(rows: usize, cols: usize, buf: Vec<f64>) -> Matrix {
    // A column-major r×c buffer is the row-major buffer of its c×r transpose.
    let stored = Matrix::from_flat(cols, rows, buf)
        .unwrap_or_else(|e| panic!("kernel produced a malformed buffer: {}", e));
    to_rows(&stored, Dim::Column)
}
