//! Matrix construction functions
//!
//! All constructors panic on a zero dimension.

use lasr_core::random;
use rand::Rng;

use crate::types::Matrix;

pub fn zeros(rows: usize, cols: usize) -> Matrix {
    Matrix::new(rows, cols, 0.0)
}

pub fn ones(rows: usize, cols: usize) -> Matrix {
    Matrix::new(rows, cols, 1.0)
}

/// Zeros with the shape of `m`
pub fn zeros_like(m: &Matrix) -> Matrix {
    zeros(m.rows(), m.cols())
}

/// Ones with the shape of `m`
pub fn ones_like(m: &Matrix) -> Matrix {
    ones(m.rows(), m.cols())
}

/// Ones on the main diagonal, zeros elsewhere (need not be square)
pub fn eye(rows: usize, cols: usize) -> Matrix {
    let mut m = zeros(rows, cols);
    for i in 0..rows.min(cols) {
        m[(i, i)] = 1.0;
    }
    m
}

/// Square matrix with `v` on the main diagonal
pub fn diag(v: &[f64]) -> Matrix {
    diag_sized(v.len(), v.len(), v)
}

/// `rows × cols` matrix with `v` on the main diagonal.
///
/// Only the first `min(rows, cols)` values are used; a shorter `v` leaves
/// the remaining diagonal entries at zero.
pub fn diag_sized(rows: usize, cols: usize, v: &[f64]) -> Matrix {
    let mut m = zeros(rows, cols);
    for (i, &x) in v.iter().take(rows.min(cols)).enumerate() {
        m[(i, i)] = x;
    }
    m
}

/// Uniform random values on `[0, 1)`
pub fn rand(rows: usize, cols: usize) -> Matrix {
    rand_with(&mut rand::thread_rng(), rows, cols)
}

/// Standard normal random values
pub fn randn(rows: usize, cols: usize) -> Matrix {
    randn_with(&mut rand::thread_rng(), rows, cols)
}

pub fn rand_with<R: Rng + ?Sized>(rng: &mut R, rows: usize, cols: usize) -> Matrix {
    zeros(rows, cols).with_flat(random::rand_with(rng, rows * cols))
}

pub fn randn_with<R: Rng + ?Sized>(rng: &mut R, rows: usize, cols: usize) -> Matrix {
    zeros(rows, cols).with_flat(random::randn_with(rng, rows * cols))
}
