//! Statistics along a dimension
//!
//! `Dim::Row` reduces every row to one value, `Dim::Column` every column.

use lasr_core::{stats, Vector};

use crate::arithmetic::reduce;
use crate::layout::to_rows;
use crate::types::{Dim, Matrix};

pub fn max(a: &Matrix, d: Dim) -> Vector {
    reduce(a, stats::max, d)
}

/// Index of the first largest element of each row or column
pub fn maxi(a: &Matrix, d: Dim) -> Vec<usize> {
    to_rows(a, d).rows_iter().map(stats::maxi).collect()
}

pub fn min(a: &Matrix, d: Dim) -> Vector {
    reduce(a, stats::min, d)
}

/// Index of the first smallest element of each row or column
pub fn mini(a: &Matrix, d: Dim) -> Vec<usize> {
    to_rows(a, d).rows_iter().map(stats::mini).collect()
}

pub fn mean(a: &Matrix, d: Dim) -> Vector {
    reduce(a, stats::mean, d)
}

/// Population standard deviation
pub fn std(a: &Matrix, d: Dim) -> Vector {
    reduce(a, stats::std, d)
}

pub fn sum(a: &Matrix, d: Dim) -> Vector {
    reduce(a, stats::sum, d)
}

pub fn sumsq(a: &Matrix, d: Dim) -> Vector {
    reduce(a, stats::sumsq, d)
}

/// Center and scale each row or column by its own mean and standard deviation
pub fn normalize(a: &Matrix, d: Dim) -> Matrix {
    let flat: Vec<f64> = to_rows(a, d).rows_iter().flat_map(stats::normalize).collect();
    match d {
        Dim::Row => a.with_flat(flat),
        Dim::Column => {
            let t = Matrix::from_flat(a.cols(), a.rows(), flat)
                .unwrap_or_else(|e| panic!("normalize: {}", e));
            to_rows(&t, Dim::Column)
        }
    }
}
