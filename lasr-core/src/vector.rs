//! Elementwise vector primitives
//!
//! A [`Vector`] is a plain `Vec<f64>`, read as a column vector. Binary
//! operations between two vectors require equal lengths; operations with a
//! scalar broadcast the scalar over every element.

use crate::error::LasrError;
use crate::numeric::{approx_eq, approx_ge, approx_gt, approx_le, approx_lt};

/// Dense column vector
pub type Vector = Vec<f64>;

pub fn zeros(count: usize) -> Vector {
    vec![0.0; count]
}

pub fn ones(count: usize) -> Vector {
    vec![1.0; count]
}

/// Apply `f` to every element
pub fn map(a: &[f64], f: impl Fn(f64) -> f64) -> Vector {
    a.iter().map(|&x| f(x)).collect()
}

/// Combine two equally sized vectors element by element
pub fn zip_with(
    a: &[f64],
    b: &[f64],
    func: &str,
    f: impl Fn(f64, f64) -> f64,
) -> Result<Vector, LasrError> {
    check_same_len(a, b, func)?;
    Ok(a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect())
}

/// Error if the two vectors differ in length
pub fn check_same_len(a: &[f64], b: &[f64], func: &str) -> Result<(), LasrError> {
    if a.len() != b.len() {
        return Err(LasrError::dimension_mismatch(format!(
            "{}: vector lengths {} and {}",
            func,
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

// ========== Vector ∘ Vector ==========

pub fn plus(a: &[f64], b: &[f64]) -> Result<Vector, LasrError> {
    zip_with(a, b, "plus", |x, y| x + y)
}

pub fn minus(a: &[f64], b: &[f64]) -> Result<Vector, LasrError> {
    zip_with(a, b, "minus", |x, y| x - y)
}

pub fn times(a: &[f64], b: &[f64]) -> Result<Vector, LasrError> {
    zip_with(a, b, "times", |x, y| x * y)
}

/// `a ./ b`
pub fn rdivide(a: &[f64], b: &[f64]) -> Result<Vector, LasrError> {
    zip_with(a, b, "rdivide", |x, y| x / y)
}

/// `b ./ a`
pub fn ldivide(a: &[f64], b: &[f64]) -> Result<Vector, LasrError> {
    zip_with(a, b, "ldivide", |x, y| y / x)
}

pub fn dot(a: &[f64], b: &[f64]) -> Result<f64, LasrError> {
    check_same_len(a, b, "dot")?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

// ========== Vector ∘ scalar ==========

pub fn plus_scalar(a: &[f64], b: f64) -> Vector {
    map(a, |x| x + b)
}

/// `a - b` for every element of `a`
pub fn minus_scalar(a: &[f64], b: f64) -> Vector {
    map(a, |x| x - b)
}

/// `a - b` for every element of `b`
pub fn scalar_minus(a: f64, b: &[f64]) -> Vector {
    map(b, |y| a - y)
}

pub fn times_scalar(a: &[f64], b: f64) -> Vector {
    map(a, |x| x * b)
}

/// `a ./ b` with scalar `b`
pub fn rdivide_scalar(a: &[f64], b: f64) -> Vector {
    map(a, |x| x / b)
}

/// `a ./ b` with scalar `a`
pub fn scalar_rdivide(a: f64, b: &[f64]) -> Vector {
    map(b, |y| a / y)
}

/// `b ./ a` with scalar `b`
pub fn ldivide_scalar(a: &[f64], b: f64) -> Vector {
    map(a, |x| b / x)
}

/// `b ./ a` with scalar `a`
pub fn scalar_ldivide(a: f64, b: &[f64]) -> Vector {
    map(b, |y| y / a)
}

// ========== Unary ==========

pub fn abs(a: &[f64]) -> Vector {
    map(a, f64::abs)
}

pub fn uminus(a: &[f64]) -> Vector {
    map(a, |x| -x)
}

/// Replace every element less than `t` by `t`
pub fn thr(a: &[f64], t: f64) -> Vector {
    map(a, |x| if x < t { t } else { x })
}

pub fn power(a: &[f64], p: f64) -> Vector {
    map(a, |x| x.powf(p))
}

pub fn square(a: &[f64]) -> Vector {
    map(a, |x| x * x)
}

pub fn sqrt(a: &[f64]) -> Vector {
    map(a, f64::sqrt)
}

pub fn exp(a: &[f64]) -> Vector {
    map(a, f64::exp)
}

pub fn log(a: &[f64]) -> Vector {
    map(a, f64::ln)
}

pub fn log2(a: &[f64]) -> Vector {
    map(a, f64::log2)
}

pub fn log10(a: &[f64]) -> Vector {
    map(a, f64::log10)
}

pub fn sin(a: &[f64]) -> Vector {
    map(a, f64::sin)
}

pub fn cos(a: &[f64]) -> Vector {
    map(a, f64::cos)
}

pub fn tan(a: &[f64]) -> Vector {
    map(a, f64::tan)
}

pub fn asin(a: &[f64]) -> Vector {
    map(a, f64::asin)
}

pub fn acos(a: &[f64]) -> Vector {
    map(a, f64::acos)
}

pub fn atan(a: &[f64]) -> Vector {
    map(a, f64::atan)
}

// ========== Comparison ==========

fn all_pairs(a: &[f64], b: &[f64], f: impl Fn(f64, f64) -> bool) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| f(x, y))
}

/// Equal lengths and every pair equal within tolerance
pub fn approx_eq_all(a: &[f64], b: &[f64]) -> bool {
    all_pairs(a, b, approx_eq)
}

pub fn all_gt(a: &[f64], b: &[f64]) -> bool {
    all_pairs(a, b, approx_gt)
}

pub fn all_lt(a: &[f64], b: &[f64]) -> bool {
    all_pairs(a, b, approx_lt)
}

pub fn all_ge(a: &[f64], b: &[f64]) -> bool {
    all_pairs(a, b, approx_ge)
}

pub fn all_le(a: &[f64], b: &[f64]) -> bool {
    all_pairs(a, b, approx_le)
}
