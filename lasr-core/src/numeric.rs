//! Tolerant floating point comparison and integer helpers

/// Absolute tolerance used by every approximate comparison
pub const EPS: f64 = 1e-14;

/// `|a - b| <= EPS`
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (b - a).abs() <= EPS
}

/// `a` is less than `b` by more than `EPS`
#[inline]
pub fn approx_lt(a: f64, b: f64) -> bool {
    b - a > EPS
}

/// `a` is greater than `b` by more than `EPS`
#[inline]
pub fn approx_gt(a: f64, b: f64) -> bool {
    b - a < -EPS
}

#[inline]
pub fn approx_le(a: f64, b: f64) -> bool {
    approx_eq(a, b) || approx_lt(a, b)
}

#[inline]
pub fn approx_ge(a: f64, b: f64) -> bool {
    approx_eq(a, b) || approx_gt(a, b)
}

/// Mathematical modulo: the result always lies in `[0, |n|)`.
///
/// Panics if `n == 0`.
pub fn true_mod(a: isize, n: isize) -> isize {
    let m = n.abs();
    let r = a % m;
    if r < 0 {
        r + m
    } else {
        r
    }
}
