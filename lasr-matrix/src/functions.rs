//! Elementwise mathematical functions on matrices
//!
//! Domain errors follow IEEE-754: `sqrt(-1.0)` is `NaN`, `log(0.0)` is `-inf`.

use lasr_core::vector;

use crate::types::Matrix;

macro_rules! elementwise_fn {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(a: &Matrix) -> Matrix {
                a.with_flat(vector::$name(a.as_flat()))
            }
        )*
    };
}

elementwise_fn!(
    square,
    sqrt,
    exp,
    /// Natural logarithm
    log,
    log2,
    log10,
    sin,
    cos,
    tan,
    asin,
    acos,
    atan,
);

/// Raise every element to `p`
pub fn power(a: &Matrix, p: f64) -> Matrix {
    a.with_flat(vector::power(a.as_flat(), p))
}
