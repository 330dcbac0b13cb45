//! Elementwise arithmetic between matrices, vectors and scalars
//!
//! Every binary function takes two [`Operand`]s, at least one of which must
//! be a matrix. A vector operand is broadcast down the rows of the matrix,
//! so its length must equal the matrix's column count; a scalar is broadcast
//! over every element.
//!
//! The `std::ops` implementations at the bottom are sugar over the named
//! functions and panic where those return an error.

use std::ops::{Add, Div, Mul, Neg, Sub};

use lasr_core::{vector, LasrError, Vector};

use crate::algebra::mtimes;
use crate::helpers::{check_len, check_same_dims};
use crate::layout::to_rows;
use crate::types::{Dim, Matrix};

/// One side of an elementwise operation
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Matrix(&'a Matrix),
    /// Broadcast as a row
    Vector(&'a [f64]),
    Scalar(f64),
}

impl<'a> From<&'a Matrix> for Operand<'a> {
    fn from(m: &'a Matrix) -> Self {
        Operand::Matrix(m)
    }
}

impl<'a> From<&'a [f64]> for Operand<'a> {
    fn from(v: &'a [f64]) -> Self {
        Operand::Vector(v)
    }
}

impl<'a> From<&'a Vec<f64>> for Operand<'a> {
    fn from(v: &'a Vec<f64>) -> Self {
        Operand::Vector(v)
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for Operand<'a> {
    fn from(v: &'a [f64; N]) -> Self {
        Operand::Vector(v)
    }
}

impl From<f64> for Operand<'_> {
    fn from(x: f64) -> Self {
        Operand::Scalar(x)
    }
}

// ========== Broadcasting ==========

fn broadcast_row(m: &Matrix, v: &[f64], func: &str) -> Result<Vec<f64>, LasrError> {
    check_len(m.cols(), v.len(), "vector operand", func)?;
    Ok(v.iter().copied().cycle().take(m.rows() * m.cols()).collect())
}

fn elementwise(
    a: Operand<'_>,
    b: Operand<'_>,
    func: &str,
    f: impl Fn(f64, f64) -> f64,
) -> Result<Matrix, LasrError> {
    match (a, b) {
        (Operand::Matrix(x), Operand::Matrix(y)) => {
            check_same_dims(x, y, func)?;
            Ok(x.with_flat(vector::zip_with(x.as_flat(), y.as_flat(), func, f)?))
        }
        (Operand::Matrix(x), Operand::Vector(v)) => {
            let y = broadcast_row(x, v, func)?;
            Ok(x.with_flat(vector::zip_with(x.as_flat(), &y, func, f)?))
        }
        (Operand::Vector(v), Operand::Matrix(y)) => {
            let x = broadcast_row(y, v, func)?;
            Ok(y.with_flat(vector::zip_with(&x, y.as_flat(), func, f)?))
        }
        (Operand::Matrix(x), Operand::Scalar(s)) => {
            Ok(x.with_flat(vector::map(x.as_flat(), |e| f(e, s))))
        }
        (Operand::Scalar(s), Operand::Matrix(y)) => {
            Ok(y.with_flat(vector::map(y.as_flat(), |e| f(s, e))))
        }
        _ => Err(LasrError::invalid_argument(format!(
            "{}: at least one operand must be a matrix",
            func
        ))),
    }
}

// ========== Binary operations ==========

/// `a + b`
pub fn plus<'a, 'b>(
    a: impl Into<Operand<'a>>,
    b: impl Into<Operand<'b>>,
) -> Result<Matrix, LasrError> {
    elementwise(a.into(), b.into(), "plus", |x, y| x + y)
}

/// `a - b`
pub fn minus<'a, 'b>(
    a: impl Into<Operand<'a>>,
    b: impl Into<Operand<'b>>,
) -> Result<Matrix, LasrError> {
    elementwise(a.into(), b.into(), "minus", |x, y| x - y)
}

/// Elementwise product `a .* b`
pub fn times<'a, 'b>(
    a: impl Into<Operand<'a>>,
    b: impl Into<Operand<'b>>,
) -> Result<Matrix, LasrError> {
    elementwise(a.into(), b.into(), "times", |x, y| x * y)
}

/// Right division `a ./ b`
pub fn rdivide<'a, 'b>(
    a: impl Into<Operand<'a>>,
    b: impl Into<Operand<'b>>,
) -> Result<Matrix, LasrError> {
    elementwise(a.into(), b.into(), "rdivide", |x, y| x / y)
}

/// Left division `a .\ b`, i.e. `b ./ a`
pub fn ldivide<'a, 'b>(
    a: impl Into<Operand<'a>>,
    b: impl Into<Operand<'b>>,
) -> Result<Matrix, LasrError> {
    elementwise(a.into(), b.into(), "ldivide", |x, y| y / x)
}

// ========== Unary operations ==========

pub fn uminus(a: &Matrix) -> Matrix {
    a.with_flat(vector::uminus(a.as_flat()))
}

pub fn abs(a: &Matrix) -> Matrix {
    a.with_flat(vector::abs(a.as_flat()))
}

/// Replace every element below `t` with `t`
pub fn thr(a: &Matrix, t: f64) -> Matrix {
    a.with_flat(vector::thr(a.as_flat(), t))
}

/// Apply `f` to every element
pub fn map(a: &Matrix, f: impl Fn(f64) -> f64) -> Matrix {
    a.with_flat(vector::map(a.as_flat(), f))
}

/// Apply a vector function to the whole row-major buffer.
///
/// `f` must return as many elements as it was given.
pub fn map_vec(a: &Matrix, f: impl Fn(&[f64]) -> Vector) -> Result<Matrix, LasrError> {
    let out = f(a.as_flat());
    check_len(a.as_flat().len(), out.len(), "mapped buffer", "map_vec")?;
    Ok(a.with_flat(out))
}

/// Collapse every row (`Dim::Row`) or column (`Dim::Column`) to one value
pub fn reduce(a: &Matrix, f: impl Fn(&[f64]) -> f64, d: Dim) -> Vector {
    to_rows(a, d).rows_iter().map(f).collect()
}

// ========== Operator sugar ==========

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Matrix {
        plus(self, rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl Add<f64> for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: f64) -> Matrix {
        map(self, |x| x + rhs)
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &Matrix) -> Matrix {
        minus(self, rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl Sub<f64> for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: f64) -> Matrix {
        map(self, |x| x - rhs)
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        uminus(self)
    }
}

/// Matrix product, not the elementwise one
impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        mtimes(self, rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Matrix {
        map(self, |x| x * rhs)
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        map(rhs, |x| self * x)
    }
}

impl Div<f64> for &Matrix {
    type Output = Matrix;

    fn div(self, rhs: f64) -> Matrix {
        map(self, |x| x / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasr_core::codes;

    fn m() -> Matrix {
        Matrix::from([[1.0, 2.0], [3.0, 4.0]])
    }

    #[test]
    fn test_matrix_matrix() {
        let b = Matrix::from([[4.0, 3.0], [2.0, 1.0]]);
        assert_eq!(plus(&m(), &b).unwrap(), Matrix::new(2, 2, 5.0));
        assert_eq!(minus(&m(), &b).unwrap(), Matrix::from([[-3.0, -1.0], [1.0, 3.0]]));
        assert_eq!(times(&m(), &b).unwrap(), Matrix::from([[4.0, 6.0], [6.0, 4.0]]));
        assert_eq!(rdivide(&m(), &b).unwrap(), Matrix::from([[0.25, 2.0 / 3.0], [1.5, 4.0]]));
        assert_eq!(ldivide(&m(), &b).unwrap(), Matrix::from([[4.0, 1.5], [2.0 / 3.0, 0.25]]));
    }

    #[test]
    fn test_scalar_operands() {
        assert_eq!(plus(&m(), 1.0).unwrap(), Matrix::from([[2.0, 3.0], [4.0, 5.0]]));
        assert_eq!(minus(10.0, &m()).unwrap(), Matrix::from([[9.0, 8.0], [7.0, 6.0]]));
        assert_eq!(rdivide(2.0, &m()).unwrap(), Matrix::from([[2.0, 1.0], [2.0 / 3.0, 0.5]]));
        assert_eq!(ldivide(&m(), 2.0).unwrap(), Matrix::from([[2.0, 1.0], [2.0 / 3.0, 0.5]]));
        assert_eq!(ldivide(2.0, &m()).unwrap(), Matrix::from([[0.5, 1.0], [1.5, 2.0]]));
    }

    #[test]
    fn test_vector_broadcasts_by_rows() {
        let v = vec![10.0, 20.0];
        assert_eq!(plus(&m(), &v).unwrap(), Matrix::from([[11.0, 22.0], [13.0, 24.0]]));
        assert_eq!(minus(&v, &m()).unwrap(), Matrix::from([[9.0, 18.0], [7.0, 16.0]]));
        let err = times(&m(), &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(err.is(codes::DIMENSION_MISMATCH));
    }

    #[test]
    fn test_operand_errors() {
        let err = plus(&m(), &Matrix::new(3, 2, 1.0)).unwrap_err();
        assert!(err.is(codes::DIMENSION_MISMATCH));
        let err = plus(1.0, 2.0).unwrap_err();
        assert!(err.is(codes::INVALID_ARGUMENT));
    }

    #[test]
    fn test_unary() {
        assert_eq!(uminus(&m()), Matrix::from([[-1.0, -2.0], [-3.0, -4.0]]));
        assert_eq!(abs(&uminus(&m())), m());
        assert_eq!(thr(&m(), 2.5), Matrix::from([[2.5, 2.5], [3.0, 4.0]]));
        assert_eq!(map(&m(), |x| x * x), Matrix::from([[1.0, 4.0], [9.0, 16.0]]));
    }

    #[test]
    fn test_map_vec_and_reduce() {
        let rev = map_vec(&m(), |v| v.iter().rev().copied().collect()).unwrap();
        assert_eq!(rev, Matrix::from([[4.0, 3.0], [2.0, 1.0]]));
        assert!(map_vec(&m(), |v| v[..1].to_vec()).is_err());

        let total = |v: &[f64]| v.iter().sum::<f64>();
        assert_eq!(reduce(&m(), total, Dim::Row), vec![3.0, 7.0]);
        assert_eq!(reduce(&m(), total, Dim::Column), vec![4.0, 6.0]);
    }

    #[test]
    fn test_operators() {
        let a = m();
        assert_eq!(&a + &a, Matrix::from([[2.0, 4.0], [6.0, 8.0]]));
        assert_eq!(&a - &a, Matrix::new(2, 2, 0.0));
        assert_eq!(-&a, uminus(&a));
        assert_eq!(&a * &a, Matrix::from([[7.0, 10.0], [15.0, 22.0]]));
        assert_eq!(&a * 2.0, 2.0 * &a);
        assert_eq!(&a / 2.0, Matrix::from([[0.5, 1.0], [1.5, 2.0]]));
        assert_eq!(&(&a + 1.0) - 1.0, a);
    }

    #[test]
    #[should_panic(expected = "DIMENSION_MISMATCH")]
    fn test_operator_shape_mismatch_panics() {
        let _ = &m() + &Matrix::new(1, 2, 0.0);
    }
}
