//! Matrix algebra: transpose, products, powers, inverse, triangles, determinant

use lasr_core::LasrError;
use tracing::debug;

use crate::construct::eye;
use crate::helpers::{check_matmul_dims, check_square};
use crate::kernel::{self, Getri, KernelFailure};
use crate::layout::{col_major, from_col_major};
use crate::types::{Matrix, Triangle};

/// Sum of the diagonal of a square matrix
pub fn trace(a: &Matrix) -> Result<f64, LasrError> {
    check_square(a, "trace")?;
    Ok((0..a.rows()).map(|i| a[(i, i)]).sum())
}

pub fn transpose(a: &Matrix) -> Matrix {
    let flat = kernel::transpose(a.rows(), a.cols(), a.as_flat());
    Matrix::from_flat(a.cols(), a.rows(), flat)
        .unwrap_or_else(|e| panic!("transpose produced a malformed buffer: {}", e))
}

/// Matrix product `A·B`
pub fn mtimes(a: &Matrix, b: &Matrix) -> Result<Matrix, LasrError> {
    check_matmul_dims(a, b, "mtimes")?;
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let c = kernel::gemm(m, k, n, &col_major(a), &col_major(b));
    Ok(from_col_major(m, n, c))
}

/// Integer matrix power; negative powers go through the inverse
pub fn mpower(a: &Matrix, p: i32) -> Result<Matrix, LasrError> {
    check_square(a, "mpower")?;
    match p {
        0 => Ok(eye(a.rows(), a.cols())),
        1 => Ok(a.clone()),
        -1 => inverse(a),
        p if p > 1 => {
            let mut c = a.clone();
            for _ in 1..p {
                c = mtimes(a, &c)?;
            }
            Ok(c)
        }
        p => {
            let positive = p.checked_neg().ok_or_else(|| {
                LasrError::invalid_argument(format!("mpower: exponent {} cannot be negated", p))
            })?;
            inverse(&mpower(a, positive)?)
        }
    }
}

/// Inverse through an LU factorization with partial pivoting
pub fn inverse(a: &Matrix) -> Result<Matrix, LasrError> {
    check_square(a, "inverse")?;
    let n = a.rows();
    let mut lu = col_major(a);
    let mut ipiv = vec![0; n];
    kernel::getrf(n, n, &mut lu, &mut ipiv).map_err(singular_in("inverse"))?;

    let mut getri = Getri { n, a: lu, ipiv };
    kernel::run(&mut getri).map_err(singular_in("inverse"))?;
    Ok(from_col_major(n, n, getri.a))
}

/// Report a kernel's singular status under the public function's name
fn singular_in(func: &'static str) -> impl Fn(KernelFailure) -> LasrError {
    move |e| match e {
        KernelFailure::Singular { .. } => LasrError::singular(func),
        other => other.into(),
    }
}

/// Keep the upper or lower triangle (diagonal included), zero the rest
pub fn tri(a: &Matrix, t: Triangle) -> Matrix {
    let mut out = a.clone();
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            let keep = match t {
                Triangle::Upper => j >= i,
                Triangle::Lower => j <= i,
            };
            if !keep {
                out[(i, j)] = 0.0;
            }
        }
    }
    out
}

/// Determinant from the LU factors: the product of `U`'s diagonal with one
/// sign flip per row interchange
pub fn det(a: &Matrix) -> Result<f64, LasrError> {
    check_square(a, "det")?;
    let n = a.rows();
    let mut lu = col_major(a);
    let mut ipiv = vec![0; n];
    match kernel::getrf(n, n, &mut lu, &mut ipiv) {
        Ok(()) => {}
        Err(KernelFailure::Singular { index, .. }) => {
            debug!(index, "det: zero pivot");
            return Ok(0.0);
        }
        Err(e) => return Err(e.into()),
    }
    let mut d = 1.0;
    for i in 0..n {
        d *= lu[i + i * n];
        if ipiv[i] != (i + 1) as i32 {
            d = -d;
        }
    }
    Ok(d)
}
