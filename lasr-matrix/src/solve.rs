//! Linear least squares

use lasr_core::LasrError;

use crate::helpers::check_len;
use crate::kernel::{self, Gels};
use crate::layout::col_major;
use crate::types::Matrix;

/// Solve the overdetermined system `A·X ≈ B` in the least-squares sense.
///
/// `A` is `m × n` with `m >= n` and full column rank, `B` is `m × k`.
/// Returns the `n × k` solution and a `1 × k` row holding the residual sum
/// of squares for each right-hand side.
pub fn lstsqr(a: &Matrix, b: &Matrix) -> Result<(Matrix, Matrix), LasrError> {
    let (m, n) = a.shape();
    if m < n {
        return Err(LasrError::dimension_mismatch(format!(
            "lstsqr: system is underdetermined ({} rows, {} columns)",
            m, n
        )));
    }
    check_len(m, b.rows(), "rows of B", "lstsqr")?;
    let k = b.cols();

    let mut gels = Gels { m, n, nrhs: k, a: col_major(a), b: col_major(b) };
    kernel::run(&mut gels)?;

    let solved = &gels.b;
    let mut x = Matrix::new(n, k, 0.0);
    let mut residual = Matrix::new(1, k, 0.0);
    for j in 0..k {
        let column = &solved[j * m..(j + 1) * m];
        for i in 0..n {
            x[(i, j)] = column[i];
        }
        residual[(0, j)] = column[n..].iter().map(|v| v * v).sum();
    }
    Ok((x, residual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasr_core::codes;

    #[test]
    fn test_lstsqr() {
        let a = Matrix::from([
            [1.44, -7.84, -4.39, 4.53],
            [-9.96, -0.28, -3.24, 3.83],
            [-7.55, 3.24, 6.27, -6.64],
            [8.34, 8.09, 5.28, 2.06],
            [7.08, 2.52, 0.74, -2.47],
            [-5.45, -5.70, -1.19, 4.70],
        ]);
        let b = Matrix::from([
            [8.58, 9.35],
            [8.26, -4.43],
            [8.48, -0.70],
            [-5.28, -0.26],
            [5.72, -7.36],
            [8.93, -2.52],
        ]);
        let expected = Matrix::from([
            [-0.4506, 0.2497],
            [-0.8491, -0.9020],
            [0.7066, 0.6323],
            [0.1288, 0.1351],
        ]);
        let (x, r) = lstsqr(&a, &b).unwrap();
        assert!(x.approx_eq(&expected, 1e-3));
        assert_eq!(r.shape(), (1, 2));
        assert!((r[(0, 0)] - 195.3616).abs() < 1e-3);
        assert!((r[(0, 1)] - 107.05746).abs() < 1e-3);
    }

    #[test]
    fn test_lstsqr_square_system() {
        let a = Matrix::from([[2.0, 0.0], [0.0, 4.0]]);
        let b = Matrix::from([[2.0], [2.0]]);
        let (x, r) = lstsqr(&a, &b).unwrap();
        assert!(x.approx_eq(&Matrix::from([[1.0], [0.5]]), 1e-14));
        assert_eq!(r, Matrix::new(1, 1, 0.0));
    }

    #[test]
    fn test_lstsqr_failures() {
        let err = lstsqr(&Matrix::new(2, 3, 1.0), &Matrix::new(2, 1, 1.0)).unwrap_err();
        assert!(err.is(codes::DIMENSION_MISMATCH));
        let err = lstsqr(&Matrix::new(3, 2, 1.0), &Matrix::new(2, 1, 1.0)).unwrap_err();
        assert!(err.is(codes::DIMENSION_MISMATCH));
        let rank_one = Matrix::from([[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]]);
        let err = lstsqr(&rank_one, &Matrix::new(3, 1, 1.0)).unwrap_err();
        assert!(err.is(codes::SINGULAR));
    }
}
