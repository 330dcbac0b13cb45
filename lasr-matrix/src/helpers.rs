//! Shape checks shared by the algebra and manipulation functions

use lasr_core::LasrError;

use crate::types::Matrix;

/// Check that `a * b` is defined
pub fn check_matmul_dims(a: &Matrix, b: &Matrix, func: &str) -> Result<(), LasrError> {
    if a.cols() != b.rows() {
        return Err(LasrError::dimension_mismatch(format!(
            "{}: incompatible dimensions {}×{} and {}×{}",
            func,
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    Ok(())
}

/// Check that two matrices have the same dimensions
pub fn check_same_dims(a: &Matrix, b: &Matrix, func: &str) -> Result<(), LasrError> {
    if a.shape() != b.shape() {
        return Err(LasrError::dimension_mismatch(format!(
            "{}: matrices must have same dimensions: {}×{} vs {}×{}",
            func,
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    Ok(())
}

/// Check that a matrix is square
pub fn check_square(m: &Matrix, func: &str) -> Result<(), LasrError> {
    if !m.is_square() {
        return Err(LasrError::dimension_mismatch(format!(
            "{}: requires square matrix, got {}×{}",
            func,
            m.rows(),
            m.cols()
        )));
    }
    Ok(())
}

/// Check that a block length matches the axis it is laid along
pub fn check_len(expected: usize, got: usize, what: &str, func: &str) -> Result<(), LasrError> {
    if expected != got {
        return Err(LasrError::dimension_mismatch(format!(
            "{}: {} must have {} elements, got {}",
            func, what, expected, got
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasr_core::codes;

    #[test]
    fn test_check_square() {
        assert!(check_square(&Matrix::new(3, 3, 0.0), "det").is_ok());
        let err = check_square(&Matrix::new(2, 3, 0.0), "det").unwrap_err();
        assert!(err.is(codes::DIMENSION_MISMATCH));
        assert!(err.message.contains("det"));
    }

    #[test]
    fn test_check_matmul_dims() {
        let a = Matrix::new(2, 3, 0.0);
        let b = Matrix::new(3, 4, 0.0);
        assert!(check_matmul_dims(&a, &b, "mtimes").is_ok());
        assert!(check_matmul_dims(&b, &a, "mtimes").is_err());
    }

    #[test]
    fn test_check_same_dims() {
        let a = Matrix::new(2, 3, 0.0);
        assert!(check_same_dims(&a, &a.clone(), "plus").is_ok());
        assert!(check_same_dims(&a, &Matrix::new(3, 2, 0.0), "plus").is_err());
        assert!(check_len(3, 2, "row", "insert").is_err());
    }
}
