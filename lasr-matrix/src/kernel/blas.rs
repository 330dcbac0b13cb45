use nalgebra::DMatrix;

/// `C = A * B` for column-major `A` (`m × k`) and `B` (`k × n`)
pub fn gemm(m: usize, k: usize, n: usize, a: &[f64], b: &[f64]) -> Vec<f64> {
    let a = DMatrix::from_column_slice(m, k, a);
    let b = DMatrix::from_column_slice(k, n, b);
    (a * b).as_slice().to_vec()
}

/// Transpose of a row-major `rows × cols` buffer, again row-major.
///
/// The column-major buffer of a matrix is the row-major buffer of its
/// transpose.
pub fn transpose(rows: usize, cols: usize, flat: &[f64]) -> Vec<f64> {
    DMatrix::from_row_slice(rows, cols, flat).as_slice().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemm_column_major() {
        // A = [[1, 2], [3, 4]], B = I
        let c = gemm(2, 2, 2, &[1.0, 3.0, 2.0, 4.0], &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(c, vec![1.0, 3.0, 2.0, 4.0]);
        // [1 2 3] * [1 1 1]^T
        assert_eq!(gemm(1, 3, 1, &[1.0, 2.0, 3.0], &[1.0, 1.0, 1.0]), vec![6.0]);
    }

    #[test]
    fn test_transpose_row_major() {
        let t = transpose(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(t, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }
}
