//! Insertion, appending and concatenation along rows or columns
//!
//! A block may be a matrix, a single vector, a list of vectors or a scalar
//! broadcast to a full row or column. For row operations a vector is one
//! row; for column operations it is one column.

use lasr_core::{LasrError, Vector};

use crate::helpers::check_len;
use crate::types::Matrix;

/// A value that can be laid down as whole rows of a `width`-column matrix
pub trait RowBlock {
    fn row_block(self, width: usize, func: &str) -> Result<Matrix, LasrError>;
}

/// A value that can be laid down as whole columns of a `height`-row matrix
pub trait ColBlock {
    fn col_block(self, height: usize, func: &str) -> Result<Matrix, LasrError>;
}

impl RowBlock for &Matrix {
    fn row_block(self, width: usize, func: &str) -> Result<Matrix, LasrError> {
        check_len(width, self.cols(), "row block width", func)?;
        Ok(self.clone())
    }
}

impl RowBlock for &[f64] {
    fn row_block(self, width: usize, func: &str) -> Result<Matrix, LasrError> {
        check_len(width, self.len(), "row", func)?;
        Matrix::from_row(self.to_vec())
    }
}

impl RowBlock for &Vec<f64> {
    fn row_block(self, width: usize, func: &str) -> Result<Matrix, LasrError> {
        self.as_slice().row_block(width, func)
    }
}

impl<const N: usize> RowBlock for &[f64; N] {
    fn row_block(self, width: usize, func: &str) -> Result<Matrix, LasrError> {
        self.as_slice().row_block(width, func)
    }
}

impl RowBlock for f64 {
    fn row_block(self, width: usize, _func: &str) -> Result<Matrix, LasrError> {
        Ok(Matrix::new(1, width, self))
    }
}

impl RowBlock for &[Vector] {
    fn row_block(self, width: usize, func: &str) -> Result<Matrix, LasrError> {
        let block = Matrix::from_rows(self.to_vec())?;
        check_len(width, block.cols(), "row", func)?;
        Ok(block)
    }
}

impl RowBlock for &Vec<Vector> {
    fn row_block(self, width: usize, func: &str) -> Result<Matrix, LasrError> {
        self.as_slice().row_block(width, func)
    }
}

impl ColBlock for &Matrix {
    fn col_block(self, height: usize, func: &str) -> Result<Matrix, LasrError> {
        check_len(height, self.rows(), "column block height", func)?;
        Ok(self.clone())
    }
}

impl ColBlock for &[f64] {
    fn col_block(self, height: usize, func: &str) -> Result<Matrix, LasrError> {
        check_len(height, self.len(), "column", func)?;
        Matrix::from_column(self.to_vec())
    }
}

impl ColBlock for &Vec<f64> {
    fn col_block(self, height: usize, func: &str) -> Result<Matrix, LasrError> {
        self.as_slice().col_block(height, func)
    }
}

impl<const N: usize> ColBlock for &[f64; N] {
    fn col_block(self, height: usize, func: &str) -> Result<Matrix, LasrError> {
        self.as_slice().col_block(height, func)
    }
}

impl ColBlock for f64 {
    fn col_block(self, height: usize, _func: &str) -> Result<Matrix, LasrError> {
        Ok(Matrix::new(height, 1, self))
    }
}

impl ColBlock for &[Vector] {
    fn col_block(self, height: usize, func: &str) -> Result<Matrix, LasrError> {
        if self.is_empty() {
            return Err(LasrError::invalid_argument(format!("{}: empty column list", func)));
        }
        let mut block = Matrix::new(height, self.len(), 0.0);
        for (j, col) in self.iter().enumerate() {
            check_len(height, col.len(), "column", func)?;
            block.set_col(j, col);
        }
        Ok(block)
    }
}

impl ColBlock for &Vec<Vector> {
    fn col_block(self, height: usize, func: &str) -> Result<Matrix, LasrError> {
        self.as_slice().col_block(height, func)
    }
}

fn check_index(at: usize, size: usize, axis: &str, func: &str) -> Result<(), LasrError> {
    if at > size {
        return Err(LasrError::index_out_of_bounds(format!(
            "{}: cannot insert at {} into {} {}",
            func, at, size, axis
        )));
    }
    Ok(())
}

/// Insert rows before row `at`; rows at or after `at` shift down
pub fn insert_rows<B: RowBlock>(m: &Matrix, rows: B, at: usize) -> Result<Matrix, LasrError> {
    let block = rows.row_block(m.cols(), "insert_rows")?;
    check_index(at, m.rows(), "rows", "insert_rows")?;

    let split = at * m.cols();
    let src = m.as_flat();
    let mut flat = Vec::with_capacity(src.len() + block.as_flat().len());
    flat.extend_from_slice(&src[..split]);
    flat.extend_from_slice(block.as_flat());
    flat.extend_from_slice(&src[split..]);
    Matrix::from_flat(m.rows() + block.rows(), m.cols(), flat)
}

/// Insert columns before column `at`; columns at or after `at` shift right
pub fn insert_cols<B: ColBlock>(m: &Matrix, cols: B, at: usize) -> Result<Matrix, LasrError> {
    let block = cols.col_block(m.rows(), "insert_cols")?;
    check_index(at, m.cols(), "columns", "insert_cols")?;

    let width = m.cols() + block.cols();
    let mut flat = Vec::with_capacity(m.rows() * width);
    for (row, extra) in m.rows_iter().zip(block.rows_iter()) {
        flat.extend_from_slice(&row[..at]);
        flat.extend_from_slice(extra);
        flat.extend_from_slice(&row[at..]);
    }
    Matrix::from_flat(m.rows(), width, flat)
}

pub fn append_rows<B: RowBlock>(m: &Matrix, rows: B) -> Result<Matrix, LasrError> {
    insert_rows(m, rows, m.rows())
}

pub fn prepend_rows<B: RowBlock>(m: &Matrix, rows: B) -> Result<Matrix, LasrError> {
    insert_rows(m, rows, 0)
}

pub fn append_cols<B: ColBlock>(m: &Matrix, cols: B) -> Result<Matrix, LasrError> {
    insert_cols(m, cols, m.cols())
}

pub fn prepend_cols<B: ColBlock>(m: &Matrix, cols: B) -> Result<Matrix, LasrError> {
    insert_cols(m, cols, 0)
}

/// "Horizontal" concatenation: the rows of `b` go below the rows of `a`.
///
/// The name follows the library's historical convention, where the
/// boundary between the operands is a horizontal line. The result grows in
/// row count; for the column-growing counterpart see [`vconcat`].
pub fn hconcat(a: &Matrix, b: &Matrix) -> Result<Matrix, LasrError> {
    append_rows(a, b)
}

/// "Vertical" concatenation: the columns of `b` go right of the columns
/// of `a`.
///
/// The boundary between the operands is a vertical line, so the result
/// grows in column count. See [`hconcat`].
pub fn vconcat(a: &Matrix, b: &Matrix) -> Result<Matrix, LasrError> {
    append_cols(a, b)
}

/// Stack matrices top to bottom
pub fn vstack(ms: &[Matrix]) -> Result<Matrix, LasrError> {
    let (first, rest) = ms
        .split_first()
        .ok_or_else(|| LasrError::invalid_argument("vstack: empty matrix list"))?;
    rest.iter().try_fold(first.clone(), |acc, m| append_rows(&acc, m))
}

/// Stack matrices left to right
pub fn hstack(ms: &[Matrix]) -> Result<Matrix, LasrError> {
    let (first, rest) = ms
        .split_first()
        .ok_or_else(|| LasrError::invalid_argument("hstack: empty matrix list"))?;
    rest.iter().try_fold(first.clone(), |acc, m| append_cols(&acc, m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasr_core::codes;

    fn m22() -> Matrix {
        Matrix::from([[1.0, 2.0], [3.0, 4.0]])
    }

    #[test]
    fn test_insert_rows_shifts_down() {
        let m = Matrix::from([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let block = Matrix::from([[7.0, 8.0], [9.0, 10.0]]);
        let r = insert_rows(&m, &block, 1).unwrap();
        assert_eq!(r.rows(), m.rows() + block.rows());
        assert_eq!(r.row(0), m.row(0));
        assert_eq!(r.row(1), block.row(0));
        assert_eq!(r.row(2), block.row(1));
        assert_eq!(r.row(3), m.row(1));
        assert_eq!(r.row(4), m.row(2));
    }

    #[test]
    fn test_insert_rows_bounds() {
        let m = m22();
        assert!(insert_rows(&m, 0.0, 2).is_ok());
        let err = insert_rows(&m, 0.0, 3).unwrap_err();
        assert!(err.is(codes::INDEX_OUT_OF_BOUNDS));
        let err = insert_rows(&m, &vec![1.0, 2.0, 3.0], 0).unwrap_err();
        assert!(err.is(codes::DIMENSION_MISMATCH));
    }

    #[test]
    fn test_insert_cols_shifts_right() {
        let m = m22();
        let r = insert_cols(&m, &[9.0, 8.0], 1).unwrap();
        assert_eq!(r, Matrix::from([[1.0, 9.0, 2.0], [3.0, 8.0, 4.0]]));
        assert!(insert_cols(&m, &[9.0], 1).is_err());
        assert!(insert_cols(&m, 1.0, 3).is_err());
    }

    #[test]
    fn test_append_prepend_rows() {
        let m = m22();
        assert_eq!(
            append_rows(&m, 0.0).unwrap(),
            Matrix::from([[1.0, 2.0], [3.0, 4.0], [0.0, 0.0]])
        );
        assert_eq!(
            prepend_rows(&m, &[5.0, 6.0]).unwrap(),
            Matrix::from([[5.0, 6.0], [1.0, 2.0], [3.0, 4.0]])
        );
        let rows = vec![vec![7.0, 8.0], vec![9.0, 0.0]];
        assert_eq!(
            append_rows(&m, &rows).unwrap(),
            Matrix::from([[1.0, 2.0], [3.0, 4.0], [7.0, 8.0], [9.0, 0.0]])
        );
    }

    #[test]
    fn test_append_prepend_cols() {
        let m = m22();
        assert_eq!(
            append_cols(&m, 5.0).unwrap(),
            Matrix::from([[1.0, 2.0, 5.0], [3.0, 4.0, 5.0]])
        );
        assert_eq!(
            prepend_cols(&m, &vec![0.0, -1.0]).unwrap(),
            Matrix::from([[0.0, 1.0, 2.0], [-1.0, 3.0, 4.0]])
        );
        let cols = vec![vec![7.0, 8.0], vec![9.0, 0.0]];
        assert_eq!(
            append_cols(&m, &cols).unwrap(),
            Matrix::from([[1.0, 2.0, 7.0, 9.0], [3.0, 4.0, 8.0, 0.0]])
        );
        let empty: Vec<Vector> = vec![];
        assert!(append_cols(&m, &empty).is_err());
    }

    #[test]
    fn test_concat_naming() {
        let a = m22();
        let b = Matrix::from([[5.0, 6.0], [7.0, 8.0]]);
        assert_eq!(hconcat(&a, &b).unwrap().shape(), (4, 2));
        assert_eq!(vconcat(&a, &b).unwrap().shape(), (2, 4));
        assert_eq!(vconcat(&a, &b).unwrap().row(0), vec![1.0, 2.0, 5.0, 6.0]);
        assert!(hconcat(&a, &Matrix::new(1, 3, 0.0)).is_err());
    }

    #[test]
    fn test_stacks() {
        let a = Matrix::from([[1.0, 2.0]]);
        let b = Matrix::from([[3.0, 4.0]]);
        let c = Matrix::from([[5.0, 6.0]]);
        let v = vstack(&[a.clone(), b.clone(), c.clone()]).unwrap();
        assert_eq!(v, Matrix::from([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]));
        let h = hstack(&[a, b, c]).unwrap();
        assert_eq!(h, Matrix::from([[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]]));
        assert!(vstack(&[]).is_err());
    }
}
