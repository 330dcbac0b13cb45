use nalgebra::{Cholesky, DMatrix};

use super::{check_workspace, Kernel, KernelFailure};
use crate::types::Triangle;

/// Cholesky factorization of a symmetric positive definite matrix.
///
/// Only the `uplo` triangle of the column-major `a` is read. On success that
/// triangle is overwritten with `U` (`A = Uᵀ·U`) or `L` (`A = L·Lᵀ`); the
/// other triangle is left as it was.
pub struct Potrf {
    pub uplo: Triangle,
    pub n: usize,
    pub a: Vec<f64>,
}

impl Kernel for Potrf {
    const NAME: &'static str = "potrf";

    fn workspace_query(&self) -> usize {
        self.n * self.n
    }

    fn execute(&mut self, work: &mut [f64]) -> Result<(), KernelFailure> {
        let n = self.n;
        check_workspace(Self::NAME, self.workspace_query(), work)?;

        // Mirror the referenced triangle into a full symmetric matrix.
        let sym = &mut work[..n * n];
        for j in 0..n {
            for i in 0..n {
                let stored = match self.uplo {
                    Triangle::Upper => i <= j,
                    Triangle::Lower => i >= j,
                };
                sym[i + j * n] = if stored { self.a[i + j * n] } else { self.a[j + i * n] };
            }
        }

        let l = Cholesky::new(DMatrix::from_column_slice(n, n, sym))
            .ok_or(KernelFailure::NotPositiveDefinite { routine: Self::NAME })?
            .unpack();
        for j in 0..n {
            for i in 0..n {
                match self.uplo {
                    Triangle::Upper if i <= j => self.a[i + j * n] = l[(j, i)],
                    Triangle::Lower if i >= j => self.a[i + j * n] = l[(i, j)],
                    _ => {}
                }
            }
        }
        Ok(())
    }
}
