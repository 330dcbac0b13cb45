use nalgebra::{DMatrix, DMatrixViewMut, QR};

use super::{check_workspace, Kernel, KernelFailure, RANK_TOL};

/// Least-squares solve of an overdetermined full-rank system via QR.
///
/// `a` is `m × n` and `b` is `m × nrhs`, both column-major, with `m >= n`.
/// On exit the first `n` rows of each column of `b` hold the solution and
/// the remaining `m - n` rows hold the components of the residual in the
/// orthogonal complement of the range of `A`, so their sum of squares is the
/// residual sum of squares.
pub struct Gels {
    pub m: usize,
    pub n: usize,
    pub nrhs: usize,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
}

impl Kernel for Gels {
    const NAME: &'static str = "gels";

    fn workspace_query(&self) -> usize {
        self.m * self.nrhs
    }

    fn execute(&mut self, work: &mut [f64]) -> Result<(), KernelFailure> {
        let (m, n, nrhs) = (self.m, self.n, self.nrhs);
        check_workspace(Self::NAME, self.workspace_query(), work)?;

        let qr = QR::new(DMatrix::from_column_slice(m, n, &self.a));
        let r = qr.r();
        let scale = r.diagonal().amax();
        if let Some(i) = (0..n).find(|&i| r[(i, i)].abs() <= RANK_TOL * scale) {
            return Err(KernelFailure::Singular { routine: Self::NAME, index: i + 1 });
        }

        let staged = &mut work[..m * nrhs];
        staged.copy_from_slice(&self.b);
        let mut qtb = DMatrixViewMut::from_slice(staged, m, nrhs);
        qr.q_tr_mul(&mut qtb);
        let mut x = qtb.rows(0, n).into_owned();
        if !r.solve_upper_triangular_mut(&mut x) {
            return Err(KernelFailure::Singular { routine: Self::NAME, index: n });
        }
        qtb.rows_mut(0, n).copy_from(&x);

        self.b.copy_from_slice(&work[..m * nrhs]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::run;

    #[test]
    fn test_exact_fit_has_zero_residual() {
        // points on y = 1 + 2x
        let a = vec![1.0, 1.0, 1.0, 0.0, 1.0, 2.0];
        let b = vec![1.0, 3.0, 5.0];
        let mut k = Gels { m: 3, n: 2, nrhs: 1, a, b };
        run(&mut k).unwrap();
        assert!((k.b[0] - 1.0).abs() < 1e-12);
        assert!((k.b[1] - 2.0).abs() < 1e-12);
        assert!(k.b[2].abs() < 1e-12);
    }

    #[test]
    fn test_residual_component() {
        // mean of [1, 2, 6] with residual sum of squares 14
        let mut k = Gels { m: 3, n: 1, nrhs: 1, a: vec![1.0; 3], b: vec![1.0, 2.0, 6.0] };
        run(&mut k).unwrap();
        assert!((k.b[0] - 3.0).abs() < 1e-12);
        let rss: f64 = k.b[1..].iter().map(|x| x * x).sum();
        assert!((rss - 14.0).abs() < 1e-10);
    }

    #[test]
    fn test_rank_deficient_fails() {
        let mut k = Gels { m: 3, n: 2, nrhs: 1, a: vec![1.0, 2.0, 3.0, 2.0, 4.0, 6.0], b: vec![1.0; 3] };
        assert!(matches!(run(&mut k), Err(KernelFailure::Singular { .. })));
    }
}
