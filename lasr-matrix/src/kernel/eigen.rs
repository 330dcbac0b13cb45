//! Real eigendecomposition of a general square matrix

use nalgebra::{DMatrix, DMatrixViewMut, Schur, SymmetricEigen};
use tracing::debug;

use super::{check_workspace, Kernel, KernelFailure, KERNEL_EPS, MAX_ITERATIONS};

/// Symmetry tolerance for choosing the symmetric solver
const SYMMETRY_TOL: f64 = 1e-10;

/// Eigenvalues and right eigenvectors of a column-major `n × n` matrix.
///
/// Symmetric input goes through the symmetric solver. Otherwise the real
/// Schur form `A = Q·T·Qᵀ` is computed and the eigenvectors of `T` are
/// found by back-substitution (staged in the workspace) and mapped back
/// through `Q`. Complex conjugate pairs are reported as `ComplexSpectrum`.
pub struct Geev {
    pub n: usize,
    pub a: Vec<f64>,
    /// Eigenvalues on exit
    pub wr: Vec<f64>,
    /// Unit-norm right eigenvectors, one per column, on exit
    pub vr: Vec<f64>,
}

impl Geev {
    pub fn new(n: usize, a: Vec<f64>) -> Self {
        Geev {
            n,
            a,
            wr: vec![0.0; n],
            vr: vec![0.0; n * n],
        }
    }

    fn is_symmetric(m: &DMatrix<f64>) -> bool {
        let n = m.nrows();
        (0..n).all(|i| (0..i).all(|j| (m[(i, j)] - m[(j, i)]).abs() < SYMMETRY_TOL))
    }
}

impl Kernel for Geev {
    const NAME: &'static str = "geev";

    fn workspace_query(&self) -> usize {
        self.n * self.n
    }

    fn execute(&mut self, work: &mut [f64]) -> Result<(), KernelFailure> {
        let n = self.n;
        check_workspace(Self::NAME, self.workspace_query(), work)?;
        let a = DMatrix::from_column_slice(n, n, &self.a);

        if Self::is_symmetric(&a) {
            debug!(kernel = Self::NAME, n, "symmetric path");
            let eig = SymmetricEigen::try_new(a, KERNEL_EPS, MAX_ITERATIONS)
                .ok_or(KernelFailure::NotConverged { routine: Self::NAME })?;
            self.wr.copy_from_slice(eig.eigenvalues.as_slice());
            self.vr.copy_from_slice(eig.eigenvectors.as_slice());
            return Ok(());
        }

        debug!(kernel = Self::NAME, n, "schur path");
        let (mut q, mut t) = Schur::try_new(a, KERNEL_EPS, MAX_ITERATIONS)
            .ok_or(KernelFailure::NotConverged { routine: Self::NAME })?
            .unpack();
        split_real_blocks(&mut q, &mut t)?;

        let norm = t.amax().max(f64::MIN_POSITIVE);
        let small = KERNEL_EPS * norm;
        let mut y = DMatrixViewMut::from_slice(&mut work[..n * n], n, n);
        y.fill(0.0);
        for k in 0..n {
            let lambda = t[(k, k)];
            y[(k, k)] = 1.0;
            for i in (0..k).rev() {
                let mut s = 0.0;
                for j in i + 1..=k {
                    s += t[(i, j)] * y[(j, k)];
                }
                let mut den = t[(i, i)] - lambda;
                if den.abs() < small {
                    den = small;
                }
                y[(i, k)] = -s / den;
            }
        }

        let mut v = q * y;
        for mut col in v.column_iter_mut() {
            let len = col.norm();
            if len > 0.0 {
                col /= len;
            }
        }
        for k in 0..n {
            self.wr[k] = t[(k, k)];
        }
        self.vr.copy_from_slice(v.as_slice());
        Ok(())
    }
}

/// Triangularize any 2×2 diagonal block of a real Schur form whose
/// eigenvalues are real, updating `q` so that `A = Q·T·Qᵀ` still holds.
fn split_real_blocks(q: &mut DMatrix<f64>, t: &mut DMatrix<f64>) -> Result<(), KernelFailure> {
    let n = t.nrows();
    let mut i = 0;
    while i + 1 < n {
        if t[(i + 1, i)] == 0.0 {
            i += 1;
            continue;
        }
        let (a, b, c, d) = (t[(i, i)], t[(i, i + 1)], t[(i + 1, i)], t[(i + 1, i + 1)]);
        let half = 0.5 * (a - d);
        let disc = half * half + b * c;
        let scale = a.abs() + b.abs() + c.abs() + d.abs();
        if disc < -KERNEL_EPS * scale * scale {
            return Err(KernelFailure::ComplexSpectrum { routine: "geev" });
        }
        let lambda = 0.5 * (a + d) + disc.max(0.0).sqrt();
        // eigenvector of the block for lambda
        let (mut x0, mut x1) = (b, lambda - a);
        if x0.abs() + x1.abs() < f64::MIN_POSITIVE {
            x0 = lambda - d;
            x1 = c;
        }
        let len = x0.hypot(x1);
        let (cs, sn) = (x0 / len, x1 / len);

        // T ← Gᵀ·T·G, Q ← Q·G with G = [[cs, -sn], [sn, cs]]
        for j in 0..n {
            let (u, w) = (t[(i, j)], t[(i + 1, j)]);
            t[(i, j)] = cs * u + sn * w;
            t[(i + 1, j)] = -sn * u + cs * w;
        }
        for m in [&mut *t, &mut *q] {
            for row in 0..n {
                let (u, w) = (m[(row, i)], m[(row, i + 1)]);
                m[(row, i)] = cs * u + sn * w;
                m[(row, i + 1)] = -sn * u + cs * w;
            }
        }
        t[(i + 1, i)] = 0.0;
        i += 2;
    }
    Ok(())
}
