//! Matrix decompositions: eigen, SVD, generalized SVD, Cholesky
//!
//! Each function converts its input to column-major, runs the kernel through
//! the workspace query / execute protocol and converts the factors back.

use lasr_core::{LasrError, Vector};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::algebra::{transpose, tri};
use crate::construct::{diag, diag_sized, eye, zeros};
use crate::helpers::check_square;
use crate::kernel::{self, Geev, Gesdd, Ggsvd, Potrf};
use crate::layout::{col_major, from_col_major};
use crate::types::{Matrix, Triangle};

/// Eigendecomposition `A·V = V·D`.
///
/// Returns `(V, D)` with unit-norm eigenvectors as the columns of `V` and
/// the eigenvalues on the diagonal of `D`, in the order the solver produced
/// them. Matrices with complex eigenvalues are rejected.
pub fn eig(a: &Matrix) -> Result<(Matrix, Matrix), LasrError> {
    check_square(a, "eig")?;
    let n = a.rows();
    let mut geev = Geev::new(n, col_major(a));
    kernel::run(&mut geev)?;
    Ok((from_col_major(n, n, geev.vr), diag(&geev.wr)))
}

/// Singular value decomposition `A = U·S·Vᵀ`.
///
/// `U` is `m × m`, `V` is `n × n` and `S` is `m × n` with the singular values
/// in descending order on its diagonal.
pub fn svd(a: &Matrix) -> Result<(Matrix, Matrix, Matrix), LasrError> {
    let (m, n) = a.shape();
    let mut gesdd = Gesdd::new(m, n, col_major(a));
    kernel::run(&mut gesdd)?;
    let u = from_col_major(m, m, gesdd.u);
    let s = diag_sized(m, n, &gesdd.s);
    let v = transpose(&from_col_major(n, n, gesdd.vt));
    Ok((u, s, v))
}

/// Generalized singular value decomposition of a pair sharing a column count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gsvd {
    /// Orthogonal, `m × m`
    pub u: Matrix,
    /// Orthogonal, `p × p`
    pub v: Matrix,
    /// Orthogonal, `n × n`
    pub q: Matrix,
    /// Upper triangular, `n × n`
    pub r: Matrix,
    /// Descending, with `alpha[j]² + beta[j]² = 1`
    pub alpha: Vector,
    pub beta: Vector,
    /// False when the factorization could not be completed reliably
    pub success: bool,
}

impl Gsvd {
    /// `m × n` matrix with `alpha` on its diagonal, so `A = U·Σ1·R·Qᵀ`
    pub fn sigma1(&self) -> Matrix {
        diag_sized(self.u.rows(), self.q.rows(), &self.alpha)
    }

    /// `p × n` matrix carrying `beta`, so `B = V·Σ2·R·Qᵀ`.
    ///
    /// When `p < n` the betas are right-aligned: `beta[j]` sits at row
    /// `j - (n - p)` for the last `p` columns.
    pub fn sigma2(&self) -> Matrix {
        let (p, n) = (self.v.rows(), self.q.rows());
        let offset = n.saturating_sub(p);
        let mut s = zeros(p, n);
        for j in offset..n {
            s[(j - offset, j)] = self.beta[j];
        }
        s
    }
}

/// Generalized SVD of `A` (`m × n`) and `B` (`p × n`).
///
/// Only a column-count mismatch is an error. A numerical failure, or a
/// stacked `[A; B]` without full column rank, is reported through
/// `success = false`.
pub fn gsvd(a: &Matrix, b: &Matrix) -> Result<Gsvd, LasrError> {
    if a.cols() != b.cols() {
        return Err(LasrError::dimension_mismatch(format!(
            "gsvd: column counts {} and {} differ",
            a.cols(),
            b.cols()
        )));
    }
    let (m, p, n) = (a.rows(), b.rows(), a.cols());
    let mut ggsvd = Ggsvd::new(m, p, n, col_major(a), col_major(b));
    if let Err(e) = kernel::run(&mut ggsvd) {
        warn!(error = %e, "gsvd: factorization failed");
        return Ok(Gsvd {
            u: eye(m, m),
            v: eye(p, p),
            q: eye(n, n),
            r: zeros(n, n),
            alpha: vec![0.0; n],
            beta: vec![0.0; n],
            success: false,
        });
    }
    Ok(Gsvd {
        u: from_col_major(m, m, ggsvd.u),
        v: from_col_major(p, p, ggsvd.v),
        q: from_col_major(n, n, ggsvd.q),
        r: from_col_major(n, n, ggsvd.r),
        alpha: ggsvd.alpha,
        beta: ggsvd.beta,
        success: !ggsvd.rank_deficient,
    })
}

/// Cholesky factor of a symmetric positive definite matrix.
///
/// `Triangle::Upper` gives `U` with `A = Uᵀ·U`; `Triangle::Lower` gives `L`
/// with `A = L·Lᵀ`. Only the requested triangle of `A` is read.
pub fn chol(a: &Matrix, t: Triangle) -> Result<Matrix, LasrError> {
    check_square(a, "chol")?;
    let n = a.rows();
    let mut potrf = Potrf { uplo: t, n, a: col_major(a) };
    kernel::run(&mut potrf)?;
    Ok(tri(&from_col_major(n, n, potrf.a), t))
}
