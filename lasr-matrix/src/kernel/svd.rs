//! Singular value decompositions: ordinary and generalized

use nalgebra::{DMatrix, DVector, QR, SVD};
use tracing::debug;

use super::{
    check_workspace, complete_basis, Kernel, KernelFailure, KERNEL_EPS, MAX_ITERATIONS, RANK_TOL,
};

/// Thin SVD of `a` with singular values sorted in descending order.
///
/// Returns `(U, s, V)` where `U` is `m × k`, `V` is `n × k` and
/// `k = min(m, n)`.
fn sorted_svd(
    a: DMatrix<f64>,
    routine: &'static str,
) -> Result<(DMatrix<f64>, Vec<f64>, DMatrix<f64>), KernelFailure> {
    let (m, n) = a.shape();
    let k = m.min(n);
    let svd = SVD::try_new(a, true, true, KERNEL_EPS, MAX_ITERATIONS)
        .ok_or(KernelFailure::NotConverged { routine })?;
    let (u, v_t) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => return Err(KernelFailure::NotConverged { routine }),
    };
    let sv = svd.singular_values;

    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&x, &y| sv[y].total_cmp(&sv[x]));
    let u = DMatrix::from_fn(m, k, |i, j| u[(i, order[j])]);
    let v = DMatrix::from_fn(n, k, |i, j| v_t[(order[j], i)]);
    let s = order.iter().map(|&j| sv[j]).collect();
    Ok((u, s, v))
}

/// Full SVD `A = U·diag(s)·Vᵀ` of a column-major `m × n` matrix.
///
/// `u` is `m × m`, `vt` is `n × n` (both column-major) and `s` holds the
/// `min(m, n)` singular values in descending order.
pub struct Gesdd {
    pub m: usize,
    pub n: usize,
    pub a: Vec<f64>,
    pub s: Vec<f64>,
    pub u: Vec<f64>,
    pub vt: Vec<f64>,
}

impl Gesdd {
    pub fn new(m: usize, n: usize, a: Vec<f64>) -> Self {
        Gesdd {
            m,
            n,
            a,
            s: vec![0.0; m.min(n)],
            u: vec![0.0; m * m],
            vt: vec![0.0; n * n],
        }
    }
}

impl Kernel for Gesdd {
    const NAME: &'static str = "gesdd";

    fn workspace_query(&self) -> usize {
        let k = self.m.min(self.n);
        (self.m * (k + self.m)).max(self.n * (k + self.n))
    }

    fn execute(&mut self, work: &mut [f64]) -> Result<(), KernelFailure> {
        let (m, n) = (self.m, self.n);
        check_workspace(Self::NAME, self.workspace_query(), work)?;
        debug!(kernel = Self::NAME, m, n, "decompose");

        let a = DMatrix::from_column_slice(m, n, &self.a);
        let (u, s, v) = sorted_svd(a, Self::NAME)?;
        let u = complete_basis(&u, work);
        let v = complete_basis(&v, work);

        self.s.copy_from_slice(&s);
        self.u.copy_from_slice(u.as_slice());
        self.vt.copy_from_slice(v.transpose().as_slice());
        Ok(())
    }
}

/// Generalized SVD of `A` (`m × n`) and `B` (`p × n`), column-major.
///
/// Produces orthogonal `U` (`m × m`), `V` (`p × p`), `Q` (`n × n`), upper
/// triangular `R` (`n × n`) and pairs `alpha`, `beta` with
/// `alpha² + beta² = 1` such that
///
/// ```text
/// A = U · Σ1 · R · Qᵀ      Σ1 (m × n): Σ1[j, j] = alpha[j]
/// B = V · Σ2 · R · Qᵀ      Σ2 (p × n): Σ2[j - o, j] = beta[j], o = n - min(n, p)
/// ```
///
/// `alpha` is sorted in descending order. The construction stacks `[A; B]`
/// in the workspace, takes its QR factorization `Q1; Q2 · Rc`, computes the
/// CS decomposition of `Q1, Q2` from an SVD of `Q1`, and finishes with an RQ
/// factorization of `Wᵀ·Rc`. It assumes `[A; B]` has full column rank; when
/// it does not, `rank_deficient` is set and the factors are best-effort.
pub struct Ggsvd {
    pub m: usize,
    pub p: usize,
    pub n: usize,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    pub alpha: Vec<f64>,
    pub beta: Vec<f64>,
    pub u: Vec<f64>,
    pub v: Vec<f64>,
    pub q: Vec<f64>,
    pub r: Vec<f64>,
    pub rank_deficient: bool,
}

impl Ggsvd {
    pub fn new(m: usize, p: usize, n: usize, a: Vec<f64>, b: Vec<f64>) -> Self {
        Ggsvd {
            m,
            p,
            n,
            a,
            b,
            alpha: vec![0.0; n],
            beta: vec![0.0; n],
            u: vec![0.0; m * m],
            v: vec![0.0; p * p],
            q: vec![0.0; n * n],
            r: vec![0.0; n * n],
            rank_deficient: false,
        }
    }

    /// Offset of the first column of `Σ2` that can hold a `beta`
    pub fn beta_offset(&self) -> usize {
        self.n.saturating_sub(self.p)
    }
}

impl Kernel for Ggsvd {
    const NAME: &'static str = "ggsvd";

    fn workspace_query(&self) -> usize {
        let (m, p, n) = (self.m, self.p, self.n);
        [
            (m + p) * n,
            m * (m.min(n) + m),
            n * (m.min(n) + n),
            p * (p.min(n) + p),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    fn execute(&mut self, work: &mut [f64]) -> Result<(), KernelFailure> {
        let (m, p, n) = (self.m, self.p, self.n);
        check_workspace(Self::NAME, self.workspace_query(), work)?;
        if m + p < n {
            self.rank_deficient = true;
            return Err(KernelFailure::RankDeficient { routine: Self::NAME });
        }
        let s = m + p;
        debug!(kernel = Self::NAME, m, p, n, "decompose");

        // C = [A; B]
        let stacked = &mut work[..s * n];
        for j in 0..n {
            stacked[j * s..j * s + m].copy_from_slice(&self.a[j * m..(j + 1) * m]);
            stacked[j * s + m..(j + 1) * s].copy_from_slice(&self.b[j * p..(j + 1) * p]);
        }
        let qr = QR::new(DMatrix::from_column_slice(s, n, stacked));
        let qc = qr.q();
        let rc = qr.r();
        let scale = rc.diagonal().amax();
        if (0..n).any(|i| rc[(i, i)].abs() <= RANK_TOL * scale) {
            self.rank_deficient = true;
        }
        let q1 = qc.rows(0, m).into_owned();
        let q2 = qc.rows(m, p).into_owned();

        // CS decomposition: Q1 = U·Σ1·Wᵀ, Q2·W = V·Σ2
        let (u_thin, sv, w_thin) = sorted_svd(q1, Self::NAME)?;
        let u = complete_basis(&u_thin, work);
        let w = complete_basis(&w_thin, work);
        for j in 0..n {
            self.alpha[j] = sv.get(j).map_or(0.0, |&a| a.min(1.0));
        }

        let z = &q2 * &w;
        let offset = self.beta_offset();
        let mut filled: Vec<(usize, DVector<f64>)> = Vec::new();
        for j in 0..n {
            let col = z.column(j);
            self.beta[j] = col.norm();
            if self.beta[j] > RANK_TOL {
                if j < offset {
                    self.rank_deficient = true;
                } else {
                    filled.push((j - offset, col / self.beta[j]));
                }
            }
        }
        let basis = DMatrix::from_fn(p, filled.len(), |i, c| filled[c].1[i]);
        let completed = complete_basis(&basis, work);
        let mut v = DMatrix::zeros(p, p);
        let mut spare = filled.len();
        for target in 0..p {
            match filled.iter().position(|(t, _)| *t == target) {
                Some(c) => v.set_column(target, &completed.column(c)),
                None => {
                    v.set_column(target, &completed.column(spare));
                    spare += 1;
                }
            }
        }

        // RQ of M = Wᵀ·Rc through the QR of Mᵀ·J, J the exchange matrix
        let mt = (w.transpose() * &rc).transpose();
        let x = DMatrix::from_fn(n, n, |i, j| mt[(i, n - 1 - j)]);
        let qr0 = QR::new(x);
        let (q0, r0) = (qr0.q(), qr0.r());
        let r = DMatrix::from_fn(n, n, |i, j| r0[(n - 1 - j, n - 1 - i)]);
        let q = DMatrix::from_fn(n, n, |i, j| q0[(i, n - 1 - j)]);

        self.u.copy_from_slice(u.as_slice());
        self.v.copy_from_slice(v.as_slice());
        self.q.copy_from_slice(q.as_slice());
        self.r.copy_from_slice(r.as_slice());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::run;

    fn cm(rows: usize, cols: usize, row_major: &[f64]) -> Vec<f64> {
        DMatrix::from_row_slice(rows, cols, row_major).as_slice().to_vec()
    }

    #[test]
    fn test_gesdd_reconstructs() {
        let (m, n) = (4, 2);
        let a0 = cm(m, n, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let mut k = Gesdd::new(m, n, a0.clone());
        run(&mut k).unwrap();
        assert!(k.s[0] >= k.s[1]);
        let u = DMatrix::from_column_slice(m, m, &k.u);
        let vt = DMatrix::from_column_slice(n, n, &k.vt);
        let mut s = DMatrix::zeros(m, n);
        s[(0, 0)] = k.s[0];
        s[(1, 1)] = k.s[1];
        let back = &u * s * &vt;
        assert!((back - DMatrix::from_column_slice(m, n, &a0)).amax() < 1e-12);
        assert!((u.transpose() * &u - DMatrix::<f64>::identity(m, m)).amax() < 1e-12);
    }

    #[test]
    fn test_gesdd_wide() {
        let a0 = cm(2, 3, &[3.0, 2.0, 2.0, 2.0, 3.0, -2.0]);
        let mut k = Gesdd::new(2, 3, a0);
        run(&mut k).unwrap();
        assert!((k.s[0] - 5.0).abs() < 1e-12);
        assert!((k.s[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_ggsvd_cs_pairs() {
        let a0 = cm(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let b0 = cm(2, 2, &[2.0, 1.0, 0.0, 3.0]);
        let mut k = Ggsvd::new(3, 2, 2, a0, b0);
        run(&mut k).unwrap();
        assert!(!k.rank_deficient);
        for j in 0..2 {
            let one = k.alpha[j] * k.alpha[j] + k.beta[j] * k.beta[j];
            assert!((one - 1.0).abs() < 1e-12);
        }
        assert!(k.alpha[0] >= k.alpha[1]);
    }

    #[test]
    fn test_ggsvd_too_few_rows() {
        let mut k = Ggsvd::new(1, 1, 3, vec![1.0; 3], vec![1.0; 3]);
        assert_eq!(
            run(&mut k).unwrap_err(),
            KernelFailure::RankDeficient { routine: "ggsvd" }
        );
        assert!(k.rank_deficient);
    }
}
