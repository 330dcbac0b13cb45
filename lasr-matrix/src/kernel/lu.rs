//! LU factorization with partial pivoting and inversion from the factors

use nalgebra::{DMatrix, DMatrixViewMut, DVector};
use tracing::debug;

use super::{check_workspace, Kernel, KernelFailure};

/// Factor the column-major `m × n` matrix `a` in place as `P·A = L·U`.
///
/// On return `a` holds `U` on and above the diagonal and the unit lower
/// factor `L` below it; `ipiv[i]` (1-based) is the row swapped with row `i`
/// at step `i`. When some `U(i, i)` is exactly zero the factors are still
/// written and `Singular` reports the first such index (1-based).
pub fn getrf(m: usize, n: usize, a: &mut [f64], ipiv: &mut [i32]) -> Result<(), KernelFailure> {
    debug!(kernel = "getrf", m, n, "factorize");
    let k = m.min(n);
    let lu = DMatrix::from_column_slice(m, n, a).lu();
    let l = lu.l();
    let u = lu.u();

    for j in 0..n {
        for i in 0..m {
            a[i + j * m] = if i > j { l[(i, j)] } else { u[(i, j)] };
        }
    }

    // Recover the swap sequence from the row order the permutation produces.
    let mut order = DVector::from_iterator(m, (0..m).map(|i| i as f64));
    lu.p().permute_rows(&mut order);
    let mut current: Vec<usize> = (0..m).collect();
    for i in 0..k {
        let wanted = order[i] as usize;
        let j = (i..m)
            .find(|&j| current[j] == wanted)
            .unwrap_or(i);
        current.swap(i, j);
        ipiv[i] = (j + 1) as i32;
    }

    match (0..k).find(|&i| u[(i, i)] == 0.0) {
        Some(i) => Err(KernelFailure::Singular { routine: "getrf", index: i + 1 }),
        None => Ok(()),
    }
}

/// Inverse of a square matrix from the output of [`getrf`]
pub struct Getri {
    pub n: usize,
    /// LU factors on entry, inverse on successful exit
    pub a: Vec<f64>,
    pub ipiv: Vec<i32>,
}

impl Kernel for Getri {
    const NAME: &'static str = "getri";

    fn workspace_query(&self) -> usize {
        self.n * self.n
    }

    fn execute(&mut self, work: &mut [f64]) -> Result<(), KernelFailure> {
        let n = self.n;
        check_workspace(Self::NAME, self.workspace_query(), work)?;
        if let Some(i) = (0..n).find(|&i| self.a[i + i * n] == 0.0) {
            return Err(KernelFailure::Singular { routine: Self::NAME, index: i + 1 });
        }

        let factors = DMatrix::from_column_slice(n, n, &self.a);
        let mut lower = factors.lower_triangle();
        lower.fill_diagonal(1.0);
        let upper = factors.upper_triangle();

        // A⁻¹ = U⁻¹·L⁻¹·P, built column by column from P·I.
        let mut x = DMatrixViewMut::from_slice(&mut work[..n * n], n, n);
        x.fill(0.0);
        x.fill_diagonal(1.0);
        for (i, &p) in self.ipiv.iter().enumerate() {
            let p = (p - 1) as usize;
            if p != i {
                x.swap_rows(i, p);
            }
        }
        if !lower.solve_lower_triangular_mut(&mut x) || !upper.solve_upper_triangular_mut(&mut x) {
            return Err(KernelFailure::Singular { routine: Self::NAME, index: n });
        }

        self.a.copy_from_slice(&work[..n * n]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::run;

    fn reconstruct(n: usize, a: &[f64], ipiv: &[i32]) -> DMatrix<f64> {
        let f = DMatrix::from_column_slice(n, n, a);
        let mut l = f.lower_triangle();
        l.fill_diagonal(1.0);
        let mut pa = l * f.upper_triangle();
        // undo the swaps in reverse to get A back
        for i in (0..n).rev() {
            let p = (ipiv[i] - 1) as usize;
            if p != i {
                pa.swap_rows(i, p);
            }
        }
        pa
    }

    #[test]
    fn test_getrf_reconstructs() {
        let a0 = [2.0, 4.0, -2.0, 1.0, -6.0, 7.0, 1.0, 0.0, 2.0];
        let mut a = a0;
        let mut ipiv = [0; 3];
        getrf(3, 3, &mut a, &mut ipiv).unwrap();
        assert!(ipiv.iter().enumerate().all(|(i, &p)| p as usize > i));
        let back = reconstruct(3, &a, &ipiv);
        assert!((back - DMatrix::from_column_slice(3, 3, &a0)).amax() < 1e-12);
    }

    #[test]
    fn test_getrf_reports_singular() {
        let mut a = [1.0; 9];
        let mut ipiv = [0; 3];
        let err = getrf(3, 3, &mut a, &mut ipiv).unwrap_err();
        assert!(matches!(err, KernelFailure::Singular { index: 2, .. }));
    }

    #[test]
    fn test_getri_inverts() {
        let a0 = [4.0, 6.0, 3.0, 3.0];
        let mut a = a0.to_vec();
        let mut ipiv = vec![0; 2];
        getrf(2, 2, &mut a, &mut ipiv).unwrap();
        let mut k = Getri { n: 2, a, ipiv };
        assert_eq!(k.workspace_query(), 4);
        run(&mut k).unwrap();
        let prod = DMatrix::from_column_slice(2, 2, &a0) * DMatrix::from_column_slice(2, 2, &k.a);
        assert!((prod - DMatrix::<f64>::identity(2, 2)).amax() < 1e-12);
    }
}
