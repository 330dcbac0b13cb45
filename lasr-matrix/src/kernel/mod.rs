//! Dense kernels with a LAPACK-shaped calling convention
//!
//! Every routine here works on column-major buffers (element `(i, j)` of an
//! `m`-row matrix at `i + j * m`) and is backed by nalgebra. Routines that
//! need scratch memory implement [`Kernel`]: the caller first asks for the
//! workspace size, allocates exactly that many elements and then executes.
//! [`run`] performs both phases.

mod blas;
mod cholesky;
mod eigen;
mod lstsq;
mod lu;
mod svd;

pub use blas::{gemm, transpose};
pub use cholesky::Potrf;
pub use eigen::Geev;
pub use lstsq::Gels;
pub use lu::{getrf, Getri};
pub use svd::{Gesdd, Ggsvd};

use lasr_core::LasrError;
use nalgebra::{DMatrix, QR};
use thiserror::Error;
use tracing::{debug, warn};

/// Convergence tolerance handed to the iterative nalgebra solvers
pub const KERNEL_EPS: f64 = f64::EPSILON;

/// Iteration cap for the iterative solvers
pub const MAX_ITERATIONS: usize = 10_000;

/// Relative size below which a triangular diagonal entry counts as zero
pub const RANK_TOL: f64 = 1e-12;

/// Failure status reported by a kernel (the `info` of a LAPACK routine)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelFailure {
    #[error("{routine}: workspace holds {got} elements, {required} required")]
    WorkspaceTooSmall {
        routine: &'static str,
        required: usize,
        got: usize,
    },

    #[error("{routine}: U({index}, {index}) is exactly zero")]
    Singular { routine: &'static str, index: usize },

    #[error("{routine}: matrix is not positive definite")]
    NotPositiveDefinite { routine: &'static str },

    #[error("{routine}: failed to converge")]
    NotConverged { routine: &'static str },

    #[error("{routine}: eigenvalues are complex")]
    ComplexSpectrum { routine: &'static str },

    #[error("{routine}: stacked matrix does not have full column rank")]
    RankDeficient { routine: &'static str },
}

impl From<KernelFailure> for LasrError {
    fn from(err: KernelFailure) -> Self {
        match err {
            KernelFailure::Singular { routine, .. } => LasrError::singular(routine),
            KernelFailure::NotPositiveDefinite { routine } => {
                LasrError::not_positive_definite(routine)
            }
            KernelFailure::NotConverged { routine } => LasrError::not_converged(routine),
            KernelFailure::ComplexSpectrum { routine } => LasrError::complex_spectrum(routine),
            other => LasrError::kernel(other.to_string()),
        }
    }
}

/// A routine that follows the two-phase workspace protocol
pub trait Kernel {
    /// Routine name used in logs and failures
    const NAME: &'static str;

    /// Number of `f64` scratch elements `execute` needs
    fn workspace_query(&self) -> usize;

    /// Run with a caller-supplied workspace of at least the queried size
    fn execute(&mut self, work: &mut [f64]) -> Result<(), KernelFailure>;
}

/// Query, allocate and execute
pub fn run<K: Kernel>(kernel: &mut K) -> Result<(), KernelFailure> {
    let lwork = kernel.workspace_query();
    debug!(kernel = K::NAME, lwork, "workspace query");
    let mut work = vec![0.0; lwork];
    kernel.execute(&mut work).map_err(|e| {
        warn!(kernel = K::NAME, error = %e, "kernel failed");
        e
    })
}

/// Fail when a supplied workspace is shorter than required
pub(crate) fn check_workspace(
    routine: &'static str,
    required: usize,
    work: &[f64],
) -> Result<(), KernelFailure> {
    if work.len() < required {
        return Err(KernelFailure::WorkspaceTooSmall {
            routine,
            required,
            got: work.len(),
        });
    }
    Ok(())
}

/// Extend the `r` orthonormal columns of `basis` to a square orthogonal
/// matrix whose leading `r` columns are `basis` itself.
///
/// Stages `[basis | I]` in `work` (at least `dim * (r + dim)` elements); the
/// trailing `dim - r` columns of its Q factor span the complement.
pub(crate) fn complete_basis(basis: &DMatrix<f64>, work: &mut [f64]) -> DMatrix<f64> {
    let dim = basis.nrows();
    let r = basis.ncols();
    let staged = &mut work[..dim * (r + dim)];
    staged.fill(0.0);
    staged[..dim * r].copy_from_slice(basis.as_slice());
    for i in 0..dim {
        staged[dim * r + i * dim + i] = 1.0;
    }
    let q = QR::new(DMatrix::from_column_slice(dim, r + dim, staged)).q();

    let mut full = DMatrix::zeros(dim, dim);
    full.columns_mut(0, r).copy_from(basis);
    full.columns_mut(r, dim - r).copy_from(&q.columns(r, dim - r));
    full
}
