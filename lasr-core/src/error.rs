//! Structured errors for matrix operations
//!
//! Shape mismatches, bad slice bounds and numerical failures are values
//! returned to the caller. Out-of-range element indexing is a programming
//! error and panics, as with slices in std.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
    pub const INDEX_OUT_OF_BOUNDS: &str = "INDEX_OUT_OF_BOUNDS";
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    pub const SINGULAR: &str = "SINGULAR";
    pub const NOT_CONVERGED: &str = "NOT_CONVERGED";
    pub const NOT_POSITIVE_DEFINITE: &str = "NOT_POSITIVE_DEFINITE";
    pub const COMPLEX_SPECTRUM: &str = "COMPLEX_SPECTRUM";
    pub const KERNEL: &str = "KERNEL";
}

/// Structured error returned by every fallible operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("[{code}] {message}{}", suggestion_suffix(.suggestion))]
pub struct LasrError {
    /// Machine-readable error code, one of [`codes`]
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub suggestion: Option<String>,
}

impl LasrError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// True if this error carries the given code
    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    // ========== Common Error Constructors ==========

    pub fn dimension_mismatch(details: impl Into<String>) -> Self {
        Self::new(
            codes::DIMENSION_MISMATCH,
            format!("Input dimensions must agree: {}", details.into()),
        )
    }

    pub fn index_out_of_bounds(details: impl Into<String>) -> Self {
        Self::new(
            codes::INDEX_OUT_OF_BOUNDS,
            format!("Index out of bounds: {}", details.into()),
        )
    }

    pub fn invalid_argument(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_ARGUMENT, format!("Invalid argument: {}", details.into()))
    }

    pub fn singular(func: &str) -> Self {
        Self::new(codes::SINGULAR, format!("{}: matrix is singular", func))
            .with_suggestion("Use lstsqr() for rank-deficient systems")
    }

    pub fn not_converged(func: &str) -> Self {
        Self::new(codes::NOT_CONVERGED, format!("{}: iteration did not converge", func))
    }

    pub fn not_positive_definite(func: &str) -> Self {
        Self::new(
            codes::NOT_POSITIVE_DEFINITE,
            format!("{}: matrix is not positive definite", func),
        )
        .with_suggestion("Cholesky factorization requires a symmetric positive definite matrix")
    }

    pub fn complex_spectrum(func: &str) -> Self {
        Self::new(
            codes::COMPLEX_SPECTRUM,
            format!("{}: matrix has complex eigenvalues", func),
        )
    }

    pub fn kernel(details: impl Into<String>) -> Self {
        Self::new(codes::KERNEL, format!("Kernel error: {}", details.into()))
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (suggestion: {})", s),
        None => String::new(),
    }
}
