//! lasr Core - shared types for the lasr matrix library
//!
//! - [`LasrError`]: structured error with machine-readable codes
//! - [`numeric`]: tolerant float comparison (`EPS = 1e-14`) and true modulo
//! - [`vector`]: elementwise vector arithmetic and unary functions
//! - [`stats`]: vector reductions
//! - [`random`]: uniform and normal random vectors

pub mod error;
pub mod numeric;
pub mod random;
pub mod stats;
pub mod vector;

pub use error::{codes, LasrError};
pub use numeric::EPS;
pub use vector::Vector;
