//! lasr Matrix - dense row-major matrices and linear algebra
//!
//! - Construction (`zeros`, `ones`, `eye`, `diag`, `rand`, `randn`, literals)
//! - Indexing by element, flat offset, row and column, and slicing with
//!   [`Extractor`] pairs
//! - Structural edits (`insert_*`, `append_*`, `prepend_*`, `hconcat`,
//!   `vconcat`)
//! - Elementwise arithmetic with matrix, vector and scalar operands, plus
//!   elementwise functions and per-row / per-column [`stats`]
//! - Algebra and decompositions (`transpose`, `mtimes`, `mpower`, `inverse`,
//!   `det`, `eig`, `svd`, `gsvd`, `chol`, `lstsqr`)
//!
//! Matrices are stored row-major. Decompositions hand a column-major copy
//! to the [`kernel`] layer, which follows a two-phase workspace protocol on
//! top of nalgebra.
//!
//! Shape and numerical failures are returned as [`LasrError`]; out-of-range
//! element indexing and the `std::ops` operators panic.

mod algebra;
mod arithmetic;
mod construct;
mod decompose;
mod functions;
mod helpers;
mod layout;
mod manipulate;
mod slice;
mod solve;
mod types;

pub mod kernel;
pub mod stats;

pub use lasr_core::{codes, LasrError, Vector, EPS};

pub use algebra::{det, inverse, mpower, mtimes, trace, transpose, tri};
pub use arithmetic::{
    abs, ldivide, map, map_vec, minus, plus, rdivide, reduce, thr, times, uminus, Operand,
};
pub use construct::{
    diag, diag_sized, eye, ones, ones_like, rand, rand_with, randn, randn_with, zeros, zeros_like,
};
pub use decompose::{chol, eig, gsvd, svd, Gsvd};
pub use functions::{
    acos, asin, atan, cos, exp, log, log10, log2, power, sin, sqrt, square, tan,
};
pub use helpers::{check_matmul_dims, check_same_dims, check_square};
pub use layout::{to_cols, to_rows};
pub use manipulate::{
    append_cols, append_rows, hconcat, hstack, insert_cols, insert_rows, prepend_cols,
    prepend_rows, vconcat, vstack, ColBlock, RowBlock,
};
pub use slice::{slice, Extractor};
pub use solve::lstsqr;
pub use types::{Dim, Matrix, Triangle};
