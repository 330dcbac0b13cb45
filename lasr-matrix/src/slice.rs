//! Per-axis index selectors and matrix slicing
//!
//! Every [`Extractor`] is reduced to an explicit `Pos` list by a fixed
//! sequence of rewrites. Bounds are validated on the raw parameters before
//! each rewrite, so an invalid selector fails no matter how it is reached
//! (`TakeLast(0)` becomes `Drop(size)` and is rejected there).

use lasr_core::numeric::true_mod;
use lasr_core::LasrError;
use serde::{Deserialize, Serialize};

use crate::types::Matrix;

/// Selects indices along one axis of a matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extractor {
    /// Every index in order
    All,
    /// Inclusive progression `from, from + stride, ...` through `to`
    Range(isize, isize, isize),
    /// Explicit index list
    Pos(Vec<isize>),
    /// Index list wrapped into range with a true modulo
    PosCyc(Vec<isize>),
    /// First `n` indices
    Take(isize),
    /// Last `n` indices
    TakeLast(isize),
    /// All but the first `n` indices
    Drop(isize),
    /// All but the last `n` indices
    DropLast(isize),
}

fn out_of_bounds(e: &Extractor, size: usize, axis: &str) -> LasrError {
    LasrError::index_out_of_bounds(format!(
        "{:?} is not valid for {} {}",
        e, size, axis
    ))
}

impl Extractor {
    /// Resolve to concrete indices along an axis of length `size`
    pub fn indices(&self, size: usize, axis: &str) -> Result<Vec<usize>, LasrError> {
        let n = size as isize;
        let mut current = self.clone();
        loop {
            current = match current {
                Extractor::All => Extractor::Pos((0..n).collect()),
                Extractor::Range(from, stride, to) => {
                    if from < 0 || to >= n || from >= n || to < 0 || stride == 0 {
                        return Err(out_of_bounds(&Extractor::Range(from, stride, to), size, axis));
                    }
                    let mut picked = Vec::new();
                    let mut i = from;
                    while (stride > 0 && i <= to) || (stride < 0 && i >= to) {
                        picked.push(i);
                        i = match i.checked_add(stride) {
                            Some(next) => next,
                            None => break,
                        };
                    }
                    Extractor::PosCyc(picked)
                }
                Extractor::PosCyc(p) => {
                    Extractor::Pos(p.into_iter().map(|i| true_mod(i, n)).collect())
                }
                Extractor::TakeLast(k) => match n.checked_sub(k) {
                    Some(d) => Extractor::Drop(d),
                    None => return Err(out_of_bounds(&Extractor::TakeLast(k), size, axis)),
                },
                Extractor::DropLast(k) => match n.checked_sub(k) {
                    Some(t) => Extractor::Take(t),
                    None => return Err(out_of_bounds(&Extractor::DropLast(k), size, axis)),
                },
                Extractor::Take(k) => {
                    if k < 0 || k >= n {
                        return Err(out_of_bounds(&Extractor::Take(k), size, axis));
                    }
                    Extractor::Pos((0..k).collect())
                }
                Extractor::Drop(k) => {
                    if k < 0 || k >= n {
                        return Err(out_of_bounds(&Extractor::Drop(k), size, axis));
                    }
                    Extractor::Pos((k..n).collect())
                }
                Extractor::Pos(p) => {
                    if p.is_empty() || p.iter().any(|&i| i < 0 || i >= n) {
                        return Err(out_of_bounds(&Extractor::Pos(p), size, axis));
                    }
                    return Ok(p.into_iter().map(|i| i as usize).collect());
                }
            };
        }
    }
}

/// Gather `result[i, j] = m[rows[i], cols[j]]` for the selected indices
pub fn slice(m: &Matrix, er: &Extractor, ec: &Extractor) -> Result<Matrix, LasrError> {
    if *er == Extractor::All && *ec == Extractor::All {
        return Ok(m.clone());
    }
    let rows = er.indices(m.rows(), "rows")?;
    let cols = ec.indices(m.cols(), "columns")?;

    let src = m.as_flat();
    let mut flat = Vec::with_capacity(rows.len() * cols.len());
    for &r in &rows {
        let base = r * m.cols();
        flat.extend(cols.iter().map(|&c| src[base + c]));
    }
    Matrix::from_flat(rows.len(), cols.len(), flat)
}

impl Matrix {
    /// See [`slice`]
    pub fn slice(&self, er: &Extractor, ec: &Extractor) -> Result<Matrix, LasrError> {
        slice(self, er, ec)
    }
}
