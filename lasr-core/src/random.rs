//! Random vectors
//!
//! The plain functions draw from the thread-local generator; the `_with`
//! variants take any [`Rng`] so results can be reproduced from a seed.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::vector::Vector;

/// Uniformly distributed values on `[0, 1)`
pub fn rand(count: usize) -> Vector {
    rand_with(&mut rand::thread_rng(), count)
}

/// Standard normally distributed values
pub fn randn(count: usize) -> Vector {
    randn_with(&mut rand::thread_rng(), count)
}

pub fn rand_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vector {
    (0..count).map(|_| rng.gen::<f64>()).collect()
}

pub fn randn_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vector {
    (0..count).map(|_| rng.sample(StandardNormal)).collect()
}
