//! Sampling routines layered on a [`UniformSource`](crate::rng::UniformSource).
//!
//! Every routine follows the same contract:
//!
//! 1. Validate all parameters and the shape of the caller's output storage.
//! 2. Only then draw from the source and write the results in place.
//!
//! A failing call therefore consumes no draws and writes nothing. Each
//! routine has an `*_into` form that fills caller-owned storage and, where it
//! is convenient, an allocating form that returns an owned result.
//!
//! Replicates share one non-restarting stream: replicate `i + 1` continues
//! from wherever replicate `i` left the source.

mod bernoulli;
mod binomial;
mod exponential;
mod multinomial;

pub use bernoulli::{sample_bernoulli, BernoulliCounts};
pub use binomial::{sample_binomial, sample_binomial_into};
pub use exponential::{sample_exponential, sample_exponential_into, MAX_UNIFORM};
pub use multinomial::{
    sample_multinomial_dynamic, sample_multinomial_dynamic_into, sample_multinomial_fixed,
    sample_multinomial_fixed_into, CategoricalTable, DynamicSample, RemainderPolicy,
    DEFAULT_SUM_TOLERANCE,
};

use crate::error::{SamplingError, SamplingResult};

/// Rejects probabilities outside [0, 1], NaN included.
pub(crate) fn check_probability(name: &'static str, value: f64) -> SamplingResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SamplingError::invalid(
            name,
            format!("must lie in [0, 1], got {}", value),
        ))
    }
}

pub(crate) fn check_replicates(k: usize) -> SamplingResult<()> {
    if k == 0 {
        return Err(SamplingError::invalid("k", "at least one replicate is required"));
    }
    Ok(())
}

pub(crate) fn check_matrix_shape(
    out: &crate::CountMatrix,
    rows: usize,
    cols: usize,
) -> SamplingResult<()> {
    if out.shape() != (rows, cols) {
        return Err(SamplingError::mismatch(
            "counts",
            format!("{}x{}", rows, cols),
            format!("{}x{}", out.rows(), out.cols()),
        ));
    }
    Ok(())
}
