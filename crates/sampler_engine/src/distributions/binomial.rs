//! Binomial replicates: success counts of independent `n`-trial experiments.

use super::bernoulli::count_successes;
use super::{check_probability, check_replicates};
use crate::error::{SamplingError, SamplingResult};
use crate::rng::UniformSource;

/// Fills `out` with `k` binomial replicates of `n` trials at `theta`.
///
/// Slot `i` receives the success count of replicate `i`; failures are not
/// recorded. Existing contents of `out` are overwritten.
///
/// # Errors
///
/// - `InvalidParameter` if `theta` is outside [0, 1] or `k == 0`
/// - `AllocationMismatch` if `out.len() != k`
pub fn sample_binomial_into<S: UniformSource + ?Sized>(
    source: &mut S,
    theta: f64,
    n: usize,
    k: usize,
    out: &mut [u64],
) -> SamplingResult<()> {
    check_probability("theta", theta)?;
    check_replicates(k)?;
    if out.len() != k {
        return Err(SamplingError::mismatch("successes", k, out.len()));
    }

    for slot in out.iter_mut() {
        *slot = count_successes(source, theta, n);
    }
    Ok(())
}

/// Allocating form of [`sample_binomial_into`].
///
/// # Examples
///
/// ```rust
/// use sampler_engine::distributions::sample_binomial;
/// use sampler_engine::rng::UniformEngine;
///
/// let mut engine = UniformEngine::from_seed(42);
/// let successes = sample_binomial(&mut engine, 0.5, 100, 10).unwrap();
/// assert_eq!(successes.len(), 10);
/// assert!(successes.iter().all(|&s| s <= 100));
/// ```
pub fn sample_binomial<S: UniformSource + ?Sized>(
    source: &mut S,
    theta: f64,
    n: usize,
    k: usize,
) -> SamplingResult<Vec<u64>> {
    check_probability("theta", theta)?;
    check_replicates(k)?;

    let mut out = vec![0; k];
    sample_binomial_into(source, theta, n, k, &mut out)?;
    Ok(out)
}
