//! Bernoulli trial counting.

use super::check_probability;
use crate::error::SamplingResult;
use crate::rng::UniformSource;

/// Outcome of `n` Bernoulli trials.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BernoulliCounts {
    /// Trials with `u < theta`.
    pub successes: u64,
    /// Remaining trials.
    pub failures: u64,
}

impl BernoulliCounts {
    /// Total number of trials; always the `n` the counts were drawn for.
    #[inline]
    pub fn trials(&self) -> u64 {
        self.successes + self.failures
    }
}

/// Runs `n` Bernoulli trials at success probability `theta`.
///
/// Each trial draws `u` and counts a success when `u < theta`, so
/// `theta = 0` never succeeds and `theta = 1` always does.
///
/// # Errors
///
/// `InvalidParameter` if `theta` is outside [0, 1] or NaN.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::distributions::sample_bernoulli;
/// use sampler_engine::rng::UniformEngine;
///
/// let mut engine = UniformEngine::from_seed(42);
/// let counts = sample_bernoulli(&mut engine, 0.3, 1000).unwrap();
/// assert_eq!(counts.trials(), 1000);
/// ```
pub fn sample_bernoulli<S: UniformSource + ?Sized>(
    source: &mut S,
    theta: f64,
    n: usize,
) -> SamplingResult<BernoulliCounts> {
    check_probability("theta", theta)?;

    let successes = count_successes(source, theta, n);
    Ok(BernoulliCounts {
        successes,
        failures: n as u64 - successes,
    })
}

/// Trial loop shared with the binomial sampler. `theta` must be validated.
#[inline]
pub(crate) fn count_successes<S: UniformSource + ?Sized>(
    source: &mut S,
    theta: f64,
    n: usize,
) -> u64 {
    let mut successes = 0u64;
    for _ in 0..n {
        if source.next_uniform() < theta {
            successes += 1;
        }
    }
    successes
}
