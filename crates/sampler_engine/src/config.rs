//! Sampling session configuration.

use crate::distributions::{RemainderPolicy, DEFAULT_SUM_TOLERANCE};
use crate::error::{SamplingError, SamplingResult};

/// Configuration for a [`Sampler`](crate::Sampler) session.
///
/// Use [`SamplerConfig::builder`] to construct validated instances.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::{RemainderPolicy, SamplerConfig};
///
/// let config = SamplerConfig::builder()
///     .seed(42)
///     .remainder_policy(RemainderPolicy::Normalize)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.seed(), Some(42));
/// assert_eq!(config.remainder_policy(), RemainderPolicy::Normalize);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SamplerConfig {
    /// Optional seed; `None` seeds from OS entropy.
    seed: Option<u64>,
    /// Treatment of weighted-category mass that does not sum to one.
    remainder_policy: RemainderPolicy,
    /// Tolerance for "sums to one".
    sum_tolerance: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            remainder_policy: RemainderPolicy::default(),
            sum_tolerance: DEFAULT_SUM_TOLERANCE,
        }
    }
}

impl SamplerConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SamplerConfigBuilder {
        SamplerConfigBuilder::default()
    }

    /// Default configuration with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Returns the configured seed, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the remainder policy.
    #[inline]
    pub fn remainder_policy(&self) -> RemainderPolicy {
        self.remainder_policy
    }

    /// Returns the sum-to-one tolerance.
    #[inline]
    pub fn sum_tolerance(&self) -> f64 {
        self.sum_tolerance
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `sum_tolerance` is not in [0, 0.5).
    pub fn validate(&self) -> SamplingResult<()> {
        if !(0.0..0.5).contains(&self.sum_tolerance) {
            return Err(SamplingError::invalid(
                "sum_tolerance",
                format!("must lie in [0, 0.5), got {}", self.sum_tolerance),
            ));
        }
        Ok(())
    }
}

/// Builder for [`SamplerConfig`].
#[derive(Clone, Debug, Default)]
pub struct SamplerConfigBuilder {
    seed: Option<u64>,
    remainder_policy: RemainderPolicy,
    sum_tolerance: Option<f64>,
}

impl SamplerConfigBuilder {
    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the seed from an optional value.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the remainder policy.
    #[inline]
    pub fn remainder_policy(mut self, policy: RemainderPolicy) -> Self {
        self.remainder_policy = policy;
        self
    }

    /// Sets the sum-to-one tolerance.
    #[inline]
    pub fn sum_tolerance(mut self, tolerance: f64) -> Self {
        self.sum_tolerance = Some(tolerance);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Any error from [`SamplerConfig::validate`].
    pub fn build(self) -> SamplingResult<SamplerConfig> {
        let config = SamplerConfig {
            seed: self.seed,
            remainder_policy: self.remainder_policy,
            sum_tolerance: self.sum_tolerance.unwrap_or(DEFAULT_SUM_TOLERANCE),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SamplerConfig::builder().build().unwrap();
        assert_eq!(config.seed(), None);
        assert_eq!(config.remainder_policy(), RemainderPolicy::Discard);
        assert_eq!(config.sum_tolerance(), DEFAULT_SUM_TOLERANCE);
        assert_eq!(config, SamplerConfig::default());
    }

    #[test]
    fn test_config_builder_with_seed() {
        let config = SamplerConfig::builder().seed(7).build().unwrap();
        assert_eq!(config.seed(), Some(7));

        assert_eq!(SamplerConfig::with_seed(7), config);

        let cleared = SamplerConfig::builder().seed(7).maybe_seed(None).build().unwrap();
        assert_eq!(cleared.seed(), None);
    }

    #[test]
    fn test_config_invalid_tolerance() {
        for tolerance in [-1e-3, 0.5, f64::NAN] {
            let result = SamplerConfig::builder().sum_tolerance(tolerance).build();
            assert!(matches!(
                result,
                Err(SamplingError::InvalidParameter {
                    name: "sum_tolerance",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_config_zero_tolerance_allowed() {
        let config = SamplerConfig::builder().sum_tolerance(0.0).build().unwrap();
        assert_eq!(config.sum_tolerance(), 0.0);
    }
}
