//! Exponential variates by inverse-CDF transform.

use crate::error::{SamplingError, SamplingResult};
use crate::rng::UniformSource;

/// Largest uniform value fed to the inverse CDF.
///
/// Draws are clamped into `[0, MAX_UNIFORM]` so `ln(1 - u)` stays finite.
pub const MAX_UNIFORM: f64 = 1.0 - f64::EPSILON;

/// Fills `out` with `n` i.i.d. Exponential(`lambda`) draws.
///
/// Each value is `-ln(1 - u) / lambda` for a fresh uniform `u`.
///
/// # Errors
///
/// - `InvalidParameter` if `lambda` is not a positive finite number
/// - `AllocationMismatch` if `out.len() != n`
pub fn sample_exponential_into<S: UniformSource + ?Sized>(
    source: &mut S,
    lambda: f64,
    n: usize,
    out: &mut [f64],
) -> SamplingResult<()> {
    check_rate(lambda)?;
    if out.len() != n {
        return Err(SamplingError::mismatch("variates", n, out.len()));
    }

    for value in out.iter_mut() {
        let u = source.next_uniform().clamp(0.0, MAX_UNIFORM);
        // ln(1 - u) <= 0; abs() also folds -0.0 into 0.0.
        *value = (-u).ln_1p().abs() / lambda;
    }
    Ok(())
}

/// Allocating form of [`sample_exponential_into`].
///
/// # Examples
///
/// ```rust
/// use sampler_engine::distributions::sample_exponential;
/// use sampler_engine::rng::UniformEngine;
///
/// let mut engine = UniformEngine::from_seed(42);
/// let draws = sample_exponential(&mut engine, 2.0, 1000).unwrap();
/// assert!(draws.iter().all(|&x| x >= 0.0));
/// ```
pub fn sample_exponential<S: UniformSource + ?Sized>(
    source: &mut S,
    lambda: f64,
    n: usize,
) -> SamplingResult<Vec<f64>> {
    check_rate(lambda)?;

    let mut out = vec![0.0; n];
    sample_exponential_into(source, lambda, n, &mut out)?;
    Ok(out)
}

fn check_rate(lambda: f64) -> SamplingResult<()> {
    if lambda.is_finite() && lambda > 0.0 {
        Ok(())
    } else {
        Err(SamplingError::invalid(
            "lambda",
            format!("must be positive and finite, got {}", lambda),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedSource;
    use approx::assert_relative_eq;

    #[test]
    fn test_inverse_cdf_values() {
        let mut source = ScriptedSource::new(&[0.0, 0.5, 0.75]);
        let draws = sample_exponential(&mut source, 2.0, 3).unwrap();

        assert_eq!(draws[0], 0.0);
        assert!(draws[0].is_sign_positive());
        assert_relative_eq!(draws[1], std::f64::consts::LN_2 / 2.0, epsilon = 1e-15);
        assert_relative_eq!(draws[2], 4.0_f64.ln() / 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_clamp_keeps_values_finite() {
        // A non-conforming source returning 1.0 must not yield infinity.
        let mut source = ScriptedSource::new(&[1.0]);
        let draws = sample_exponential(&mut source, 1.0, 1).unwrap();
        assert!(draws[0].is_finite());
        assert_relative_eq!(draws[0], -(f64::EPSILON.ln()), epsilon = 1e-9);
    }

    #[test]
    fn test_zero_draws() {
        let mut source = ScriptedSource::new(&[0.5]);
        assert!(sample_exponential(&mut source, 1.0, 0).unwrap().is_empty());
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_invalid_rate() {
        let mut source = ScriptedSource::new(&[0.5]);
        for lambda in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = sample_exponential(&mut source, lambda, 5).unwrap_err();
            assert!(matches!(
                err,
                SamplingError::InvalidParameter { name: "lambda", .. }
            ));
        }
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_length_mismatch() {
        let mut source = ScriptedSource::new(&[0.5]);
        let mut out = vec![-1.0; 3];
        let err = sample_exponential_into(&mut source, 1.0, 4, &mut out).unwrap_err();
        assert!(matches!(err, SamplingError::AllocationMismatch { .. }));
        assert_eq!(out, vec![-1.0; 3]);
    }
}
