//! Two-variable Gibbs sampling from conditional inverse CDFs.
//!
//! Given the conditional inverse CDFs of a bivariate density,
//! `x = F⁻¹(u | y)` and `y = G⁻¹(v | x)`, the sampler builds a chain of
//! `(x, y)` points by systematic scan:
//!
//! ```text
//! x_i = F⁻¹(u_i | y_{i-1})
//! y_i = G⁻¹(v_i | x_i)
//! ```
//!
//! starting from a caller-chosen `y_{-1}`. Each step consumes two uniform
//! draws, `u_i` then `v_i`, from the shared stream.

use crate::error::{SamplingError, SamplingResult};
use crate::rng::UniformSource;

/// Gibbs sampler over a pair of conditional inverse CDFs.
///
/// Both closures take `(u, other)`: a uniform draw in [0, 1) and the current
/// value of the other coordinate.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::gibbs::GibbsSampler;
/// use sampler_engine::rng::UniformEngine;
///
/// // Independent Uniform(0, 2) coordinates.
/// let sampler = GibbsSampler::new(|u, _y| 2.0 * u, |v, _x| 2.0 * v);
/// let mut engine = UniformEngine::from_seed(42);
///
/// let (xs, ys) = sampler.sample(&mut engine, 1.0, 100).unwrap();
/// assert!(xs.iter().chain(&ys).all(|&v| (0.0..2.0).contains(&v)));
/// ```
pub struct GibbsSampler<FX, FY> {
    inverse_x: FX,
    inverse_y: FY,
}

impl<FX, FY> GibbsSampler<FX, FY>
where
    FX: Fn(f64, f64) -> f64,
    FY: Fn(f64, f64) -> f64,
{
    /// Creates a sampler from the conditional inverse CDFs of X|Y and Y|X.
    pub fn new(inverse_x: FX, inverse_y: FY) -> Self {
        Self {
            inverse_x,
            inverse_y,
        }
    }

    /// Fills `xs` and `ys` with consecutive chain states.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `initial_y` is not finite
    /// - `AllocationMismatch` if `xs` and `ys` differ in length
    /// - `NonFiniteVariate` if either inverse CDF returns NaN or infinity;
    ///   both buffers are zeroed before returning
    pub fn sample_into<S: UniformSource + ?Sized>(
        &self,
        source: &mut S,
        initial_y: f64,
        xs: &mut [f64],
        ys: &mut [f64],
    ) -> SamplingResult<()> {
        if !initial_y.is_finite() {
            return Err(SamplingError::invalid(
                "initial_y",
                format!("must be finite, got {}", initial_y),
            ));
        }
        if xs.len() != ys.len() {
            return Err(SamplingError::mismatch("ys", xs.len(), ys.len()));
        }

        let mut previous_y = initial_y;
        for index in 0..xs.len() {
            let x = (self.inverse_x)(source.next_uniform(), previous_y);
            let y = if x.is_finite() {
                (self.inverse_y)(source.next_uniform(), x)
            } else {
                f64::NAN
            };
            if !y.is_finite() {
                xs.fill(0.0);
                ys.fill(0.0);
                return Err(SamplingError::NonFiniteVariate { index });
            }
            xs[index] = x;
            ys[index] = y;
            previous_y = y;
        }
        Ok(())
    }

    /// Allocating form of [`sample_into`](Self::sample_into).
    pub fn sample<S: UniformSource + ?Sized>(
        &self,
        source: &mut S,
        initial_y: f64,
        n: usize,
    ) -> SamplingResult<(Vec<f64>, Vec<f64>)> {
        let mut xs = vec![0.0; n];
        let mut ys = vec![0.0; n];
        self.sample_into(source, initial_y, &mut xs, &mut ys)?;
        Ok((xs, ys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::UniformEngine;
    use crate::testing::ScriptedSource;

    /// Conditional inverse for f(x, y) = (x + y) / 8 on [0, 2]².
    fn linear_density_inverse(u: f64, other: f64) -> f64 {
        -other + (other * other + 4.0 * u * (1.0 + other)).sqrt()
    }

    #[test]
    fn test_draw_order_and_scan() {
        let sampler = GibbsSampler::new(|u, y| u + y, |v, x| v * x);
        let mut source = ScriptedSource::new(&[0.5, 0.5, 0.25, 0.5]);

        let (xs, ys) = sampler.sample(&mut source, 1.0, 2).unwrap();

        // x0 = 0.5 + 1.0, y0 = 0.5 * 1.5; x1 = 0.25 + 0.75, y1 = 0.5 * 1.0.
        assert_eq!(xs, vec![1.5, 1.0]);
        assert_eq!(ys, vec![0.75, 0.5]);
        assert_eq!(source.draws(), 4);
    }

    #[test]
    fn test_linear_density_marginal_mean() {
        let sampler = GibbsSampler::new(linear_density_inverse, linear_density_inverse);
        let mut engine = UniformEngine::from_seed(2024);

        let (xs, ys) = sampler.sample(&mut engine, 1.0, 50_000).unwrap();

        // E[X] = E[Y] = 7/6 for this density.
        let mean_x = xs.iter().sum::<f64>() / xs.len() as f64;
        let mean_y = ys.iter().sum::<f64>() / ys.len() as f64;
        assert!((mean_x - 7.0 / 6.0).abs() < 0.03, "mean_x = {}", mean_x);
        assert!((mean_y - 7.0 / 6.0).abs() < 0.03, "mean_y = {}", mean_y);
        assert!(xs.iter().chain(&ys).all(|&v| (0.0..=2.0).contains(&v)));
    }

    #[test]
    fn test_non_finite_variate_clears_buffers() {
        let sampler = GibbsSampler::new(
            |u, _| if u > 0.5 { f64::NAN } else { u },
            |v, _| v,
        );
        let mut source = ScriptedSource::new(&[0.1, 0.2, 0.9, 0.3]);
        let mut xs = vec![0.0; 3];
        let mut ys = vec![0.0; 3];

        let err = sampler
            .sample_into(&mut source, 0.0, &mut xs, &mut ys)
            .unwrap_err();

        assert_eq!(err, SamplingError::NonFiniteVariate { index: 1 });
        assert_eq!(xs, vec![0.0; 3]);
        assert_eq!(ys, vec![0.0; 3]);
    }

    #[test]
    fn test_mismatched_buffers() {
        let sampler = GibbsSampler::new(|u, _| u, |v, _| v);
        let mut engine = UniformEngine::from_seed(1);
        let mut xs = vec![0.0; 3];
        let mut ys = vec![0.0; 2];

        let err = sampler
            .sample_into(&mut engine, 0.0, &mut xs, &mut ys)
            .unwrap_err();
        assert!(matches!(err, SamplingError::AllocationMismatch { .. }));
    }

    #[test]
    fn test_non_finite_start_rejected() {
        let sampler = GibbsSampler::new(|u, _| u, |v, _| v);
        let mut engine = UniformEngine::from_seed(1);
        assert!(sampler.sample(&mut engine, f64::INFINITY, 3).is_err());
    }
}
