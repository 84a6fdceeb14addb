//! The seam between the uniform engine and the samplers.

/// A sequential stream of uniform draws in the half-open interval [0, 1).
///
/// Implementors must never return a value outside [0, 1). Samplers rely on
/// this for the roulette-wheel search and the inverse-CDF transforms.
pub trait UniformSource {
    /// Returns the next uniform draw in [0, 1).
    fn next_uniform(&mut self) -> f64;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}
