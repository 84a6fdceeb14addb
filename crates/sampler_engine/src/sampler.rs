//! Sampling sessions.
//!
//! A [`Sampler`] owns one [`UniformEngine`] and one [`SamplerConfig`]. Every
//! call on it draws from that single sequential stream, so a session seeded
//! with `s` and driven through the same calls always yields the same output.
//!
//! # Architecture
//!
//! ```text
//! Sampler
//! ├── SamplerConfig   (seed, remainder policy, tolerance)
//! ├── UniformEngine   (the session's stream)
//! └── Routines
//!     ├── bernoulli()            / execute(Bernoulli)
//!     ├── binomial[_into]()      / execute(Binomial)
//!     ├── multinomial_fixed[_into]()
//!     ├── multinomial_dynamic[_into]()
//!     └── exponential[_into]()
//! ```
//!
//! Concurrent work gets one session per worker via [`Sampler::session`];
//! sessions share nothing.

use tracing::{debug, warn};

use crate::buffer::CountMatrix;
use crate::config::SamplerConfig;
use crate::distributions::{self, BernoulliCounts, CategoricalTable, DynamicSample};
use crate::error::{SamplingError, SamplingResult};
use crate::request::{ResultBuffer, SamplingRequest};
use crate::rng::UniformEngine;

/// A sampling session: one engine, one configuration.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::Sampler;
///
/// let mut sampler = Sampler::from_seed(42);
///
/// let successes = sampler.binomial(0.5, 1000, 10).unwrap();
/// assert_eq!(successes.len(), 10);
///
/// let counts = sampler.multinomial_fixed(6, 1000, 20).unwrap();
/// assert!(counts.row_sums().iter().all(|&s| s == 1000));
/// ```
#[derive(Clone, Debug)]
pub struct Sampler {
    engine: UniformEngine,
    config: SamplerConfig,
}

impl Sampler {
    /// Creates a session from a configuration.
    ///
    /// Without a configured seed the engine is seeded from OS entropy; the
    /// drawn seed is logged and available through [`seed`](Self::seed).
    pub fn new(config: SamplerConfig) -> Self {
        let engine = match config.seed() {
            Some(seed) => UniformEngine::from_seed(seed),
            None => UniformEngine::from_entropy(),
        };
        debug!(
            seed = engine.seed(),
            remainder_policy = %config.remainder_policy(),
            "Sampling session created"
        );
        Self { engine, config }
    }

    /// Creates a session with default configuration and the given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SamplerConfig::with_seed(seed))
    }

    /// Seed of this session's engine.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.engine.seed()
    }

    /// Session configuration.
    #[inline]
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Direct access to the session's engine, for drivers such as
    /// [`GibbsSampler`](crate::gibbs::GibbsSampler) that draw from any
    /// [`UniformSource`](crate::rng::UniformSource).
    #[inline]
    pub fn engine_mut(&mut self) -> &mut UniformEngine {
        &mut self.engine
    }

    /// Restarts the session's stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        debug!(seed, "Sampling session reseeded");
        self.engine.reseed(seed);
    }

    /// Derives an independent session with the same configuration.
    ///
    /// See [`UniformEngine::derive_session`] for how the child seed is
    /// chosen.
    pub fn session(&self, stream: u64) -> Self {
        let engine = self.engine.derive_session(stream);
        debug!(parent = self.seed(), stream, seed = engine.seed(), "Derived session");
        Self {
            engine,
            config: self.config.clone(),
        }
    }

    /// `n` Bernoulli(`theta`) trials.
    ///
    /// # Errors
    ///
    /// See [`distributions::sample_bernoulli`].
    pub fn bernoulli(&mut self, theta: f64, n: usize) -> SamplingResult<BernoulliCounts> {
        debug!(theta, n, "Sampling bernoulli");
        distributions::sample_bernoulli(&mut self.engine, theta, n)
    }

    /// `k` Binomial(`n`, `theta`) replicates.
    ///
    /// # Errors
    ///
    /// See [`distributions::sample_binomial_into`].
    pub fn binomial(&mut self, theta: f64, n: usize, k: usize) -> SamplingResult<Vec<u64>> {
        debug!(theta, n, k, "Sampling binomial");
        distributions::sample_binomial(&mut self.engine, theta, n, k)
    }

    /// Caller-buffer form of [`binomial`](Self::binomial).
    ///
    /// # Errors
    ///
    /// See [`distributions::sample_binomial_into`].
    pub fn binomial_into(
        &mut self,
        theta: f64,
        n: usize,
        k: usize,
        out: &mut [u64],
    ) -> SamplingResult<()> {
        debug!(theta, n, k, "Sampling binomial into caller buffer");
        distributions::sample_binomial_into(&mut self.engine, theta, n, k, out)
    }

    /// `k` replicates over `slices` equally-likely categories.
    ///
    /// # Errors
    ///
    /// See [`distributions::sample_multinomial_fixed_into`].
    pub fn multinomial_fixed(
        &mut self,
        slices: usize,
        n: usize,
        k: usize,
    ) -> SamplingResult<CountMatrix> {
        debug!(slices, n, k, "Sampling multinomial (fixed)");
        distributions::sample_multinomial_fixed(&mut self.engine, slices, n, k)
    }

    /// Caller-buffer form of [`multinomial_fixed`](Self::multinomial_fixed).
    ///
    /// # Errors
    ///
    /// See [`distributions::sample_multinomial_fixed_into`].
    pub fn multinomial_fixed_into(
        &mut self,
        slices: usize,
        n: usize,
        k: usize,
        out: &mut CountMatrix,
    ) -> SamplingResult<()> {
        debug!(slices, n, k, "Sampling multinomial (fixed) into caller buffer");
        distributions::sample_multinomial_fixed_into(&mut self.engine, slices, n, k, out)
    }

    /// `k` replicates over categories weighted by `thetas`, under the
    /// session's remainder policy.
    ///
    /// # Errors
    ///
    /// See [`CategoricalTable::with_tolerance`] and
    /// [`distributions::sample_multinomial_dynamic_into`].
    pub fn multinomial_dynamic(
        &mut self,
        thetas: &[f64],
        n: usize,
        k: usize,
    ) -> SamplingResult<DynamicSample> {
        let table = self.table(thetas)?;
        distributions::check_replicates(k)?;

        let mut counts = CountMatrix::zeros(k, table.categories());
        let discarded = self.fill_dynamic(&table, n, k, &mut counts)?;
        Ok(DynamicSample { counts, discarded })
    }

    /// Caller-buffer form of [`multinomial_dynamic`](Self::multinomial_dynamic).
    ///
    /// Returns the number of draws that fell into the uncounted remainder.
    ///
    /// # Errors
    ///
    /// See [`multinomial_dynamic`](Self::multinomial_dynamic).
    pub fn multinomial_dynamic_into(
        &mut self,
        thetas: &[f64],
        n: usize,
        k: usize,
        out: &mut CountMatrix,
    ) -> SamplingResult<u64> {
        let table = self.table(thetas)?;
        self.fill_dynamic(&table, n, k, out)
    }

    /// `n` Exponential(`lambda`) draws.
    ///
    /// # Errors
    ///
    /// See [`distributions::sample_exponential_into`].
    pub fn exponential(&mut self, lambda: f64, n: usize) -> SamplingResult<Vec<f64>> {
        debug!(lambda, n, "Sampling exponential");
        distributions::sample_exponential(&mut self.engine, lambda, n)
    }

    /// Caller-buffer form of [`exponential`](Self::exponential).
    ///
    /// # Errors
    ///
    /// See [`distributions::sample_exponential_into`].
    pub fn exponential_into(
        &mut self,
        lambda: f64,
        n: usize,
        out: &mut [f64],
    ) -> SamplingResult<()> {
        debug!(lambda, n, "Sampling exponential into caller buffer");
        distributions::sample_exponential_into(&mut self.engine, lambda, n, out)
    }

    /// Executes `request` into freshly allocated storage.
    ///
    /// # Errors
    ///
    /// Any validation error for the request.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_engine::{ResultBuffer, Sampler, SamplingRequest};
    ///
    /// let mut sampler = Sampler::from_seed(1);
    /// let request = SamplingRequest::Bernoulli { theta: 0.25, n: 400 };
    ///
    /// match sampler.execute(&request).unwrap() {
    ///     ResultBuffer::Bernoulli(counts) => assert_eq!(counts.trials(), 400),
    ///     other => panic!("unexpected buffer {:?}", other),
    /// }
    /// ```
    pub fn execute(&mut self, request: &SamplingRequest) -> SamplingResult<ResultBuffer> {
        let mut out = ResultBuffer::allocate(request)?;
        self.execute_into(request, &mut out)?;
        Ok(out)
    }

    /// Executes `request` into caller-owned storage.
    ///
    /// The request is validated and the buffer's variant and shape are
    /// checked before any draw; on error `out` is unchanged. Multinomial
    /// buffers also receive the number of discarded draws.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for an invalid request
    /// - `AllocationMismatch` if `out` does not fit the request
    pub fn execute_into(
        &mut self,
        request: &SamplingRequest,
        out: &mut ResultBuffer,
    ) -> SamplingResult<()> {
        let expected = request.buffer_shape()?;
        if !out.accepts(request.kind()) || out.shape() != expected {
            return Err(SamplingError::mismatch(
                "result",
                format!("{} {}", request.kind(), expected),
                out.shape(),
            ));
        }

        let n = request.trials()?;
        let k = request.replicates()?;
        match (request, out) {
            (SamplingRequest::Bernoulli { theta, .. }, ResultBuffer::Bernoulli(counts)) => {
                *counts = self.bernoulli(*theta, n)?;
            }
            (SamplingRequest::Binomial { theta, .. }, ResultBuffer::Binomial(values)) => {
                self.binomial_into(*theta, n, k, values)?;
            }
            (
                SamplingRequest::MultinomialFixed { .. },
                ResultBuffer::Multinomial { counts, discarded },
            ) => {
                let slices = counts.cols();
                self.multinomial_fixed_into(slices, n, k, counts)?;
                *discarded = 0;
            }
            (
                SamplingRequest::MultinomialDynamic { thetas, .. },
                ResultBuffer::Multinomial { counts, discarded },
            ) => {
                *discarded = self.multinomial_dynamic_into(thetas, n, k, counts)?;
            }
            (SamplingRequest::Exponential { lambda, .. }, ResultBuffer::Exponential(values)) => {
                self.exponential_into(*lambda, n, values)?;
            }
            (request, out) => {
                return Err(SamplingError::mismatch(
                    "result",
                    request.kind(),
                    out.shape(),
                ));
            }
        }
        Ok(())
    }

    fn table(&self, thetas: &[f64]) -> SamplingResult<CategoricalTable> {
        CategoricalTable::with_tolerance(
            thetas,
            self.config.remainder_policy(),
            self.config.sum_tolerance(),
        )
    }

    fn fill_dynamic(
        &mut self,
        table: &CategoricalTable,
        n: usize,
        k: usize,
        out: &mut CountMatrix,
    ) -> SamplingResult<u64> {
        debug!(
            categories = table.categories(),
            total = table.total(),
            n,
            k,
            "Sampling multinomial (dynamic)"
        );
        let discarded =
            distributions::sample_multinomial_dynamic_into(&mut self.engine, table, n, k, out)?;
        if discarded > 0 {
            warn!(
                discarded,
                covered = table.total(),
                "Draws fell outside the declared categories and were not counted"
            );
        }
        Ok(discarded)
    }
}
