//! Multinomial replicates over equally-likely or explicitly weighted
//! categories.
//!
//! # Fixed categories
//!
//! Each draw maps `u` to category `floor(u * slices)`.
//!
//! # Weighted categories
//!
//! [`CategoricalTable`] holds the prefix sums of the category probabilities.
//! A draw selects the first category whose cumulative probability exceeds
//! `u` (roulette-wheel selection, binary search over the prefix sums).
//! What happens to probability mass the declared categories do not cover is
//! governed by [`RemainderPolicy`].

use std::fmt;
use std::str::FromStr;

use super::{check_matrix_shape, check_probability, check_replicates};
use crate::buffer::CountMatrix;
use crate::error::{SamplingError, SamplingResult};
use crate::rng::UniformSource;

/// Default tolerance when deciding whether probabilities sum to one.
pub const DEFAULT_SUM_TOLERANCE: f64 = 1e-9;

/// Treatment of category probabilities that do not sum to one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RemainderPolicy {
    /// Probabilities must sum to one within tolerance.
    Reject,
    /// Probabilities are divided by their sum before sampling.
    Normalize,
    /// Draws landing beyond the declared mass are not counted.
    #[default]
    Discard,
}

impl RemainderPolicy {
    /// Lower-case name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Normalize => "normalize",
            Self::Discard => "discard",
        }
    }
}

impl FromStr for RemainderPolicy {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "normalize" | "normalise" => Ok(Self::Normalize),
            "discard" => Ok(Self::Discard),
            other => Err(SamplingError::invalid(
                "remainder_policy",
                format!("unknown policy '{}', expected reject, normalize or discard", other),
            )),
        }
    }
}

impl fmt::Display for RemainderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix-sum table for roulette-wheel category selection.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::distributions::{CategoricalTable, RemainderPolicy};
///
/// let table = CategoricalTable::new(&[0.2, 0.3, 0.5], RemainderPolicy::Reject).unwrap();
/// assert_eq!(table.select(0.1), Some(0));
/// assert_eq!(table.select(0.2), Some(1));
/// assert_eq!(table.select(0.99), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CategoricalTable {
    /// Non-decreasing cumulative probabilities, one per category.
    cumulative: Vec<f64>,
}

impl CategoricalTable {
    /// Builds a table with [`DEFAULT_SUM_TOLERANCE`].
    ///
    /// # Errors
    ///
    /// See [`with_tolerance`](Self::with_tolerance).
    pub fn new(thetas: &[f64], policy: RemainderPolicy) -> SamplingResult<Self> {
        Self::with_tolerance(thetas, policy, DEFAULT_SUM_TOLERANCE)
    }

    /// Builds a table, applying `policy` to the total probability.
    ///
    /// When the effective total is one within `tolerance`, the boundary of
    /// the last category with non-zero probability, and every boundary after
    /// it, is pinned to exactly 1.0. Rounding in the prefix sums then never
    /// leaves a sliver of uncounted mass, and trailing zero-probability
    /// categories keep an empty interval.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if:
    /// - `thetas` is empty or any entry is outside [0, 1]
    /// - `tolerance` is not in [0, 0.5)
    /// - `Reject` and the sum differs from one by more than `tolerance`
    /// - `Normalize` and the sum is zero
    /// - `Discard` and the sum exceeds one by more than `tolerance`
    pub fn with_tolerance(
        thetas: &[f64],
        policy: RemainderPolicy,
        tolerance: f64,
    ) -> SamplingResult<Self> {
        if thetas.is_empty() {
            return Err(SamplingError::invalid(
                "thetas",
                "must contain at least one category",
            ));
        }
        for (index, &theta) in thetas.iter().enumerate() {
            check_probability("thetas", theta).map_err(|_| {
                SamplingError::invalid(
                    "thetas",
                    format!("entry {} must lie in [0, 1], got {}", index, theta),
                )
            })?;
        }
        if !(0.0..0.5).contains(&tolerance) {
            return Err(SamplingError::invalid(
                "sum_tolerance",
                format!("must lie in [0, 0.5), got {}", tolerance),
            ));
        }

        let sum: f64 = thetas.iter().sum();
        let scale = match policy {
            RemainderPolicy::Reject if (sum - 1.0).abs() > tolerance => {
                return Err(SamplingError::invalid(
                    "thetas",
                    format!("must sum to 1 (tolerance {}), got {}", tolerance, sum),
                ));
            }
            RemainderPolicy::Normalize if sum <= 0.0 => {
                return Err(SamplingError::invalid(
                    "thetas",
                    "cannot normalize: total probability is zero",
                ));
            }
            RemainderPolicy::Normalize => 1.0 / sum,
            RemainderPolicy::Discard if sum > 1.0 + tolerance => {
                return Err(SamplingError::invalid(
                    "thetas",
                    format!("total probability {} exceeds 1", sum),
                ));
            }
            _ => 1.0,
        };

        let mut running = 0.0;
        let mut cumulative: Vec<f64> = thetas
            .iter()
            .map(|&theta| {
                running += theta * scale;
                running
            })
            .collect();

        let total = running;
        if (total - 1.0).abs() <= tolerance {
            let last_with_mass = thetas.iter().rposition(|&theta| theta > 0.0).unwrap_or(0);
            for (index, boundary) in cumulative.iter_mut().enumerate() {
                *boundary = if index >= last_with_mass {
                    1.0
                } else {
                    boundary.min(1.0)
                };
            }
        }

        Ok(Self { cumulative })
    }

    /// Number of declared categories.
    #[inline]
    pub fn categories(&self) -> usize {
        self.cumulative.len()
    }

    /// Probability mass covered by the declared categories.
    #[inline]
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Cumulative boundaries, one per category.
    #[inline]
    pub fn boundaries(&self) -> &[f64] {
        &self.cumulative
    }

    /// Category selected by uniform draw `u`, or `None` when `u` falls in
    /// the uncovered remainder.
    #[inline]
    pub fn select(&self, u: f64) -> Option<usize> {
        let index = self.cumulative.partition_point(|&boundary| boundary <= u);
        (index < self.cumulative.len()).then_some(index)
    }
}

/// Counts from a weighted multinomial call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicSample {
    /// One row per replicate, one column per declared category.
    pub counts: CountMatrix,
    /// Draws, across all replicates, that fell into the uncounted remainder.
    pub discarded: u64,
}

/// Fills `out` with `k` replicates of `n` draws over `slices` equally-likely
/// categories.
///
/// Every row of `out` sums to exactly `n`. Existing contents are
/// overwritten.
///
/// # Errors
///
/// - `InvalidParameter` if `slices == 0` or `k == 0`
/// - `AllocationMismatch` if `out` is not `k × slices`
pub fn sample_multinomial_fixed_into<S: UniformSource + ?Sized>(
    source: &mut S,
    slices: usize,
    n: usize,
    k: usize,
    out: &mut CountMatrix,
) -> SamplingResult<()> {
    check_slices(slices)?;
    check_replicates(k)?;
    check_matrix_shape(out, k, slices)?;

    let last = slices - 1;
    let width = slices as f64;
    for replicate in 0..k {
        let row = out.row_mut(replicate);
        row.fill(0);
        for _ in 0..n {
            // u < 1, but u * slices can still round up to slices.
            let category = ((source.next_uniform() * width) as usize).min(last);
            row[category] += 1;
        }
    }
    Ok(())
}

/// Allocating form of [`sample_multinomial_fixed_into`].
///
/// # Examples
///
/// ```rust
/// use sampler_engine::distributions::sample_multinomial_fixed;
/// use sampler_engine::rng::UniformEngine;
///
/// let mut engine = UniformEngine::from_seed(42);
/// let counts = sample_multinomial_fixed(&mut engine, 6, 1000, 20).unwrap();
/// assert_eq!(counts.shape(), (20, 6));
/// assert!(counts.row_sums().iter().all(|&s| s == 1000));
/// ```
pub fn sample_multinomial_fixed<S: UniformSource + ?Sized>(
    source: &mut S,
    slices: usize,
    n: usize,
    k: usize,
) -> SamplingResult<CountMatrix> {
    check_slices(slices)?;
    check_replicates(k)?;

    let mut out = CountMatrix::zeros(k, slices);
    sample_multinomial_fixed_into(source, slices, n, k, &mut out)?;
    Ok(out)
}

/// Fills `out` with `k` replicates of `n` roulette-wheel draws over `table`.
///
/// Returns the number of draws that fell beyond the table's total and were
/// therefore not counted; zero whenever the table covers all of [0, 1).
///
/// # Errors
///
/// - `InvalidParameter` if `k == 0`
/// - `AllocationMismatch` if `out` is not `k × table.categories()`
pub fn sample_multinomial_dynamic_into<S: UniformSource + ?Sized>(
    source: &mut S,
    table: &CategoricalTable,
    n: usize,
    k: usize,
    out: &mut CountMatrix,
) -> SamplingResult<u64> {
    check_replicates(k)?;
    check_matrix_shape(out, k, table.categories())?;

    let mut discarded = 0u64;
    for replicate in 0..k {
        let row = out.row_mut(replicate);
        row.fill(0);
        for _ in 0..n {
            match table.select(source.next_uniform()) {
                Some(category) => row[category] += 1,
                None => discarded += 1,
            }
        }
    }
    Ok(discarded)
}

/// Builds a table from `thetas` under `policy` and samples `k` replicates.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::distributions::{sample_multinomial_dynamic, RemainderPolicy};
/// use sampler_engine::rng::UniformEngine;
///
/// let mut engine = UniformEngine::from_seed(42);
/// let thetas = [0.1, 0.1, 0.5, 0.1, 0.2];
/// let sample =
///     sample_multinomial_dynamic(&mut engine, &thetas, RemainderPolicy::Reject, 1000, 20)
///         .unwrap();
///
/// assert_eq!(sample.discarded, 0);
/// assert!(sample.counts.row_sums().iter().all(|&s| s == 1000));
/// ```
pub fn sample_multinomial_dynamic<S: UniformSource + ?Sized>(
    source: &mut S,
    thetas: &[f64],
    policy: RemainderPolicy,
    n: usize,
    k: usize,
) -> SamplingResult<DynamicSample> {
    let table = CategoricalTable::new(thetas, policy)?;
    check_replicates(k)?;

    let mut counts = CountMatrix::zeros(k, table.categories());
    let discarded = sample_multinomial_dynamic_into(source, &table, n, k, &mut counts)?;
    Ok(DynamicSample { counts, discarded })
}

fn check_slices(slices: usize) -> SamplingResult<()> {
    if slices == 0 {
        return Err(SamplingError::invalid("slices", "at least one category is required"));
    }
    Ok(())
}
