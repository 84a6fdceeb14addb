//! Descriptive statistics and histogram binning for sampled output.
//!
//! These are the numbers a plotting front end needs: a moment summary and
//! bin edges/counts. [`Histogram::auto`] chooses the bin width the same way
//! NumPy's `bins="auto"` does: the smaller of the Sturges and
//! Freedman–Diaconis widths.

use crate::error::{SamplingError, SamplingResult};

/// Upper bound on the number of bins [`Histogram::auto`] will produce.
pub const MAX_AUTO_BINS: usize = 1_000;

/// Moment summary of a sample.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleSummary {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    /// Square root of `variance`.
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl SampleSummary {
    /// Summarises `values`, or `None` for an empty sample.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_engine::stats::SampleSummary;
    ///
    /// let summary = SampleSummary::from_values(&[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(summary.mean, 2.0);
    /// assert_eq!(summary.max, 3.0);
    /// ```
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        Some(Self {
            count,
            mean,
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }

    /// Summarises integer counts.
    pub fn from_counts(counts: &[u64]) -> Option<Self> {
        let values: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        Self::from_values(&values)
    }
}

/// Equal-width histogram.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram {
    /// `bins + 1` monotonically increasing edges.
    pub edges: Vec<f64>,
    /// Values per bin; the last bin is closed on the right.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bins `data` into `bins` equal-width bins spanning its range.
    ///
    /// Non-finite values are ignored. An empty sample spans [0, 1]; a sample
    /// with a single distinct value spans that value ± 0.5.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `bins == 0`.
    pub fn with_bins(data: &[f64], bins: usize) -> SamplingResult<Self> {
        if bins == 0 {
            return Err(SamplingError::invalid("bins", "at least one bin is required"));
        }
        Ok(Self::bin(data, bins))
    }

    /// Bins `data` with an automatically chosen bin count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_engine::stats::Histogram;
    ///
    /// let data: Vec<f64> = (0..1000).map(|i| i as f64).collect();
    /// let histogram = Histogram::auto(&data);
    /// assert_eq!(histogram.counts.iter().sum::<u64>(), 1000);
    /// ```
    pub fn auto(data: &[f64]) -> Self {
        let finite: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
        Self::bin(&finite, auto_bin_count(&finite))
    }

    /// Number of bins.
    #[inline]
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// `bins` must be at least one.
    ///
    /// Works on halved values so `hi - lo` stays finite for data spanning
    /// most of the `f64` range.
    fn bin(data: &[f64], bins: usize) -> Self {
        let (lo, hi) = span(data);
        let half_width = (hi / 2.0 - lo / 2.0) / bins as f64;

        let edges: Vec<f64> = (0..=bins)
            .map(|i| {
                let t = i as f64 / bins as f64;
                lo * (1.0 - t) + hi * t
            })
            .collect();
        let mut counts = vec![0u64; bins];
        for &value in data.iter().filter(|v| v.is_finite()) {
            let index = ((value / 2.0 - lo / 2.0) / half_width) as usize;
            counts[index.min(bins - 1)] += 1;
        }

        Self { edges, counts }
    }
}

fn span(data: &[f64]) -> (f64, f64) {
    let (lo, hi) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn auto_bin_count(finite: &[f64]) -> usize {
    let n = finite.len();
    if n < 2 {
        return 1;
    }
    let (lo, hi) = span(finite);
    let half_range = hi / 2.0 - lo / 2.0;

    let mut sorted = finite.to_vec();
    sorted.sort_by(f64::total_cmp);
    let half_iqr = quantile(&sorted, 0.75) / 2.0 - quantile(&sorted, 0.25) / 2.0;

    // The narrower of the two widths gives the larger bin count.
    // Sturges: range / (log2 n + 1). Freedman-Diaconis: range / (2 IQR / cbrt n).
    let sturges = (n as f64).log2() + 1.0;
    let freedman_diaconis = if half_iqr > 0.0 {
        half_range * (n as f64).cbrt() / (2.0 * half_iqr)
    } else {
        0.0
    };
    (sturges.max(freedman_diaconis).ceil() as usize).clamp(1, MAX_AUTO_BINS)
}

/// Linear-interpolated quantile of sorted data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    let fraction = position - below as f64;
    sorted[below] * (1.0 - fraction) + sorted[above] * fraction
}
