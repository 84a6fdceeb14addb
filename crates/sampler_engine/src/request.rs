//! Request and result data model.
//!
//! A [`SamplingRequest`] describes one sampling call; a [`ResultBuffer`] is
//! the caller-owned storage the engine fills for it. Integer parameters use
//! `i32`, the width of the library's external call surface, so negative
//! inputs are representable and rejected by validation rather than by the
//! type system.

use std::fmt;

use crate::buffer::CountMatrix;
use crate::distributions::{check_probability, check_replicates, BernoulliCounts};
use crate::error::{SamplingError, SamplingResult};

/// Distribution family of a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DistributionKind {
    /// Success/failure counts over `n` trials.
    Bernoulli,
    /// Success counts of `k` replicates.
    Binomial,
    /// Category counts over equally-likely categories.
    MultinomialFixed,
    /// Category counts over explicitly weighted categories.
    MultinomialDynamic,
    /// i.i.d. exponential variates.
    Exponential,
}

impl DistributionKind {
    /// Kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bernoulli => "bernoulli",
            Self::Binomial => "binomial",
            Self::MultinomialFixed => "multinomial-fixed",
            Self::MultinomialDynamic => "multinomial-dynamic",
            Self::Exponential => "exponential",
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one sampling call.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::{BufferShape, SamplingRequest};
///
/// let request = SamplingRequest::MultinomialFixed { slices: 6, n: 1000, k: 20 };
/// assert_eq!(request.buffer_shape().unwrap(), BufferShape::Matrix(20, 6));
///
/// let invalid = SamplingRequest::Binomial { theta: 0.5, n: -1, k: 10 };
/// assert!(invalid.validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "distribution", rename_all = "kebab-case")
)]
pub enum SamplingRequest {
    /// `n` Bernoulli(`theta`) trials; a single replicate.
    Bernoulli {
        /// Success probability.
        theta: f64,
        /// Trial count.
        n: i32,
    },
    /// `k` replicates of Binomial(`n`, `theta`).
    Binomial {
        /// Success probability.
        theta: f64,
        /// Trials per replicate.
        n: i32,
        /// Replicate count.
        k: i32,
    },
    /// `k` replicates of `n` draws over `slices` equally-likely categories.
    MultinomialFixed {
        /// Category count.
        slices: i32,
        /// Draws per replicate.
        n: i32,
        /// Replicate count.
        k: i32,
    },
    /// `k` replicates of `n` draws over categories weighted by `thetas`.
    MultinomialDynamic {
        /// Per-category probabilities.
        thetas: Vec<f64>,
        /// Draws per replicate.
        n: i32,
        /// Replicate count.
        k: i32,
    },
    /// `n` i.i.d. Exponential(`lambda`) draws.
    Exponential {
        /// Rate parameter.
        lambda: f64,
        /// Draw count.
        n: i32,
    },
}

impl SamplingRequest {
    /// Distribution family.
    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::Bernoulli { .. } => DistributionKind::Bernoulli,
            Self::Binomial { .. } => DistributionKind::Binomial,
            Self::MultinomialFixed { .. } => DistributionKind::MultinomialFixed,
            Self::MultinomialDynamic { .. } => DistributionKind::MultinomialDynamic,
            Self::Exponential { .. } => DistributionKind::Exponential,
        }
    }

    /// Checks every parameter without touching any random stream.
    ///
    /// Whether `thetas` must sum to one depends on the session's
    /// [`RemainderPolicy`](crate::RemainderPolicy) and is checked when the
    /// request executes.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` naming the first offending parameter.
    pub fn validate(&self) -> SamplingResult<()> {
        match self {
            Self::Bernoulli { theta, n } => {
                check_probability("theta", *theta)?;
                count("n", *n)?;
            }
            Self::Binomial { theta, n, k } => {
                check_probability("theta", *theta)?;
                count("n", *n)?;
                replicates(*k)?;
            }
            Self::MultinomialFixed { slices, n, k } => {
                if count("slices", *slices)? == 0 {
                    return Err(SamplingError::invalid(
                        "slices",
                        "at least one category is required",
                    ));
                }
                count("n", *n)?;
                replicates(*k)?;
            }
            Self::MultinomialDynamic { thetas, n, k } => {
                if thetas.is_empty() {
                    return Err(SamplingError::invalid(
                        "thetas",
                        "must contain at least one category",
                    ));
                }
                for &theta in thetas {
                    check_probability("thetas", theta)?;
                }
                count("n", *n)?;
                replicates(*k)?;
            }
            Self::Exponential { lambda, n } => {
                if !(lambda.is_finite() && *lambda > 0.0) {
                    return Err(SamplingError::invalid(
                        "lambda",
                        format!("must be positive and finite, got {}", lambda),
                    ));
                }
                count("n", *n)?;
            }
        }
        Ok(())
    }

    /// Shape of the [`ResultBuffer`] this request fills.
    ///
    /// # Errors
    ///
    /// Any error from [`validate`](Self::validate).
    pub fn buffer_shape(&self) -> SamplingResult<BufferShape> {
        self.validate()?;
        let shape = match self {
            Self::Bernoulli { .. } => BufferShape::Pair,
            Self::Binomial { k, .. } => BufferShape::Vector(count("k", *k)?),
            Self::MultinomialFixed { slices, k, .. } => {
                BufferShape::Matrix(count("k", *k)?, count("slices", *slices)?)
            }
            Self::MultinomialDynamic { thetas, k, .. } => {
                BufferShape::Matrix(count("k", *k)?, thetas.len())
            }
            Self::Exponential { n, .. } => BufferShape::Vector(count("n", *n)?),
        };
        Ok(shape)
    }

    /// Trial count per replicate as `usize`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `n` is negative.
    pub fn trials(&self) -> SamplingResult<usize> {
        let n = match self {
            Self::Bernoulli { n, .. }
            | Self::Binomial { n, .. }
            | Self::MultinomialFixed { n, .. }
            | Self::MultinomialDynamic { n, .. }
            | Self::Exponential { n, .. } => *n,
        };
        count("n", n)
    }

    /// Replicate count as `usize`; one for single-replicate families.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `k` is below one.
    pub fn replicates(&self) -> SamplingResult<usize> {
        match self {
            Self::Binomial { k, .. }
            | Self::MultinomialFixed { k, .. }
            | Self::MultinomialDynamic { k, .. } => replicates(*k),
            Self::Bernoulli { .. } | Self::Exponential { .. } => Ok(1),
        }
    }
}

impl fmt::Display for SamplingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bernoulli { theta, n } => write!(f, "bernoulli(theta={}, n={})", theta, n),
            Self::Binomial { theta, n, k } => {
                write!(f, "binomial(theta={}, n={}, k={})", theta, n, k)
            }
            Self::MultinomialFixed { slices, n, k } => {
                write!(f, "multinomial-fixed(slices={}, n={}, k={})", slices, n, k)
            }
            Self::MultinomialDynamic { thetas, n, k } => {
                write!(f, "multinomial-dynamic(thetas={:?}, n={}, k={})", thetas, n, k)
            }
            Self::Exponential { lambda, n } => {
                write!(f, "exponential(lambda={}, n={})", lambda, n)
            }
        }
    }
}

/// Shape of a [`ResultBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferShape {
    /// Success and failure counters.
    Pair,
    /// One value per replicate or draw.
    Vector(usize),
    /// `rows × cols` counts.
    Matrix(usize, usize),
}

impl fmt::Display for BufferShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pair => f.write_str("pair"),
            Self::Vector(len) => write!(f, "[{}]", len),
            Self::Matrix(rows, cols) => write!(f, "{}x{}", rows, cols),
        }
    }
}

/// Caller-owned output storage for one request.
///
/// Allocate with [`ResultBuffer::allocate`], hand it to
/// [`Sampler::execute_into`](crate::Sampler::execute_into), then read it.
/// The engine writes into it in place and keeps no reference afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "data", rename_all = "kebab-case")
)]
pub enum ResultBuffer {
    /// Bernoulli counters.
    Bernoulli(BernoulliCounts),
    /// Binomial success counts, one per replicate.
    Binomial(Vec<u64>),
    /// Multinomial counts, one row per replicate.
    Multinomial {
        /// Category counts.
        counts: CountMatrix,
        /// Draws that fell past the last weighted boundary and were not
        /// counted. Always zero for fixed slices.
        discarded: u64,
    },
    /// Exponential variates.
    Exponential(Vec<f64>),
}

impl ResultBuffer {
    /// Allocates zero-filled storage sized for `request`.
    ///
    /// # Errors
    ///
    /// Any error from [`SamplingRequest::validate`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_engine::{BufferShape, ResultBuffer, SamplingRequest};
    ///
    /// let request = SamplingRequest::Exponential { lambda: 2.0, n: 500 };
    /// let buffer = ResultBuffer::allocate(&request).unwrap();
    /// assert_eq!(buffer.shape(), BufferShape::Vector(500));
    /// ```
    pub fn allocate(request: &SamplingRequest) -> SamplingResult<Self> {
        let buffer = match (request.kind(), request.buffer_shape()?) {
            (DistributionKind::Bernoulli, _) => Self::Bernoulli(BernoulliCounts::default()),
            (DistributionKind::Binomial, BufferShape::Vector(k)) => Self::Binomial(vec![0; k]),
            (DistributionKind::Exponential, BufferShape::Vector(n)) => {
                Self::Exponential(vec![0.0; n])
            }
            (_, BufferShape::Matrix(rows, cols)) => Self::Multinomial {
                counts: CountMatrix::zeros(rows, cols),
                discarded: 0,
            },
            (kind, shape) => {
                return Err(SamplingError::mismatch(kind.as_str(), "a supported shape", shape))
            }
        };
        Ok(buffer)
    }

    /// Current shape.
    pub fn shape(&self) -> BufferShape {
        match self {
            Self::Bernoulli(_) => BufferShape::Pair,
            Self::Binomial(values) => BufferShape::Vector(values.len()),
            Self::Multinomial { counts, .. } => BufferShape::Matrix(counts.rows(), counts.cols()),
            Self::Exponential(values) => BufferShape::Vector(values.len()),
        }
    }

    /// Whether this buffer variant can hold results of `kind`.
    pub fn accepts(&self, kind: DistributionKind) -> bool {
        matches!(
            (self, kind),
            (Self::Bernoulli(_), DistributionKind::Bernoulli)
                | (Self::Binomial(_), DistributionKind::Binomial)
                | (
                    Self::Multinomial { .. },
                    DistributionKind::MultinomialFixed | DistributionKind::MultinomialDynamic
                )
                | (Self::Exponential(_), DistributionKind::Exponential)
        )
    }

    /// Flattens the contents to `f64` for numeric interop.
    ///
    /// Bernoulli yields `[successes, failures]`; multinomial counts are
    /// flattened row-major.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Self::Bernoulli(counts) => vec![counts.successes as f64, counts.failures as f64],
            Self::Binomial(values) => values.iter().map(|&v| v as f64).collect(),
            Self::Multinomial { counts, .. } => {
                counts.as_slice().iter().map(|&v| v as f64).collect()
            }
            Self::Exponential(values) => values.clone(),
        }
    }

    /// Draws the last run left uncounted; zero for every non-multinomial buffer.
    pub fn discarded(&self) -> u64 {
        match self {
            Self::Multinomial { discarded, .. } => *discarded,
            _ => 0,
        }
    }
}

fn count(name: &'static str, value: i32) -> SamplingResult<usize> {
    usize::try_from(value).map_err(|_| {
        SamplingError::invalid(name, format!("must be non-negative, got {}", value))
    })
}

fn replicates(k: i32) -> SamplingResult<usize> {
    let k = count("k", k)?;
    check_replicates(k)?;
    Ok(k)
}
