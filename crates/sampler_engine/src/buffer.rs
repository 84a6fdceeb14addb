//! Caller-owned count storage for multinomial replicates.
//!
//! # Memory Layout
//!
//! [`CountMatrix`] stores `rows × cols` counts in one contiguous row-major
//! buffer: row `i` (replicate `i`) occupies `counts[i * cols..(i + 1) * cols]`.
//! The engine only ever writes into a matrix the caller allocated; it never
//! reallocates or retains it.

use crate::error::{SamplingError, SamplingResult};

/// Row-major matrix of category counts, one row per replicate.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::CountMatrix;
///
/// let counts = CountMatrix::zeros(20, 6);
/// assert_eq!(counts.shape(), (20, 6));
/// assert!(counts.row(0).iter().all(|&c| c == 0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCountMatrix"))]
pub struct CountMatrix {
    /// Counts in row-major order.
    counts: Vec<u64>,
    /// Number of replicates.
    rows: usize,
    /// Number of categories.
    cols: usize,
}

impl CountMatrix {
    /// Allocates a zero-filled matrix with the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            counts: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Wraps row-major `counts` as a `rows × cols` matrix.
    ///
    /// # Errors
    ///
    /// `AllocationMismatch` if `counts.len() != rows * cols`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_engine::CountMatrix;
    ///
    /// let counts = CountMatrix::from_parts(vec![1, 2, 3, 4], 2, 2).unwrap();
    /// assert_eq!(counts.row(1), &[3, 4]);
    /// assert!(CountMatrix::from_parts(vec![], 2, 3).is_err());
    /// ```
    pub fn from_parts(counts: Vec<u64>, rows: usize, cols: usize) -> SamplingResult<Self> {
        match rows.checked_mul(cols) {
            Some(len) if len == counts.len() => Ok(Self { counts, rows, cols }),
            _ => Err(SamplingError::mismatch(
                "counts",
                format!("{} values for {}x{}", rows.saturating_mul(cols), rows, cols),
                format!("{} values", counts.len()),
            )),
        }
    }

    /// Number of rows (replicates).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (categories).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Counts of replicate `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= rows`.
    #[inline]
    pub fn row(&self, index: usize) -> &[u64] {
        assert!(index < self.rows, "row {} out of bounds ({} rows)", index, self.rows);
        &self.counts[index * self.cols..(index + 1) * self.cols]
    }

    /// Mutable counts of replicate `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= rows`.
    #[inline]
    pub fn row_mut(&mut self, index: usize) -> &mut [u64] {
        assert!(index < self.rows, "row {} out of bounds ({} rows)", index, self.rows);
        &mut self.counts[index * self.cols..(index + 1) * self.cols]
    }

    /// Iterates over replicates in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// All counts in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> Vec<u64> {
        self.iter_rows().map(|row| row.iter().sum()).collect()
    }

    /// Mean count of each category across replicates.
    ///
    /// Returns zeros when the matrix has no rows.
    pub fn column_means(&self) -> Vec<f64> {
        let mut means = vec![0.0; self.cols];
        if self.rows == 0 {
            return means;
        }
        for row in self.iter_rows() {
            for (mean, &count) in means.iter_mut().zip(row) {
                *mean += count as f64;
            }
        }
        let scale = 1.0 / self.rows as f64;
        for mean in means.iter_mut() {
            *mean *= scale;
        }
        means
    }

    /// Copies the counts out as nested `f64` rows for numeric interop.
    pub fn to_f64_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows()
            .map(|row| row.iter().map(|&c| c as f64).collect())
            .collect()
    }
}

/// Wire form of [`CountMatrix`], checked by [`CountMatrix::from_parts`]
/// before it becomes a matrix.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCountMatrix {
    counts: Vec<u64>,
    rows: usize,
    cols: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCountMatrix> for CountMatrix {
    type Error = SamplingError;

    fn try_from(raw: RawCountMatrix) -> Result<Self, Self::Error> {
        Self::from_parts(raw.counts, raw.rows, raw.cols)
    }
}
