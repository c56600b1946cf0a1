use crate::{
    binned::{BinnedSample, BinnedSampleError},
    search::{BisectionSearch, OutOfRangePolicy, SearchConfig},
};

const EDGE_SEARCH: BisectionSearch = BisectionSearch::new(SearchConfig {
    out_of_range: OutOfRangePolicy::Reject,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BinEdgesError {
    #[display("at least 2 bin edges are required, got {len}")]
    TooFewEdges { len: usize },
    #[display("bin edge {index} is not finite")]
    NonFinite { index: usize },
    #[display("bin edge {index} is not greater than the previous edge")]
    NotAscending { index: usize },
    #[display("number of bins must be positive")]
    InvalidBinCount,
}

/// Strictly ascending bin boundaries.
///
/// Bin `i` covers `(edges[i], edges[i + 1]]`. The first bin also includes its
/// lower edge, so the bins together cover `[edges[0], edges[last]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// Validates and wraps a list of edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use binstats::histogram::BinEdges;
    ///
    /// let edges = BinEdges::new(vec![0.0, 1.0, 5.0]).unwrap();
    /// assert_eq!(edges.num_bins(), 2);
    /// assert!(BinEdges::new(vec![0.0, 0.0]).is_err());
    /// ```
    pub fn new(edges: Vec<f64>) -> Result<Self, BinEdgesError> {
        if edges.len() < 2 {
            return Err(BinEdgesError::TooFewEdges { len: edges.len() });
        }
        if let Some(index) = edges.iter().position(|e| !e.is_finite()) {
            return Err(BinEdgesError::NonFinite { index });
        }
        if let Some(index) = edges.windows(2).position(|w| w[0] >= w[1]) {
            return Err(BinEdgesError::NotAscending { index: index + 1 });
        }
        Ok(Self { edges })
    }

    /// Creates `num_bins` equal-width bins spanning `[low, high]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use binstats::histogram::BinEdges;
    ///
    /// let edges = BinEdges::uniform(0.0, 10.0, 5).unwrap();
    /// assert_eq!(edges.as_slice(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn uniform(low: f64, high: f64, num_bins: usize) -> Result<Self, BinEdgesError> {
        if num_bins == 0 {
            return Err(BinEdgesError::InvalidBinCount);
        }
        let width = high - low;
        let n = num_bins as f64;
        let edges = (0..=num_bins)
            .map(|i| {
                let i_f = i as f64;
                // Pin the outer edges to avoid accumulated rounding
                if i == 0 {
                    low
                } else if i == num_bins {
                    high
                } else if width.is_finite() {
                    low + width * i_f / n
                } else {
                    // `high - low` overflowed; interpolate without forming the width
                    let t = i_f / n;
                    low * (1.0 - t) + high * t
                }
            })
            .collect();
        Self::new(edges)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.edges
    }

    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.edges.len() - 1
    }

    #[must_use]
    pub fn low(&self) -> f64 {
        self.edges[0]
    }

    #[must_use]
    pub fn high(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Midpoints of the bins.
    pub fn centers(&self) -> impl Iterator<Item = f64> + '_ {
        self.edges.windows(2).map(|w| f64::midpoint(w[0], w[1]))
    }

    /// Returns the bin containing `value`.
    ///
    /// Returns `None` for NaN and for values outside `[low, high]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use binstats::histogram::BinEdges;
    ///
    /// let edges = BinEdges::uniform(0.0, 3.0, 3).unwrap();
    /// assert_eq!(edges.bin_of(0.0), Some(0));
    /// assert_eq!(edges.bin_of(1.0), Some(0));
    /// assert_eq!(edges.bin_of(1.5), Some(1));
    /// assert_eq!(edges.bin_of(3.5), None);
    /// ```
    #[must_use]
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        EDGE_SEARCH.index_of(value, &self.edges).ok()
    }
}

/// A single bin of a [`Histogram`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub low: f64,
    pub high: f64,
    /// The number of values that fell within this bin.
    pub count: u64,
}

/// Frequency counts of values over fixed bin edges.
///
/// Values below the first edge or above the last edge are counted separately
/// as underflow and overflow. NaN values are counted as skipped.
///
/// # Examples
///
/// ```
/// use binstats::histogram::{BinEdges, Histogram};
///
/// let edges = BinEdges::uniform(0.0, 4.0, 4).unwrap();
/// let histogram = Histogram::from_values(edges, [0.5, 1.5, 1.7, 3.2, 9.0]);
///
/// assert_eq!(histogram.counts(), &[1, 2, 0, 1]);
/// assert_eq!(histogram.overflow(), 1);
///
/// let sample = histogram.to_binned_sample().unwrap();
/// assert_eq!(sample.bin_values(), &[0.5, 1.5, 2.5, 3.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: BinEdges,
    counts: Vec<u64>,
    underflow: u64,
    overflow: u64,
    skipped: u64,
}

impl Histogram {
    #[must_use]
    pub fn new(edges: BinEdges) -> Self {
        let counts = vec![0; edges.num_bins()];
        Self {
            edges,
            counts,
            underflow: 0,
            overflow: 0,
            skipped: 0,
        }
    }

    /// Creates a histogram and fills it with `values`.
    #[must_use]
    pub fn from_values<I>(edges: BinEdges, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut histogram = Self::new(edges);
        histogram.extend(values);
        histogram
    }

    /// Counts a single value and returns the bin it was assigned to.
    pub fn fill(&mut self, value: f64) -> Option<usize> {
        if let Some(idx) = self.edges.bin_of(value) {
            self.counts[idx] += 1;
            return Some(idx);
        }
        if value.is_nan() {
            self.skipped += 1;
        } else if value < self.edges.low() {
            self.underflow += 1;
        } else {
            self.overflow += 1;
        }
        None
    }

    #[must_use]
    pub fn edges(&self) -> &BinEdges {
        &self.edges
    }

    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    #[must_use]
    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    #[must_use]
    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// Number of NaN values passed to [`Self::fill`].
    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Number of values counted in a bin.
    #[must_use]
    pub fn in_range_total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn bins(&self) -> impl Iterator<Item = HistogramBin> + '_ {
        self.edges
            .as_slice()
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &count)| HistogramBin {
                low: w[0],
                high: w[1],
                count,
            })
    }

    /// Converts the in-range counts into a [`BinnedSample`] over the bin centers.
    ///
    /// The sample size is [`Self::in_range_total`]; underflow, overflow and
    /// skipped values are not part of the sample.
    #[expect(clippy::cast_precision_loss)]
    pub fn to_binned_sample(&self) -> Result<BinnedSample, BinnedSampleError> {
        let counts = self.counts.iter().map(|&c| c as f64).collect();
        let centers = self.edges.centers().collect();
        BinnedSample::new(counts, centers, self.in_range_total() as f64)
    }
}

impl Extend<f64> for Histogram {
    fn extend<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = f64>,
    {
        for value in values {
            self.fill(value);
        }
    }
}
