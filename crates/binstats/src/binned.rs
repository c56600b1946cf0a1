//! Estimators over binned (weighted) samples.
//!
//! A [`BinnedSample`] pairs each bin value `x_i` with a count (or weight)
//! `c_i` and records the number of observations `N` behind the sample. All
//! estimators are closed-form large-sample formulas:
//!
//! | Estimator                         | Formula                          |
//! |-----------------------------------|----------------------------------|
//! | [`sample_mean`]                   | `m = Σ c_i x_i / N`              |
//! | [`sample_variance`]               | `s² = Σ c_i (x_i − m)² / (N − 1)`|
//! | [`std_estimated`]                 | `s = √s²`                        |
//! | [`error_sample_mean`]             | `s / √N`                         |
//! | [`fourth_central_moment`]         | `d4 = Σ c_i (x_i − m)⁴ / N`      |
//!
//! Errors on the variance and standard deviation depend on whether the
//! underlying variable is Gaussian; see [`ErrorModel`].
//!
//! [`sample_mean`]: BinnedSample::sample_mean
//! [`sample_variance`]: BinnedSample::sample_variance
//! [`std_estimated`]: BinnedSample::std_estimated
//! [`error_sample_mean`]: BinnedSample::error_sample_mean
//! [`fourth_central_moment`]: BinnedSample::fourth_central_moment

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BinnedSampleError {
    #[display("binned sample has no bins")]
    Empty,
    #[display("got {counts} counts but {bin_values} bin values")]
    LengthMismatch { counts: usize, bin_values: usize },
    #[display("count of bin {index} must be finite and non-negative, got {value}")]
    InvalidCount { index: usize, value: f64 },
    #[display("value of bin {index} must be finite, got {value}")]
    InvalidBinValue { index: usize, value: f64 },
    #[display("sample size must be finite and greater than 1, got {sample_size}")]
    SampleSizeTooSmall { sample_size: f64 },
}

/// Assumption on the distribution of the sampled variable.
///
/// Selects the formula used by [`BinnedSample::error_sample_variance`] and
/// [`BinnedSample::error_std_estimated`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorModel {
    /// Errors derived from the variance alone (`d4 = 3σ⁴`).
    #[display("gaussian")]
    Gaussian,
    /// Errors derived from the estimated fourth central moment.
    #[display("non-gaussian")]
    NonGaussian,
}

/// A histogram-like sample: bin values with their counts and the sample size.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedSample {
    counts: Vec<f64>,
    bin_values: Vec<f64>,
    sample_size: f64,
}

impl BinnedSample {
    /// Creates a binned sample with an explicit sample size `N`.
    ///
    /// # Arguments
    ///
    /// * `counts` - Count (or weight) of each bin, finite and non-negative
    /// * `bin_values` - Representative value of each bin, finite
    /// * `sample_size` - Number of observations `N`, must be greater than 1
    ///
    /// # Examples
    ///
    /// ```
    /// use binstats::binned::BinnedSample;
    ///
    /// let sample = BinnedSample::new(vec![1.0, 2.0, 1.0], vec![1.0, 2.0, 3.0], 4.0).unwrap();
    /// assert_eq!(sample.sample_mean(), 2.0);
    /// ```
    pub fn new(
        counts: Vec<f64>,
        bin_values: Vec<f64>,
        sample_size: f64,
    ) -> Result<Self, BinnedSampleError> {
        if counts.len() != bin_values.len() {
            return Err(BinnedSampleError::LengthMismatch {
                counts: counts.len(),
                bin_values: bin_values.len(),
            });
        }
        if counts.is_empty() {
            return Err(BinnedSampleError::Empty);
        }
        if let Some((index, &value)) = counts
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite() || **c < 0.0)
        {
            return Err(BinnedSampleError::InvalidCount { index, value });
        }
        if let Some((index, &value)) = bin_values
            .iter()
            .enumerate()
            .find(|(_, x)| !x.is_finite())
        {
            return Err(BinnedSampleError::InvalidBinValue { index, value });
        }
        // Also rejects NaN
        if !(sample_size.is_finite() && sample_size > 1.0) {
            return Err(BinnedSampleError::SampleSizeTooSmall { sample_size });
        }

        Ok(Self {
            counts,
            bin_values,
            sample_size,
        })
    }

    /// Creates a binned sample whose sample size is the sum of the counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use binstats::binned::BinnedSample;
    ///
    /// let sample = BinnedSample::from_counts(vec![3.0, 5.0], vec![0.0, 1.0]).unwrap();
    /// assert_eq!(sample.sample_size(), 8.0);
    /// ```
    pub fn from_counts(counts: Vec<f64>, bin_values: Vec<f64>) -> Result<Self, BinnedSampleError> {
        let sample_size: f64 = counts.iter().sum();
        Self::new(counts, bin_values, sample_size)
    }

    #[must_use]
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    #[must_use]
    pub fn bin_values(&self) -> &[f64] {
        &self.bin_values
    }

    #[must_use]
    pub fn sample_size(&self) -> f64 {
        self.sample_size
    }

    /// Returns an iterator of `(count, bin_value)` pairs.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.counts.iter().copied().zip(self.bin_values.iter().copied())
    }

    /// Sample mean `Σ c_i x_i / N`.
    #[must_use]
    pub fn sample_mean(&self) -> f64 {
        self.bins().map(|(c, x)| c * x).sum::<f64>() / self.sample_size
    }

    /// Sample variance `Σ c_i (x_i − m)² / (N − 1)`.
    #[must_use]
    pub fn sample_variance(&self) -> f64 {
        self.central_sum(2) / (self.sample_size - 1.0)
    }

    /// Estimated standard deviation, the square root of the sample variance.
    #[must_use]
    pub fn std_estimated(&self) -> f64 {
        self.sample_variance().sqrt()
    }

    /// Error on the sample mean, `s / √N`.
    #[must_use]
    pub fn error_sample_mean(&self) -> f64 {
        self.std_estimated() / self.sample_size.sqrt()
    }

    /// Fourth central moment estimate `Σ c_i (x_i − m)⁴ / N`.
    #[must_use]
    pub fn fourth_central_moment(&self) -> f64 {
        self.central_sum(4) / self.sample_size
    }

    /// Error on the sample variance.
    ///
    /// * [`ErrorModel::Gaussian`]: `s² √(2 / (N − 1))`
    /// * [`ErrorModel::NonGaussian`]: `√((d4 − s⁴) / (N − 1))`
    ///
    /// # Examples
    ///
    /// ```
    /// use binstats::binned::{BinnedSample, ErrorModel};
    ///
    /// let sample = BinnedSample::new(vec![1.0, 2.0, 1.0], vec![1.0, 2.0, 3.0], 4.0).unwrap();
    /// let gaussian = sample.error_sample_variance(ErrorModel::Gaussian);
    /// assert!((gaussian - 2.0 / 3.0 * (2.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn error_sample_variance(&self, model: ErrorModel) -> f64 {
        let n = self.sample_size;
        match model {
            ErrorModel::Gaussian => self.sample_variance() * (2.0 / (n - 1.0)).sqrt(),
            ErrorModel::NonGaussian => (self.fourth_moment_excess() / (n - 1.0)).sqrt(),
        }
    }

    /// Error on the estimated standard deviation.
    ///
    /// * [`ErrorModel::Gaussian`]: `s / √(2 (N − 1))`
    /// * [`ErrorModel::NonGaussian`]: `√((d4 − s⁴) / (4 (N − 1) s²))`, or `0`
    ///   when the variance is zero
    #[must_use]
    pub fn error_std_estimated(&self, model: ErrorModel) -> f64 {
        let n = self.sample_size;
        match model {
            ErrorModel::Gaussian => self.std_estimated() / (2.0 * (n - 1.0)).sqrt(),
            ErrorModel::NonGaussian => {
                let variance = self.sample_variance();
                if variance == 0.0 {
                    return 0.0;
                }
                (self.fourth_moment_excess() / (4.0 * (n - 1.0) * variance)).sqrt()
            }
        }
    }

    fn central_sum(&self, power: i32) -> f64 {
        let mean = self.sample_mean();
        self.bins().map(|(c, x)| c * (x - mean).powi(power)).sum()
    }

    // `d4 − s⁴`, clamped at zero. Small or two-point samples can make the
    // difference negative.
    fn fourth_moment_excess(&self) -> f64 {
        let d4 = self.fourth_central_moment();
        let s4 = self.sample_variance().powi(2);
        let excess = d4 - s4;
        if excess < 0.0 {
            tracing::debug!(d4, s4, "negative fourth moment excess clamped to zero");
            return 0.0;
        }
        excess
    }
}
