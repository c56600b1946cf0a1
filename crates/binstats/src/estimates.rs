//! Summary of every estimator of a binned sample.
//!
//! [`BinnedEstimates`] evaluates each estimator of a
//! [`BinnedSample`](crate::binned::BinnedSample) once and keeps the results
//! in plain fields, so they can be serialized or compared across samples.

use serde::{Deserialize, Serialize};

use crate::binned::{BinnedSample, ErrorModel};

/// Every estimator of a [`BinnedSample`], evaluated once.
///
/// # Examples
///
/// ```
/// use binstats::{binned::{BinnedSample, ErrorModel}, estimates::BinnedEstimates};
///
/// let sample = BinnedSample::new(vec![1.0, 2.0, 1.0], vec![1.0, 2.0, 3.0], 4.0).unwrap();
/// let estimates = BinnedEstimates::from_sample(&sample);
///
/// assert_eq!(estimates.mean, 2.0);
/// assert!((estimates.error_of_std(ErrorModel::NonGaussian) - 1.0 / 12.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinnedEstimates {
    /// Number of observations `N` behind the sample.
    pub sample_size: f64,
    pub mean: f64,
    pub variance: f64,
    /// Estimated standard deviation.
    pub std: f64,
    /// Error on the mean.
    pub mean_error: f64,
    /// Fourth central moment.
    pub fourth_central_moment: f64,
    pub variance_error_gaussian: f64,
    pub variance_error_non_gaussian: f64,
    pub std_error_gaussian: f64,
    pub std_error_non_gaussian: f64,
}

impl BinnedEstimates {
    #[must_use]
    pub fn from_sample(sample: &BinnedSample) -> Self {
        Self {
            sample_size: sample.sample_size(),
            mean: sample.sample_mean(),
            variance: sample.sample_variance(),
            std: sample.std_estimated(),
            mean_error: sample.error_sample_mean(),
            fourth_central_moment: sample.fourth_central_moment(),
            variance_error_gaussian: sample.error_sample_variance(ErrorModel::Gaussian),
            variance_error_non_gaussian: sample.error_sample_variance(ErrorModel::NonGaussian),
            std_error_gaussian: sample.error_std_estimated(ErrorModel::Gaussian),
            std_error_non_gaussian: sample.error_std_estimated(ErrorModel::NonGaussian),
        }
    }

    /// Returns the variance error under `model`.
    #[must_use]
    pub fn error_of_variance(&self, model: ErrorModel) -> f64 {
        match model {
            ErrorModel::Gaussian => self.variance_error_gaussian,
            ErrorModel::NonGaussian => self.variance_error_non_gaussian,
        }
    }

    /// Returns the standard deviation error under `model`.
    #[must_use]
    pub fn error_of_std(&self, model: ErrorModel) -> f64 {
        match model {
            ErrorModel::Gaussian => self.std_error_gaussian,
            ErrorModel::NonGaussian => self.std_error_non_gaussian,
        }
    }
}

impl From<&BinnedSample> for BinnedEstimates {
    fn from(sample: &BinnedSample) -> Self {
        Self::from_sample(sample)
    }
}
