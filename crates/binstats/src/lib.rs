//! Estimators over binned data and a bounded bisection search.
//!
//! This crate provides:
//!
//! - **Bisection search**: Locate the interval of an ascending sequence that brackets a value
//! - **Binned estimators**: Sample mean, variance, standard deviation, fourth central moment,
//!   and their errors under Gaussian and non-Gaussian assumptions
//! - **Estimate bundles**: Every estimator of a sample evaluated at once, serializable
//! - **Histograms**: Fixed-edge frequency counts that feed the estimators
//!
//! # Modules
//!
//! - [`search`]: Bounded bisection search and its out-of-range policy
//! - [`binned`]: Binned samples and closed-form estimators
//! - [`estimates`]: All estimators of a binned sample in one serializable value
//! - [`histogram`]: Bin edges and histograms built on top of [`search`]
//!
//! # Examples
//!
//! ## Locating a value
//!
//! ```
//! use binstats::search::bisect;
//!
//! let sequence = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(bisect(2.5, &sequence).unwrap(), 2);
//! ```
//!
//! ## Estimating from binned data
//!
//! ```
//! use binstats::binned::{BinnedSample, ErrorModel};
//!
//! let sample = BinnedSample::new(vec![1.0, 2.0, 1.0], vec![1.0, 2.0, 3.0], 4.0).unwrap();
//! assert_eq!(sample.sample_mean(), 2.0);
//! assert!((sample.error_std_estimated(ErrorModel::Gaussian) - 1.0 / 3.0).abs() < 1e-12);
//! ```
//!
//! ## From raw values to estimates
//!
//! ```
//! use binstats::{
//!     estimates::BinnedEstimates,
//!     histogram::{BinEdges, Histogram},
//! };
//!
//! let edges = BinEdges::uniform(0.0, 10.0, 10).unwrap();
//! let histogram = Histogram::from_values(edges, [1.2, 3.4, 3.9, 5.5, 7.1, 8.8]);
//! let estimates = BinnedEstimates::from_sample(&histogram.to_binned_sample().unwrap());
//! assert_eq!(estimates.sample_size, 6.0);
//! ```

pub mod binned;
pub mod estimates;
pub mod histogram;
pub mod search;

#[cfg(test)]
mod test_log;
