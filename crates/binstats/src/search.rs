//! Bounded bisection search over ascending sequences.
//!
//! The search locates the interval of an ascending sequence that brackets a
//! query value, returning the index of its left boundary. Intervals are
//! closed on the right: index `i` owns `(S[i], S[i + 1]]`, and index `0`
//! additionally owns `S[0]`.
//!
//! Queries outside `[S[0], S[len - 1]]` are handled according to
//! [`OutOfRangePolicy`]: clamped to the first or last interval by default, or
//! rejected with [`SearchError::QueryOutOfRange`].
//!
//! # Examples
//!
//! ```
//! use binstats::search::bisect;
//!
//! let edges = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(bisect(2.5, &edges).unwrap(), 2);
//! assert_eq!(bisect(-1.0, &edges).unwrap(), 0);
//! assert_eq!(bisect(9.0, &edges).unwrap(), 4);
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SearchError {
    #[display("bisection requires at least 2 elements, got {len}")]
    SequenceTooShort { len: usize },
    #[display("cannot locate NaN query")]
    NanQuery,
    #[display("query {query} is outside of [{low}, {high}]")]
    QueryOutOfRange { query: f64, low: f64, high: f64 },
}

/// How queries outside the range covered by the sequence are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Clamp to the first (`0`) or last (`len - 2`) interval.
    #[default]
    Clamp,
    /// Fail with [`SearchError::QueryOutOfRange`].
    Reject,
}

/// Configuration of a [`BisectionSearch`].
///
/// # Examples
///
/// ```
/// use binstats::search::{OutOfRangePolicy, SearchConfig};
///
/// let config: SearchConfig = serde_json::from_str(r#"{"out_of_range": "reject"}"#).unwrap();
/// assert_eq!(config.out_of_range, OutOfRangePolicy::Reject);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub out_of_range: OutOfRangePolicy,
}

/// Where a query lies relative to the range covered by the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum QueryPosition {
    /// `query < S[0]`
    Below,
    /// `S[0] <= query <= S[len - 1]`
    Within,
    /// `query > S[len - 1]`
    Above,
}

/// Result of a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Left boundary of the bracketing interval, in `[0, len - 2]`.
    pub index: usize,
    /// Number of bracket updates performed.
    pub iterations: u32,
    /// Position of the query relative to the sequence range.
    pub position: QueryPosition,
}

/// Bisection search with a configurable out-of-range policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BisectionSearch {
    config: SearchConfig,
}

impl BisectionSearch {
    #[must_use]
    pub const fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Locates the interval of `sequence` that brackets `query`.
    ///
    /// # Arguments
    ///
    /// * `query` - The value to locate
    /// * `sequence` - Values sorted in ascending order (duplicates allowed)
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sequence` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use binstats::search::{BisectionSearch, QueryPosition};
    ///
    /// let search = BisectionSearch::default();
    /// let outcome = search.locate(100.0, &[0.0, 1.0, 2.0]).unwrap();
    /// assert_eq!(outcome.index, 1);
    /// assert_eq!(outcome.position, QueryPosition::Above);
    /// ```
    pub fn locate(&self, query: f64, sequence: &[f64]) -> Result<SearchOutcome, SearchError> {
        let len = sequence.len();
        if len < 2 {
            return Err(SearchError::SequenceTooShort { len });
        }
        if query.is_nan() {
            return Err(SearchError::NanQuery);
        }
        debug_assert!(
            sequence.is_sorted_by(|a, b| a <= b),
            "sequence must be sorted in ascending order"
        );

        let low = sequence[0];
        let high = sequence[len - 1];
        let position = if query < low {
            QueryPosition::Below
        } else if query > high {
            QueryPosition::Above
        } else {
            QueryPosition::Within
        };

        if !position.is_within() {
            match self.config.out_of_range {
                OutOfRangePolicy::Reject => {
                    return Err(SearchError::QueryOutOfRange { query, low, high });
                }
                OutOfRangePolicy::Clamp => {
                    tracing::debug!(query, low, high, ?position, "clamping out-of-range query");
                }
            }
        }

        // A repeated maximum would pull the bracket below `len - 1`
        let (index, iterations) = if query >= high {
            (len - 2, 0)
        } else {
            bracket_left(query, sequence)
        };
        tracing::trace!(query, index, iterations, "bisection finished");

        Ok(SearchOutcome {
            index,
            iterations,
            position,
        })
    }

    /// Returns only the left boundary index found by [`Self::locate`].
    pub fn index_of(&self, query: f64, sequence: &[f64]) -> Result<usize, SearchError> {
        self.locate(query, sequence).map(|outcome| outcome.index)
    }
}

/// Locates `query` in `sequence` with the default (clamping) search.
///
/// Returns the index `i` such that `S[i] < query <= S[i + 1]`, `0` for
/// queries at or below `S[0]`, and `len - 2` for queries at or above
/// `S[len - 1]`.
///
/// # Examples
///
/// ```
/// use binstats::search::bisect;
///
/// assert_eq!(bisect(5.0, &[0.0, 10.0]).unwrap(), 0);
/// assert_eq!(bisect(-5.0, &[0.0, 1.0, 2.0]).unwrap(), 0);
/// assert_eq!(bisect(100.0, &[0.0, 1.0, 2.0]).unwrap(), 1);
/// assert!(bisect(1.0, &[0.0]).is_err());
/// ```
pub fn bisect(query: f64, sequence: &[f64]) -> Result<usize, SearchError> {
    BisectionSearch::default().index_of(query, sequence)
}

// Invariant: `left < right`, `left == 0 || S[left] < query`, and
// `right == len - 1 || query <= S[right]`.
fn bracket_left(query: f64, sequence: &[f64]) -> (usize, u32) {
    let mut index_left = 0;
    let mut index_right = sequence.len() - 1;
    let mut iterations = 0;

    while index_left + 1 < index_right {
        let index_mid = usize::midpoint(index_left, index_right);
        if query > sequence[index_mid] {
            index_left = index_mid;
        } else {
            index_right = index_mid;
        }
        iterations += 1;
    }

    (index_left, iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_log::capture_debug;

    fn rejecting() -> BisectionSearch {
        BisectionSearch::new(SearchConfig {
            out_of_range: OutOfRangePolicy::Reject,
        })
    }

    #[test]
    fn test_midpoint_of_unit_steps() {
        let seq = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(bisect(2.5, &seq), Ok(2));
    }

    #[test]
    fn test_two_elements() {
        let seq = [0.0, 10.0];
        assert_eq!(bisect(5.0, &seq), Ok(0));
        assert_eq!(bisect(-5.0, &seq), Ok(0));
        assert_eq!(bisect(0.0, &seq), Ok(0));
        assert_eq!(bisect(10.0, &seq), Ok(0));
        assert_eq!(bisect(50.0, &seq), Ok(0));

        let outcome = BisectionSearch::default().locate(5.0, &seq).unwrap();
        assert_eq!(outcome.iterations, 0);
    }

    #[test]
    fn test_clamps_below_and_above() {
        let seq = [0.0, 1.0, 2.0];
        assert_eq!(bisect(-5.0, &seq), Ok(0));
        assert_eq!(bisect(100.0, &seq), Ok(1));
        assert_eq!(bisect(f64::NEG_INFINITY, &seq), Ok(0));
        assert_eq!(bisect(f64::INFINITY, &seq), Ok(1));
    }

    #[test]
    fn test_exact_match_belongs_to_left_interval() {
        let seq = [1.2, 1.7, 1.9, 2.8];
        assert_eq!(bisect(0.5, &seq), Ok(0));
        assert_eq!(bisect(1.2, &seq), Ok(0));
        assert_eq!(bisect(1.5, &seq), Ok(0));
        assert_eq!(bisect(1.7, &seq), Ok(0));
        assert_eq!(bisect(1.71, &seq), Ok(1));
        assert_eq!(bisect(2.8, &seq), Ok(2));
        assert_eq!(bisect(3.5, &seq), Ok(2));
    }

    #[test]
    fn test_duplicates() {
        let seq = [0.0, 1.0, 1.0, 1.0, 2.0];
        assert_eq!(bisect(1.0, &seq), Ok(0));
        assert_eq!(bisect(1.5, &seq), Ok(3));
        assert_eq!(bisect(0.5, &seq), Ok(0));
    }

    #[test]
    fn test_repeated_maximum() {
        assert_eq!(bisect(1.0, &[0.0, 1.0, 1.0]), Ok(1));
        assert_eq!(bisect(2.0, &[0.0, 1.0, 2.0, 2.0, 2.0]), Ok(3));
        assert_eq!(bisect(1.5, &[0.0, 1.0, 2.0, 2.0, 2.0]), Ok(1));
        assert_eq!(bisect(3.0, &[0.0, 1.0, 2.0, 2.0, 2.0]), Ok(3));

        let outcome = BisectionSearch::default()
            .locate(2.0, &[0.0, 1.0, 2.0, 2.0, 2.0])
            .unwrap();
        assert_eq!(outcome.iterations, 0);
        assert!(outcome.position.is_within());
    }

    #[test]
    fn test_clamp_logs_position() {
        let seq = [0.0, 1.0, 2.0];
        let (index, logs) = capture_debug(|| bisect(-5.0, &seq));
        assert_eq!(index, Ok(0));
        assert!(logs.contains("clamping out-of-range query"), "{logs}");
        assert!(logs.contains("Below"), "{logs}");

        let (index, logs) = capture_debug(|| bisect(1.5, &seq));
        assert_eq!(index, Ok(1));
        assert!(!logs.contains("clamping"), "{logs}");
    }

    #[test]
    fn test_too_short() {
        assert_eq!(bisect(1.0, &[]), Err(SearchError::SequenceTooShort { len: 0 }));
        assert_eq!(
            bisect(1.0, &[1.0]),
            Err(SearchError::SequenceTooShort { len: 1 })
        );
    }

    #[test]
    fn test_nan_query() {
        assert_eq!(bisect(f64::NAN, &[0.0, 1.0]), Err(SearchError::NanQuery));
    }

    #[test]
    fn test_reject_policy() {
        let seq = [0.0, 1.0, 2.0];
        let search = rejecting();
        assert_eq!(
            search.index_of(-0.5, &seq),
            Err(SearchError::QueryOutOfRange {
                query: -0.5,
                low: 0.0,
                high: 2.0
            })
        );
        assert!(search.index_of(2.5, &seq).is_err());
        // Endpoints are in range
        assert_eq!(search.index_of(0.0, &seq), Ok(0));
        assert_eq!(search.index_of(2.0, &seq), Ok(1));
    }

    #[test]
    fn test_position_reported() {
        let seq = [0.0, 1.0, 2.0];
        let search = BisectionSearch::default();
        assert!(search.locate(-1.0, &seq).unwrap().position.is_below());
        assert!(search.locate(1.0, &seq).unwrap().position.is_within());
        assert!(search.locate(2.0, &seq).unwrap().position.is_within());
        assert!(search.locate(3.0, &seq).unwrap().position.is_above());
    }

    #[test]
    #[expect(clippy::cast_precision_loss)]
    fn test_iterations_bounded_by_log2() {
        for len in 2..200_usize {
            let seq = (0..len).map(|i| i as f64).collect::<Vec<_>>();
            let bound = usize::BITS - (len - 1).leading_zeros();
            for q in [-1.0, 0.0, 0.5, (len / 2) as f64 + 0.25, len as f64] {
                let outcome = BisectionSearch::default().locate(q, &seq).unwrap();
                assert!(
                    outcome.iterations <= bound,
                    "len {len}, query {q}: {} iterations > {bound}",
                    outcome.iterations
                );
            }
        }
    }

    #[test]
    fn test_config_deserialization() {
        let config: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.out_of_range, OutOfRangePolicy::Clamp);

        let config: SearchConfig =
            serde_json::from_str(r#"{"out_of_range": "clamp"}"#).unwrap();
        assert_eq!(config, SearchConfig::default());

        let config: SearchConfig =
            serde_json::from_str(r#"{"out_of_range": "reject"}"#).unwrap();
        assert_eq!(BisectionSearch::new(config).config().out_of_range, OutOfRangePolicy::Reject);

        assert!(serde_json::from_str::<SearchConfig>(r#"{"out_of_range": "wrap"}"#).is_err());
    }
}

/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for ascending sequences, possibly with repeated values
    fn sorted_strategy() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(-1000i32..1000, 2..=128).prop_map(|v| {
            let mut seq = v.into_iter().map(f64::from).collect::<Vec<_>>();
            seq.sort_by(f64::total_cmp);
            seq
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// The returned interval brackets every in-range query
        #[test]
        fn prop_result_brackets_query(seq in sorted_strategy(), q in -1000.0f64..1000.0) {
            let idx = bisect(q, &seq).unwrap();
            prop_assert!(idx <= seq.len() - 2);
            if q >= seq[0] && q < seq[seq.len() - 1] {
                prop_assert!(idx == 0 || seq[idx] < q, "S[{}] = {} >= {}", idx, seq[idx], q);
                prop_assert!(q <= seq[idx + 1], "{} > S[{}] = {}", q, idx + 1, seq[idx + 1]);
            }
        }

        /// Queries in the interior of an interval find that interval
        #[test]
        fn prop_distinct_intervals(len in 2u32..100, i in 0usize..98, frac in 0.01f64..0.99) {
            let seq = (0..len).map(f64::from).collect::<Vec<_>>();
            let i = i % (seq.len() - 1);
            let q = seq[i] + frac;
            prop_assert_eq!(bisect(q, &seq), Ok(i));
            prop_assert_eq!(bisect(q, &seq), bisect(q, &seq));
        }

        #[test]
        fn prop_below_first_is_zero(seq in sorted_strategy(), offset in 0.001f64..1e6) {
            prop_assert_eq!(bisect(seq[0] - offset, &seq), Ok(0));
        }

        #[test]
        fn prop_at_or_above_last_is_len_minus_two(seq in sorted_strategy(), offset in 0.0f64..1e6) {
            let last = seq[seq.len() - 1];
            prop_assert_eq!(bisect(last, &seq), Ok(seq.len() - 2));
            prop_assert_eq!(bisect(last + offset, &seq), Ok(seq.len() - 2));
        }

        #[test]
        fn prop_monotonic(seq in sorted_strategy(), a in -1500.0f64..1500.0, b in -1500.0f64..1500.0) {
            let (q1, q2) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(bisect(q1, &seq).unwrap() <= bisect(q2, &seq).unwrap());
        }
    }
}
