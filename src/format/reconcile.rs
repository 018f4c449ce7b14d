//! Sample-count reconciliation against the declared recording duration.
//!
//! The body may hold a little more data than the header duration implies
//! (spill-over written after the stop time) or a little less. Within a
//! tolerance window the first case is truncated and the second is kept with a
//! warning; anything outside the window is fatal.
//!
//! An exact match is classified separately. Historically it fell through to the
//! fatal branch, and [`ExactLengthPolicy::Reject`] keeps that behaviour as the
//! default until it is confirmed to be a defect. [`ExactLengthPolicy::Accept`]
//! opts into treating it as success.

use crate::error::FormatError;
use serde::{Deserialize, Serialize};

/// Default tolerance window, in seconds of samples.
pub const DEFAULT_TOLERANCE_SECS: u32 = 300;

/// What to do when the decoded count equals the expected count exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExactLengthPolicy {
    /// Treat an exact match as a fatal mismatch.
    #[default]
    Reject,
    /// Accept an exact match unchanged.
    Accept,
}

/// Outcome of a successful reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Decoded count matched the declared duration.
    Exact,
    /// Extra samples were discarded, keeping the first `kept`.
    Truncated {
        /// Samples retained.
        kept: usize,
        /// Samples discarded from the end.
        discarded: usize,
    },
    /// Fewer samples than declared; all were kept.
    ShortKept {
        /// Samples short of the declared count.
        missing: usize,
    },
}

/// Inputs to the reconciliation rule.
#[derive(Debug, Clone, Copy)]
pub struct LengthCheck {
    /// Samples implied by `duration * hz`.
    pub expected: i64,
    /// Sample rate in Hz.
    pub sample_rate_hz: u8,
    /// Width of the tolerance window in seconds.
    pub tolerance_secs: u32,
    /// Handling of an exact match.
    pub exact: ExactLengthPolicy,
}

impl LengthCheck {
    /// Tolerance window expressed in samples.
    pub fn threshold(&self) -> i64 {
        i64::from(self.tolerance_secs) * i64::from(self.sample_rate_hz)
    }

    /// Classify a decoded sample count.
    pub fn classify(&self, actual: usize) -> Result<Reconciliation, FormatError> {
        let threshold = self.threshold();
        let mismatch = FormatError::SampleCountMismatch {
            actual,
            expected: self.expected,
            tolerance: threshold,
        };
        if self.expected < 0 {
            return Err(mismatch);
        }

        let diff = i64::try_from(actual).map_err(|_| mismatch.clone())? - self.expected;
        match diff {
            0 => match self.exact {
                ExactLengthPolicy::Accept => Ok(Reconciliation::Exact),
                ExactLengthPolicy::Reject => Err(mismatch),
            },
            d if d > 0 && d < threshold => Ok(Reconciliation::Truncated {
                kept: self.expected as usize,
                discarded: d as usize,
            }),
            d if d < 0 && -d < threshold => Ok(Reconciliation::ShortKept {
                missing: (-d) as usize,
            }),
            _ => Err(mismatch),
        }
    }

    /// Classify and apply the outcome to `samples`.
    pub fn apply<T>(&self, mut samples: Vec<T>) -> Result<(Vec<T>, Reconciliation), FormatError> {
        let outcome = self.classify(samples.len())?;
        match outcome {
            Reconciliation::Truncated { kept, discarded } => {
                tracing::debug!(kept, discarded, "truncated spill-over samples");
                samples.truncate(kept);
            }
            Reconciliation::ShortKept { missing } => {
                tracing::warn!(
                    actual = samples.len(),
                    expected = self.expected,
                    missing,
                    "fewer samples than the declared duration implies, keeping all"
                );
            }
            Reconciliation::Exact => {}
        }
        Ok((samples, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(exact: ExactLengthPolicy) -> LengthCheck {
        LengthCheck {
            expected: 200,
            sample_rate_hz: 20,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
            exact,
        }
    }

    #[test]
    fn test_overcount_truncated() {
        let (samples, outcome) = check(ExactLengthPolicy::Reject).apply(vec![0u8; 205]).unwrap();
        assert_eq!(samples.len(), 200);
        assert_eq!(
            outcome,
            Reconciliation::Truncated {
                kept: 200,
                discarded: 5
            }
        );
    }

    #[test]
    fn test_undercount_kept() {
        let (samples, outcome) = check(ExactLengthPolicy::Reject).apply(vec![0u8; 196]).unwrap();
        assert_eq!(samples.len(), 196);
        assert_eq!(outcome, Reconciliation::ShortKept { missing: 4 });
    }

    #[test]
    fn test_outside_tolerance_fatal() {
        // threshold is 300 s * 20 Hz = 6000 samples, so 800 extra still truncates
        assert!(matches!(
            check(ExactLengthPolicy::Accept).classify(1000),
            Ok(Reconciliation::Truncated { kept: 200, discarded: 800 })
        ));
        assert_eq!(
            check(ExactLengthPolicy::Accept).classify(6200),
            Err(FormatError::SampleCountMismatch {
                actual: 6200,
                expected: 200,
                tolerance: 6000
            })
        );
    }

    #[test]
    fn test_fatal_with_tight_tolerance() {
        let tight = LengthCheck {
            tolerance_secs: 10,
            ..check(ExactLengthPolicy::Reject)
        };
        assert!(tight.classify(1000).is_err());
        assert!(tight.classify(205).is_ok());
    }

    #[test]
    fn test_exact_match_policy() {
        assert!(matches!(
            check(ExactLengthPolicy::Reject).classify(200),
            Err(FormatError::SampleCountMismatch { actual: 200, .. })
        ));
        assert_eq!(
            check(ExactLengthPolicy::Accept).classify(200),
            Ok(Reconciliation::Exact)
        );
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let c = check(ExactLengthPolicy::Reject);
        assert!(c.classify(200 + 6000).is_err());
        assert!(c.classify(200 + 5999).is_ok());
    }

    #[test]
    fn test_negative_duration_fatal() {
        let c = LengthCheck {
            expected: -40,
            ..check(ExactLengthPolicy::Accept)
        };
        assert!(c.classify(10).is_err());
    }
}
