//! Error types for the moderation engine crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModerationError>;

/// Errors produced across the rule-compilation and matching pipeline.
///
/// The taxonomy splits into three tiers:
/// - rule-validation errors (`EmptyPattern`, `InvalidRiskWeight`,
///   `InvalidTimeWindow`) are reported per rule and never abort
///   preprocessing of the remaining rules,
/// - `BuildError` is fatal to a rule-set update; the previously
///   published automaton generation stays active,
/// - per-event errors (`InvalidTextEncoding`, `EventTooLarge`) are
///   recorded in that event's result and never abort a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModerationError {
    #[error("empty pattern after normalization")]
    EmptyPattern,

    #[error("invalid risk weight: {0}")]
    InvalidRiskWeight(String),

    #[error("invalid time window: active_from {from} is after active_until {until}")]
    InvalidTimeWindow { from: i64, until: i64 },

    #[error("automaton build error: {0}")]
    BuildError(String),

    #[error("invalid text encoding: {0}")]
    InvalidTextEncoding(String),

    #[error("event text too large: {len} characters exceeds limit {limit}")]
    EventTooLarge { len: usize, limit: usize },

    #[error("rule parsing error: {0}")]
    ParseError(String),

    #[error("batch deadline exceeded")]
    DeadlineExceeded,
}

/// A preprocessing failure for a single rule, keyed by the rule's
/// position in the input list.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("rule {index}: {error}")]
pub struct RuleError {
    /// Index of the offending record in the caller's rule list.
    pub index: usize,
    /// The validation failure.
    pub error: ModerationError,
}

impl RuleError {
    pub fn new(index: usize, error: ModerationError) -> Self {
        Self { index, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_empty_pattern_display() {
        let error = ModerationError::EmptyPattern;
        assert_eq!(error.to_string(), "empty pattern after normalization");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_invalid_risk_weight_display() {
        let error = ModerationError::InvalidRiskWeight("-1.5".to_string());
        assert_eq!(error.to_string(), "invalid risk weight: -1.5");
    }

    #[test]
    fn test_invalid_time_window_display() {
        let error = ModerationError::InvalidTimeWindow {
            from: 200,
            until: 100,
        };
        assert_eq!(
            error.to_string(),
            "invalid time window: active_from 200 is after active_until 100"
        );
    }

    #[test]
    fn test_build_error_display() {
        let error = ModerationError::BuildError("no usable rules".to_string());
        assert_eq!(error.to_string(), "automaton build error: no usable rules");
    }

    #[test]
    fn test_event_too_large_display() {
        let error = ModerationError::EventTooLarge {
            len: 2_000_000,
            limit: 1_048_576,
        };
        assert_eq!(
            error.to_string(),
            "event text too large: 2000000 characters exceeds limit 1048576"
        );
    }

    #[test]
    fn test_rule_error_display() {
        let error = RuleError::new(3, ModerationError::EmptyPattern);
        assert_eq!(
            error.to_string(),
            "rule 3: empty pattern after normalization"
        );
    }

    #[test]
    fn test_error_equality() {
        let error1 = ModerationError::BuildError("test".to_string());
        let error2 = ModerationError::BuildError("test".to_string());
        let error3 = ModerationError::BuildError("different".to_string());

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_clone() {
        let error = ModerationError::EventTooLarge { len: 10, limit: 5 };
        let cloned = error.clone();
        assert_eq!(error, cloned);
    }

    #[test]
    fn test_result_type_alias() {
        fn test_function() -> Result<i32> {
            Ok(42)
        }

        assert_eq!(test_function().unwrap(), 42);
    }
}
