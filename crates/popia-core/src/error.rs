//! # Error Types
//!
//! Defines the error type shared by the POPIA Checkup crates. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Parse errors carry the offending input verbatim.
//! - None of these errors is fatal to a session: callers degrade to a
//!   default value or a partial result and log the error.

use thiserror::Error;

/// Top-level error type for POPIA Checkup.
#[derive(Error, Debug)]
pub enum PopiaError {
    /// An answer literal could not be interpreted.
    #[error("invalid answer: {0:?} (expected yes, no, or unanswered)")]
    InvalidAnswer(String),

    /// A category name did not match any known category.
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    /// A digest string was not `sha256:` followed by 64 hex digits.
    #[error("invalid digest: {0:?} (expected sha256:<64 hex digits>)")]
    InvalidDigest(String),

    /// A timestamp could not be parsed or violated the UTC-only rule.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_answer_message_quotes_input() {
        let err = PopiaError::InvalidAnswer("maybe".into());
        assert_eq!(
            err.to_string(),
            "invalid answer: \"maybe\" (expected yes, no, or unanswered)"
        );
    }

    #[test]
    fn test_unknown_category_message() {
        let err = PopiaError::UnknownCategory("marketing".into());
        assert_eq!(err.to_string(), "unknown category: \"marketing\"");
    }
}
