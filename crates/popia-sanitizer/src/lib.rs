//! # popia-sanitizer: Marketing List Sanitizer
//!
//! Classifies an uploaded contact list by consent and scores the list as a
//! whole.
//!
//! ## Pipeline
//!
//! 1. **Parse** (`parse.rs`): header-keyed CSV records. Malformed rows are
//!    skipped individually and never abort the batch; empty rows are
//!    skipped and not counted.
//! 2. **Resolve** (`fields.rs`): columns are looked up through
//!    case-insensitive alias lists. Missing name/email stay absent and only
//!    display as the sentinels "Unknown"/"No Email".
//! 3. **Classify** (`classify.rs`): every record is either consented or
//!    flagged under exactly one [`SanitizerPolicy`].
//!
//! ## Policies
//!
//! Two incompatible policy pairs exist and are never blended:
//!
//! | Policy | Consent rule | Score |
//! |--------|--------------|-------|
//! | [`SanitizerPolicy::Standard`] | `Consent`/`OptIn` ∈ {yes, true, 1} | `round(consented / rows × 100)` |
//! | [`SanitizerPolicy::Strict`]   | `Consent_Date` and `Source` both non-empty | `max(0, 100 − 10 × flagged)` |
//!
//! An empty list scores 0 under both.

pub mod classify;
pub mod fields;
pub mod parse;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use classify::{classify, CsvResult, FlagReason, FlaggedContact, SanitizerPolicy};
pub use fields::{Contact, ContactRecord, NO_EMAIL, UNKNOWN_NAME};
pub use parse::{parse_contacts, ParseReport, ParsedContacts};

/// Errors raised by the sanitizer's configuration surface.
///
/// Classification itself is infallible: bad input degrades to skipped rows
/// or flagged contacts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizerError {
    /// A policy name could not be parsed.
    #[error("unknown sanitizer policy: {0:?} (expected standard or strict)")]
    UnknownPolicy(String),
}

/// Parse and classify a contact list in one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizerOutcome {
    /// How many rows were parsed or skipped.
    pub report: ParseReport,
    /// Classification of the parsed rows.
    pub result: CsvResult,
}

/// Parse `input` as CSV and classify it under `policy`.
pub fn sanitize(input: &[u8], policy: SanitizerPolicy) -> SanitizerOutcome {
    let parsed = parse_contacts(input);
    let result = classify(&parsed.records, policy);
    tracing::info!(
        policy = %policy,
        rows = result.total_rows,
        flagged = result.flagged.len(),
        compliance_percent = result.compliance_percent,
        "sanitized contact list"
    );
    SanitizerOutcome {
        report: parsed.report,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_standard_end_to_end() {
        let csv = b"Name,Email,Consent\nAlice,alice@example.com,yes\nBob,bob@example.com,no\n";
        let outcome = sanitize(csv, SanitizerPolicy::Standard);
        assert_eq!(outcome.report.parsed, 2);
        assert_eq!(outcome.result.compliance_percent, 50);
        assert_eq!(outcome.result.flagged.len(), 1);
        assert_eq!(outcome.result.flagged[0].contact.display_name(), "Bob");
    }

    #[test]
    fn test_sanitize_empty_input() {
        let outcome = sanitize(b"", SanitizerPolicy::Standard);
        assert_eq!(outcome.result.total_rows, 0);
        assert_eq!(outcome.result.compliance_percent, 0);
        assert!(outcome.result.flagged.is_empty());
    }
}
