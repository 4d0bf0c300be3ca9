//! # Consent Classification
//!
//! Classifies each [`ContactRecord`] as consented or flagged, then scores
//! the list. The consent rule and the scoring rule are chosen together
//! through [`SanitizerPolicy`]; the two policies are mutually exclusive.
//!
//! ## Standard policy
//!
//! The consent value is resolved through [`CONSENT_ALIASES`]. A row is
//! consented iff that value, lower-cased, is `yes`, `true` or `1`. The list
//! score is the consented share of all parsed rows.
//!
//! ## Strict policy
//!
//! A row is consented iff both a consent date and a consent source are
//! present and non-empty. Each flagged row costs [`PENALTY_PER_FLAG`]
//! points off 100, floored at 0.
//!
//! Under both policies an empty list scores 0.

use std::str::FromStr;

use popia_core::rounded_percent;
use serde::{Deserialize, Serialize};

use crate::fields::{
    Contact, ContactRecord, CONSENT_ALIASES, CONSENT_DATE_ALIASES, SOURCE_ALIASES,
};
use crate::SanitizerError;

/// Points deducted per flagged contact under the strict policy.
pub const PENALTY_PER_FLAG: u64 = 10;

/// Consent values that count as an opt-in under the standard policy.
pub const AFFIRMATIVE_VALUES: &[&str] = &["yes", "true", "1"];

/// Which consent rule and scoring rule to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SanitizerPolicy {
    /// Boolean consent flag, ratio score.
    #[default]
    Standard,
    /// Consent date plus source, penalty score.
    Strict,
}

impl SanitizerPolicy {
    /// Returns the snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Strict => "strict",
        }
    }
}

impl std::fmt::Display for SanitizerPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SanitizerPolicy {
    type Err = SanitizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "strict" => Ok(Self::Strict),
            _ => Err(SanitizerError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Why a contact was flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlagReason {
    /// No consent column carried a value.
    NoConsentRecorded,
    /// A consent value was present but not affirmative.
    ConsentNotGiven {
        /// The value found.
        value: String,
    },
    /// Strict policy: consent date and/or source missing.
    IncompleteConsentEvidence {
        /// Whether the consent date was missing.
        missing_date: bool,
        /// Whether the consent source was missing.
        missing_source: bool,
    },
}

impl std::fmt::Display for FlagReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoConsentRecorded => f.write_str("no consent recorded"),
            Self::ConsentNotGiven { value } => write!(f, "consent value {value:?} is not an opt-in"),
            Self::IncompleteConsentEvidence {
                missing_date,
                missing_source,
            } => match (missing_date, missing_source) {
                (true, true) => f.write_str("missing consent date and source"),
                (true, false) => f.write_str("missing consent date"),
                _ => f.write_str("missing consent source"),
            },
        }
    }
}

/// A contact that failed the active consent rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedContact {
    /// 1-based line in the source file, when known.
    pub line: Option<u64>,
    /// Who the row describes.
    pub contact: Contact,
    /// Why it was flagged.
    pub reason: FlagReason,
}

/// Classification of a whole contact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvResult {
    /// Policy the list was classified under.
    pub policy: SanitizerPolicy,
    /// Parsed rows considered.
    pub total_rows: usize,
    /// Rows that passed the consent rule.
    pub consented: usize,
    /// List score, 0–100.
    pub compliance_percent: u8,
    /// Rows that failed the consent rule, in file order.
    pub flagged: Vec<FlaggedContact>,
}

/// Classify records under `policy`.
pub fn classify(records: &[ContactRecord], policy: SanitizerPolicy) -> CsvResult {
    let mut flagged = Vec::new();
    for record in records {
        let outcome = match policy {
            SanitizerPolicy::Standard => check_consent_flag(record),
            SanitizerPolicy::Strict => check_consent_evidence(record),
        };
        if let Err(flag) = outcome {
            flagged.push(flag);
        }
    }

    let total_rows = records.len();
    let consented = total_rows - flagged.len();
    let compliance_percent = match (total_rows, policy) {
        (0, _) => 0,
        (_, SanitizerPolicy::Standard) => rounded_percent(consented as u64, total_rows as u64),
        (_, SanitizerPolicy::Strict) => {
            let penalty = PENALTY_PER_FLAG.saturating_mul(flagged.len() as u64);
            100u64.saturating_sub(penalty) as u8
        }
    };

    CsvResult {
        policy,
        total_rows,
        consented,
        compliance_percent,
        flagged,
    }
}

fn check_consent_flag(record: &ContactRecord) -> Result<(), FlaggedContact> {
    let value = record.resolve(CONSENT_ALIASES);
    let reason = match value {
        Some(v) if is_affirmative(v) => return Ok(()),
        Some(v) => FlagReason::ConsentNotGiven {
            value: v.to_string(),
        },
        None => FlagReason::NoConsentRecorded,
    };
    Err(FlaggedContact {
        line: record.line,
        contact: record.contact(value),
        reason,
    })
}

fn check_consent_evidence(record: &ContactRecord) -> Result<(), FlaggedContact> {
    let date = record.resolve(CONSENT_DATE_ALIASES);
    let source = record.resolve(SOURCE_ALIASES);
    if date.is_some() && source.is_some() {
        return Ok(());
    }
    Err(FlaggedContact {
        line: record.line,
        contact: record.contact(None),
        reason: FlagReason::IncompleteConsentEvidence {
            missing_date: date.is_none(),
            missing_source: source.is_none(),
        },
    })
}

fn is_affirmative(value: &str) -> bool {
    let lowered = value.to_lowercase();
    AFFIRMATIVE_VALUES.contains(&lowered.as_str())
}
