//! # Automated Decision Auditor
//!
//! A two-question decision table for Section 71 of the Act (automated
//! decision-making):
//!
//! 1. Are decisions with legal or similarly significant effect made solely
//!    by automated means (e.g. an AI auto-reject)?
//! 2. Is there a human review of those decisions?
//!
//! | Automated | Human review | Verdict |
//! |-----------|--------------|---------|
//! | no        | any          | compliant |
//! | yes       | yes          | compliant |
//! | yes       | no           | violation |
//! | yes       | unanswered   | unknown |
//! | unanswered| any          | unknown |

use popia_core::AuditorAnswer;
use serde::{Deserialize, Serialize};

/// First auditor question.
pub const AUTOMATED_DECISION_PROMPT: &str =
    "Does an automated system (e.g. AI) reject applications or make decisions about people without a person being involved?";

/// Second auditor question.
pub const HUMAN_REVIEW_PROMPT: &str =
    "Can an affected person request that a human reviews the automated decision?";

/// Outcome of the decision auditor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No Section 71 issue.
    Compliant,
    /// Automated decisions without human review.
    Violation,
    /// Not enough answers to decide.
    Unknown,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Compliant => "COMPLIANT",
            Self::Violation => "VIOLATION",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// A verdict together with the reason for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuditFinding {
    /// The verdict.
    pub verdict: Verdict,
    /// One-line explanation of the verdict.
    pub rationale: &'static str,
}

/// Look up the verdict for the two auditor answers.
pub fn verdict(automated: AuditorAnswer, human_review: AuditorAnswer) -> Verdict {
    audit(automated, human_review).verdict
}

/// Look up the verdict and its rationale.
pub fn audit(automated: AuditorAnswer, human_review: AuditorAnswer) -> AuditFinding {
    use popia_core::Answer::{No, Unanswered, Yes};

    let (verdict, rationale) = match (automated, human_review) {
        (No, _) => (
            Verdict::Compliant,
            "No solely automated decision-making takes place, so Section 71 does not apply.",
        ),
        (Yes, Yes) => (
            Verdict::Compliant,
            "Automated decisions can be reviewed by a person, as Section 71 requires.",
        ),
        (Yes, No) => (
            Verdict::Violation,
            "Automated decisions are made without any human review (Section 71 violation).",
        ),
        (Yes, Unanswered) | (Unanswered, _) => (
            Verdict::Unknown,
            "Answer both questions to obtain a verdict.",
        ),
    };
    AuditFinding { verdict, rationale }
}
