//! # `popia audit`
//!
//! Section 71 check for automated decision-making. Both answers default to
//! unanswered, which yields an `UNKNOWN` verdict. A violation exits with
//! code 2.

use anyhow::Result;
use clap::Args;
use popia_assessment::{Verdict, AUTOMATED_DECISION_PROMPT, HUMAN_REVIEW_PROMPT};
use popia_core::AuditorAnswer;
use popia_state::{update, Action, AppState, AuditorState};

use crate::config::CliConfig;
use crate::EXIT_CHECK_FAILED;

/// Arguments for `popia audit`.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Are decisions about people made solely by an automated system? (yes/no)
    #[arg(long, default_value = "unanswered")]
    pub automated: AuditorAnswer,

    /// Can an affected person have a human review the decision? (yes/no)
    #[arg(long, default_value = "unanswered")]
    pub human_review: AuditorAnswer,

    /// Print the finding as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute `popia audit`.
pub fn run_audit(args: &AuditArgs, _config: &CliConfig) -> Result<u8> {
    let auditor = auditor_state(args.automated, args.human_review);
    let finding = auditor.finding();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&finding)?);
    } else {
        println!("1. {AUTOMATED_DECISION_PROMPT}");
        println!("   {}", auditor.automated_decision);
        println!("2. {HUMAN_REVIEW_PROMPT}");
        println!("   {}", auditor.human_review);
        println!();
        println!("Verdict: {}", finding.verdict);
        println!("{}", finding.rationale);
    }

    Ok(match finding.verdict {
        Verdict::Violation => EXIT_CHECK_FAILED,
        Verdict::Compliant | Verdict::Unknown => 0,
    })
}

/// Record both answers through the session reducer.
pub fn auditor_state(automated: AuditorAnswer, human_review: AuditorAnswer) -> AuditorState {
    let state = [
        Action::SetAutomatedDecision { answer: automated },
        Action::SetHumanReview {
            answer: human_review,
        },
    ]
    .into_iter()
    .fold(AppState::default(), update);
    state.auditor
}
