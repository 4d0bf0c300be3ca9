//! # popia-assessment: Questionnaire Scoring and Decision Auditing
//!
//! Two independent, pure calculators:
//!
//! - **Questionnaire scorer** (`questionnaire.rs`, `scoring.rs`, `band.rs`):
//!   a fixed set of yes/no questions grouped by [`Category`], each carrying
//!   a risk label. Scoring sums per-question weights for "yes" answers,
//!   collects risk labels for "no" answers, and maps the resulting
//!   percentage onto a [`ComplianceBand`].
//!
//! - **Decision auditor** (`auditor.rs`): a static lookup over two tri-state
//!   answers about automated decision-making, yielding a [`Verdict`].
//!
//! ## Invariants
//!
//! - The sum of per-question weights in a [`QuestionSet`] always equals
//!   [`MAX_POINTS`]. [`QuestionSet::new`] rejects any set that violates it,
//!   and both built-in layouts are tested against it.
//! - [`score`] is pure: it never mutates the question set, and repeated calls
//!   on the same answers return identical results.
//! - Unanswered questions contribute no points and raise no risk.
//!
//! [`Category`]: popia_core::Category

pub mod auditor;
pub mod band;
pub mod questionnaire;
pub mod scoring;

pub use auditor::{
    audit, verdict, AuditFinding, Verdict, AUTOMATED_DECISION_PROMPT, HUMAN_REVIEW_PROMPT,
};
pub use band::ComplianceBand;
pub use questionnaire::{
    AnswerSheet, Layout, Question, QuestionSet, QuestionnaireError, MAX_POINTS,
};
pub use scoring::{score, AssessmentResult, CategoryScore};
