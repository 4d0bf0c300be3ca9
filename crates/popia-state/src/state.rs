//! # Application State
//!
//! [`AppState`] is a plain value. [`update()`] takes the state by value and
//! returns the next one; there is no other way to change it.
//!
//! ## Actions
//!
//! | Action | Effect |
//! |--------|--------|
//! | `SelectTab` | switch the active tab |
//! | `Answer` | set one answer, clear the submitted result |
//! | `SubmitAssessment` | score the current answers |
//! | `ResetAssessment` | clear every answer and the result |
//! | `BeginUpload` | replace the upload slot with an empty one |
//! | `ContactsParsed` | store the classifier outcome for that upload |
//! | `ReceiptReady` | store the integrity receipt for that upload |
//! | `SetAutomatedDecision` / `SetHumanReview` | auditor answers |

use popia_assessment::{audit, score, AssessmentResult, AuditFinding, Layout, QuestionSet};
use popia_core::{Answer, AuditorAnswer, Category, IntegrityReceipt};
use popia_sanitizer::{SanitizerOutcome, SanitizerPolicy};
use serde::{Deserialize, Serialize};

// ─── Navigation ──────────────────────────────────────────────────────

/// Top-level navigation tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    /// Landing page.
    #[default]
    Home,
    /// Compliance questionnaire.
    Assessment,
    /// Contact list upload and consent check.
    Sanitizer,
    /// Section 71 automated decision check.
    Auditor,
}

impl Tab {
    /// All tabs in navigation order.
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Assessment, Tab::Sanitizer, Tab::Auditor];

    /// Navigation label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Assessment => "Assessment",
            Self::Sanitizer => "List Sanitizer",
            Self::Auditor => "AI Auditor",
        }
    }
}

// ─── Uploads ─────────────────────────────────────────────────────────

/// Identifies one upload. Later uploads have larger ids.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UploadId(pub u64);

impl UploadId {
    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for UploadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "upload#{}", self.0)
    }
}

/// What is known about the current upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadState {
    /// The upload these results belong to.
    pub id: UploadId,
    /// File name as supplied, if any.
    pub file_name: Option<String>,
    /// Parse and classification outcome, once available.
    pub outcome: Option<SanitizerOutcome>,
    /// Integrity receipt, once the digest task completes.
    pub receipt: Option<IntegrityReceipt>,
}

impl UploadState {
    fn new(id: UploadId, file_name: Option<String>) -> Self {
        Self {
            id,
            file_name,
            outcome: None,
            receipt: None,
        }
    }

    /// Whether both the classification and the receipt have arrived.
    pub fn is_settled(&self) -> bool {
        self.outcome.is_some() && self.receipt.is_some()
    }
}

// ─── Auditor ─────────────────────────────────────────────────────────

/// The two auditor answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditorState {
    /// Whether decisions are made solely by automated means.
    pub automated_decision: AuditorAnswer,
    /// Whether a person can review an automated decision on request.
    pub human_review: AuditorAnswer,
}

impl AuditorState {
    /// Current finding. Recomputed on every call.
    pub fn finding(&self) -> AuditFinding {
        audit(self.automated_decision, self.human_review)
    }
}

// ─── AppState ────────────────────────────────────────────────────────

/// Complete session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Tab currently shown.
    pub active_tab: Tab,
    /// Questions with the answers given so far.
    pub questions: QuestionSet,
    /// Result of the last submission. Cleared whenever an answer changes.
    pub assessment: Option<AssessmentResult>,
    /// Policy applied to uploaded contact lists.
    pub policy: SanitizerPolicy,
    /// The latest upload, if any.
    pub upload: Option<UploadState>,
    /// Answers to the auditor questions.
    pub auditor: AuditorState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Layout::Standard, SanitizerPolicy::Standard)
    }
}

impl AppState {
    /// Fresh session with the given questionnaire layout and list policy.
    pub fn new(layout: Layout, policy: SanitizerPolicy) -> Self {
        Self {
            active_tab: Tab::Home,
            questions: layout.question_set(),
            assessment: None,
            policy,
            upload: None,
            auditor: AuditorState::default(),
        }
    }

    /// Id of the upload results are currently accepted for.
    pub fn current_upload(&self) -> Option<UploadId> {
        self.upload.as_ref().map(|u| u.id)
    }

    fn upload_mut(&mut self, id: UploadId) -> Option<&mut UploadState> {
        self.upload.as_mut().filter(|u| u.id == id)
    }
}

// ─── Actions ─────────────────────────────────────────────────────────

/// Everything that can happen to an [`AppState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Switch the visible tab.
    SelectTab {
        /// Tab to show.
        tab: Tab,
    },
    /// Record the answer to one question.
    Answer {
        /// Category holding the question.
        category: Category,
        /// Zero-based position within the category.
        index: usize,
        /// New answer.
        answer: Answer,
    },
    /// Score the current answers.
    SubmitAssessment,
    /// Clear every answer and the submitted result.
    ResetAssessment,
    /// A file was selected; it replaces any earlier upload.
    BeginUpload {
        /// Id issued by the upload supervisor.
        upload: UploadId,
        /// Name of the selected file, if known.
        file_name: Option<String>,
    },
    /// Consent classification of an upload finished.
    ContactsParsed {
        /// Upload the outcome belongs to.
        upload: UploadId,
        /// Parse report and classification.
        outcome: SanitizerOutcome,
    },
    /// Integrity digest of an upload finished.
    ReceiptReady {
        /// Upload the receipt belongs to.
        upload: UploadId,
        /// The computed receipt.
        receipt: IntegrityReceipt,
    },
    /// Answer the automated decision question.
    SetAutomatedDecision {
        /// New answer.
        answer: AuditorAnswer,
    },
    /// Answer the human review question.
    SetHumanReview {
        /// New answer.
        answer: AuditorAnswer,
    },
}

/// Apply `action` to `state`.
pub fn update(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::SelectTab { tab } => state.active_tab = tab,

        Action::Answer {
            category,
            index,
            answer,
        } => match state.questions.answer(category, index, answer) {
            Ok(()) => state.assessment = None,
            Err(e) => tracing::warn!(error = %e, "ignored answer"),
        },

        Action::SubmitAssessment => state.assessment = Some(score(&state.questions)),

        Action::ResetAssessment => {
            state.questions.reset();
            state.assessment = None;
        }

        Action::BeginUpload { upload, file_name } => {
            if state.current_upload().is_some_and(|current| upload < current) {
                tracing::debug!(%upload, "ignored out-of-order upload");
            } else {
                state.upload = Some(UploadState::new(upload, file_name));
            }
        }

        Action::ContactsParsed { upload, outcome } => match state.upload_mut(upload) {
            Some(slot) => slot.outcome = Some(outcome),
            None => tracing::debug!(%upload, "ignored classification of stale upload"),
        },

        Action::ReceiptReady { upload, receipt } => match state.upload_mut(upload) {
            Some(slot) => slot.receipt = Some(receipt),
            None => tracing::debug!(%upload, "ignored receipt of stale upload"),
        },

        Action::SetAutomatedDecision { answer } => state.auditor.automated_decision = answer,
        Action::SetHumanReview { answer } => state.auditor.human_review = answer,
    }
    state
}
