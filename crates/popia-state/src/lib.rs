//! # popia-state: Session State and Upload Tasks
//!
//! Holds everything a POPIA Checkup session knows in one serializable
//! [`AppState`] value and changes it only through [`update()`].
//!
//! ## Data Flow
//!
//! ```text
//! user input ──▶ Action ──▶ update(state, action) ──▶ state ──▶ view
//!                  ▲
//!                  └── UploadSupervisor (digest task completion)
//! ```
//!
//! - **State** (`state.rs`): the active tab, questionnaire answers and last
//!   submitted result, the current upload's parse outcome and integrity
//!   receipt, and the two auditor answers.
//!
//! - **Uploads** (`upload.rs`): each upload gets a fresh [`UploadId`]. Its
//!   digest runs as a tokio task bound to that id; submitting another
//!   upload aborts the previous task. Results carrying an older id are
//!   dropped by [`update()`], so the last upload always wins.
//!
//! ## Crate Policy
//!
//! - [`update()`] is pure: no I/O, no clock, no task spawning.
//! - Invalid actions (stale uploads, out-of-range answers) leave the state
//!   unchanged and are logged, never surfaced as errors.

pub mod state;
pub mod upload;

pub use state::{update, Action, AppState, AuditorState, Tab, UploadId, UploadState};
pub use upload::{CompletedDigest, UploadError, UploadSupervisor};
