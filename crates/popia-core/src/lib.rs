#![deny(missing_docs)]

//! # popia-core: Foundational Types for POPIA Checkup
//!
//! This crate is the leaf of the workspace dependency graph. It defines the
//! small set of primitives every calculator shares, so that the scorer, the
//! contact sanitizer, the decision auditor and the report renderer agree on
//! one vocabulary.
//!
//! ## Key Design Principles
//!
//! 1. **Tri-state answers are a type, not an `Option<bool>`.** `Answer`
//!    distinguishes unanswered from an explicit "no", and the scorer relies
//!    on that distinction: unanswered questions neither score nor raise risk.
//!
//! 2. **Single `Category` enum.** One definition of the assessment categories
//!    with exhaustive `match` everywhere. Adding a category forces every
//!    consumer (scorer, report, CLI) to handle it.
//!
//! 3. **Local integrity digests only.** `IntegrityReceipt` records that a
//!    given file produced a given SHA-256 digest on this machine. It makes no
//!    claim beyond that: nothing is anchored, transmitted or verified against
//!    an external ledger.
//!
//! 4. **UTC-only timestamps.** `Timestamp` is UTC with a `Z` suffix and
//!    seconds precision.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `popia-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod answer;
pub mod category;
pub mod digest;
pub mod error;
pub mod integrity;
pub mod ratio;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use answer::{Answer, AuditorAnswer};
pub use category::{Category, CATEGORY_COUNT};
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm};
pub use error::PopiaError;
pub use integrity::{IntegrityReceipt, ReceiptStatus};
pub use ratio::rounded_percent;
pub use temporal::Timestamp;
