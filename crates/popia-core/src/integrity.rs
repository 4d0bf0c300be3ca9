//! # Local Integrity Receipts
//!
//! An `IntegrityReceipt` records that an uploaded file produced a given
//! SHA-256 digest on this machine at a given time.
//!
//! ## Scope of the Guarantee
//!
//! The receipt states only "this exact file produced this exact digest
//! locally". It is not anchored to any ledger, not transmitted, and not
//! verified against anything external. The status is therefore always
//! [`ReceiptStatus::LocallyComputed`].

use serde::{Deserialize, Serialize};

use crate::digest::{sha256_digest, ContentDigest};
use crate::temporal::Timestamp;

/// The provenance of a receipt's digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceiptStatus {
    /// The digest was computed on this machine and nowhere else.
    LocallyComputed,
}

impl std::fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocallyComputed => f.write_str("LOCALLY_COMPUTED"),
        }
    }
}

/// A write-once record of a locally computed file digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReceipt {
    /// The file name as supplied by the user, if any.
    pub file_name: Option<String>,
    /// Size of the digested content in bytes.
    pub size_bytes: u64,
    /// SHA-256 digest of the exact uploaded bytes.
    pub digest: ContentDigest,
    /// When the digest was computed.
    pub computed_at: Timestamp,
    /// Always [`ReceiptStatus::LocallyComputed`].
    pub status: ReceiptStatus,
}

impl IntegrityReceipt {
    /// Digest `content` and stamp the receipt with the current time.
    pub fn compute(file_name: Option<String>, content: &[u8]) -> Self {
        Self::compute_at(file_name, content, Timestamp::now())
    }

    /// Digest `content` and stamp the receipt with `computed_at`.
    pub fn compute_at(file_name: Option<String>, content: &[u8], computed_at: Timestamp) -> Self {
        Self {
            file_name,
            size_bytes: content.len() as u64,
            digest: sha256_digest(content),
            computed_at,
            status: ReceiptStatus::LocallyComputed,
        }
    }

    /// Whether `content` is byte-identical to what this receipt digested.
    pub fn matches(&self, content: &[u8]) -> bool {
        content.len() as u64 == self.size_bytes && sha256_digest(content) == self.digest
    }
}
