//! # Upload Digest Supervisor
//!
//! Runs the integrity digest of an uploaded file as a tokio task bound to
//! that upload's [`UploadId`]. At most one digest task is alive: submitting
//! a new upload aborts the previous task before spawning the next one.
//!
//! Aborting a blocking task that has already started does not stop it, so
//! completion is reported together with the upload id and the reducer
//! discards receipts for anything but the current upload.

use popia_core::IntegrityReceipt;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::state::{Action, UploadId};

/// Errors reported when waiting for a digest task.
#[derive(Error, Debug)]
pub enum UploadError {
    /// The task was aborted before it produced a receipt.
    #[error("digest task for {0} was cancelled")]
    Cancelled(UploadId),

    /// The task panicked.
    #[error("digest task for {upload} failed: {message}")]
    Failed {
        /// Upload the task belonged to.
        upload: UploadId,
        /// Panic or join error message.
        message: String,
    },
}

/// A receipt together with the upload it was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedDigest {
    /// Upload the digest was computed for.
    pub upload: UploadId,
    /// The computed receipt.
    pub receipt: IntegrityReceipt,
}

impl From<CompletedDigest> for Action {
    fn from(done: CompletedDigest) -> Self {
        Action::ReceiptReady {
            upload: done.upload,
            receipt: done.receipt,
        }
    }
}

/// Owns the digest task of the current upload.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Default)]
pub struct UploadSupervisor {
    last_id: UploadId,
    task: Option<(UploadId, JoinHandle<IntegrityReceipt>)>,
}

impl UploadSupervisor {
    /// A supervisor with no upload yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start digesting `content` as a new upload, superseding any digest
    /// still running. Returns the id results for this upload will carry.
    pub fn submit(&mut self, file_name: Option<String>, content: Vec<u8>) -> UploadId {
        self.cancel();
        let upload = self.last_id.next();
        self.last_id = upload;
        tracing::debug!(%upload, bytes = content.len(), "spawning digest task");
        let handle =
            tokio::task::spawn_blocking(move || IntegrityReceipt::compute(file_name, &content));
        self.task = Some((upload, handle));
        upload
    }

    /// Abort the running digest task, if any.
    pub fn cancel(&mut self) {
        if let Some((upload, handle)) = self.task.take() {
            if !handle.is_finished() {
                tracing::debug!(%upload, "superseded digest task");
            }
            handle.abort();
        }
    }

    /// Id of the upload whose digest is pending.
    pub fn pending(&self) -> Option<UploadId> {
        self.task.as_ref().map(|(id, _)| *id)
    }

    /// Id of the most recent upload, pending or not.
    pub fn latest(&self) -> Option<UploadId> {
        (self.last_id != UploadId::default()).then_some(self.last_id)
    }

    /// Wait for the pending digest. `Ok(None)` when nothing is pending.
    pub async fn join(&mut self) -> Result<Option<CompletedDigest>, UploadError> {
        let Some((upload, handle)) = self.task.take() else {
            return Ok(None);
        };
        match handle.await {
            Ok(receipt) => {
                tracing::info!(
                    %upload,
                    digest = %receipt.digest,
                    size_bytes = receipt.size_bytes,
                    "integrity digest computed"
                );
                Ok(Some(CompletedDigest { upload, receipt }))
            }
            Err(e) if e.is_cancelled() => Err(UploadError::Cancelled(upload)),
            Err(e) => Err(UploadError::Failed {
                upload,
                message: e.to_string(),
            }),
        }
    }
}

impl Drop for UploadSupervisor {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popia_core::{sha256_digest, ReceiptStatus};

    #[tokio::test]
    async fn test_join_without_upload_is_none() {
        let mut supervisor = UploadSupervisor::new();
        assert!(supervisor.join().await.unwrap().is_none());
        assert_eq!(supervisor.latest(), None);
    }

    #[tokio::test]
    async fn test_single_upload_produces_receipt() {
        let mut supervisor = UploadSupervisor::new();
        let id = supervisor.submit(Some("list.csv".into()), b"Consent\nyes\n".to_vec());
        assert_eq!(supervisor.pending(), Some(id));

        let done = supervisor.join().await.unwrap().unwrap();
        assert_eq!(done.upload, id);
        assert_eq!(done.receipt.file_name.as_deref(), Some("list.csv"));
        assert_eq!(done.receipt.digest, sha256_digest(b"Consent\nyes\n"));
        assert_eq!(done.receipt.status, ReceiptStatus::LocallyComputed);
        assert_eq!(supervisor.pending(), None);
    }

    #[tokio::test]
    async fn test_second_upload_supersedes_first() {
        let mut supervisor = UploadSupervisor::new();
        let first = supervisor.submit(None, b"first".to_vec());
        let second = supervisor.submit(None, b"second".to_vec());
        assert!(second > first);
        assert_eq!(supervisor.pending(), Some(second));
        assert_eq!(supervisor.latest(), Some(second));

        let done = supervisor.join().await.unwrap().unwrap();
        assert_eq!(done.upload, second);
        assert!(done.receipt.matches(b"second"));
    }

    #[tokio::test]
    async fn test_cancel_drops_pending_task() {
        let mut supervisor = UploadSupervisor::new();
        supervisor.submit(None, b"data".to_vec());
        supervisor.cancel();
        assert_eq!(supervisor.pending(), None);
        assert!(supervisor.join().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_completed_digest_becomes_receipt_action() {
        let mut supervisor = UploadSupervisor::new();
        let id = supervisor.submit(None, b"x".to_vec());
        let done = supervisor.join().await.unwrap().unwrap();
        match Action::from(done) {
            Action::ReceiptReady { upload, receipt } => {
                assert_eq!(upload, id);
                assert_eq!(receipt.size_bytes, 1);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
