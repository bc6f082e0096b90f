use crate::domain::{NewPatch, Patch};
use async_trait::async_trait;
use thiserror::Error;

/// Durable, append-only record of submitted patches
///
/// This port deliberately exposes no update, delete or filtered query.
/// `append` resolves only once the write is committed.
#[async_trait]
pub trait PatchRepository: Send + Sync {
    /// Assign id and timestamp, persist, and return the stored record
    async fn append(&self, patch: NewPatch) -> Result<Patch, StoreError>;

    /// Snapshot of every stored patch, ascending by timestamp
    async fn list_all(&self) -> Result<Vec<Patch>, StoreError>;

    /// Number of stored patches
    async fn count(&self) -> Result<usize, StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),
    #[error("Corrupt patch row {id}: {reason}")]
    Corrupt { id: i64, reason: String },
    #[error("Unsupported schema version {found}, max supported {supported}")]
    UnsupportedSchema { found: i64, supported: i64 },
    #[error("Storage task failed: {0}")]
    TaskFailed(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
