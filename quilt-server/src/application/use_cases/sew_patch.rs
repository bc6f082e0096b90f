use crate::application::ports::{EventPublisher, PatchRepository, StoreError};
use crate::domain::{NewPatch, Patch, PatchValidationError, QuiltEvent};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// A patch as received from a client
#[derive(Debug, Clone)]
pub struct SewPatchCommand {
    pub color: String,
    pub message: String,
    /// Missing reflection is stored as an empty string
    pub ai_line: Option<String>,
}

impl From<SewPatchCommand> for NewPatch {
    fn from(cmd: SewPatchCommand) -> Self {
        NewPatch::new(cmd.color, cmd.message).with_ai_line(cmd.ai_line.unwrap_or_default())
    }
}

/// Persist a new patch, then broadcast it
///
/// Nothing is published unless the store write succeeded. Store and publish
/// happen under one lock, so broadcast order matches store order.
pub struct SewPatchUseCase<R, P>
where
    R: PatchRepository + ?Sized,
    P: EventPublisher + ?Sized,
{
    patch_repo: Arc<R>,
    event_publisher: Arc<P>,
    sew_lock: Mutex<()>,
}

impl<R, P> SewPatchUseCase<R, P>
where
    R: PatchRepository + ?Sized,
    P: EventPublisher + ?Sized,
{
    pub fn new(patch_repo: Arc<R>, event_publisher: Arc<P>) -> Self {
        Self {
            patch_repo,
            event_publisher,
            sew_lock: Mutex::new(()),
        }
    }

    pub async fn execute(&self, command: SewPatchCommand) -> Result<Patch, SewError> {
        let new_patch = NewPatch::from(command);
        new_patch.validate()?;

        let _guard = self.sew_lock.lock().await;
        let patch = self.patch_repo.append(new_patch).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to store patch");
            SewError::Storage(e)
        })?;

        tracing::info!(
            patch_id = %patch.id,
            subscribers = self.event_publisher.subscriber_count(),
            "Patch sewn"
        );

        self.event_publisher
            .publish(QuiltEvent::PatchSewn(patch.clone()))
            .await;

        Ok(patch)
    }
}

#[derive(Debug, Error)]
pub enum SewError {
    #[error("Invalid patch: {0}")]
    Invalid(#[from] PatchValidationError),
    #[error("Patch could not be stored: {0}")]
    Storage(#[from] StoreError),
}
