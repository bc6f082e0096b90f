use crate::application::ports::{PatchRepository, StoreError};
use crate::domain::Patch;
use std::sync::Arc;

pub struct ListPatchesUseCase<R>
where
    R: PatchRepository + ?Sized,
{
    patch_repo: Arc<R>,
}

impl<R> ListPatchesUseCase<R>
where
    R: PatchRepository + ?Sized,
{
    pub fn new(patch_repo: Arc<R>) -> Self {
        Self { patch_repo }
    }

    /// Full history, oldest first
    pub async fn execute(&self) -> Result<Vec<Patch>, StoreError> {
        self.patch_repo.list_all().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to load patch history");
            e
        })
    }
}
