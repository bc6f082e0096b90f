mod event_publisher;
mod patch_repository;
mod text_generator;

pub use event_publisher::EventPublisher;
pub use patch_repository::{PatchRepository, StoreError};
pub use text_generator::{GenerationError, TextGenerator};
