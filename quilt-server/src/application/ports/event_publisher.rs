use crate::domain::QuiltEvent;
use async_trait::async_trait;

/// Publisher for quilt events
///
/// Events are fanned out to every live realtime connection. Publishing is
/// fire-and-forget: it never waits on receivers.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event to all subscribers
    async fn publish(&self, event: QuiltEvent);

    /// Get the number of active subscribers
    fn subscriber_count(&self) -> usize;
}
