use crate::application::ports::EventPublisher;
use crate::domain::QuiltEvent;
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Broadcast-based event publisher
///
/// One tokio broadcast channel shared by every realtime connection. Sends
/// never block; a receiver that falls more than `capacity` events behind
/// skips ahead instead of holding up the others.
pub struct BroadcastEventPublisher {
    tx: broadcast::Sender<QuiltEvent>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        BroadcastEventPublisher { tx }
    }

    /// Subscribe to all events
    pub fn subscribe(&self) -> broadcast::Receiver<QuiltEvent> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl EventPublisher for BroadcastEventPublisher {
    async fn publish(&self, event: QuiltEvent) {
        // Ignore send errors (no subscribers)
        let _ = self.tx.send(event);
    }

    fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
