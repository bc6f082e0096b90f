use crate::domain::{ClientId, Timestamp};
use chrono::Utc;
use dashmap::DashMap;

/// What the hub knows about a live client: identity and nothing else
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub id: ClientId,
    pub connected_at: Timestamp,
}

impl ClientInfo {
    /// Time since the client connected
    pub fn session_length(&self) -> chrono::Duration {
        Utc::now() - self.connected_at
    }
}

/// Process-wide set of connected realtime clients
///
/// Mutated only on connect and disconnect.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    clients: DashMap<ClientId, ClientInfo>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly connected client
    pub fn register(&self) -> ClientId {
        let id = ClientId::new();
        self.clients.insert(
            id,
            ClientInfo {
                id,
                connected_at: Utc::now(),
            },
        );
        id
    }

    /// Remove a client; `None` if it was already gone
    pub fn unregister(&self, id: ClientId) -> Option<ClientInfo> {
        self.clients.remove(&id).map(|(_, info)| info)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_unregister() {
        let registry = ConnectionRegistry::new();
        assert!(registry.is_empty());

        let a = registry.register();
        let b = registry.register();
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);

        let info = registry.unregister(a).unwrap();
        assert_eq!(info.id, a);
        assert!(info.session_length() >= chrono::Duration::zero());
        assert!(registry.unregister(a).is_none());
        assert_eq!(registry.len(), 1);

        assert_eq!(registry.unregister(b).unwrap().id, b);
        assert!(registry.is_empty());
    }
}
