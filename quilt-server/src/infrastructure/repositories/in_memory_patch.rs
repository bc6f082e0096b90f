use crate::application::ports::{PatchRepository, StoreError};
use crate::domain::{Clock, NewPatch, Patch, PatchId};
use crate::infrastructure::clock::SystemClock;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// In-memory patch store
///
/// Same contract as the SQLite store, minus durability. Used in tests and
/// when storage is configured as in-memory.
pub struct InMemoryPatchRepository {
    clock: Arc<dyn Clock>,
    state: Mutex<State>,
}

struct State {
    patches: Vec<Patch>,
    next_id: i64,
}

impl InMemoryPatchRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        InMemoryPatchRepository {
            clock,
            state: Mutex::new(State {
                patches: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryPatchRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PatchRepository for InMemoryPatchRepository {
    async fn append(&self, patch: NewPatch) -> Result<Patch, StoreError> {
        let mut state = self.state.lock();

        // Timestamps never go backwards, even if the clock does
        let mut timestamp = self.clock.now();
        if let Some(last) = state.patches.last() {
            timestamp = timestamp.max(last.timestamp);
        }

        let id = PatchId::new(state.next_id);
        state.next_id += 1;

        let stored = patch.into_patch(id, timestamp);
        state.patches.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Patch>, StoreError> {
        // Appends are already in timestamp order
        Ok(self.state.lock().patches.clone())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.state.lock().patches.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn test_ids_start_at_one_and_increase() {
        let repo = InMemoryPatchRepository::new();

        let first = repo.append(NewPatch::new("red", "one")).await.unwrap();
        let second = repo.append(NewPatch::new("blue", "two")).await.unwrap();

        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_clock_going_backwards_keeps_order() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::at(start);
        let repo = InMemoryPatchRepository::with_clock(Arc::new(clock.clone()));

        repo.append(NewPatch::new("red", "one")).await.unwrap();
        clock.advance(Duration::seconds(-30));
        let second = repo.append(NewPatch::new("blue", "two")).await.unwrap();

        assert_eq!(second.timestamp, start);
        let all = repo.list_all().await.unwrap();
        assert!(all.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }
}
