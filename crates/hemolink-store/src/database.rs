//! Database handle and collection plumbing.
//!
//! The [`Database`] struct owns a [`Storage`] backend plus the change
//! broadcast channel, and provides the id allocator shared by every create
//! path. Typed CRUD helpers live in the `people`, `messages` and
//! `conversations` modules as `impl Database` blocks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::error::Result;
use crate::events::StoreEvent;
use crate::storage::{FileStorage, MemoryStorage, Storage};

/// Storage key for the unified person collection (donors and admins).
pub const PEOPLE_KEY: &str = "blood_donor_people";
/// Storage key for the message collection.
pub const MESSAGES_KEY: &str = "blood_donor_messages";

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Handle to the record store.
///
/// Cheap to clone is not a goal; share it behind an `Arc` instead. All
/// operations are synchronous read-modify-write against the backend, with no
/// atomicity across operations: two interleaved writers can lose an update.
pub struct Database {
    storage: Arc<dyn Storage>,
    events: broadcast::Sender<StoreEvent>,
    /// Highest id handed out so far, as epoch milliseconds.
    last_id: AtomicU64,
}

impl Database {
    /// Open the default file-backed store in the platform data directory.
    pub fn new() -> Result<Self> {
        Ok(Self::with_storage(Arc::new(FileStorage::new()?)))
    }

    /// Open a store over an explicit backend.
    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            storage,
            events,
            last_id: AtomicU64::new(0),
        }
    }

    /// Open a volatile in-memory store. Intended for tests.
    pub fn in_memory() -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new()))
    }

    /// Subscribe to change notifications.
    ///
    /// Every mutating message operation broadcasts [`StoreEvent::MessagesChanged`]
    /// after persisting; subscribers re-fetch whatever derived state they
    /// display. Delivery is best-effort: a lagged receiver misses events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Broadcast `event` to all current subscribers.
    pub(crate) fn notify(&self, event: StoreEvent) {
        // A send error just means nobody is listening right now.
        let _ = self.events.send(event);
    }

    /// Allocate the next record identifier.
    ///
    /// Identifiers are epoch milliseconds clamped to be strictly greater
    /// than any id previously handed out by this handle, so creations in
    /// sequence always get strictly increasing ids even within one
    /// millisecond.
    pub(crate) fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut prev = self.last_id.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match self.last_id.compare_exchange_weak(
                prev,
                next,
                Ordering::SeqCst,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }

    /// Read a whole collection, treating an absent key as empty.
    pub(crate) fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.storage.read(key)? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Vec::new()),
        }
    }

    /// Serialize and persist a whole collection.
    pub(crate) fn write_collection<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let text = serde_json::to_string(records)?;
        self.storage.write(key, &text)?;
        Ok(())
    }
}

/// Parse a numeric-string id for ordering. Non-numeric ids sort first.
pub(crate) fn numeric_id(id: &str) -> u64 {
    id.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_collection_reads_empty() {
        let db = Database::in_memory();
        let people: Vec<crate::models::Person> = db.read_collection(PEOPLE_KEY).unwrap();
        assert!(people.is_empty());
    }

    #[test]
    fn ids_strictly_increase() {
        let db = Database::in_memory();
        let mut prev = 0u64;
        for _ in 0..1000 {
            let id: u64 = db.next_id().parse().unwrap();
            assert!(id > prev, "{id} should exceed {prev}");
            prev = id;
        }
    }

    #[test]
    fn ids_track_wall_clock() {
        let db = Database::in_memory();
        let now = Utc::now().timestamp_millis() as u64;
        let id: u64 = db.next_id().parse().unwrap();
        assert!(id >= now);
    }
}
