//! Operations on the [`Message`] collection.
//!
//! Messages are append-only: the only mutation ever applied is flipping
//! `is_read` from false to true. Every effective mutation broadcasts
//! [`StoreEvent::MessagesChanged`] so other views refresh their unread
//! counts and conversation lists.

use chrono::Utc;

use crate::database::{numeric_id, Database, MESSAGES_KEY};
use crate::error::Result;
use crate::events::StoreEvent;
use crate::models::Message;

impl Database {
    /// Read the full message collection, unsorted.
    pub fn list_messages(&self) -> Result<Vec<Message>> {
        self.read_collection(MESSAGES_KEY)
    }

    /// All messages exchanged between `a` and `b`, in either direction,
    /// sorted ascending by timestamp (ties by id, i.e. creation order).
    /// Symmetric in its arguments.
    pub fn messages_between(&self, a: &str, b: &str) -> Result<Vec<Message>> {
        let mut messages = self.list_messages()?;
        messages.retain(|m| (m.from == a && m.to == b) || (m.from == b && m.to == a));
        messages.sort_by_key(|m| (m.timestamp, numeric_id(&m.id)));
        Ok(messages)
    }

    /// Append a new message from `from` to `to`.
    ///
    /// The store assigns the id, stamps the current time, and forces the
    /// read flag to false. Broadcasts a change notification after
    /// persisting.
    pub fn send_message(&self, from: &str, to: &str, body: &str) -> Result<Message> {
        let message = Message {
            id: self.next_id(),
            from: from.to_string(),
            to: to.to_string(),
            message: body.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            is_read: false,
        };

        let mut messages = self.list_messages()?;
        messages.push(message.clone());
        self.write_collection(MESSAGES_KEY, &messages)?;
        self.notify(StoreEvent::MessagesChanged);

        tracing::debug!(id = %message.id, from, to, "sent message");
        Ok(message)
    }

    /// Mark every unread message from `from` to `to` as read.
    ///
    /// Idempotent: if no matching unread message exists, nothing is
    /// persisted and nothing is broadcast.
    pub fn mark_read(&self, from: &str, to: &str) -> Result<()> {
        let mut messages = self.list_messages()?;
        let mut changed = 0usize;
        for m in &mut messages {
            if m.from == from && m.to == to && !m.is_read {
                m.is_read = true;
                changed += 1;
            }
        }

        if changed > 0 {
            self.write_collection(MESSAGES_KEY, &messages)?;
            self.notify(StoreEvent::MessagesChanged);
            tracing::debug!(from, to, changed, "marked messages read");
        }
        Ok(())
    }

    /// All unread messages addressed to `user`.
    pub fn unread_for(&self, user: &str) -> Result<Vec<Message>> {
        let mut messages = self.list_messages()?;
        messages.retain(|m| m.to == user && !m.is_read);
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_forces_unread() {
        let db = Database::in_memory();
        let sent = db.send_message("1", "2", "hello").unwrap();
        assert!(!sent.is_read);
        assert_eq!(sent.message, "hello");
    }

    #[test]
    fn messages_between_is_symmetric_and_ordered() {
        let db = Database::in_memory();
        let first = db.send_message("1", "2", "hi").unwrap();
        let second = db.send_message("2", "1", "hey").unwrap();
        db.send_message("1", "3", "unrelated").unwrap();

        let forward = db.messages_between("1", "2").unwrap();
        let backward = db.messages_between("2", "1").unwrap();
        assert_eq!(forward, backward);

        assert_eq!(forward.len(), 2);
        assert_eq!(forward[0].id, first.id);
        assert_eq!(forward[1].id, second.id);
        assert!(forward[0].timestamp <= forward[1].timestamp);
    }

    #[test]
    fn unread_for_counts_only_addressed_unread() {
        let db = Database::in_memory();
        db.send_message("1", "2", "to you").unwrap();
        db.send_message("2", "1", "to me").unwrap();

        let unread = db.unread_for("2").unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].message, "to you");
    }

    #[test]
    fn mark_read_flips_only_matching_direction() {
        let db = Database::in_memory();
        db.send_message("1", "2", "a").unwrap();
        db.send_message("2", "1", "b").unwrap();

        db.mark_read("1", "2").unwrap();

        assert!(db.unread_for("2").unwrap().is_empty());
        // The opposite direction is untouched.
        assert_eq!(db.unread_for("1").unwrap().len(), 1);
    }

    #[test]
    fn mark_read_is_idempotent_and_silent_when_clean() {
        let db = Database::in_memory();
        db.send_message("1", "2", "hello").unwrap();

        let mut rx = db.subscribe();
        db.mark_read("1", "2").unwrap();
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::MessagesChanged);

        // Second call changes nothing and broadcasts nothing.
        db.mark_read("1", "2").unwrap();
        assert!(rx.try_recv().is_err());
        assert!(db.unread_for("2").unwrap().is_empty());
    }

    #[test]
    fn send_broadcasts_change() {
        let db = Database::in_memory();
        let mut rx = db.subscribe();

        db.send_message("1", "2", "hello").unwrap();
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::MessagesChanged);
    }

    #[tokio::test]
    async fn subscriber_observes_mutations() {
        let db = Database::in_memory();
        let mut rx = db.subscribe();

        db.send_message("1", "2", "hello").unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(event, StoreEvent::MessagesChanged);
    }
}
