//! Change notifications.
//!
//! The original web client raised a storage event on the messages key so
//! other open tabs could refresh unread counts and conversation lists. Here
//! that becomes an explicit broadcast channel owned by the [`Database`]
//! handle: writers call `notify`, and any number of subscribers hold a
//! [`tokio::sync::broadcast::Receiver`] obtained from
//! [`Database::subscribe`].
//!
//! [`Database`]: crate::Database
//! [`Database::subscribe`]: crate::Database::subscribe

use serde::Serialize;

/// A store mutation other views may care about.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StoreEvent {
    /// The message collection changed (send or mark-read).
    MessagesChanged,
}
