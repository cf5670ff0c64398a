//! # hemolink-store
//!
//! Local record store for the Hemolink donor-matching application.
//!
//! All persistent state lives in an injected [`Storage`] backend as JSON
//! documents, one per collection. The crate exposes a synchronous
//! [`Database`] handle that provides typed CRUD helpers for the two domain
//! collections (people, messages), derives per-counterpart conversation
//! summaries on demand, and broadcasts a [`StoreEvent`] whenever the message
//! collection changes so that other views can refresh.

pub mod conversations;
pub mod database;
pub mod digest;
pub mod events;
pub mod messages;
pub mod models;
pub mod people;
pub mod seed;
pub mod storage;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use events::StoreEvent;
pub use models::*;
pub use storage::{FileStorage, MemoryStorage, Storage};
