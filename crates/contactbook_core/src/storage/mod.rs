//! Persistence boundary for the contact book.
//!
//! # Responsibility
//! - Define the key-value blob capability the book is persisted through.
//! - Serialize the contact list to and from a single stored blob.
//!
//! # Invariants
//! - Loading never fails: absent or corrupt data reads as an empty list.
//! - Write failures are reported to the caller, who decides whether to log
//!   or propagate them.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod contact_store;
pub mod kv;

pub use contact_store::{ContactStore, KvContactStore, CONTACTS_STORAGE_KEY};
pub use kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage backend or encoding failure.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    Encode(serde_json::Error),
    /// Refusal from a backend that is neither SQLite nor in-memory, such as
    /// a quota or permission check. The bundled stores never return it.
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "contact storage query failed: {err}"),
            Self::Encode(err) => write!(f, "failed to encode contacts: {err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}
