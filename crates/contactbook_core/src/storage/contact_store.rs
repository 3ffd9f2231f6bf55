//! Contact list persistence over a key-value blob store.
//!
//! # Responsibility
//! - Load the stored contact array as raw JSON items.
//! - Save and erase the whole contact list under one storage key.
//!
//! # Invariants
//! - `load` never returns an error; absent, unreadable, malformed or
//!   non-array payloads load as an empty list.
//! - Item decoding is left to the caller so one bad item does not hide
//!   the others.

use super::kv::KeyValueStore;
use super::StorageResult;
use crate::model::contact::ContactRecord;
use log::{debug, warn};
use serde_json::Value;

/// Storage key holding the serialized contact array.
pub const CONTACTS_STORAGE_KEY: &str = "contact_list_lite:v1";

/// Persistence collaborator used by the contact repository.
pub trait ContactStore {
    /// Returns stored items in order, or empty on absence/corruption.
    fn load(&self) -> Vec<Value>;
    /// Replaces the stored list with `records`.
    fn save(&self, records: &[ContactRecord]) -> StorageResult<()>;
    /// Erases the stored list.
    fn clear(&self) -> StorageResult<()>;
}

/// `ContactStore` writing one JSON array under `CONTACTS_STORAGE_KEY`.
pub struct KvContactStore<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> KvContactStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }
}

impl<K: KeyValueStore> ContactStore for KvContactStore<K> {
    fn load(&self) -> Vec<Value> {
        let raw = match self.kv.get(CONTACTS_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=contacts_load module=storage status=empty reason=absent");
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=contacts_load module=storage status=error error_code=read_failed error={err}"
                );
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            debug!("event=contacts_load module=storage status=empty reason=blank");
            return Vec::new();
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => {
                debug!(
                    "event=contacts_load module=storage status=ok items={}",
                    items.len()
                );
                items
            }
            Ok(_) => {
                warn!("event=contacts_load module=storage status=error error_code=not_an_array");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=contacts_load module=storage status=error error_code=corrupt_json error={err}"
                );
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[ContactRecord]) -> StorageResult<()> {
        let payload = serde_json::to_string(records)?;
        self.kv.set(CONTACTS_STORAGE_KEY, &payload)
    }

    fn clear(&self) -> StorageResult<()> {
        self.kv.delete(CONTACTS_STORAGE_KEY)
    }
}
