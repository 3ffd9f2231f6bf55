//! Core domain logic for the contact book.
//! This crate is the single source of truth for contact invariants.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::AppConfig;
pub use export::{export_json, write_export, EXPORT_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, ContactFields, ContactId, ContactRecord, RecordError};
pub use model::validation::{
    validate_email, validate_name, validate_phone, Field, FieldError, FieldErrorKind,
};
pub use repo::contact_repo::{
    default_contact_fields, ContactError, ContactRepository, RepoResult, DEFAULT_CONTACT_EMAIL,
    DEFAULT_CONTACT_NAME, DEFAULT_CONTACT_PHONE,
};
pub use service::contact_book::ContactBook;
pub use service::edit_session::{
    EditSession, EditState, FormSignal, ResetAction, SubmitMode, SubmitOutcome,
};
pub use storage::{
    ContactStore, KeyValueStore, KvContactStore, MemoryKeyValueStore, SqliteKeyValueStore,
    StorageError, StorageResult, CONTACTS_STORAGE_KEY,
};

/// Minimal health-check API for linkage smoke checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
