//! Top-level contact book controller.
//!
//! # Responsibility
//! - Own the contact repository and edit session for one application run.
//! - Expose the use-case API callers (CLI, UI bridges) drive.
//!
//! # Invariants
//! - There is exactly one repository per book; nothing else holds it.
//! - The edit session never points at a contact that was removed through
//!   this book.

use crate::export::export_json;
use crate::model::contact::{Contact, ContactFields, ContactId};
use crate::repo::contact_repo::{ContactError, ContactRepository, RepoResult};
use crate::service::edit_session::{EditSession, EditState, FormSignal, ResetAction, SubmitOutcome};
use crate::storage::ContactStore;
use log::info;

/// Contact book facade over repository and edit session.
pub struct ContactBook<S: ContactStore> {
    repo: ContactRepository<S>,
    session: EditSession,
}

impl<S: ContactStore> ContactBook<S> {
    /// Loads (and seeds, if empty) the book from `store`.
    pub fn open(store: S) -> Self {
        Self {
            repo: ContactRepository::load(store),
            session: EditSession::new(),
        }
    }

    pub fn repository(&self) -> &ContactRepository<S> {
        &self.repo
    }

    pub fn edit_state(&self) -> EditState {
        self.session.state()
    }

    pub fn list(&self, filter: &str) -> Vec<&Contact> {
        self.repo.list(filter)
    }

    pub fn find(&self, id: ContactId) -> Option<&Contact> {
        self.repo.find_by_id(id)
    }

    /// Starts editing the contact with `id`.
    ///
    /// Returns `NotFound` for stale ids without touching the session.
    pub fn begin_edit(&mut self, id: ContactId) -> RepoResult<FormSignal> {
        let contact = self
            .repo
            .find_by_id(id)
            .ok_or(ContactError::NotFound(id))?;
        Ok(self.session.begin_edit(contact))
    }

    pub fn submit(&mut self, fields: &ContactFields) -> RepoResult<SubmitOutcome> {
        self.session.submit(&mut self.repo, fields)
    }

    pub fn cancel(&mut self) -> FormSignal {
        self.session.cancel()
    }

    pub fn reset(&mut self) -> ResetAction {
        self.session.reset()
    }

    /// Removes a contact; also leaves edit mode if it was being edited.
    pub fn remove(&mut self, id: ContactId) -> bool {
        let removed = self.repo.remove(id);
        if removed && self.session.editing_id() == Some(id) {
            self.session.cancel();
        }
        removed
    }

    /// Removes every contact. Returns `false` (no-op) when already empty.
    pub fn clear_all(&mut self) -> bool {
        if self.repo.is_empty() {
            info!("event=contacts_clear module=book status=noop reason=empty");
            return false;
        }
        self.repo.clear();
        self.session.cancel();
        true
    }

    /// Pretty-printed JSON export of every contact in book order.
    pub fn export_json(&self) -> serde_json::Result<String> {
        export_json(&self.repo.to_records())
    }
}
