//! Edit-mode state machine for the contact form.
//!
//! # Responsibility
//! - Remember which contact, if any, the form is currently editing.
//! - Route form submissions to `add` or `update` on the repository.
//! - Decide synchronously what a form reset means.
//!
//! # Invariants
//! - State is `Idle` or `Editing(id)`; it starts `Idle`.
//! - A successful submit always ends in `Idle`.
//! - A failed submit never changes the state.
//! - `cancel` is idempotent.

use crate::model::contact::{Contact, ContactFields, ContactId};
use crate::repo::contact_repo::{ContactRepository, RepoResult};
use crate::storage::ContactStore;
use log::debug;

/// Current edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// No contact selected; submissions create contacts.
    #[default]
    Idle,
    /// Submissions update the contact with this id.
    Editing(ContactId),
}

/// Instruction for the form owner after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSignal {
    /// Fill the form with these values.
    Prefill(ContactFields),
    /// Empty the form and its error messages.
    Clear,
}

/// Which repository write a submission performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Added,
    Updated,
}

/// Successful submission result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub mode: SubmitMode,
    pub contact: Contact,
    pub signal: FormSignal,
}

/// Meaning assigned to a form reset event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetAction {
    /// An edit was in progress and has been abandoned.
    CancelledEdit(ContactId),
    /// Nothing was being edited; only validation messages are cleared.
    ClearedErrors,
}

/// Long-lived edit session for one form.
#[derive(Debug, Default)]
pub struct EditSession {
    state: EditState,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn editing_id(&self) -> Option<ContactId> {
        match self.state {
            EditState::Editing(id) => Some(id),
            EditState::Idle => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id().is_some()
    }

    /// Enters edit mode for `contact`, replacing any previous selection.
    pub fn begin_edit(&mut self, contact: &Contact) -> FormSignal {
        self.state = EditState::Editing(contact.id());
        debug!(
            "event=edit_begin module=session status=ok id={}",
            contact.id()
        );
        FormSignal::Prefill(contact.fields())
    }

    /// Submits form values: updates while editing, adds otherwise.
    pub fn submit<S: ContactStore>(
        &mut self,
        repo: &mut ContactRepository<S>,
        fields: &ContactFields,
    ) -> RepoResult<SubmitOutcome> {
        let (mode, contact) = match self.state {
            EditState::Editing(id) => (SubmitMode::Updated, repo.update(id, fields)?),
            EditState::Idle => (SubmitMode::Added, repo.add(fields)?),
        };
        self.state = EditState::Idle;
        Ok(SubmitOutcome {
            mode,
            contact,
            signal: FormSignal::Clear,
        })
    }

    /// Leaves edit mode, discarding unsaved form values.
    pub fn cancel(&mut self) -> FormSignal {
        if let EditState::Editing(id) = self.state {
            debug!("event=edit_cancel module=session status=ok id={id}");
        }
        self.state = EditState::Idle;
        FormSignal::Clear
    }

    /// Handles a form reset: cancels an active edit, else clears errors.
    pub fn reset(&mut self) -> ResetAction {
        match self.state {
            EditState::Editing(id) => {
                self.cancel();
                ResetAction::CancelledEdit(id)
            }
            EditState::Idle => ResetAction::ClearedErrors,
        }
    }
}
