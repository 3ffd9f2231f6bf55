//! In-memory contact collection with persistence triggers.
//!
//! # Responsibility
//! - Own the ordered contact list for one application session.
//! - Enforce email deduplication and all-or-nothing updates.
//! - Push the full list to the `ContactStore` after every mutation.
//!
//! # Invariants
//! - No two contacts share a normalized email or an id.
//! - Insertion order is display and export order.
//! - A failed `update` leaves the target contact unchanged.
//! - Persistence failures are logged and never undo an in-memory mutation.

use crate::model::contact::{Contact, ContactFields, ContactId, ContactRecord};
use crate::model::validation::{validate_email, Field, FieldError};
use crate::storage::ContactStore;
use log::{debug, error, info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Name of the contact seeded into an empty book.
pub const DEFAULT_CONTACT_NAME: &str = "VALDEILSON BEZERRA DE LIMA";
/// Email of the contact seeded into an empty book.
pub const DEFAULT_CONTACT_EMAIL: &str = "valdeilsonbdl56@gmail.com";
/// Phone of the contact seeded into an empty book.
pub const DEFAULT_CONTACT_PHONE: &str = "83991967945";

pub type RepoResult<T> = Result<T, ContactError>;

/// Recoverable failure of a repository write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    Validation(FieldError),
    /// Another contact already holds this normalized email.
    DuplicateEmail(String),
    NotFound(ContactId),
}

impl ContactError {
    /// Form field the failure should be reported against, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Validation(err) => Some(err.field),
            Self::DuplicateEmail(_) => Some(Field::Email),
            Self::NotFound(_) => None,
        }
    }
}

impl Display for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => write!(f, "email already registered: {email}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
        }
    }
}

impl Error for ContactError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for ContactError {
    fn from(value: FieldError) -> Self {
        Self::Validation(value)
    }
}

/// Input for the contact seeded into an empty book.
pub fn default_contact_fields() -> ContactFields {
    ContactFields::new(
        DEFAULT_CONTACT_NAME,
        DEFAULT_CONTACT_EMAIL,
        DEFAULT_CONTACT_PHONE,
    )
}

/// Ordered contact collection bound to one persistence store.
pub struct ContactRepository<S: ContactStore> {
    contacts: Vec<Contact>,
    store: S,
}

impl<S: ContactStore> ContactRepository<S> {
    /// Loads stored contacts, seeding the default contact when none survive.
    ///
    /// Stored items that fail to decode or validate, or that repeat an id or
    /// email already loaded, are skipped and logged. A failed seed is logged
    /// and the repository starts empty.
    pub fn load(store: S) -> Self {
        let items = store.load();
        let total = items.len();
        let mut repo = Self {
            contacts: Vec::with_capacity(total),
            store,
        };

        let mut skipped = 0usize;
        for (index, item) in items.into_iter().enumerate() {
            match decode_item(item) {
                Ok(contact) => {
                    if let Some(reason) = repo.conflict_reason(&contact) {
                        warn!(
                            "event=contact_record_skip module=repo status=skipped index={index} id={} reason={reason}",
                            contact.id()
                        );
                        skipped += 1;
                        continue;
                    }
                    repo.contacts.push(contact);
                }
                Err(reason) => {
                    warn!(
                        "event=contact_record_skip module=repo status=skipped index={index} reason={reason}"
                    );
                    skipped += 1;
                }
            }
        }

        info!(
            "event=contacts_load module=repo status=ok stored={total} loaded={} skipped={skipped}",
            repo.contacts.len()
        );

        if repo.contacts.is_empty() {
            repo.seed_default();
        }
        repo
    }

    fn seed_default(&mut self) {
        match Contact::new(&default_contact_fields()) {
            Ok(contact) => {
                info!(
                    "event=contact_seed module=repo status=ok id={}",
                    contact.id()
                );
                self.contacts.push(contact);
                self.persist("seed");
            }
            Err(err) => {
                error!("event=contact_seed module=repo status=error error={err}");
            }
        }
    }

    /// Validates and appends a new contact.
    ///
    /// The duplicate check runs on the normalized candidate email before the
    /// entity is built.
    pub fn add(&mut self, fields: &ContactFields) -> RepoResult<Contact> {
        if let Ok(email) = validate_email(&fields.email) {
            if self.email_taken(&email, None) {
                debug!("event=contact_add module=repo status=rejected error_code=duplicate_email");
                return Err(ContactError::DuplicateEmail(email));
            }
        }

        let contact = Contact::new(fields).map_err(|err| {
            debug!(
                "event=contact_add module=repo status=rejected error_code=invalid_field field={}",
                err.field
            );
            err
        })?;
        self.contacts.push(contact.clone());
        info!(
            "event=contact_add module=repo status=ok id={} count={}",
            contact.id(),
            self.contacts.len()
        );
        self.persist("add");
        Ok(contact)
    }

    /// Replaces all three fields of an existing contact.
    ///
    /// On any validation failure the contact is restored to its prior state.
    pub fn update(&mut self, id: ContactId, fields: &ContactFields) -> RepoResult<Contact> {
        let index = self.position(id).ok_or(ContactError::NotFound(id))?;

        if let Ok(email) = validate_email(&fields.email) {
            if self.email_taken(&email, Some(id)) {
                debug!(
                    "event=contact_update module=repo status=rejected id={id} error_code=duplicate_email"
                );
                return Err(ContactError::DuplicateEmail(email));
            }
        }

        let contact = &mut self.contacts[index];
        let snapshot = contact.clone();
        if let Err(err) = apply_fields(contact, fields) {
            *contact = snapshot;
            debug!(
                "event=contact_update module=repo status=rejected id={id} error_code=invalid_field field={}",
                err.field
            );
            return Err(err.into());
        }
        let updated = contact.clone();

        info!("event=contact_update module=repo status=ok id={id}");
        self.persist("update");
        Ok(updated)
    }

    /// Removes the contact with `id`. Returns `false` when absent.
    pub fn remove(&mut self, id: ContactId) -> bool {
        let Some(index) = self.position(id) else {
            debug!("event=contact_remove module=repo status=noop id={id}");
            return false;
        };
        self.contacts.remove(index);
        info!(
            "event=contact_remove module=repo status=ok id={id} count={}",
            self.contacts.len()
        );
        self.persist("remove");
        true
    }

    /// Empties the collection and erases persisted storage.
    pub fn clear(&mut self) {
        let removed = self.contacts.len();
        self.contacts.clear();
        match self.store.clear() {
            Ok(()) => info!("event=contacts_clear module=repo status=ok removed={removed}"),
            Err(err) => warn!(
                "event=contacts_clear module=repo status=error removed={removed} error_code=storage_clear_failed error={err}"
            ),
        }
    }

    pub fn find_by_id(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id() == id)
    }

    /// Returns contacts whose name or email contains `filter`, ignoring case.
    ///
    /// A blank filter returns every contact. Repository order is preserved.
    pub fn list(&self, filter: &str) -> Vec<&Contact> {
        let term = filter.trim().to_lowercase();
        if term.is_empty() {
            return self.contacts.iter().collect();
        }
        self.contacts
            .iter()
            .filter(|contact| contact.matches(&term))
            .collect()
    }

    pub fn to_records(&self) -> Vec<ContactRecord> {
        self.contacts.iter().map(Contact::to_record).collect()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    fn position(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|contact| contact.id() == id)
    }

    fn email_taken(&self, email: &str, except: Option<ContactId>) -> bool {
        self.contacts
            .iter()
            .any(|contact| contact.email() == email && Some(contact.id()) != except)
    }

    fn conflict_reason(&self, contact: &Contact) -> Option<&'static str> {
        if self.position(contact.id()).is_some() {
            Some("duplicate_id")
        } else if self.email_taken(contact.email(), None) {
            Some("duplicate_email")
        } else {
            None
        }
    }

    fn persist(&self, trigger: &'static str) {
        match self.store.save(&self.to_records()) {
            Ok(()) => debug!(
                "event=contacts_persist module=repo status=ok trigger={trigger} count={}",
                self.contacts.len()
            ),
            Err(err) => warn!(
                "event=contacts_persist module=repo status=error trigger={trigger} error_code=storage_save_failed error={err}"
            ),
        }
    }
}

fn decode_item(item: Value) -> Result<Contact, String> {
    // serde messages may echo stored values; log only the category.
    let record = serde_json::from_value::<ContactRecord>(item)
        .map_err(|err| format!("malformed_record ({:?})", err.classify()))?;
    Contact::from_record(record).map_err(|err| format!("invalid_record ({err})"))
}

fn apply_fields(contact: &mut Contact, fields: &ContactFields) -> Result<(), FieldError> {
    contact.set_name(&fields.name)?;
    contact.set_email(&fields.email)?;
    contact.set_phone(&fields.phone)?;
    Ok(())
}
