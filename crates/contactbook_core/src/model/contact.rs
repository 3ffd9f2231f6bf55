//! Contact domain entity.
//!
//! # Responsibility
//! - Own one person's contact data behind validated constructors/mutators.
//! - Convert to and from the plain `ContactRecord` wire shape.
//!
//! # Invariants
//! - `id` is stable and never reused for another contact.
//! - A `Contact` value never holds a field that fails its validator.
//! - A failed field mutation leaves every field unchanged.

use crate::model::validation::{validate_email, validate_name, validate_phone, FieldError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one contact.
pub type ContactId = Uuid;

/// Raw, unvalidated contact input as produced by a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ContactFields {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// Plain serialized contact used for persistence and export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Failure to rebuild a contact from a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Stored id is the nil UUID.
    NilId,
    /// A stored field no longer passes validation.
    Field(FieldError),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "contact id must not be nil"),
            Self::Field(err) => write!(f, "invalid stored {}: {err}", err.field),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NilId => None,
            Self::Field(err) => Some(err),
        }
    }
}

impl From<FieldError> for RecordError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

/// Validated contact entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id: ContactId,
    name: String,
    email: String,
    phone: String,
}

impl Contact {
    /// Validates all fields and creates a contact with a fresh id.
    ///
    /// Fields are checked in the order name, email, phone; the first failure
    /// is returned and no contact is created.
    pub fn new(fields: &ContactFields) -> Result<Self, FieldError> {
        Self::build(Uuid::new_v4(), fields)
    }

    /// Rebuilds a contact from a stored record, keeping its id.
    ///
    /// Used by load/import paths where identity already exists.
    pub fn from_record(record: ContactRecord) -> Result<Self, RecordError> {
        if record.id.is_nil() {
            return Err(RecordError::NilId);
        }
        let fields = ContactFields {
            name: record.name,
            email: record.email,
            phone: record.phone,
        };
        Ok(Self::build(record.id, &fields)?)
    }

    fn build(id: ContactId, fields: &ContactFields) -> Result<Self, FieldError> {
        let name = validate_name(&fields.name)?;
        let email = validate_email(&fields.email)?;
        let phone = validate_phone(&fields.phone)?;
        Ok(Self {
            id,
            name,
            email,
            phone,
        })
    }

    pub fn id(&self) -> ContactId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized (lowercase) email.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Current values in form-input shape, used to prefill edits.
    pub fn fields(&self) -> ContactFields {
        ContactFields::new(self.name.as_str(), self.email.as_str(), self.phone.as_str())
    }

    pub fn set_name(&mut self, raw: &str) -> Result<(), FieldError> {
        self.name = validate_name(raw)?;
        Ok(())
    }

    pub fn set_email(&mut self, raw: &str) -> Result<(), FieldError> {
        self.email = validate_email(raw)?;
        Ok(())
    }

    pub fn set_phone(&mut self, raw: &str) -> Result<(), FieldError> {
        self.phone = validate_phone(raw)?;
        Ok(())
    }

    /// Case-insensitive substring match on name or email.
    ///
    /// `term` must already be trimmed and lowercased.
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term) || self.email.contains(term)
    }

    pub fn to_record(&self) -> ContactRecord {
        ContactRecord {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}
