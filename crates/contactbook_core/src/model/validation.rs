//! Field normalization and validation rules for contact input.
//!
//! # Responsibility
//! - Normalize one raw field value (name, email, phone) at a time.
//! - Report typed, field-scoped failures the caller can re-prompt on.
//!
//! # Invariants
//! - Validators are pure: no I/O, no shared state.
//! - Every successful output is already trimmed.
//! - Emails are returned lowercased; phones keep their original formatting.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum name length after trimming, in UTF-16 code units.
pub const NAME_MIN_CHARS: usize = 2;
/// Minimum digit count in the digit-only projection of a phone number.
pub const PHONE_MIN_DIGITS: usize = 8;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("valid email regex"));

/// Contact input field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl Field {
    /// Stable lowercase label, matching form input names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Value is blank after trimming.
    EmptyField,
    /// Value is shorter than the field minimum.
    TooShort,
    /// Value does not match the expected shape.
    InvalidFormat,
}

/// Field-scoped validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: Field, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.field, self.kind) {
            (Field::Name, FieldErrorKind::EmptyField) => write!(f, "name is required"),
            (Field::Name, FieldErrorKind::TooShort) => write!(
                f,
                "name is too short (minimum {NAME_MIN_CHARS} characters)"
            ),
            (Field::Name, FieldErrorKind::InvalidFormat) => write!(f, "name is invalid"),
            (Field::Email, _) => write!(f, "email is invalid"),
            (Field::Phone, _) => write!(
                f,
                "phone is invalid (at least {PHONE_MIN_DIGITS} digits required)"
            ),
        }
    }
}

impl Error for FieldError {}

/// Trims a display name and enforces the minimum length.
pub fn validate_name(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(Field::Name, FieldErrorKind::EmptyField));
    }
    if trimmed.encode_utf16().count() < NAME_MIN_CHARS {
        return Err(FieldError::new(Field::Name, FieldErrorKind::TooShort));
    }
    Ok(trimmed.to_string())
}

/// Trims and lowercases an email after checking `local@domain.tld` shape.
///
/// A blank value fails with `InvalidFormat`, the same as any other
/// non-matching input.
pub fn validate_email(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if !EMAIL_RE.is_match(trimmed) {
        return Err(FieldError::new(Field::Email, FieldErrorKind::InvalidFormat));
    }
    Ok(trimmed.to_lowercase())
}

/// Checks the digit count of a phone number and returns the trimmed original.
///
/// Spaces, parentheses, hyphens and a leading `+` are kept verbatim.
pub fn validate_phone(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if digit_count(trimmed) < PHONE_MIN_DIGITS {
        return Err(FieldError::new(Field::Phone, FieldErrorKind::InvalidFormat));
    }
    Ok(trimmed.to_string())
}

/// Counts ASCII digits in the value.
pub fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}
