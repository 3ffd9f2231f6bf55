//! Plain-text rendering of the contact list.

use contactbook_core::{Contact, ContactError};
use std::io::{self, Write};

pub const EMPTY_LIST_MESSAGE: &str = "No contacts found.";

/// Writes one line per contact, or the empty-state message.
pub fn render_list(out: &mut impl Write, contacts: &[&Contact]) -> io::Result<()> {
    if contacts.is_empty() {
        return writeln!(out, "{EMPTY_LIST_MESSAGE}");
    }
    for contact in contacts {
        render_contact(out, contact)?;
    }
    Ok(())
}

pub fn render_contact(out: &mut impl Write, contact: &Contact) -> io::Result<()> {
    writeln!(
        out,
        "{}  {}  <{}>  {}",
        contact.id(),
        contact.name(),
        contact.email(),
        contact.phone()
    )
}

/// Formats a write failure as `<field>: <message>` when it has a field scope.
pub fn describe_error(err: &ContactError) -> String {
    match err.field() {
        Some(field) => format!("{field}: {err}"),
        None => err.to_string(),
    }
}
