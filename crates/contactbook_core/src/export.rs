//! JSON export of the contact list.
//!
//! # Invariants
//! - Output is a JSON array indented with two spaces, in book order.
//! - Record fields are exactly `id`, `name`, `email`, `phone`.

use crate::model::contact::ContactRecord;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

/// File name used for downloaded/exported contact lists.
pub const EXPORT_FILE_NAME: &str = "contatos.json";

/// Renders records as a two-space indented JSON array.
pub fn export_json(records: &[ContactRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Writes the export document as `EXPORT_FILE_NAME` inside `dir`.
///
/// Returns the written file path.
pub fn write_export(dir: impl AsRef<Path>, records: &[ContactRecord]) -> io::Result<PathBuf> {
    let document = export_json(records).map_err(io::Error::other)?;
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, document)?;
    info!(
        "event=contacts_export module=export status=ok count={}",
        records.len()
    );
    Ok(path)
}
