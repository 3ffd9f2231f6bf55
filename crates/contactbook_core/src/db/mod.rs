//! SQLite file behind the persisted contact list.
//!
//! Contact operations never see this module's errors: once a connection is
//! open, reads and writes go through `storage` and surface as
//! `StorageError`. Only opening the file can fail here.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

/// Why the contact database could not be opened.
#[derive(Debug)]
pub enum OpenError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build with a wider `kv_store` layout.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for OpenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "cannot open contact database: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "contact database uses schema v{found}, this build reads up to v{supported}"
            ),
        }
    }
}

impl Error for OpenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for OpenError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
