//! Opening the contact database.
//!
//! # Invariants
//! - A returned connection already has the `kv_store` table.
//! - Concurrent writers wait up to `BUSY_TIMEOUT` instead of failing fast.

use super::schema::ensure_kv_schema;
use super::OpenError;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating when missing) the contact database file at `path`.
pub fn open_db(path: impl AsRef<Path>) -> Result<Connection, OpenError> {
    open_with("file", || Connection::open(path))
}

/// Opens a throwaway in-memory contact database.
pub fn open_db_in_memory() -> Result<Connection, OpenError> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> Result<Connection, OpenError> {
    let started_at = Instant::now();
    let result = connect()
        .map_err(OpenError::from)
        .and_then(|mut conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            ensure_kv_schema(&mut conn)?;
            Ok(conn)
        });

    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=db_open module=db status=ok mode={mode} duration_ms={duration_ms}"),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={duration_ms} error={err}"
        ),
    }
    result
}
