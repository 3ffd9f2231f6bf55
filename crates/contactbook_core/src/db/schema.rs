//! Layout of the `kv_store` table holding the contact blob.
//!
//! `PRAGMA user_version` records which layout a file was created with. A
//! fresh file (version 0) gets the table in one transaction; a file stamped
//! by a newer build is refused rather than read with the wrong layout.

use super::OpenError;
use log::info;
use rusqlite::Connection;
use std::cmp::Ordering;

/// Layout version this build creates and reads.
pub const KV_SCHEMA_VERSION: u32 = 1;

const KV_STORE_DDL: &str = include_str!("kv_store_v1.sql");

/// Layout version stamped on the open file, `0` for a fresh one.
pub fn stored_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
}

/// Creates the `kv_store` table on a fresh file and stamps its version.
pub fn ensure_kv_schema(conn: &mut Connection) -> Result<(), OpenError> {
    let found = stored_version(conn)?;
    match found.cmp(&KV_SCHEMA_VERSION) {
        Ordering::Equal => Ok(()),
        Ordering::Greater => Err(OpenError::SchemaTooNew {
            found,
            supported: KV_SCHEMA_VERSION,
        }),
        Ordering::Less => {
            let tx = conn.transaction()?;
            tx.execute_batch(KV_STORE_DDL)?;
            tx.pragma_update(None, "user_version", KV_SCHEMA_VERSION)?;
            tx.commit()?;
            info!(
                "event=db_schema module=db status=created from_version={found} to_version={KV_SCHEMA_VERSION}"
            );
            Ok(())
        }
    }
}
