//! `musics` table definition.
//!
//! `PRAGMA user_version` is `0` on a fresh file and [`SCHEMA_VERSION`] once
//! the table exists.

use super::{DbError, DbResult};
use rusqlite::Connection;

/// Schema version written by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const MUSICS_SQL: &str = include_str!("musics.sql");

/// Creates the `musics` table on a fresh database, or accepts an existing one
/// already at [`SCHEMA_VERSION`].
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    match found {
        SCHEMA_VERSION => Ok(()),
        0 => {
            let tx = conn.transaction()?;
            tx.execute_batch(MUSICS_SQL)?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            tx.commit()?;
            Ok(())
        }
        newer => Err(DbError::SchemaTooNew {
            found: newer,
            supported: SCHEMA_VERSION,
        }),
    }
}
