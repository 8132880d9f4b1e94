//! SQLite-backed music repository.
//!
//! # Responsibility
//! - Store music documents in the `musics` table of an embedded database.
//! - Mirror document-store semantics: first match wins, deletes return the
//!   prior record.
//!
//! # Invariants
//! - "First match" means lowest `rowid` (insertion order).
//! - Read-modify-write operations run inside one transaction.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::{open_db, open_db_in_memory};
use crate::model::music::{Music, MusicPatch};
use crate::repo::music_repo::{MusicLookup, MusicRepository, RepoError, RepoResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const MUSIC_SELECT_SQL: &str = "SELECT id, name, author FROM musics";

/// SQLite-backed music repository.
///
/// Owns one connection; concurrent callers are serialized by a mutex.
pub struct SqliteMusicRepository {
    conn: Mutex<Connection>,
}

impl SqliteMusicRepository {
    /// Wraps a connection that already went through `db::open_db*`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RepoError::Unavailable("sqlite connection lock poisoned"))
    }
}

#[async_trait]
impl MusicRepository for SqliteMusicRepository {
    async fn save(&self, music: &Music) -> RepoResult<()> {
        music.validate()?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO musics (id, name, author) VALUES (?1, ?2, ?3);",
            params![music.id, music.name, music.author],
        )?;

        Ok(())
    }

    async fn find_all(&self) -> RepoResult<Vec<Music>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{MUSIC_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut musics = Vec::new();

        while let Some(row) = rows.next()? {
            musics.push(parse_music_row(row)?);
        }

        Ok(musics)
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Music> {
        let lookup = MusicLookup::Name(name.to_string());
        let conn = self.lock()?;
        select_first(&conn, &lookup)?.ok_or(RepoError::NotFound(lookup))
    }

    async fn update_by_name(&self, name: &str, patch: &MusicPatch) -> RepoResult<Music> {
        let lookup = MusicLookup::Name(name.to_string());
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let Some(mut music) = select_first(&tx, &lookup)? else {
            return Err(RepoError::NotFound(lookup));
        };
        tx.execute(
            "UPDATE musics SET name = ?1, author = ?2 WHERE id = ?3;",
            params![patch.name, patch.author, music.id],
        )?;
        tx.commit()?;

        music.apply(patch);
        Ok(music)
    }

    async fn remove_by_name(&self, name: &str) -> RepoResult<Music> {
        self.remove_first(MusicLookup::Name(name.to_string()))
    }

    async fn remove_by_id(&self, id: &str) -> RepoResult<Music> {
        self.remove_first(MusicLookup::Id(id.to_string()))
    }
}

impl SqliteMusicRepository {
    fn remove_first(&self, lookup: MusicLookup) -> RepoResult<Music> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let Some(music) = select_first(&tx, &lookup)? else {
            return Err(RepoError::NotFound(lookup));
        };
        tx.execute("DELETE FROM musics WHERE id = ?1;", [music.id.as_str()])?;
        tx.commit()?;

        Ok(music)
    }
}

fn select_first(conn: &Connection, lookup: &MusicLookup) -> RepoResult<Option<Music>> {
    let (clause, value) = match lookup {
        MusicLookup::Name(name) => ("WHERE name = ?1 ORDER BY rowid ASC LIMIT 1", name),
        MusicLookup::Id(id) => ("WHERE id = ?1", id),
    };

    let mut stmt = conn.prepare(&format!("{MUSIC_SELECT_SQL} {clause};"))?;
    let mut rows = stmt.query([value.as_str()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_music_row(row)?));
    }

    Ok(None)
}

fn parse_music_row(row: &Row<'_>) -> RepoResult<Music> {
    let id: String = row.get("id")?;
    let name: String = row.get("name")?;
    let author: String = row.get("author")?;

    Music::with_id(id, name, author)
        .map_err(|err| RepoError::InvalidData(format!("{err} in musics.id")))
}
