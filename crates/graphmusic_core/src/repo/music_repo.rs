//! Music repository contract and error model.
//!
//! # Responsibility
//! - Declare the six persistence operations exposed to the service layer.
//! - Map backend transport failures and semantic misses into `RepoError`.
//!
//! # Invariants
//! - By-name operations affect only the first matching record.
//! - `NotFound` messages start with the document-store wording
//!   `no documents in result`.

use crate::db::DbError;
use crate::model::music::{Music, MusicId, MusicPatch, MusicValidationError};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Filter used by a single-record lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicLookup {
    Name(String),
    Id(MusicId),
}

impl Display for MusicLookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "name=`{name}`"),
            Self::Id(id) => write!(f, "id=`{id}`"),
        }
    }
}

/// Repository error for music persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Record violates model invariants before a write.
    Validation(MusicValidationError),
    /// SQLite backend failure.
    Db(DbError),
    /// MongoDB driver failure (connectivity, write errors, decoding).
    Mongo(mongodb::error::Error),
    /// No record matched the lookup.
    NotFound(MusicLookup),
    /// Persisted record violates model invariants.
    InvalidData(String),
    /// Backend handle cannot be used anymore.
    Unavailable(&'static str),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Stable machine-readable classification.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) | Self::InvalidData(_) => "INVALID_DATA",
            Self::Db(_) | Self::Mongo(_) | Self::Unavailable(_) => "STORAGE_ERROR",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Mongo(err) => write!(f, "{err}"),
            Self::NotFound(lookup) => write!(f, "no documents in result for music {lookup}"),
            Self::InvalidData(message) => write!(f, "invalid persisted music data: {message}"),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Mongo(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<MusicValidationError> for RepoError {
    fn from(value: MusicValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<mongodb::error::Error> for RepoError {
    fn from(value: mongodb::error::Error) -> Self {
        Self::Mongo(value)
    }
}

/// Repository interface for music CRUD operations.
///
/// Implementations are shared across requests, hence `Send + Sync`.
#[async_trait]
pub trait MusicRepository: Send + Sync {
    /// Inserts a record whose id is already populated.
    async fn save(&self, music: &Music) -> RepoResult<()>;
    /// Returns every record in store order. An empty store yields `[]`.
    async fn find_all(&self) -> RepoResult<Vec<Music>>;
    async fn find_by_name(&self, name: &str) -> RepoResult<Music>;
    /// Replaces `name`/`author` of the first match and returns the new state.
    async fn update_by_name(&self, name: &str, patch: &MusicPatch) -> RepoResult<Music>;
    /// Deletes the first match and returns its prior state.
    async fn remove_by_name(&self, name: &str) -> RepoResult<Music>;
    async fn remove_by_id(&self, id: &str) -> RepoResult<Music>;
}
