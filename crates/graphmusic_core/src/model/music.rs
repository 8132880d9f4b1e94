//! Music domain model.
//!
//! # Responsibility
//! - Define the record persisted in the `musics` collection/table.
//! - Generate stable identifiers for new records.
//!
//! # Invariants
//! - `id` is non-empty and is generated server-side for new records.
//! - `id` is serialized as `_id` to match document-store naming.
//! - `name` is a lookup key but is not guaranteed to be unique.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a music record.
///
/// Kept as a string alias: ids are opaque to callers and by-id lookups accept
/// arbitrary text (a malformed id is simply not found).
pub type MusicId = String;

/// Validation error for music model invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicValidationError {
    /// Music id cannot be empty.
    EmptyId,
}

impl Display for MusicValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "music id cannot be empty"),
        }
    }
}

impl Error for MusicValidationError {}

/// Canonical music record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Music {
    /// Opaque unique id, stored as the document `_id`.
    #[serde(rename = "_id")]
    pub id: MusicId,
    /// Display name, used by by-name lookups.
    pub name: String,
    /// Free-text author attribution.
    pub author: String,
}

impl Music {
    /// Creates a new record with a freshly generated UUID v4 id.
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            author: author.into(),
        }
    }

    /// Creates a record with a caller-provided id.
    ///
    /// Used by storage read paths where identity already exists.
    ///
    /// # Errors
    /// - Returns `MusicValidationError::EmptyId` for an empty or blank id.
    pub fn with_id(
        id: impl Into<MusicId>,
        name: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<Self, MusicValidationError> {
        let music = Self {
            id: id.into(),
            name: name.into(),
            author: author.into(),
        };
        music.validate()?;
        Ok(music)
    }

    /// Validates model invariants.
    pub fn validate(&self) -> Result<(), MusicValidationError> {
        if self.id.trim().is_empty() {
            return Err(MusicValidationError::EmptyId);
        }
        Ok(())
    }

    /// Replaces `name` and `author`, keeping `id`.
    pub fn apply(&mut self, patch: &MusicPatch) {
        self.name = patch.name.clone();
        self.author = patch.author.clone();
    }
}

/// Replacement payload for update-by-name.
///
/// Both fields are written; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicPatch {
    pub name: String,
    pub author: String,
}

impl MusicPatch {
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
        }
    }
}
