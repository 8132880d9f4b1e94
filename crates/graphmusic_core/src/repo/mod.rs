//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage-agnostic `MusicRepository` contract.
//! - Provide MongoDB and SQLite backends behind that contract.
//! - Build the configured backend as a shared trait object.
//!
//! # Invariants
//! - Every operation touches at most one record.
//! - Lookups that match nothing return `RepoError::NotFound`, never `Ok`.

pub mod mongo_music_repo;
pub mod music_repo;
pub mod sqlite_music_repo;

use crate::config::StorageConfig;
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;

pub use mongo_music_repo::{MongoMusicRepository, MUSIC_COLLECTION};
pub use music_repo::{MusicLookup, MusicRepository, RepoError, RepoResult};
pub use sqlite_music_repo::SqliteMusicRepository;

/// Opens the backend described by `config`.
///
/// # Side effects
/// - Mongo: connects and pings the server, so an unreachable store fails here.
/// - SQLite: opens the file and creates the `musics` table if missing.
/// - Emits `store_connect` logging events.
pub async fn connect(config: &StorageConfig) -> RepoResult<Arc<dyn MusicRepository>> {
    let started_at = Instant::now();
    let backend = config.backend_name();
    info!("event=store_connect module=repo status=start backend={backend}");

    let result: RepoResult<Arc<dyn MusicRepository>> = match config {
        StorageConfig::Mongo { uri, database } => MongoMusicRepository::connect(uri, database)
            .await
            .map(|repo| Arc::new(repo) as Arc<dyn MusicRepository>),
        StorageConfig::Sqlite { path } => SqliteMusicRepository::open(path)
            .map(|repo| Arc::new(repo) as Arc<dyn MusicRepository>),
    };

    match &result {
        Ok(_) => info!(
            "event=store_connect module=repo status=ok backend={backend} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=store_connect module=repo status=error backend={backend} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }

    result
}
