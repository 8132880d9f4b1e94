//! Core domain logic for graphmusic.
//! Holds the music model, its repository backends and the use-case service
//! that the GraphQL layer calls into.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, ServerConfig, StorageConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::music::{Music, MusicId, MusicPatch, MusicValidationError};
pub use repo::{
    connect, MongoMusicRepository, MusicLookup, MusicRepository, RepoError, RepoResult,
    SqliteMusicRepository,
};
pub use service::music_service::MusicService;

/// Minimal health check.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
