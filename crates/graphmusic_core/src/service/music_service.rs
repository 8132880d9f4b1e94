//! Music use-case service.
//!
//! # Responsibility
//! - Provide one entry point per GraphQL field.
//! - Generate ids for new records.
//! - Emit one structured log event per operation.
//!
//! # Invariants
//! - Callers never supply ids for new records.
//! - Repository results and errors are passed through unchanged.

use crate::logging::sanitize_message;
use crate::model::music::{Music, MusicPatch};
use crate::repo::music_repo::{MusicRepository, RepoError, RepoResult};
use log::{debug, error, warn};
use std::sync::Arc;

const MAX_LOGGED_ARG_CHARS: usize = 64;

/// Use-case service wrapper for music CRUD operations.
///
/// Generic over the repository so tests and callers can pass either a
/// concrete backend or `dyn MusicRepository`.
pub struct MusicService<R: MusicRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: MusicRepository + ?Sized> Clone for MusicService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: MusicRepository + ?Sized> MusicService<R> {
    /// Creates a service over a shared repository handle.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Creates a record with a freshly generated id and returns it.
    pub async fn add_music(
        &self,
        name: impl Into<String>,
        author: impl Into<String>,
    ) -> RepoResult<Music> {
        let music = Music::new(name, author);
        let detail = format!("id={}", music.id);
        let result = self.repo.save(&music).await.map(|()| music);
        log_outcome("music_save", &detail, &result);
        result
    }

    /// Lists every record in store order.
    pub async fn find_all(&self) -> RepoResult<Vec<Music>> {
        let result = self.repo.find_all().await;
        let detail = match &result {
            Ok(musics) => format!("count={}", musics.len()),
            Err(_) => String::new(),
        };
        log_outcome("music_find_all", &detail, &result);
        result
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Music> {
        let result = self.repo.find_by_name(name).await;
        log_outcome("music_find_by_name", &name_label(name), &result);
        result
    }

    /// Replaces `name`/`author` of the first record named `name`.
    pub async fn update_by_name(&self, name: &str, patch: &MusicPatch) -> RepoResult<Music> {
        let result = self.repo.update_by_name(name, patch).await;
        log_outcome("music_update_by_name", &name_label(name), &result);
        result
    }

    pub async fn remove_by_name(&self, name: &str) -> RepoResult<Music> {
        let result = self.repo.remove_by_name(name).await;
        log_outcome("music_remove_by_name", &name_label(name), &result);
        result
    }

    pub async fn remove_by_id(&self, id: &str) -> RepoResult<Music> {
        let result = self.repo.remove_by_id(id).await;
        log_outcome(
            "music_remove_by_id",
            &format!("id={}", sanitize_message(id, MAX_LOGGED_ARG_CHARS)),
            &result,
        );
        result
    }
}

fn name_label(name: &str) -> String {
    format!("name={}", sanitize_message(name, MAX_LOGGED_ARG_CHARS))
}

fn log_outcome<T>(event: &str, detail: &str, result: &RepoResult<T>) {
    match result {
        Ok(_) => debug!("event={event} module=service status=ok {detail}"),
        Err(err @ RepoError::NotFound(_)) => warn!(
            "event={event} module=service status=not_found {detail} error={}",
            sanitize_message(&err.to_string(), MAX_LOGGED_ARG_CHARS * 2)
        ),
        Err(err) => error!(
            "event={event} module=service status=error error_code={} {detail} error={}",
            err.code(),
            err
        ),
    }
}
