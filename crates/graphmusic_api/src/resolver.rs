//! Query and mutation resolvers.
//!
//! # Responsibility
//! - Map each GraphQL field onto one `MusicService` call.
//! - Convert repository errors into GraphQL errors carrying a `code`
//!   extension.
//!
//! # Invariants
//! - Arguments are non-null; missing or mistyped arguments fail GraphQL
//!   validation before any resolver runs.
//! - `addMusic` never accepts an id from the caller.

use crate::schema::SharedMusicService;
use crate::types::{MusicInput, MusicObject};
use async_graphql::{Context, Error, ErrorExtensions, Object, Result};
use graphmusic_core::{MusicPatch, RepoError};

/// Read-only root (`RootQuery`).
pub struct QueryRoot;

#[Object(name = "RootQuery")]
impl QueryRoot {
    /// Every stored record, in store order.
    async fn find_all(&self, ctx: &Context<'_>) -> Result<Vec<MusicObject>> {
        let musics = service(ctx)?.find_all().await.map_err(to_graphql_error)?;
        Ok(musics.into_iter().map(MusicObject::from).collect())
    }

    /// First record whose name matches exactly.
    async fn find_by_name(&self, ctx: &Context<'_>, name: String) -> Result<MusicObject> {
        service(ctx)?
            .find_by_name(&name)
            .await
            .map(MusicObject::from)
            .map_err(to_graphql_error)
    }
}

/// Write root (`RootMutation`).
pub struct MutationRoot;

#[Object(name = "RootMutation")]
impl MutationRoot {
    /// Stores a new record under a freshly generated id.
    async fn add_music(
        &self,
        ctx: &Context<'_>,
        name: String,
        author: String,
    ) -> Result<MusicObject> {
        service(ctx)?
            .add_music(name, author)
            .await
            .map(MusicObject::from)
            .map_err(to_graphql_error)
    }

    /// Deletes the first record named `name` and returns it.
    async fn remove_by_name(&self, ctx: &Context<'_>, name: String) -> Result<MusicObject> {
        service(ctx)?
            .remove_by_name(&name)
            .await
            .map(MusicObject::from)
            .map_err(to_graphql_error)
    }

    /// Deletes the record with `id` and returns it.
    async fn remove_by_id(&self, ctx: &Context<'_>, id: String) -> Result<MusicObject> {
        service(ctx)?
            .remove_by_id(&id)
            .await
            .map(MusicObject::from)
            .map_err(to_graphql_error)
    }

    /// Replaces name and author of the first record named `name`.
    async fn update_by_name(
        &self,
        ctx: &Context<'_>,
        name: String,
        music: MusicInput,
    ) -> Result<MusicObject> {
        let patch = MusicPatch::from(music);
        service(ctx)?
            .update_by_name(&name, &patch)
            .await
            .map(MusicObject::from)
            .map_err(to_graphql_error)
    }
}

fn service<'a>(ctx: &Context<'a>) -> Result<&'a SharedMusicService> {
    ctx.data::<SharedMusicService>()
}

fn to_graphql_error(err: RepoError) -> Error {
    let code = err.code();
    Error::new(err.to_string()).extend_with(|_, extensions| extensions.set("code", code))
}
