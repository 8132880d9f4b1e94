//! Schema assembly.

use crate::resolver::{MutationRoot, QueryRoot};
use async_graphql::{EmptySubscription, Schema};
use graphmusic_core::{MusicRepository, MusicService};

/// Service handle stored in the schema context.
pub type SharedMusicService = MusicService<dyn MusicRepository>;

/// Executable schema type.
pub type MusicSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with `service` available to every resolver.
pub fn build_schema(service: SharedMusicService) -> MusicSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}
