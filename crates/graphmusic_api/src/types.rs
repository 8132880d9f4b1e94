//! GraphQL object and input types.

use async_graphql::{InputObject, SimpleObject};
use graphmusic_core::{Music, MusicPatch};

/// GraphQL projection of a stored music record.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "Music")]
pub struct MusicObject {
    pub id: String,
    pub name: String,
    pub author: String,
}

impl From<Music> for MusicObject {
    fn from(music: Music) -> Self {
        Self {
            id: music.id,
            name: music.name,
            author: music.author,
        }
    }
}

/// Replacement payload accepted by `updateByName`.
#[derive(Debug, Clone, PartialEq, Eq, InputObject)]
#[graphql(name = "InputMusic")]
pub struct MusicInput {
    pub name: String,
    pub author: String,
}

impl From<MusicInput> for MusicPatch {
    fn from(input: MusicInput) -> Self {
        MusicPatch::new(input.name, input.author)
    }
}
