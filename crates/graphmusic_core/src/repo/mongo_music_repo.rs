//! MongoDB-backed music repository.
//!
//! # Responsibility
//! - Translate repository calls into single-document collection operations.
//! - Keep filter/update document shapes in one place.
//!
//! # Invariants
//! - Records live in the `musics` collection, keyed by `_id`.
//! - Each operation is one atomic driver call; nothing is retried here.

use crate::model::music::{Music, MusicPatch};
use crate::repo::music_repo::{MusicLookup, MusicRepository, RepoError, RepoResult};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};

pub const MUSIC_COLLECTION: &str = "musics";

/// MongoDB-backed music repository.
///
/// Cloning is cheap: the driver collection shares the client connection pool.
#[derive(Clone)]
pub struct MongoMusicRepository {
    collection: Collection<Music>,
}

impl MongoMusicRepository {
    /// Builds a repository over `database.musics` on an existing client.
    pub fn new(client: &Client, database: &str) -> Self {
        Self {
            collection: client.database(database).collection(MUSIC_COLLECTION),
        }
    }

    /// Connects to `uri` and verifies the server answers a `ping`.
    pub async fn connect(uri: &str, database: &str) -> RepoResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        client
            .database(database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(Self::new(&client, database))
    }
}

#[async_trait]
impl MusicRepository for MongoMusicRepository {
    async fn save(&self, music: &Music) -> RepoResult<()> {
        music.validate()?;
        self.collection.insert_one(music).await?;
        Ok(())
    }

    async fn find_all(&self) -> RepoResult<Vec<Music>> {
        let cursor = self.collection.find(doc! {}).await?;
        let musics: Vec<Music> = cursor.try_collect().await?;
        musics.into_iter().map(checked).collect()
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Music> {
        let found = self.collection.find_one(name_filter(name)).await?;
        found_or_not_found(found, MusicLookup::Name(name.to_string()))
    }

    async fn update_by_name(&self, name: &str, patch: &MusicPatch) -> RepoResult<Music> {
        let updated = self
            .collection
            .find_one_and_update(name_filter(name), replace_update(patch))
            .return_document(ReturnDocument::After)
            .await?;
        found_or_not_found(updated, MusicLookup::Name(name.to_string()))
    }

    async fn remove_by_name(&self, name: &str) -> RepoResult<Music> {
        let removed = self.collection.find_one_and_delete(name_filter(name)).await?;
        found_or_not_found(removed, MusicLookup::Name(name.to_string()))
    }

    async fn remove_by_id(&self, id: &str) -> RepoResult<Music> {
        let removed = self.collection.find_one_and_delete(id_filter(id)).await?;
        found_or_not_found(removed, MusicLookup::Id(id.to_string()))
    }
}

fn name_filter(name: &str) -> Document {
    doc! { "name": name }
}

fn id_filter(id: &str) -> Document {
    doc! { "_id": id }
}

fn replace_update(patch: &MusicPatch) -> Document {
    doc! {
        "$set": {
            "name": patch.name.as_str(),
            "author": patch.author.as_str(),
        }
    }
}

fn found_or_not_found(found: Option<Music>, lookup: MusicLookup) -> RepoResult<Music> {
    match found {
        Some(music) => checked(music),
        None => Err(RepoError::NotFound(lookup)),
    }
}

fn checked(music: Music) -> RepoResult<Music> {
    music
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("{err} in {MUSIC_COLLECTION}._id")))?;
    Ok(music)
}
