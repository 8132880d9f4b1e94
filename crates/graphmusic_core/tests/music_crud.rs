use graphmusic_core::db::open_db;
use graphmusic_core::{
    connect, Music, MusicLookup, MusicPatch, MusicRepository, MusicService, RepoError,
    SqliteMusicRepository, StorageConfig,
};
use std::collections::HashSet;
use std::sync::Arc;

fn repo() -> SqliteMusicRepository {
    SqliteMusicRepository::open_in_memory().unwrap()
}

#[tokio::test]
async fn save_then_find_by_name_roundtrip() {
    let repo = repo();

    let music = Music::new("Giant Steps", "John Coltrane");
    repo.save(&music).await.unwrap();

    let loaded = repo.find_by_name("Giant Steps").await.unwrap();
    assert_eq!(loaded, music);
    assert!(!loaded.id.is_empty());
}

#[tokio::test]
async fn find_all_on_empty_store_returns_empty_list() {
    let repo = repo();
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn find_all_returns_every_saved_record() {
    let repo = repo();

    let first = Music::new("Naima", "John Coltrane");
    let second = Music::new("Footprints", "Wayne Shorter");
    repo.save(&first).await.unwrap();
    repo.save(&second).await.unwrap();

    let ids: HashSet<_> = repo
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|music| music.id)
        .collect();
    assert_eq!(ids, HashSet::from([first.id, second.id]));
}

#[tokio::test]
async fn find_by_unknown_name_returns_not_found() {
    let repo = repo();
    repo.save(&Music::new("Known", "Someone")).await.unwrap();

    let err = repo.find_by_name("Unknown").await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(MusicLookup::Name(ref name)) if name == "Unknown"));
    assert!(err.to_string().starts_with("no documents in result"));
}

#[tokio::test]
async fn update_by_name_replaces_fields_and_keeps_id() {
    let repo = repo();
    let music = Music::new("X", "original");
    repo.save(&music).await.unwrap();

    let updated = repo
        .update_by_name("X", &MusicPatch::new("Y", "Z"))
        .await
        .unwrap();
    assert_eq!(updated.id, music.id);
    assert_eq!(updated.name, "Y");
    assert_eq!(updated.author, "Z");

    assert_eq!(repo.find_by_name("Y").await.unwrap(), updated);
    assert!(repo.find_by_name("X").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn update_missing_name_returns_not_found() {
    let repo = repo();
    let err = repo
        .update_by_name("ghost", &MusicPatch::new("a", "b"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn remove_by_name_returns_prior_record_and_deletes_it() {
    let repo = repo();
    let keep = Music::new("Keep", "A");
    let gone = Music::new("Drop", "B");
    repo.save(&keep).await.unwrap();
    repo.save(&gone).await.unwrap();

    let removed = repo.remove_by_name("Drop").await.unwrap();
    assert_eq!(removed, gone);

    let remaining = repo.find_all().await.unwrap();
    assert_eq!(remaining, vec![keep]);
    assert!(repo.remove_by_name("Drop").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn remove_by_id_returns_prior_record_and_deletes_it() {
    let repo = repo();
    let music = Music::new("Blue Train", "John Coltrane");
    repo.save(&music).await.unwrap();

    let removed = repo.remove_by_id(&music.id).await.unwrap();
    assert_eq!(removed, music);
    assert!(repo.find_all().await.unwrap().is_empty());

    let err = repo.remove_by_id(&music.id).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(MusicLookup::Id(ref id)) if *id == music.id));
}

#[tokio::test]
async fn remove_by_id_with_malformed_id_is_not_found() {
    let repo = repo();
    assert!(repo.remove_by_id("not-a-uuid").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn by_name_operations_affect_first_inserted_duplicate() {
    let repo = repo();
    let first = Music::new("Dup", "first");
    let second = Music::new("Dup", "second");
    repo.save(&first).await.unwrap();
    repo.save(&second).await.unwrap();

    assert_eq!(repo.find_by_name("Dup").await.unwrap(), first);

    let updated = repo
        .update_by_name("Dup", &MusicPatch::new("Renamed", "first"))
        .await
        .unwrap();
    assert_eq!(updated.id, first.id);
    assert_eq!(repo.find_by_name("Dup").await.unwrap(), second);
}

#[tokio::test]
async fn save_rejects_empty_id_and_duplicate_id() {
    let repo = repo();

    let invalid = Music {
        id: "  ".to_string(),
        name: "n".to_string(),
        author: "a".to_string(),
    };
    assert!(matches!(
        repo.save(&invalid).await.unwrap_err(),
        RepoError::Validation(_)
    ));

    let music = Music::new("Once", "Only");
    repo.save(&music).await.unwrap();
    let err = repo.save(&music).await.unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert_eq!(err.code(), "STORAGE_ERROR");
}

#[tokio::test]
async fn file_backed_repository_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graphmusic.db");

    let music = Music::new("Persisted", "Disk");
    {
        let repo = SqliteMusicRepository::open(&path).unwrap();
        repo.save(&music).await.unwrap();
    }

    let reopened = SqliteMusicRepository::new(open_db(&path).unwrap());
    assert_eq!(reopened.find_by_name("Persisted").await.unwrap(), music);
}

#[tokio::test]
async fn service_generates_distinct_ids_and_wraps_repository_calls() {
    let repo: Arc<dyn MusicRepository> = Arc::new(repo());
    let service = MusicService::new(repo);

    let first = service.add_music("So What", "Miles Davis").await.unwrap();
    let second = service.add_music("So What", "Miles Davis").await.unwrap();
    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id);

    let found = service.find_by_name("So What").await.unwrap();
    assert_eq!(found, first);
    assert_eq!(service.find_all().await.unwrap().len(), 2);

    let updated = service
        .update_by_name("So What", &MusicPatch::new("Freddie Freeloader", "Miles Davis"))
        .await
        .unwrap();
    assert_eq!(updated.id, first.id);

    let removed = service.remove_by_id(&second.id).await.unwrap();
    assert_eq!(removed, second);
    let removed = service.remove_by_name("Freddie Freeloader").await.unwrap();
    assert_eq!(removed, updated);
    assert!(service.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn connect_builds_sqlite_backend_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::Sqlite {
        path: dir.path().join("connect.sqlite3"),
    };

    let repo = connect(&config).await.unwrap();
    let music = Music::new("Blue in Green", "Bill Evans");
    repo.save(&music).await.unwrap();
    assert_eq!(repo.find_by_name("Blue in Green").await.unwrap(), music);

    let reopened = connect(&config).await.unwrap();
    assert_eq!(reopened.find_all().await.unwrap(), vec![music]);
}

#[tokio::test]
async fn connect_reports_unusable_stores() {
    let dir = tempfile::tempdir().unwrap();
    let sqlite = StorageConfig::Sqlite {
        path: dir.path().join("missing").join("music.sqlite3"),
    };
    assert!(matches!(connect(&sqlite).await, Err(RepoError::Db(_))));

    let mongo = StorageConfig::Mongo {
        uri: "not-a-mongo-uri".to_string(),
        database: "graphmusic".to_string(),
    };
    assert!(matches!(connect(&mongo).await, Err(RepoError::Mongo(_))));
}
