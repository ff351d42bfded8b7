//! Integration tests for the album, song and user entity slices


use encore_core::{types::*, CatalogError};
use test_helpers::*;

#[tokio::test]
async fn test_album_detail_includes_its_songs() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let album_id = create_test_album(pool, "Debut", 2019).await;
    create_test_song(pool, "Opener", "Band", Some(album_id.clone())).await;
    create_test_song(pool, "Closer", "Band", Some(album_id.clone())).await;
    create_test_song(pool, "Elsewhere", "Other", None).await;

    let detail = encore_storage::albums::get_by_id(pool, &album_id)
        .await
        .unwrap();

    assert_eq!(detail.name, "Debut");
    assert_eq!(detail.year, 2019);
    assert_eq!(detail.songs.len(), 2);
}

#[tokio::test]
async fn test_album_update_and_delete() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let album_id = create_test_album(pool, "Draft", 2000).await;

    encore_storage::albums::update(
        pool,
        &album_id,
        UpdateAlbum {
            name: "Final".to_string(),
            year: 2001,
        },
    )
    .await
    .unwrap();

    let detail = encore_storage::albums::get_by_id(pool, &album_id)
        .await
        .unwrap();
    assert_eq!(detail.name, "Final");
    assert_eq!(detail.year, 2001);

    encore_storage::albums::delete(pool, &album_id).await.unwrap();

    let err = encore_storage::albums::get_by_id(pool, &album_id)
        .await
        .expect_err("Album should be gone");
    assert!(matches!(err, CatalogError::NotFound { .. }));
}

#[tokio::test]
async fn test_album_delete_cascades_songs_and_likes() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "fan").await;
    let album_id = create_test_album(pool, "Debut", 2019).await;
    let song_id = create_test_song(pool, "Opener", "Band", Some(album_id.clone())).await;

    let cache = encore_storage::cache::MemoryCountCache::default();
    encore_storage::likes::toggle_like(pool, &cache, &album_id, &user)
        .await
        .unwrap();

    encore_storage::albums::delete(pool, &album_id).await.unwrap();

    let err = encore_storage::songs::get_by_id(pool, &song_id)
        .await
        .expect_err("Song should cascade with its album");
    assert!(matches!(err, CatalogError::NotFound { .. }));

    let likes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM album_likes WHERE album_id = ?")
        .bind(&album_id)
        .fetch_one(pool)
        .await
        .unwrap();
    assert_eq!(likes, 0);
}

#[tokio::test]
async fn test_update_missing_album_is_not_found() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let err = encore_storage::albums::update(
        pool,
        &AlbumId::new("album-nope"),
        UpdateAlbum {
            name: "x".to_string(),
            year: 1999,
        },
    )
    .await
    .expect_err("Nothing to update");

    assert!(matches!(err, CatalogError::NotFound { .. }));
}

#[tokio::test]
async fn test_song_round_trip() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let song_id = encore_storage::songs::create(
        pool,
        CreateSong {
            title: "Single".to_string(),
            year: 2022,
            genre: "pop".to_string(),
            performer: "Solo".to_string(),
            duration: None,
            album_id: None,
        },
    )
    .await
    .unwrap();

    let song = encore_storage::songs::get_by_id(pool, &song_id).await.unwrap();
    assert_eq!(song.title, "Single");
    assert_eq!(song.duration, None);
    assert_eq!(song.album_id, None);
}

#[tokio::test]
async fn test_song_search_filters_combine() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_song(pool, "Cold Morning", "North", None).await;
    create_test_song(pool, "Cold Evening", "South", None).await;
    create_test_song(pool, "Warm Evening", "North", None).await;

    let by_title = encore_storage::songs::search(
        pool,
        &SongFilter {
            title: Some("Cold".to_string()),
            performer: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(by_title.len(), 2);

    let by_both = encore_storage::songs::search(
        pool,
        &SongFilter {
            title: Some("Cold".to_string()),
            performer: Some("North".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(by_both.len(), 1);
    assert_eq!(by_both[0].title, "Cold Morning");

    let all = encore_storage::songs::search(pool, &SongFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "taken").await;

    let err = encore_storage::users::create(
        pool,
        CreateUser {
            username: "taken".to_string(),
            fullname: "Someone Else".to_string(),
        },
    )
    .await
    .expect_err("Username is unique");

    assert!(matches!(err, CatalogError::Duplicate(_)));
}

#[tokio::test]
async fn test_username_lookup() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user_id = create_test_user(pool, "melody").await;

    let username = encore_storage::users::get_username(pool, &user_id)
        .await
        .unwrap();
    assert_eq!(username, "melody");

    let err = encore_storage::users::get_username(pool, &UserId::new("user-nope"))
        .await
        .expect_err("Missing user");
    assert!(matches!(err, CatalogError::NotFound { .. }));
}
