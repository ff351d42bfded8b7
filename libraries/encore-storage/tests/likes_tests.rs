//! Integration tests for the like toggle and its cache-aside count
//!
//! Covers the toggle round-trip law, invalidation on every toggle,
//! cache-hit stability, best-effort cache population, and the
//! storage-level uniqueness backstop for concurrent toggles.


use async_trait::async_trait;
use encore_core::{AlbumId, CatalogError, CountOrigin, LikeToggle};
use encore_storage::cache::{CacheError, CountCache, MemoryCountCache};
use sqlx::SqlitePool;
use test_helpers::*;

async fn like_rows(pool: &SqlitePool, album_id: &AlbumId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM album_likes WHERE album_id = ?")
        .bind(album_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_toggle_round_trip_leaves_relation_unchanged() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let cache = MemoryCountCache::default();

    let user = create_test_user(pool, "fan").await;
    let album = create_test_album(pool, "Debut", 2019).await;

    assert_eq!(like_rows(pool, &album).await, 0);

    let first = encore_storage::likes::toggle_like(pool, &cache, &album, &user)
        .await
        .unwrap();
    let second = encore_storage::likes::toggle_like(pool, &cache, &album, &user)
        .await
        .unwrap();

    assert_eq!(first, LikeToggle::Liked);
    assert_eq!(second, LikeToggle::Unliked);
    assert_eq!(like_rows(pool, &album).await, 0, "round trip law");
}

#[tokio::test]
async fn test_read_after_toggle_recomputes_truth() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let cache = MemoryCountCache::default();

    let user1 = create_test_user(pool, "fan1").await;
    let user2 = create_test_user(pool, "fan2").await;
    let album = create_test_album(pool, "Debut", 2019).await;

    encore_storage::likes::toggle_like(pool, &cache, &album, &user1)
        .await
        .unwrap();

    // Warm the cache, then mutate again
    let warm = encore_storage::likes::get_count(pool, &cache, &album)
        .await
        .unwrap();
    assert_eq!(warm.origin, CountOrigin::Recomputed);
    assert_eq!(warm.count, 1);

    encore_storage::likes::toggle_like(pool, &cache, &album, &user2)
        .await
        .unwrap();

    // The toggle must have evicted the warmed entry
    let after = encore_storage::likes::get_count(pool, &cache, &album)
        .await
        .unwrap();
    assert_eq!(after.origin, CountOrigin::Recomputed);
    assert_eq!(after.count, 2);
    assert_eq!(after.count, like_rows(pool, &album).await);
}

#[tokio::test]
async fn test_second_read_is_served_from_cache() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let cache = MemoryCountCache::default();

    let user = create_test_user(pool, "fan").await;
    let album = create_test_album(pool, "Debut", 2019).await;

    encore_storage::likes::toggle_like(pool, &cache, &album, &user)
        .await
        .unwrap();

    let first = encore_storage::likes::get_count(pool, &cache, &album)
        .await
        .unwrap();
    let second = encore_storage::likes::get_count(pool, &cache, &album)
        .await
        .unwrap();

    assert_eq!(first.origin, CountOrigin::Recomputed);
    assert_eq!(second.origin, CountOrigin::Cache);
    assert_eq!(second.count, first.count);
}

#[tokio::test]
async fn test_count_for_unliked_album_is_zero() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let cache = MemoryCountCache::default();

    let album = create_test_album(pool, "Obscure", 2001).await;

    let count = encore_storage::likes::get_count(pool, &cache, &album)
        .await
        .unwrap();
    assert_eq!(count.count, 0);
    assert_eq!(count.origin, CountOrigin::Recomputed);
}

#[tokio::test]
async fn test_toggle_on_missing_album_is_not_found() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let cache = MemoryCountCache::default();

    let user = create_test_user(pool, "fan").await;

    let err = encore_storage::likes::toggle_like(
        pool,
        &cache,
        &AlbumId::new("album-does-not-exist"),
        &user,
    )
    .await
    .expect_err("Missing album");

    assert!(matches!(err, CatalogError::NotFound { .. }));
}

/// Cache stub whose reads and write-backs always fail but whose
/// eviction succeeds: models an unavailable backend the read path must
/// degrade around.
struct UnavailableCache;

#[async_trait]
impl CountCache for UnavailableCache {
    async fn get(&self, _album_id: &AlbumId) -> Result<Option<i64>, CacheError> {
        Err(CacheError::Backend("connection refused".into()))
    }

    async fn put(&self, _album_id: &AlbumId, _count: i64) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".into()))
    }

    async fn evict(&self, _album_id: &AlbumId) -> Result<(), CacheError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_unavailable_cache_degrades_to_recompute() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let cache = UnavailableCache;

    let user = create_test_user(pool, "fan").await;
    let album = create_test_album(pool, "Debut", 2019).await;

    encore_storage::likes::toggle_like(pool, &cache, &album, &user)
        .await
        .unwrap();

    // Both the failed read and the failed write-back are swallowed
    let count = encore_storage::likes::get_count(pool, &cache, &album)
        .await
        .expect("Cache unavailability must not fail the read");
    assert_eq!(count.origin, CountOrigin::Recomputed);
    assert_eq!(count.count, 1);
}

/// Cache stub whose eviction fails: invalidation is mandatory, so the
/// toggle has to surface this.
struct StuckCache;

#[async_trait]
impl CountCache for StuckCache {
    async fn get(&self, _album_id: &AlbumId) -> Result<Option<i64>, CacheError> {
        Ok(None)
    }

    async fn put(&self, _album_id: &AlbumId, _count: i64) -> Result<(), CacheError> {
        Ok(())
    }

    async fn evict(&self, _album_id: &AlbumId) -> Result<(), CacheError> {
        Err(CacheError::Backend("delete timed out".into()))
    }
}

#[tokio::test]
async fn test_failed_eviction_fails_the_toggle() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "fan").await;
    let album = create_test_album(pool, "Debut", 2019).await;

    let err = encore_storage::likes::toggle_like(pool, &StuckCache, &album, &user)
        .await
        .expect_err("Eviction failure must propagate");

    assert!(matches!(err, CatalogError::Cache(_)));
}

#[tokio::test]
async fn test_storage_rejects_duplicate_like_row() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "fan").await;
    let album = create_test_album(pool, "Debut", 2019).await;

    sqlx::query("INSERT INTO album_likes (id, album_id, user_id) VALUES (?, ?, ?)")
        .bind("like-one")
        .bind(&album)
        .bind(&user)
        .execute(pool)
        .await
        .unwrap();

    // The uniqueness constraint is the correctness backstop; it must
    // hold below the application logic.
    let result = sqlx::query("INSERT INTO album_likes (id, album_id, user_id) VALUES (?, ?, ?)")
        .bind("like-two")
        .bind(&album)
        .bind(&user)
        .execute(pool)
        .await;

    assert!(result.is_err(), "second like row for the same pair must be rejected");
    assert_eq!(like_rows(pool, &album).await, 1);
}

#[tokio::test]
async fn test_concurrent_toggles_never_double_insert() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "fan").await;
    let album = create_test_album(pool, "Debut", 2019).await;

    let cache = std::sync::Arc::new(MemoryCountCache::default());

    let t1 = {
        let (pool, cache, album, user) =
            (pool.clone(), cache.clone(), album.clone(), user.clone());
        tokio::spawn(async move {
            encore_storage::likes::toggle_like(&pool, cache.as_ref(), &album, &user).await
        })
    };
    let t2 = {
        let (pool, cache, album, user) =
            (pool.clone(), cache.clone(), album.clone(), user.clone());
        tokio::spawn(async move {
            encore_storage::likes::toggle_like(&pool, cache.as_ref(), &album, &user).await
        })
    };

    let r1 = t1.await.unwrap();
    let r2 = t2.await.unwrap();

    // Depending on interleaving the toggles either alternate (one Liked,
    // one Unliked) or the race loser is rejected as Duplicate. Either
    // way the relation never ends up with two rows for the pair.
    assert!(like_rows(pool, &album).await <= 1);

    match (&r1, &r2) {
        (Ok(a), Ok(b)) => assert_ne!(a, b, "two successful toggles must alternate"),
        (Ok(_), Err(e)) | (Err(e), Ok(_)) => {
            assert!(matches!(e, CatalogError::Duplicate(_)), "unexpected error: {e}");
        }
        (Err(e1), Err(e2)) => panic!("both toggles failed: {e1} / {e2}"),
    }
}
