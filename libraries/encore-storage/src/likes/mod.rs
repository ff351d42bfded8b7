//! Album likes: a toggle relation with a cache-aside count.
//!
//! The `album_likes` relation is the single source of truth; the
//! [`CountCache`] holds a disposable per-album aggregate with a TTL.
//! Every successful toggle evicts the cache entry (key delete, not
//! overwrite) so the next read recomputes rather than serving a stale
//! count across the toggle boundary.

use crate::cache::CountCache;
use crate::{albums, is_unique_violation};
use encore_core::{error::Result, types::*, CatalogError};
use sqlx::{Row, SqlitePool};

/// Read the like count for an album.
///
/// Cache hit → `{origin: Cache, count}`. Miss (absent, expired, or a
/// failing backend) → recompute from `album_likes`, write back
/// unconditionally, `{origin: Recomputed, count}`. Cache population is
/// best-effort: a failed write-back degrades future reads to recompute,
/// it never fails this call.
pub async fn get_count(
    pool: &SqlitePool,
    cache: &dyn CountCache,
    album_id: &AlbumId,
) -> Result<LikeCount> {
    match cache.get(album_id).await {
        Ok(Some(count)) => {
            return Ok(LikeCount {
                origin: CountOrigin::Cache,
                count,
            });
        }
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(album = %album_id, %err, "cache read failed, recomputing");
        }
    }

    let row = sqlx::query("SELECT COUNT(*) as count FROM album_likes WHERE album_id = ?")
        .bind(album_id)
        .fetch_one(pool)
        .await?;
    let count: i64 = row.get("count");

    if let Err(err) = cache.put(album_id, count).await {
        tracing::warn!(album = %album_id, %err, "cache write-back failed");
    }

    Ok(LikeCount {
        origin: CountOrigin::Recomputed,
        count,
    })
}

/// Toggle `user_id`'s like on `album_id`.
///
/// The direction is derived from whether the `(album, user)` row
/// currently exists, never from a caller-supplied intent flag. The
/// UNIQUE `(album_id, user_id)` constraint is the backstop for two
/// concurrent toggles that both observe "no row": the loser's insert is
/// rejected and surfaces as `Duplicate`.
pub async fn toggle_like(
    pool: &SqlitePool,
    cache: &dyn CountCache,
    album_id: &AlbumId,
    user_id: &UserId,
) -> Result<LikeToggle> {
    if !albums::exists(pool, album_id).await? {
        return Err(CatalogError::not_found("Album", album_id.as_str()));
    }

    // Explicit existence check, then branch. The delete keys on the
    // pair, so a row inserted by a concurrent winner between these two
    // statements is still handled: the delete catches it, or the
    // uniqueness constraint rejects ours.
    let existing = sqlx::query("SELECT id FROM album_likes WHERE album_id = ? AND user_id = ?")
        .bind(album_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    let outcome = if existing.is_some() {
        sqlx::query("DELETE FROM album_likes WHERE album_id = ? AND user_id = ?")
            .bind(album_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        LikeToggle::Unliked
    } else {
        let id = LikeId::generate();
        let result = sqlx::query("INSERT INTO album_likes (id, album_id, user_id) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(album_id)
            .bind(user_id)
            .execute(pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    CatalogError::duplicate(format!(
                        "user {} already likes album {}",
                        user_id, album_id
                    ))
                } else {
                    e.into()
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::invariant("like insert produced no row"));
        }
        LikeToggle::Liked
    };

    // Mandatory on both branches. An eviction failure is not degradable:
    // a stale entry would misreport the count until its TTL runs out.
    cache
        .evict(album_id)
        .await
        .map_err(|e| CatalogError::cache(e.to_string()))?;

    tracing::debug!(album = %album_id, user = %user_id, ?outcome, "like toggled");

    Ok(outcome)
}
