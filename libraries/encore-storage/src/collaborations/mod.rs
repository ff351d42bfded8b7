//! Playlist collaborations: the delegation relation consumed by access
//! resolution. Granting and revoking is an owner-only operation; that
//! guard lives in the caller via [`crate::access::verify_owner`].

use crate::is_unique_violation;
use encore_core::{error::Result, types::*, CatalogError};
use sqlx::{Row, SqlitePool};

/// Grant `user_id` collaborator rights on `playlist_id`
pub async fn add(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<CollaborationId> {
    let id = CollaborationId::generate();

    let result = sqlx::query("INSERT INTO collaborations (id, playlist_id, user_id) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(playlist_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CatalogError::duplicate(format!(
                    "user {} already collaborates on playlist {}",
                    user_id, playlist_id
                ))
            } else {
                e.into()
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::invariant("collaboration insert produced no row"));
    }

    Ok(id)
}

/// Revoke a collaboration
pub async fn remove(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
    let result = sqlx::query("DELETE FROM collaborations WHERE playlist_id = ? AND user_id = ?")
        .bind(playlist_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Collaboration", playlist_id.as_str()));
    }

    Ok(())
}

/// Lookup contract consumed by the access resolver
pub async fn has_collaboration(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<bool> {
    let row = sqlx::query(
        "SELECT COUNT(*) as count FROM collaborations WHERE playlist_id = ? AND user_id = ?",
    )
    .bind(playlist_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count") > 0)
}
