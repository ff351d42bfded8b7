//! Playlist access resolution.
//!
//! Two-tier authorization over a shared playlist: the owner holds the
//! full capability, delegated collaborators hold read + write. The
//! resolver is a pure read; it never mutates anything.
//!
//! Error policy: a missing playlist is always `NotFound`, even when a
//! collaboration lookup is attempted afterwards and also comes up
//! empty. The missing-resource error must not be masked behind a
//! generic `Forbidden`.

use crate::collaborations;
use encore_core::{error::Result, types::*, CatalogError};
use sqlx::{Row, SqlitePool};

/// Resolve what `user_id` may do on `playlist_id`.
///
/// - playlist absent → `NotFound`
/// - principal is the owner → [`Capability::Owner`]
/// - principal holds a collaboration → [`Capability::Collaborator`]
/// - otherwise → `Forbidden`
pub async fn resolve_access(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<Capability> {
    let row = sqlx::query("SELECT owner FROM playlists WHERE id = ?")
        .bind(playlist_id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Err(CatalogError::not_found("Playlist", playlist_id.as_str()));
    };

    let owner: UserId = row.get("owner");
    if owner == *user_id {
        return Ok(Capability::Owner);
    }

    if collaborations::has_collaboration(pool, playlist_id, user_id).await? {
        Ok(Capability::Collaborator)
    } else {
        Err(CatalogError::Forbidden)
    }
}

/// Require the owner capability.
///
/// Guard for owner-only operations (playlist deletion, collaboration
/// management). No collaborator fallback: a collaborator gets
/// `Forbidden` here even though `resolve_access` would grant them a
/// capability.
pub async fn verify_owner(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<()> {
    let row = sqlx::query("SELECT owner FROM playlists WHERE id = ?")
        .bind(playlist_id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Err(CatalogError::not_found("Playlist", playlist_id.as_str()));
    };

    let owner: UserId = row.get("owner");
    if owner == *user_id {
        Ok(())
    } else {
        Err(CatalogError::Forbidden)
    }
}
