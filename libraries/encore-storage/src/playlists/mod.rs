//! Playlist lifecycle. Authorization is the caller's concern via
//! [`crate::access`]; this slice stays mechanical.

use encore_core::{error::Result, types::*, CatalogError};
use sqlx::{Row, SqlitePool};

/// Create a new playlist owned by `playlist.owner`
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<PlaylistId> {
    let id = PlaylistId::generate();

    let result = sqlx::query("INSERT INTO playlists (id, name, owner) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&playlist.name)
        .bind(&playlist.owner)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::invariant("playlist insert produced no row"));
    }

    Ok(id)
}

/// Get a playlist header by id
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Playlist> {
    let row = sqlx::query("SELECT id, name, owner FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| CatalogError::not_found("Playlist", id.as_str()))?;

    Ok(Playlist {
        id: row.get("id"),
        name: row.get("name"),
        owner: row.get("owner"),
    })
}

/// List the playlists a user can see: owned plus shared with them
/// through a collaboration
pub async fn get_for_user(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<PlaylistSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT DISTINCT p.id, p.name, u.username
        FROM playlists p
        INNER JOIN users u ON p.owner = u.id
        LEFT JOIN collaborations c ON p.id = c.playlist_id
        WHERE p.owner = ? OR c.user_id = ?
        ORDER BY p.name
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistSummary {
            id: row.get("id"),
            name: row.get("name"),
            username: row.get("username"),
        })
        .collect())
}

/// Delete a playlist. Membership, collaboration and activity rows
/// cascade with it.
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Playlist", id.as_str()));
    }

    Ok(())
}
