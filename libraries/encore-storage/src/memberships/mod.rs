//! Playlist-song membership.
//!
//! A song appears at most once per playlist; the UNIQUE
//! `(playlist_id, song_id)` constraint enforces it at the storage layer
//! and a duplicate add surfaces as `Duplicate`.

use crate::is_unique_violation;
use encore_core::{error::Result, types::*, CatalogError};
use sqlx::{Row, SqlitePool};

/// Add a song to a playlist
pub async fn add_song(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<MembershipId> {
    let id = MembershipId::generate();

    let result = sqlx::query("INSERT INTO playlist_songs (id, playlist_id, song_id) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(playlist_id)
        .bind(song_id)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CatalogError::duplicate(format!(
                    "song {} is already on playlist {}",
                    song_id, playlist_id
                ))
            } else {
                e.into()
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::invariant("playlist song insert produced no row"));
    }

    Ok(id)
}

/// Remove a song from a playlist
pub async fn remove_song(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id)
        .bind(song_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Playlist song", song_id.as_str()));
    }

    Ok(())
}

/// List a playlist's songs, ordered by song id ascending.
///
/// Materialized per call; no incremental streaming.
pub async fn list_songs(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<Vec<SongSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT s.id, s.title, s.performer
        FROM songs s
        INNER JOIN playlist_songs ps ON s.id = ps.song_id
        WHERE ps.playlist_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| SongSummary {
            id: row.get("id"),
            title: row.get("title"),
            performer: row.get("performer"),
        })
        .collect())
}

/// Aggregate snapshot of a playlist: header, owner's username and the
/// current song list
pub async fn get_playlist_detail(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
) -> Result<PlaylistDetail> {
    let row = sqlx::query(
        r#"
        SELECT p.id, p.name, u.username
        FROM playlists p
        INNER JOIN users u ON p.owner = u.id
        WHERE p.id = ?
        "#,
    )
    .bind(playlist_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| CatalogError::not_found("Playlist", playlist_id.as_str()))?;

    let songs = list_songs(pool, playlist_id).await?;

    Ok(PlaylistDetail {
        id: row.get("id"),
        name: row.get("name"),
        username: row.get("username"),
        songs,
    })
}
