//! Append-only activity trail for playlist membership mutations.
//!
//! Records are never updated or deleted by the application; they go
//! away only when their playlist cascades.

use encore_core::{error::Result, types::*, CatalogError};
use sqlx::{Row, SqlitePool};

/// Record a membership mutation.
///
/// Id and UTC timestamp are generated at call time.
pub async fn record(
    pool: &SqlitePool,
    action: ActivityAction,
    playlist_id: &PlaylistId,
    user_id: &UserId,
    song_id: &SongId,
) -> Result<()> {
    let id = ActivityId::generate();
    let time = chrono::Utc::now().to_rfc3339();

    let result = sqlx::query(
        "INSERT INTO playlist_song_activities (id, playlist_id, song_id, user_id, action, time)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(playlist_id)
    .bind(song_id)
    .bind(user_id)
    .bind(action.as_str())
    .bind(&time)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::invariant("activity insert produced no row"));
    }

    Ok(())
}

/// List a playlist's activity history in insertion order, joined
/// against the actor's username and the song title.
///
/// Zero recorded activities is reported as `NotFound`, not an empty
/// list. Callers that want "no history yet" as a non-error state must
/// special-case this.
pub async fn list(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<Vec<ActivityEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT u.username, s.title, a.action, a.time
        FROM playlist_song_activities a
        INNER JOIN users u ON a.user_id = u.id
        INNER JOIN songs s ON a.song_id = s.id
        WHERE a.playlist_id = ?
        ORDER BY a.time, a.rowid
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    if rows.is_empty() {
        return Err(CatalogError::not_found("Activities", playlist_id.as_str()));
    }

    rows.into_iter()
        .map(|row| {
            let action_str = row.get::<String, _>("action");
            let action = ActivityAction::from_str(&action_str).ok_or_else(|| {
                CatalogError::invariant(format!("invalid activity action: {action_str}"))
            })?;

            Ok(ActivityEntry {
                username: row.get("username"),
                title: row.get("title"),
                action,
                time: row.get("time"),
            })
        })
        .collect()
}
