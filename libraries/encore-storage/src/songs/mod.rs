use encore_core::{error::Result, types::*, CatalogError};
use sqlx::{Row, SqlitePool};

pub async fn create(pool: &SqlitePool, song: CreateSong) -> Result<SongId> {
    let id = SongId::generate();

    let result = sqlx::query(
        "INSERT INTO songs (id, title, year, genre, performer, duration, album_id)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.genre)
    .bind(&song.performer)
    .bind(song.duration)
    .bind(&song.album_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::invariant("song insert produced no row"));
    }

    Ok(id)
}

pub async fn get_by_id(pool: &SqlitePool, id: &SongId) -> Result<Song> {
    let row = sqlx::query(
        "SELECT id, title, year, genre, performer, duration, album_id FROM songs WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| CatalogError::not_found("Song", id.as_str()))?;

    Ok(project_song(&row))
}

/// Search songs with optional title/performer filters; both filters
/// combine with AND when present
pub async fn search(pool: &SqlitePool, filter: &SongFilter) -> Result<Vec<SongSummary>> {
    let title_pattern = filter
        .title
        .as_deref()
        .map_or_else(|| "%".to_string(), |t| format!("%{t}%"));
    let performer_pattern = filter
        .performer
        .as_deref()
        .map_or_else(|| "%".to_string(), |p| format!("%{p}%"));

    let rows = sqlx::query(
        "SELECT id, title, performer FROM songs
         WHERE title LIKE ? AND performer LIKE ?
         ORDER BY id",
    )
    .bind(&title_pattern)
    .bind(&performer_pattern)
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

pub async fn update(pool: &SqlitePool, id: &SongId, song: UpdateSong) -> Result<()> {
    let result = sqlx::query(
        "UPDATE songs SET title = ?, year = ?, genre = ?, performer = ?, duration = ?, album_id = ?
         WHERE id = ?",
    )
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.genre)
    .bind(&song.performer)
    .bind(song.duration)
    .bind(&song.album_id)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Song", id.as_str()));
    }

    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: &SongId) -> Result<()> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Song", id.as_str()));
    }

    Ok(())
}

fn project_song(row: &sqlx::sqlite::SqliteRow) -> Song {
    Song {
        id: row.get("id"),
        title: row.get("title"),
        year: row.get("year"),
        genre: row.get("genre"),
        performer: row.get("performer"),
        duration: row.get("duration"),
        album_id: row.get("album_id"),
    }
}
