use encore_core::{error::Result, types::*, CatalogError};
use sqlx::{Row, SqlitePool};

pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<AlbumId> {
    let id = AlbumId::generate();

    let result = sqlx::query("INSERT INTO albums (id, name, year) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&album.name)
        .bind(album.year)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::invariant("album insert produced no row"));
    }

    Ok(id)
}

/// Get an album with its current songs
pub async fn get_by_id(pool: &SqlitePool, id: &AlbumId) -> Result<AlbumDetail> {
    let row = sqlx::query("SELECT id, name, year FROM albums WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| CatalogError::not_found("Album", id.as_str()))?;

    let song_rows = sqlx::query("SELECT id, title, performer FROM songs WHERE album_id = ? ORDER BY id")
        .bind(id)
        .fetch_all(pool)
        .await?;

    Ok(AlbumDetail {
        id: row.get("id"),
        name: row.get("name"),
        year: row.get("year"),
        songs: song_rows
            .into_iter()
            .map(|row| SongSummary {
                id: row.get("id"),
                title: row.get("title"),
                performer: row.get("performer"),
            })
            .collect(),
    })
}

pub async fn update(pool: &SqlitePool, id: &AlbumId, album: UpdateAlbum) -> Result<()> {
    let result = sqlx::query("UPDATE albums SET name = ?, year = ? WHERE id = ?")
        .bind(&album.name)
        .bind(album.year)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Album", id.as_str()));
    }

    Ok(())
}

/// Delete an album. Its songs and like rows cascade.
pub async fn delete(pool: &SqlitePool, id: &AlbumId) -> Result<()> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Album", id.as_str()));
    }

    Ok(())
}

pub async fn exists(pool: &SqlitePool, id: &AlbumId) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM albums WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count") > 0)
}
