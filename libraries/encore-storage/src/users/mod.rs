//! User accounts. Credential handling (hashing, tokens) is an external
//! concern; this slice only stores identity and display fields.

use crate::is_unique_violation;
use encore_core::{error::Result, types::*, CatalogError};
use sqlx::{Row, SqlitePool};

pub async fn create(pool: &SqlitePool, user: CreateUser) -> Result<UserId> {
    let id = UserId::generate();

    let result = sqlx::query("INSERT INTO users (id, username, fullname) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&user.username)
        .bind(&user.fullname)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CatalogError::duplicate(format!("username {} is taken", user.username))
            } else {
                e.into()
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::invariant("user insert produced no row"));
    }

    Ok(id)
}

pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<User> {
    let row = sqlx::query("SELECT id, username, fullname FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| CatalogError::not_found("User", id.as_str()))?;

    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        fullname: row.get("fullname"),
    })
}

/// Principal-store display name lookup used by the membership and
/// activity joins
pub async fn get_username(pool: &SqlitePool, id: &UserId) -> Result<String> {
    let row = sqlx::query("SELECT username FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| CatalogError::not_found("User", id.as_str()))?;

    Ok(row.get("username"))
}
