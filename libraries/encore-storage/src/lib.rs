//! Encore Storage
//!
//! Multi-user `SQLite` storage layer for the Encore catalog-and-playlist
//! service.
//!
//! This crate provides the collaborative resource access and derived-state
//! caching layer: playlist authorization, the append-only activity trail,
//! playlist membership, and the cache-aside album like counter, plus the
//! thin entity slices (albums, songs, users) those features join against.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each feature owns its own queries and logic
//! - **Explicit Dependencies**: every function takes the pool (and, for
//!   likes, the cache backend) as an argument; there is no ambient global
//!   connection, so tests can substitute their own
//! - **Single Source of Truth**: the relational store is authoritative;
//!   the like-count cache is disposable and rebuilt on demand
//!
//! # Example
//!
//! ```rust,no_run
//! use encore_storage::{create_pool, run_migrations};
//! use encore_storage::cache::MemoryCountCache;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://encore.db").await?;
//! run_migrations(&pool).await?;
//!
//! let cache = MemoryCountCache::default();
//! let count = encore_storage::likes::get_count(
//!     &pool,
//!     &cache,
//!     &encore_core::AlbumId::new("album-1"),
//! )
//! .await?;
//! println!("{} likes ({:?})", count.count, count.origin);
//! # Ok(())
//! # }
//! ```

// Core authorization / audit / caching slices
pub mod access;
pub mod activities;
pub mod cache;
pub mod likes;
pub mod memberships;

// Playlist lifecycle and delegation
pub mod collaborations;
pub mod playlists;

// Entity slices the core joins against
pub mod albums;
pub mod songs;
pub mod users;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://encore.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        // Uniqueness and cascade rules are the correctness backstop here,
        // so referential integrity must actually be on.
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!(database_url, "created sqlite pool");

    Ok(pool)
}

/// True when a `sqlx` error is a uniqueness-constraint rejection.
///
/// Slices map these onto `CatalogError::Duplicate` so the race loser of
/// a concurrent insert gets a classified error instead of a raw
/// database failure.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.kind() == sqlx::error::ErrorKind::UniqueViolation
    )
}
