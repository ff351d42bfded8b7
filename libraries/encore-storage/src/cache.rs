//! Like-count cache backend.
//!
//! The cache is a derived, disposable view over the `album_likes`
//! relation: every entry can be dropped and rebuilt at any time without
//! loss of correctness. Only the [`likes`](crate::likes) slice is
//! permitted to read or write entries, which keeps invalidation free of
//! races with other subsystems.

use async_trait::async_trait;
use encore_core::AlbumId;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;

/// Default entry time-to-live: 30 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(1800);

/// Cache backend failure.
///
/// Read and write-back failures are degraded away by the likes slice;
/// eviction failures are surfaced, since serving a stale count across a
/// toggle boundary would be a correctness bug.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Key-value backend holding per-album like counts with a TTL.
///
/// Implementations may be remote (a networked key-value service) or
/// in-process; every method is potentially suspending.
#[async_trait]
pub trait CountCache: Send + Sync {
    /// Look up the cached count. Expired entries are a miss.
    async fn get(&self, album_id: &AlbumId) -> Result<Option<i64>, CacheError>;

    /// Store a count, resetting the entry's TTL.
    async fn put(&self, album_id: &AlbumId, count: i64) -> Result<(), CacheError>;

    /// Delete the entry for an album. Deleting a missing key is not an
    /// error: the next read recomputes either way.
    async fn evict(&self, album_id: &AlbumId) -> Result<(), CacheError>;
}

/// In-process count cache backed by a `tokio` `RwLock` map.
///
/// Suitable for single-instance deployments and tests; a shared
/// deployment would put a networked backend behind [`CountCache`]
/// instead.
pub struct MemoryCountCache {
    entries: RwLock<HashMap<String, CacheSlot>>,
    ttl: Duration,
}

struct CacheSlot {
    count: i64,
    expires_at: Instant,
}

impl MemoryCountCache {
    /// Create a cache with the given entry TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }
}

impl Default for MemoryCountCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[async_trait]
impl CountCache for MemoryCountCache {
    async fn get(&self, album_id: &AlbumId) -> Result<Option<i64>, CacheError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(album_id.as_str())
            .filter(|slot| slot.expires_at > Instant::now())
            .map(|slot| slot.count))
    }

    async fn put(&self, album_id: &AlbumId, count: i64) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        // Expired entries for other albums stay until overwritten or
        // evicted; reads already treat them as absent.
        entries.insert(
            album_id.as_str().to_string(),
            CacheSlot {
                count,
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(())
    }

    async fn evict(&self, album_id: &AlbumId) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        entries.remove(album_id.as_str());
        Ok(())
    }
}
