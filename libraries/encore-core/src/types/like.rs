/// Album like aggregate types
use serde::{Deserialize, Serialize};

/// Where a like count came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountOrigin {
    /// Served from the cache backend
    Cache,
    /// Recomputed from the like relation (and written back)
    Recomputed,
}

/// A like count together with its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeCount {
    pub origin: CountOrigin,
    pub count: i64,
}

/// Outcome of a like toggle.
///
/// The caller never states an intent; presence or absence of the
/// `(album, user)` row decides which way the toggle goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeToggle {
    Liked,
    Unliked,
}
