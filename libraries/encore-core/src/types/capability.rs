/// Access capability tiers for shared playlists
use serde::{Deserialize, Serialize};

/// What a principal is allowed to do on a specific playlist.
///
/// Only two tiers exist. Delete is owner-only; reading, adding and
/// removing songs and viewing activity history require at least
/// `Collaborator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Playlist owner: read + write + delete
    Owner,
    /// Delegated collaborator: read + write, no delete
    Collaborator,
}

impl Capability {
    /// Whether this capability permits reading and mutating membership
    pub fn can_modify(self) -> bool {
        true
    }

    /// Whether this capability permits deleting the playlist
    pub fn can_delete(self) -> bool {
        matches!(self, Capability::Owner)
    }
}
