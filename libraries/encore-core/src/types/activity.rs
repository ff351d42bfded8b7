/// Playlist activity (audit trail) types
use serde::{Deserialize, Serialize};

/// Mutating action recorded against a playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    /// A song was added to the playlist
    Add,
    /// A song was removed from the playlist
    Delete,
}

impl ActivityAction {
    /// Convert action to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Add => "add",
            ActivityAction::Delete => "delete",
        }
    }

    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "add" => Some(ActivityAction::Add),
            "delete" => Some(ActivityAction::Delete),
            _ => None,
        }
    }
}

/// One entry of a playlist's activity history, joined against the
/// actor's username and the song title. Append-only: the application
/// never updates or deletes these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub username: String,
    pub title: String,
    pub action: ActivityAction,
    /// UTC timestamp, RFC 3339 text
    pub time: String,
}
