//! Encore Core
//!
//! Platform-agnostic domain types and error handling for the Encore
//! catalog-and-playlist service.
//!
//! This crate defines:
//! - **Domain Types**: `Album`, `Song`, `Playlist`, `User`, activity and
//!   like aggregates, and the string-backed entity ids
//! - **Access Model**: the two-tier [`Capability`](types::Capability)
//!   granted to a principal on a shared playlist
//! - **Error Handling**: unified [`CatalogError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use encore_core::types::{CreatePlaylist, PlaylistId, UserId};
//!
//! let owner = UserId::generate();
//! let playlist = CreatePlaylist {
//!     name: "Late night".to_string(),
//!     owner,
//! };
//! assert_eq!(playlist.name, "Late night");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CatalogError, Result};
pub use types::{
    // Access model
    Capability,
    // Aggregates
    ActivityAction, ActivityEntry, CountOrigin, LikeCount, LikeToggle,
    // Entities
    Album, AlbumDetail, CreateAlbum, CreatePlaylist, CreateSong, CreateUser, Playlist,
    PlaylistDetail, PlaylistSummary, Song, SongFilter, SongSummary, UpdateAlbum, UpdateSong, User,
    // Ids
    ActivityId, AlbumId, CollaborationId, LikeId, MembershipId, PlaylistId, SongId, UserId,
};
