mod activity;
mod album;
mod capability;
mod ids;
mod like;
mod playlist;
mod song;
mod user;

pub use activity::{ActivityAction, ActivityEntry};
pub use album::{Album, AlbumDetail, CreateAlbum, UpdateAlbum};
pub use capability::Capability;
pub use ids::{
    ActivityId, AlbumId, CollaborationId, LikeId, MembershipId, PlaylistId, SongId, UserId,
};
pub use like::{CountOrigin, LikeCount, LikeToggle};
pub use playlist::{CreatePlaylist, Playlist, PlaylistDetail, PlaylistSummary};
pub use song::{CreateSong, Song, SongFilter, SongSummary, UpdateSong};
pub use user::{CreateUser, User};
