//! Album types

use crate::types::{AlbumId, SongSummary};
use serde::{Deserialize, Serialize};

/// An album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub year: i32,
}

/// Album detail snapshot: the album row plus its current songs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumDetail {
    pub id: AlbumId,
    pub name: String,
    pub year: i32,
    pub songs: Vec<SongSummary>,
}

/// Data for creating a new album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlbum {
    pub name: String,
    pub year: i32,
}

/// Data for updating an existing album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAlbum {
    pub name: String,
    pub year: i32,
}
