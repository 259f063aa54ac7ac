//! Artist and album records.

use serde::{Deserialize, Serialize};

use super::ids::{AlbumId, ArtistId, VideoId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub ids: Vec<VideoId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist_id: Option<ArtistId>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub ids: Vec<VideoId>,
}
