//! Typed payloads for the events the store applies.
//!
//! `*Created` events carry the full entity state object, which decodes
//! directly into the record types in [`crate::model`].

use serde::{Deserialize, Serialize};

use crate::model::{EntityId, Playback, PlaylistId, VideoId};

/// Payload of `*Deleted` events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDeleted {
    pub model_id: EntityId,
}

/// Payload of `PlaylistContentUpdated`, `ArtistVideosUpdated` and
/// `AlbumVideosUpdated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentUpdated {
    pub model_id: EntityId,
    #[serde(default)]
    pub ids: Vec<VideoId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistRenamed {
    pub model_id: PlaylistId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStateUpdated {
    pub state: Playback,
    #[serde(default)]
    pub position: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

/// The player switched to another video (or to nothing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerVideoUpdated {
    #[serde(default)]
    pub video_id: Option<VideoId>,
    #[serde(default)]
    pub playlist_id: Option<PlaylistId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeUpdated {
    pub volume: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleStateUpdated {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleDelayUpdated {
    pub delay_ms: i64,
}

/// Download progress for one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadInfo {
    pub model_id: VideoId,
    #[serde(flatten)]
    pub progress: crate::model::DownloadProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistThumbnailUpdated {
    pub model_id: EntityId,
    #[serde(default)]
    pub thumbnail: Option<String>,
}
