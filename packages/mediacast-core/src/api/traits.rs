//! Trait abstractions over the REST client.
//!
//! Actions depend on these rather than on [`super::ApiClient`] so they can be
//! exercised against a fake backend.

use async_trait::async_trait;

use super::client::ApiResult;
use super::types::PlaylistUpdate;
use crate::model::{PlaylistId, VideoId};

/// Playback control endpoints under `/player/`.
#[async_trait]
pub trait PlayerApi: Send + Sync {
    /// Downloads/streams `url` and plays it immediately.
    async fn stream(&self, url: &str) -> ApiResult<()>;

    /// Downloads `url` and appends it to the play queue.
    async fn queue(&self, url: &str) -> ApiResult<()>;

    /// Plays a library video, optionally within a playlist.
    async fn play(&self, video: &VideoId, playlist: Option<&PlaylistId>) -> ApiResult<()>;

    async fn stop(&self) -> ApiResult<()>;

    /// Toggles pause.
    async fn pause(&self) -> ApiResult<()>;

    /// Seeks to an absolute position in seconds.
    async fn seek(&self, position: f64) -> ApiResult<()>;

    /// Sets the volume in percent.
    async fn volume(&self, value: u8) -> ApiResult<()>;

    async fn toggle_subtitles(&self) -> ApiResult<()>;

    /// Shifts subtitles by `delay_ms` milliseconds.
    async fn seek_subtitles(&self, delay_ms: i64) -> ApiResult<()>;
}

/// Playlist mutation endpoints.
#[async_trait]
pub trait PlaylistApi: Send + Sync {
    async fn update_playlist(&self, id: &PlaylistId, update: &PlaylistUpdate) -> ApiResult<()>;
}
