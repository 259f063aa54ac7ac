//! User actions against the backend.
//!
//! Actions compute whatever the request needs from the local store, send one
//! REST call and report failures through the installed [`Notifier`]. They are
//! never retried. State changes arrive later as pushed events, except for
//! drag-and-drop moves which are applied locally first.

use std::sync::Arc;

use crate::api::types::PlaylistUpdate;
use crate::api::{ApiResult, PlayerApi, PlaylistApi};
use crate::error::{MediacastError, MediacastResult};
use crate::model::{PlaylistId, VideoId};
use crate::notify::{Notification, Notifier};
use crate::store::SharedStore;

/// Logs a failed action and forwards its message to the notifier.
fn report<T>(notifier: &dyn Notifier, action: &str, result: ApiResult<T>) -> MediacastResult<T> {
    result.map_err(|e| {
        log::warn!("[Actions] {} failed: {}", action, e);
        notifier.notify(Notification::error(e.user_message()));
        MediacastError::from(e)
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Playlist Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Reordering and editing of playlists.
#[derive(Clone)]
pub struct PlaylistActions {
    api: Arc<dyn PlaylistApi>,
    store: SharedStore,
    notifier: Arc<dyn Notifier>,
}

impl PlaylistActions {
    pub fn new(api: Arc<dyn PlaylistApi>, store: SharedStore, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, store, notifier }
    }

    /// Queues `requested` right after the video currently playing from this
    /// playlist. Returns the order that was sent.
    pub async fn queue_next(
        &self,
        playlist: &PlaylistId,
        requested: &[VideoId],
    ) -> MediacastResult<Vec<VideoId>> {
        let ids = self.compute(playlist, |p, active| p.queue_next(active, requested))?;
        self.push_order(playlist, ids, "Queue next").await
    }

    /// Queues `requested` after everything already in the playlist.
    pub async fn queue_last(
        &self,
        playlist: &PlaylistId,
        requested: &[VideoId],
    ) -> MediacastResult<Vec<VideoId>> {
        let ids = self.compute(playlist, |p, active| p.queue_last(active, requested))?;
        self.push_order(playlist, ids, "Queue last").await
    }

    pub async fn shuffle(&self, playlist: &PlaylistId) -> MediacastResult<Vec<VideoId>> {
        let ids = self.compute(playlist, |p, _| p.shuffled())?;
        self.push_order(playlist, ids, "Shuffle").await
    }

    /// Moves the video at `from` to `to`.
    ///
    /// The local order changes immediately; the same order is then sent to
    /// the backend.
    pub async fn move_video(
        &self,
        playlist: &PlaylistId,
        from: usize,
        to: usize,
    ) -> MediacastResult<Vec<VideoId>> {
        let Some(ids) = self.store.move_in_playlist(playlist, from, to) else {
            if self.store.read().playlist(playlist).is_none() {
                return Err(MediacastError::NotFound(format!("playlist {}", playlist)));
            }
            return Err(MediacastError::InvalidRequest(format!(
                "cannot move index {} to {}",
                from, to
            )));
        };
        self.push_order(playlist, ids, "Move").await
    }

    pub async fn rename(&self, playlist: &PlaylistId, name: &str) -> MediacastResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MediacastError::InvalidRequest(
                "playlist name cannot be empty".into(),
            ));
        }
        self.ensure_known(playlist)?;
        let result = self
            .api
            .update_playlist(playlist, &PlaylistUpdate::name(name))
            .await;
        report(self.notifier.as_ref(), "Rename", result)
    }

    /// Removes one video from the playlist's order.
    pub async fn remove_video(
        &self,
        playlist: &PlaylistId,
        video: &VideoId,
    ) -> MediacastResult<Vec<VideoId>> {
        let ids = self.compute(playlist, |p, _| {
            p.ids.iter().filter(|id| *id != video).cloned().collect()
        })?;
        self.push_order(playlist, ids, "Remove").await
    }

    /// Runs `f` against the stored playlist and the video active in it.
    fn compute<F>(&self, playlist: &PlaylistId, f: F) -> MediacastResult<Vec<VideoId>>
    where
        F: FnOnce(&crate::model::Playlist, Option<&VideoId>) -> Vec<VideoId>,
    {
        let store = self.store.read();
        let entry = store
            .playlist(playlist)
            .ok_or_else(|| MediacastError::NotFound(format!("playlist {}", playlist)))?;
        Ok(f(entry, store.active_in(playlist)))
    }

    fn ensure_known(&self, playlist: &PlaylistId) -> MediacastResult<()> {
        self.compute(playlist, |_, _| Vec::new()).map(|_| ())
    }

    async fn push_order(
        &self,
        playlist: &PlaylistId,
        ids: Vec<VideoId>,
        action: &str,
    ) -> MediacastResult<Vec<VideoId>> {
        log::debug!("[Actions] {} on playlist {}: {} item(s)", action, playlist, ids.len());
        let result = self
            .api
            .update_playlist(playlist, &PlaylistUpdate::ids(ids.clone()))
            .await;
        report(self.notifier.as_ref(), action, result).map(|()| ids)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Player Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Playback commands with failure reporting.
#[derive(Clone)]
pub struct PlayerActions {
    api: Arc<dyn PlayerApi>,
    notifier: Arc<dyn Notifier>,
}

impl PlayerActions {
    pub fn new(api: Arc<dyn PlayerApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    pub async fn stream(&self, url: &str) -> MediacastResult<()> {
        let url = Self::require_url(url)?;
        report(self.notifier.as_ref(), "Stream", self.api.stream(url).await)
    }

    pub async fn queue(&self, url: &str) -> MediacastResult<()> {
        let url = Self::require_url(url)?;
        report(self.notifier.as_ref(), "Queue", self.api.queue(url).await)
    }

    pub async fn play(&self, video: &VideoId, playlist: Option<&PlaylistId>) -> MediacastResult<()> {
        report(self.notifier.as_ref(), "Play", self.api.play(video, playlist).await)
    }

    pub async fn stop(&self) -> MediacastResult<()> {
        report(self.notifier.as_ref(), "Stop", self.api.stop().await)
    }

    pub async fn pause(&self) -> MediacastResult<()> {
        report(self.notifier.as_ref(), "Pause", self.api.pause().await)
    }

    pub async fn seek(&self, position: f64) -> MediacastResult<()> {
        if !position.is_finite() || position < 0.0 {
            return Err(MediacastError::InvalidRequest(format!(
                "invalid seek position {}",
                position
            )));
        }
        report(self.notifier.as_ref(), "Seek", self.api.seek(position).await)
    }

    /// Sets the volume, clamped to 0-100.
    pub async fn volume(&self, value: u8) -> MediacastResult<()> {
        let value = value.min(100);
        report(self.notifier.as_ref(), "Volume", self.api.volume(value).await)
    }

    pub async fn toggle_subtitles(&self) -> MediacastResult<()> {
        report(
            self.notifier.as_ref(),
            "Toggle subtitles",
            self.api.toggle_subtitles().await,
        )
    }

    pub async fn seek_subtitles(&self, delay_ms: i64) -> MediacastResult<()> {
        report(
            self.notifier.as_ref(),
            "Subtitle delay",
            self.api.seek_subtitles(delay_ms).await,
        )
    }

    fn require_url(url: &str) -> MediacastResult<&str> {
        let url = url.trim();
        if url.is_empty() {
            return Err(MediacastError::InvalidRequest("url cannot be empty".into()));
        }
        Ok(url)
    }
}
