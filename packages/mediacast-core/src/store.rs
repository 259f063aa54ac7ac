//! Client-side mirror of server state.
//!
//! The store is paged in fully at startup (see [`crate::session`]) and then
//! kept fresh by applying pushed events. All event-to-entity wiring lives in
//! [`MediaStore::apply`]; entity records themselves never subscribe to
//! anything.
//!
//! Entity maps are `BTreeMap`s so iteration order is deterministic. Play
//! order is carried by each playlist's `ids`, never by map order.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::watch;

use crate::events::payloads::{
    ArtistThumbnailUpdated, ContentUpdated, DownloadInfo, EntityDeleted, PlayerStateUpdated,
    PlayerVideoUpdated, PlaylistRenamed, SubtitleDelayUpdated, SubtitleStateUpdated,
    VolumeUpdated,
};
use crate::events::{Dispatcher, Event, EventName, Handler, HandlerError, Subscription};
use crate::model::{
    Album, AlbumId, Artist, ArtistId, PlayerState, Playlist, PlaylistId, Video, VideoId,
};

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    /// The payload did not decode into the shape the event requires.
    #[error("invalid {name} payload: {source}")]
    Payload {
        name: EventName,
        #[source]
        source: serde_json::Error,
    },

    /// The event name is not one the store applies.
    #[error("unsupported event: {0}")]
    Unsupported(String),
}

impl From<StoreError> for HandlerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Payload { source, .. } => HandlerError::Payload(source),
            other => HandlerError::Rejected(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// Full server state as fetched over REST.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    #[serde(default)]
    pub player: PlayerState,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub playlists: Vec<Playlist>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub albums: Vec<Album>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Media Store
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MediaStore {
    player: PlayerState,
    videos: BTreeMap<VideoId, Video>,
    playlists: BTreeMap<PlaylistId, Playlist>,
    artists: BTreeMap<ArtistId, Artist>,
    albums: BTreeMap<AlbumId, Album>,
    /// Events applied while a snapshot fetch is in flight, replayed over it.
    pending: Option<Vec<(EventName, Value)>>,
}

fn decode<T: DeserializeOwned>(name: EventName, payload: &Value) -> StoreResult<T> {
    T::deserialize(payload).map_err(|source| StoreError::Payload { name, source })
}

impl MediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all state with a freshly fetched snapshot.
    pub fn load(&mut self, snapshot: LibrarySnapshot) {
        self.player = snapshot.player;
        self.videos = snapshot.videos.into_iter().map(|v| (v.id.clone(), v)).collect();
        self.playlists = snapshot
            .playlists
            .into_iter()
            .map(|mut p| {
                let ids = std::mem::take(&mut p.ids);
                p.set_ids(ids);
                (p.id.clone(), p)
            })
            .collect();
        self.artists = snapshot.artists.into_iter().map(|a| (a.id.clone(), a)).collect();
        self.albums = snapshot.albums.into_iter().map(|a| (a.id.clone(), a)).collect();
    }

    /// Starts recording applied events until [`finish_sync`](Self::finish_sync)
    /// or [`cancel_sync`](Self::cancel_sync).
    ///
    /// A snapshot fetched over REST may predate events pushed while the
    /// fetch was running. Those events still apply live and are replayed
    /// over the snapshot when it arrives.
    pub fn begin_sync(&mut self) {
        self.pending.get_or_insert_with(Vec::new);
    }

    /// Loads `snapshot`, then replays the events recorded since
    /// [`begin_sync`](Self::begin_sync). Returns how many were replayed.
    pub fn finish_sync(&mut self, snapshot: LibrarySnapshot) -> usize {
        let pending = self.pending.take().unwrap_or_default();
        self.load(snapshot);
        for (name, payload) in &pending {
            if let Err(e) = self.apply_change(*name, payload) {
                log::warn!("[Store] Replay of {} failed: {}", name, e);
            }
        }
        pending.len()
    }

    /// Stops recording and drops whatever was recorded.
    pub fn cancel_sync(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn is_syncing(&self) -> bool {
        self.pending.is_some()
    }

    /// Applies one pushed event.
    ///
    /// Returns `Ok(true)` when state changed. Events for entities the store
    /// does not hold are logged and ignored.
    pub fn apply(&mut self, event: &Event) -> StoreResult<bool> {
        let name = event
            .kind()
            .ok_or_else(|| StoreError::Unsupported(event.name.clone()))?;
        self.apply_named(name, &event.event)
    }

    fn apply_named(&mut self, name: EventName, payload: &Value) -> StoreResult<bool> {
        let changed = self.apply_change(name, payload)?;
        if let Some(pending) = self.pending.as_mut() {
            pending.push((name, payload.clone()));
        }
        Ok(changed)
    }

    fn apply_change(&mut self, name: EventName, payload: &Value) -> StoreResult<bool> {
        let changed = match name {
            EventName::VideoCreated => {
                let video: Video = decode(name, payload)?;
                self.videos.insert(video.id.clone(), video);
                true
            }
            EventName::VideoDeleted => {
                let EntityDeleted { model_id } = decode(name, payload)?;
                let mut changed = self.videos.remove(&model_id).is_some();
                for playlist in self.playlists.values_mut() {
                    changed |= playlist.remove_video(&model_id);
                }
                for ids in self
                    .artists
                    .values_mut()
                    .map(|a| &mut a.ids)
                    .chain(self.albums.values_mut().map(|a| &mut a.ids))
                {
                    let before = ids.len();
                    ids.retain(|id| *id != model_id);
                    changed |= ids.len() != before;
                }
                changed
            }
            EventName::PlaylistCreated => {
                let mut playlist: Playlist = decode(name, payload)?;
                let ids = std::mem::take(&mut playlist.ids);
                playlist.set_ids(ids);
                self.playlists.insert(playlist.id.clone(), playlist);
                true
            }
            EventName::PlaylistDeleted => {
                let EntityDeleted { model_id } = decode(name, payload)?;
                self.playlists.remove(&model_id).is_some()
            }
            EventName::PlaylistContentUpdated => {
                let ContentUpdated { model_id, ids } = decode(name, payload)?;
                update_entity(name, "playlist", &mut self.playlists, &model_id, |p| {
                    p.set_ids(ids)
                })
            }
            EventName::PlaylistRenamed => {
                let PlaylistRenamed { model_id, name: new_name } = decode(name, payload)?;
                update_entity(name, "playlist", &mut self.playlists, &model_id, |p| {
                    p.rename(new_name)
                })
            }
            EventName::PlayerStateUpdated => {
                let update: PlayerStateUpdated = decode(name, payload)?;
                self.player.state = update.state;
                if update.position.is_some() {
                    self.player.position = update.position;
                }
                if update.duration.is_some() {
                    self.player.duration = update.duration;
                }
                true
            }
            EventName::PlayerVideoUpdated => {
                let update: PlayerVideoUpdated = decode(name, payload)?;
                self.player.video_id = update.video_id;
                self.player.playlist_id = update.playlist_id;
                self.player.position = None;
                true
            }
            EventName::VolumeUpdated => {
                let VolumeUpdated { volume } = decode(name, payload)?;
                self.player.volume = volume.min(100);
                true
            }
            EventName::SubtitleStateUpdated => {
                let SubtitleStateUpdated { enabled } = decode(name, payload)?;
                self.player.subtitles.enabled = enabled;
                true
            }
            EventName::SubtitleDelayUpdated => {
                let SubtitleDelayUpdated { delay_ms } = decode(name, payload)?;
                self.player.subtitles.delay_ms = delay_ms;
                true
            }
            EventName::DownloadInfo => {
                let DownloadInfo { model_id, progress } = decode(name, payload)?;
                update_entity(name, "video", &mut self.videos, &model_id, |v| {
                    if progress.is_complete() {
                        v.ready = true;
                    }
                    v.download = Some(progress);
                })
            }
            EventName::ArtistVideosUpdated => {
                let ContentUpdated { model_id, ids } = decode(name, payload)?;
                update_entity(name, "artist", &mut self.artists, &model_id, |a| a.ids = ids)
            }
            EventName::ArtistThumbnailUpdated => {
                let ArtistThumbnailUpdated { model_id, thumbnail } = decode(name, payload)?;
                update_entity(name, "artist", &mut self.artists, &model_id, |a| {
                    a.thumbnail = thumbnail
                })
            }
            EventName::AlbumVideosUpdated => {
                let ContentUpdated { model_id, ids } = decode(name, payload)?;
                update_entity(name, "album", &mut self.albums, &model_id, |a| a.ids = ids)
            }
        };
        Ok(changed)
    }

    /// Splices a playlist's local order (drag-and-drop) and returns the new ids
    /// so the caller can send the same order to the backend.
    pub fn move_in_playlist(
        &mut self,
        playlist: &PlaylistId,
        from: usize,
        to: usize,
    ) -> Option<Vec<VideoId>> {
        let entry = self.playlists.get_mut(playlist)?;
        let ids = entry.moved(from, to)?;
        entry.ids = ids.clone();
        Some(ids)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    #[must_use]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    #[must_use]
    pub fn video(&self, id: &VideoId) -> Option<&Video> {
        self.videos.get(id)
    }

    pub fn videos(&self) -> impl Iterator<Item = &Video> {
        self.videos.values()
    }

    #[must_use]
    pub fn playlist(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.get(id)
    }

    pub fn playlists(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.values()
    }

    #[must_use]
    pub fn artist(&self, id: &ArtistId) -> Option<&Artist> {
        self.artists.get(id)
    }

    pub fn artists(&self) -> impl Iterator<Item = &Artist> {
        self.artists.values()
    }

    #[must_use]
    pub fn album(&self, id: &AlbumId) -> Option<&Album> {
        self.albums.get(id)
    }

    pub fn albums(&self) -> impl Iterator<Item = &Album> {
        self.albums.values()
    }

    /// Videos of a playlist in play order. Ids without a known video are skipped.
    #[must_use]
    pub fn playlist_videos(&self, id: &PlaylistId) -> Vec<&Video> {
        self.playlists
            .get(id)
            .map(|p| p.ids.iter().filter_map(|v| self.videos.get(v)).collect())
            .unwrap_or_default()
    }

    /// The video the player is on while playing from `playlist`.
    #[must_use]
    pub fn active_in(&self, playlist: &PlaylistId) -> Option<&VideoId> {
        self.player.active_in(playlist)
    }
}

/// Runs `f` on the entity with `id`, or logs and returns false if it is unknown.
fn update_entity<K, T, F>(
    name: EventName,
    kind: &str,
    map: &mut BTreeMap<K, T>,
    id: &K,
    f: F,
) -> bool
where
    K: Ord + std::fmt::Display,
    F: FnOnce(&mut T),
{
    match map.get_mut(id) {
        Some(entity) => {
            f(entity);
            true
        }
        None => {
            log::debug!("[Store] {} for unknown {} {}, ignoring", name, kind, id);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared Store
// ─────────────────────────────────────────────────────────────────────────────

/// Thread-safe handle to a [`MediaStore`] with change notification.
///
/// Every mutation that changes state bumps a revision counter observable via
/// [`SharedStore::watch`], which is what a UI re-renders from.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<RwLock<MediaStore>>,
    revision: Arc<watch::Sender<u64>>,
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self {
            inner: Arc::new(RwLock::new(MediaStore::new())),
            revision: Arc::new(tx),
        }
    }

    /// Read access to the current state.
    pub fn read(&self) -> RwLockReadGuard<'_, MediaStore> {
        self.inner.read()
    }

    pub fn load(&self, snapshot: LibrarySnapshot) {
        self.inner.write().load(snapshot);
        self.bump();
    }

    /// See [`MediaStore::begin_sync`].
    pub fn begin_sync(&self) {
        self.inner.write().begin_sync();
    }

    /// See [`MediaStore::finish_sync`].
    pub fn finish_sync(&self, snapshot: LibrarySnapshot) -> usize {
        let replayed = self.inner.write().finish_sync(snapshot);
        self.bump();
        replayed
    }

    pub fn cancel_sync(&self) {
        self.inner.write().cancel_sync();
    }

    pub fn apply(&self, event: &Event) -> StoreResult<bool> {
        let changed = self.inner.write().apply(event)?;
        if changed {
            self.bump();
        }
        Ok(changed)
    }

    /// See [`MediaStore::move_in_playlist`].
    pub fn move_in_playlist(
        &self,
        playlist: &PlaylistId,
        from: usize,
        to: usize,
    ) -> Option<Vec<VideoId>> {
        let ids = self.inner.write().move_in_playlist(playlist, from, to)?;
        self.bump();
        Some(ids)
    }

    /// Receiver that observes the revision counter.
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Registers the store for every known event name.
    ///
    /// The store stops tracking server state when the returned subscription
    /// is dropped.
    pub fn attach(&self, dispatcher: &Dispatcher) -> Subscription {
        let handlers = EventName::ALL.iter().map(|&name| {
            let store = self.clone();
            let h: Handler = Arc::new(move |payload: &Value| {
                let changed = store.inner.write().apply_named(name, payload)?;
                if changed {
                    store.bump();
                }
                Ok::<(), HandlerError>(())
            });
            (name, h)
        });
        dispatcher.observe(handlers, None)
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Playback;
    use serde_json::json;

    fn ids(raw: &[&str]) -> Vec<VideoId> {
        raw.iter().map(|s| VideoId::from(*s)).collect()
    }

    fn seeded() -> MediaStore {
        let mut store = MediaStore::new();
        store.load(LibrarySnapshot {
            videos: vec![Video::new("a", "A"), Video::new("b", "B"), Video::new("c", "C")],
            playlists: vec![Playlist::new("p1", "Mix", ids(&["a", "b", "c"]))],
            artists: vec![Artist {
                id: "ar".into(),
                name: "Someone".into(),
                thumbnail: None,
                ids: ids(&["a", "b"]),
            }],
            ..Default::default()
        });
        store
    }

    fn apply(store: &mut MediaStore, name: &str, payload: Value) -> StoreResult<bool> {
        store.apply(&Event::new(name, payload))
    }

    #[test]
    fn video_lifecycle() {
        let mut store = seeded();
        assert!(apply(&mut store, "VideoCreated", json!({"id": "d", "title": "D"})).unwrap());
        assert_eq!(store.video(&"d".into()).map(|v| v.title.as_str()), Some("D"));

        assert!(apply(&mut store, "VideoDeleted", json!({"model_id": "b"})).unwrap());
        assert!(store.video(&"b".into()).is_none());
        assert_eq!(store.playlist(&"p1".into()).unwrap().ids, ids(&["a", "c"]));
        assert_eq!(store.artist(&"ar".into()).unwrap().ids, ids(&["a"]));
    }

    #[test]
    fn playlist_lifecycle() {
        let mut store = seeded();
        apply(
            &mut store,
            "PlaylistCreated",
            json!({"id": 2, "name": "New", "ids": ["a", "a", "c"]}),
        )
        .unwrap();
        assert_eq!(store.playlist(&"2".into()).unwrap().ids, ids(&["a", "c"]));

        apply(
            &mut store,
            "PlaylistContentUpdated",
            json!({"model_id": 2, "ids": ["c", "b"]}),
        )
        .unwrap();
        apply(&mut store, "PlaylistRenamed", json!({"model_id": "2", "name": "Renamed"})).unwrap();
        let playlist = store.playlist(&"2".into()).unwrap();
        assert_eq!(playlist.ids, ids(&["c", "b"]));
        assert_eq!(playlist.name, "Renamed");

        assert!(apply(&mut store, "PlaylistDeleted", json!({"model_id": 2})).unwrap());
        assert!(store.playlist(&"2".into()).is_none());
    }

    #[test]
    fn events_for_unknown_entities_are_ignored() {
        let mut store = seeded();
        let changed = apply(
            &mut store,
            "PlaylistRenamed",
            json!({"model_id": "missing", "name": "x"}),
        )
        .unwrap();
        assert!(!changed);
        assert!(!apply(&mut store, "PlaylistDeleted", json!({"model_id": "missing"})).unwrap());
    }

    #[test]
    fn bad_payload_is_an_error() {
        let mut store = seeded();
        let err = apply(&mut store, "VolumeUpdated", json!({"volume": "loud"})).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Payload {
                name: EventName::VolumeUpdated,
                ..
            }
        ));
    }

    #[test]
    fn unsupported_event_is_an_error() {
        let mut store = seeded();
        let err = apply(&mut store, "Mystery", json!({})).unwrap_err();
        assert!(matches!(err, StoreError::Unsupported(name) if name == "Mystery"));
    }

    #[test]
    fn player_events_update_player_state() {
        let mut store = seeded();
        apply(&mut store, "PlayerVideoUpdated", json!({"video_id": "b", "playlist_id": "p1"}))
            .unwrap();
        apply(&mut store, "PlayerStateUpdated", json!({"state": "playing", "position": 3.5}))
            .unwrap();
        apply(&mut store, "VolumeUpdated", json!({"volume": 140})).unwrap();
        apply(&mut store, "SubtitleStateUpdated", json!({"enabled": true})).unwrap();
        apply(&mut store, "SubtitleDelayUpdated", json!({"delay_ms": -250})).unwrap();

        let player = store.player();
        assert_eq!(player.state, Playback::Playing);
        assert_eq!(player.position, Some(3.5));
        assert_eq!(player.volume, 100);
        assert!(player.subtitles.enabled);
        assert_eq!(player.subtitles.delay_ms, -250);
        assert_eq!(store.active_in(&"p1".into()), Some(&VideoId::from("b")));
    }

    #[test]
    fn download_info_marks_video_ready_when_complete() {
        let mut store = seeded();
        apply(
            &mut store,
            "DownloadInfo",
            json!({"model_id": "a", "downloaded_bytes": 5, "total_bytes": 10}),
        )
        .unwrap();
        assert!(!store.video(&"a".into()).unwrap().ready);

        apply(
            &mut store,
            "DownloadInfo",
            json!({"model_id": "a", "downloaded_bytes": 10, "total_bytes": 10}),
        )
        .unwrap();
        let video = store.video(&"a".into()).unwrap();
        assert!(video.ready);
        assert_eq!(video.download.as_ref().and_then(|d| d.fraction()), Some(1.0));
    }

    #[test]
    fn artist_and_album_updates() {
        let mut store = seeded();
        store.albums.insert(
            "al".into(),
            Album {
                id: "al".into(),
                name: "Record".into(),
                artist_id: Some("ar".into()),
                thumbnail: None,
                ids: vec![],
            },
        );
        apply(&mut store, "ArtistVideosUpdated", json!({"model_id": "ar", "ids": ["c"]})).unwrap();
        apply(
            &mut store,
            "ArtistThumbnailUpdated",
            json!({"model_id": "ar", "thumbnail": "/t.jpg"}),
        )
        .unwrap();
        apply(&mut store, "AlbumVideosUpdated", json!({"model_id": "al", "ids": ["a", "b"]}))
            .unwrap();

        let artist = store.artist(&"ar".into()).unwrap();
        assert_eq!(artist.ids, ids(&["c"]));
        assert_eq!(artist.thumbnail.as_deref(), Some("/t.jpg"));
        assert_eq!(store.album(&"al".into()).unwrap().ids, ids(&["a", "b"]));
    }

    #[test]
    fn playlist_videos_follow_play_order() {
        let mut store = seeded();
        store.move_in_playlist(&"p1".into(), 2, 0).unwrap();
        let titles: Vec<_> = store
            .playlist_videos(&"p1".into())
            .into_iter()
            .map(|v| v.title.as_str())
            .collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn attached_store_follows_dispatched_events() {
        let dispatcher = Dispatcher::new();
        let store = SharedStore::new();
        store.load(LibrarySnapshot {
            playlists: vec![Playlist::new("p1", "Mix", ids(&["a"]))],
            ..Default::default()
        });
        let rx = store.watch();
        let before = *rx.borrow();

        let sub = store.attach(&dispatcher);
        assert_eq!(sub.len(), EventName::ALL.len());

        dispatcher.dispatch_raw(r#"{"name":"PlaylistRenamed","event":{"model_id":"p1","name":"Late"}}"#);
        assert_eq!(store.read().playlist(&"p1".into()).unwrap().name, "Late");
        assert!(store.revision() > before);

        drop(sub);
        dispatcher.dispatch_raw(r#"{"name":"PlaylistRenamed","event":{"model_id":"p1","name":"Later"}}"#);
        assert_eq!(store.read().playlist(&"p1".into()).unwrap().name, "Late");
    }

    #[test]
    fn deleting_an_unloaded_video_still_cleans_orders() {
        let store = SharedStore::new();
        store.load(LibrarySnapshot {
            videos: vec![Video::new("a", "A")],
            playlists: vec![Playlist::new("p", "Mix", ids(&["a", "ghost"]))],
            ..Default::default()
        });
        let before = store.revision();

        let changed = store
            .apply(&Event::new("VideoDeleted", json!({"model_id": "ghost"})))
            .unwrap();
        assert!(changed);
        assert_eq!(store.read().playlist(&"p".into()).unwrap().ids, ids(&["a"]));
        assert!(store.revision() > before);

        let again = store
            .apply(&Event::new("VideoDeleted", json!({"model_id": "ghost"})))
            .unwrap();
        assert!(!again);
    }

    #[test]
    fn events_during_sync_survive_an_older_snapshot() {
        let dispatcher = Dispatcher::new();
        let store = SharedStore::new();
        let _attached = store.attach(&dispatcher);

        store.begin_sync();
        dispatcher.dispatch_raw(r#"{"name":"PlaylistRenamed","event":{"model_id":"p1","name":"Late"}}"#);
        dispatcher.dispatch_raw(r#"{"name":"VolumeUpdated","event":{"volume":70}}"#);

        // Fetched before the events above were pushed.
        let stale = LibrarySnapshot {
            playlists: vec![Playlist::new("p1", "Mix", ids(&["a"]))],
            ..Default::default()
        };
        assert_eq!(store.finish_sync(stale), 2);

        let state = store.read();
        assert_eq!(state.playlist(&"p1".into()).unwrap().name, "Late");
        assert_eq!(state.player().volume, 70);
        assert!(!state.is_syncing());
    }

    #[test]
    fn cancelled_sync_stops_recording() {
        let mut store = seeded();
        store.begin_sync();
        apply(&mut store, "PlaylistRenamed", json!({"model_id": "p1", "name": "Late"})).unwrap();
        store.cancel_sync();
        assert!(!store.is_syncing());

        assert_eq!(
            store.finish_sync(LibrarySnapshot {
                playlists: vec![Playlist::new("p1", "Mix", ids(&["a"]))],
                ..Default::default()
            }),
            0
        );
        assert_eq!(store.playlist(&"p1".into()).unwrap().name, "Mix");
    }
}
