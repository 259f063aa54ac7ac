//! Playlist records.
//!
//! A playlist's `ids` define play order. Reordering helpers return the new
//! order instead of mutating, so callers can send it to the backend and let
//! the resulting `PlaylistContentUpdated` event update local state.

use serde::{Deserialize, Serialize};

use super::ids::{PlaylistId, VideoId};
use crate::queue::{self, dedup_preserving_order};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ids: Vec<VideoId>,
    /// Generated playlists are maintained by the backend (e.g. "all videos").
    #[serde(default)]
    pub generated: bool,
}

impl Playlist {
    pub fn new(id: impl Into<PlaylistId>, name: impl Into<String>, ids: Vec<VideoId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ids: dedup_preserving_order(ids),
            generated: false,
        }
    }

    /// Order after queueing `requested` right after the active video.
    #[must_use]
    pub fn queue_next(&self, active: Option<&VideoId>, requested: &[VideoId]) -> Vec<VideoId> {
        queue::queue_next(&self.ids, active, requested)
    }

    /// Order after appending `requested` to the end.
    #[must_use]
    pub fn queue_last(&self, active: Option<&VideoId>, requested: &[VideoId]) -> Vec<VideoId> {
        queue::queue_last(&self.ids, active, requested)
    }

    /// A shuffled copy of the current order.
    #[must_use]
    pub fn shuffled(&self) -> Vec<VideoId> {
        queue::shuffle_ids(&self.ids)
    }

    /// Order after moving the entry at `from` to `to`.
    ///
    /// Returns `None` when either index is out of bounds.
    #[must_use]
    pub fn moved(&self, from: usize, to: usize) -> Option<Vec<VideoId>> {
        if from >= self.ids.len() || to >= self.ids.len() {
            return None;
        }
        let mut ids = self.ids.clone();
        let id = ids.remove(from);
        ids.insert(to, id);
        Some(ids)
    }

    pub fn set_ids(&mut self, ids: Vec<VideoId>) {
        self.ids = dedup_preserving_order(ids);
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Drops a video from the order. Returns true if it was present.
    pub fn remove_video(&mut self, id: &VideoId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|v| v != id);
        self.ids.len() != before
    }

    #[must_use]
    pub fn contains(&self, id: &VideoId) -> bool {
        self.ids.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<VideoId> {
        raw.iter().map(|s| VideoId::from(*s)).collect()
    }

    fn playlist() -> Playlist {
        Playlist::new("p1", "Evening", ids(&["a", "b", "c"]))
    }

    #[test]
    fn queue_next_uses_playlist_order() {
        let p = playlist();
        let active = VideoId::from("b");
        assert_eq!(
            p.queue_next(Some(&active), &ids(&["d", "e"])),
            ids(&["a", "b", "d", "e", "c"])
        );
    }

    #[test]
    fn queue_last_uses_playlist_order() {
        let p = playlist();
        assert_eq!(p.queue_last(None, &ids(&["d", "a"])), ids(&["a", "b", "c", "d"]));
    }

    #[test]
    fn moved_reorders_and_checks_bounds() {
        let p = playlist();
        assert_eq!(p.moved(0, 2), Some(ids(&["b", "c", "a"])));
        assert_eq!(p.moved(2, 0), Some(ids(&["c", "a", "b"])));
        assert_eq!(p.moved(3, 0), None);
    }

    #[test]
    fn set_ids_dedups() {
        let mut p = playlist();
        p.set_ids(ids(&["c", "c", "a"]));
        assert_eq!(p.ids, ids(&["c", "a"]));
    }

    #[test]
    fn remove_video_reports_presence() {
        let mut p = playlist();
        assert!(p.remove_video(&"b".into()));
        assert!(!p.remove_video(&"b".into()));
        assert_eq!(p.ids, ids(&["a", "c"]));
    }
}
