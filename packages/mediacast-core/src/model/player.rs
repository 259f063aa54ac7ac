//! Playback device state.

use serde::{Deserialize, Serialize};

use super::ids::{PlaylistId, VideoId};

/// Transport state of the playback device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Playback {
    #[default]
    Idle,
    Playing,
    Paused,
    Stopped,
    Buffering,
    /// A state this client does not know about yet.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubtitleState {
    #[serde(default)]
    pub enabled: bool,
    /// Subtitle offset in milliseconds (negative shows subtitles earlier).
    #[serde(default)]
    pub delay_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    #[serde(default)]
    pub state: Playback,
    #[serde(default)]
    pub video_id: Option<VideoId>,
    /// Playlist the current video is playing from, if any.
    #[serde(default)]
    pub playlist_id: Option<PlaylistId>,
    /// Volume in percent (0-100).
    #[serde(default)]
    pub volume: u8,
    /// Position in seconds.
    #[serde(default)]
    pub position: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub subtitles: SubtitleState,
}

impl PlayerState {
    /// The video currently playing from `playlist`, if the player is on it.
    #[must_use]
    pub fn active_in(&self, playlist: &PlaylistId) -> Option<&VideoId> {
        match &self.playlist_id {
            Some(current) if current == playlist => self.video_id.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == Playback::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_playback_state_decodes() {
        let state: Playback = serde_json::from_str(r#""rewinding""#).unwrap();
        assert_eq!(state, Playback::Unknown);
        let state: Playback = serde_json::from_str(r#""paused""#).unwrap();
        assert_eq!(state, Playback::Paused);
    }

    #[test]
    fn active_in_requires_matching_playlist() {
        let player = PlayerState {
            video_id: Some("v1".into()),
            playlist_id: Some("p1".into()),
            ..Default::default()
        };
        assert_eq!(player.active_in(&"p1".into()), Some(&VideoId::from("v1")));
        assert_eq!(player.active_in(&"p2".into()), None);
    }
}
