//! Video records and download progress.

use serde::{Deserialize, Serialize};

use super::ids::{AlbumId, ArtistId, VideoId};

/// A media item in the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    #[serde(default)]
    pub title: String,
    /// Source URL the backend resolved the media from.
    #[serde(default)]
    pub url: Option<String>,
    /// Duration in seconds, once known.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub artist_id: Option<ArtistId>,
    #[serde(default)]
    pub album_id: Option<AlbumId>,
    /// True once the media is fully downloaded and playable.
    #[serde(default)]
    pub ready: bool,
    /// Latest download progress reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download: Option<DownloadProgress>,
}

impl Video {
    pub fn new(id: impl Into<VideoId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            duration: None,
            thumbnail: None,
            artist_id: None,
            album_id: None,
            ready: false,
            download: None,
        }
    }
}

/// Download progress carried by `DownloadInfo` events.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DownloadProgress {
    #[serde(default)]
    pub downloaded_bytes: u64,
    #[serde(default)]
    pub total_bytes: Option<u64>,
    /// Bytes per second.
    #[serde(default)]
    pub speed: Option<f64>,
    /// Estimated seconds remaining.
    #[serde(default)]
    pub eta: Option<u64>,
}

impl DownloadProgress {
    /// Completed fraction in `0.0..=1.0`, or `None` when the total is unknown.
    #[must_use]
    pub fn fraction(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) | None => None,
            Some(total) => Some((self.downloaded_bytes as f64 / total as f64).min(1.0)),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.total_bytes, Some(total) if total > 0 && self.downloaded_bytes >= total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_minimal_video() {
        let video: Video = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(video.id.as_str(), "3");
        assert!(video.title.is_empty());
        assert!(!video.ready);
    }

    #[test]
    fn progress_fraction() {
        let progress = DownloadProgress {
            downloaded_bytes: 50,
            total_bytes: Some(200),
            ..Default::default()
        };
        assert_eq!(progress.fraction(), Some(0.25));
        assert!(!progress.is_complete());

        let unknown = DownloadProgress::default();
        assert_eq!(unknown.fraction(), None);
    }
}
