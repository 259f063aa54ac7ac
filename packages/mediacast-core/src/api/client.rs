//! HTTP transport for the media server's REST API.
//!
//! Every endpoint lives under `/api/`. Player commands are `POST`s carrying
//! their arguments as query parameters; resource endpoints exchange JSON.
//! Failures are returned as-is: there is no automatic retry, the user
//! re-issues the action.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::traits::{PlayerApi, PlaylistApi};
use super::types::{PlaylistCreate, PlaylistUpdate};
use crate::config::{ClientConfig, ConfigError};
use crate::model::{
    Album, AlbumId, Artist, ArtistId, EntityId, PlayerState, Playlist, PlaylistId, Video,
    VideoId,
};
use crate::protocol_constants::ERROR_MESSAGE_FIELDS;
use crate::store::LibrarySnapshot;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur talking to the media server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response not read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error {status}: {message}")]
    Status { status: u16, message: String },

    /// A request URL could not be built.
    #[error("invalid request URL: {0}")]
    Url(String),

    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Text suitable for showing the user: the server's own message when it
    /// sent one.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of the failed request, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Convenient Result alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Pulls a human-readable message out of an error response body.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for field in ERROR_MESSAGE_FIELDS {
            if let Some(Value::String(msg)) = map.get(field) {
                return msg.clone();
            }
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// REST client bound to one server.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Builds a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ConfigError::InvalidValue(format!("HTTP client: {e}")))?;
        Ok(Self::with_client(http, config.api_base()?))
    }

    /// Builds a client around an existing `reqwest::Client` for connection reuse.
    #[must_use]
    pub fn with_client(http: Client, api_base: Url) -> Self {
        Self {
            http,
            base: api_base,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Builds the URL for `path` (relative to `/api/`) with query parameters.
    fn url(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Url> {
        let mut url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Url(format!("{path}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn execute(&self, request: RequestBuilder, label: &str) -> ApiResult<Response> {
        let start = std::time::Instant::now();
        let res = request.send().await;
        log::debug!(
            "[Api] {} completed in {:?}: {:?}",
            label,
            start.elapsed(),
            res.as_ref().map(|r| r.status())
        );

        let res = res?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        log::warn!("[Api] {} failed with {}: {}", label, status.as_u16(), message);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// URL of one entity below `collection`, with `id` escaped as a single
    /// path segment.
    fn entity_url(&self, collection: &str, id: &EntityId, tail: Option<&str>) -> ApiResult<Url> {
        let mut url = self.url(collection, &[])?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Url(format!("{collection}: not a hierarchical URL")))?
            .pop_if_empty()
            .push(id.as_str())
            .extend(tail);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let label = format!("GET {}", url.path());
        let res = self.execute(self.http.get(url), &label).await?;
        let body = res.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> ApiResult<()> {
        let label = format!("{method} {}", url.path());
        self.execute(self.http.request(method, url).json(body), &label)
            .await?;
        Ok(())
    }

    async fn command(&self, path: &str, query: &[(&str, String)]) -> ApiResult<()> {
        let url = self.url(path, query)?;
        self.execute(self.http.post(url), &format!("POST {path}"))
            .await?;
        Ok(())
    }

    async fn delete(&self, url: Url) -> ApiResult<()> {
        let label = format!("DELETE {}", url.path());
        self.execute(self.http.delete(url), &label).await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Player
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn player_state(&self) -> ApiResult<PlayerState> {
        self.get_json(self.url("player/", &[])?).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Videos
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn videos(&self) -> ApiResult<Vec<Video>> {
        self.get_json(self.url("videos/", &[])?).await
    }

    pub async fn video(&self, id: &VideoId) -> ApiResult<Video> {
        self.get_json(self.entity_url("videos/", id, None)?).await
    }

    pub async fn delete_video(&self, id: &VideoId) -> ApiResult<()> {
        self.delete(self.entity_url("videos/", id, None)?).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Playlists
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_playlist(&self, name: &str, ids: Vec<VideoId>) -> ApiResult<()> {
        let body = PlaylistCreate {
            name: name.to_string(),
            ids,
        };
        self.send_json(Method::POST, self.url("playlists/", &[])?, &body)
            .await
    }

    pub async fn playlists(&self) -> ApiResult<Vec<Playlist>> {
        self.get_json(self.url("playlists/", &[])?).await
    }

    pub async fn playlist(&self, id: &PlaylistId) -> ApiResult<Playlist> {
        self.get_json(self.entity_url("playlists/", id, None)?).await
    }

    /// Partially updates a playlist (name and/or order).
    pub async fn update_playlist(&self, id: &PlaylistId, update: &PlaylistUpdate) -> ApiResult<()> {
        self.send_json(Method::PATCH, self.entity_url("playlists/", id, None)?, update)
            .await
    }

    pub async fn delete_playlist(&self, id: &PlaylistId) -> ApiResult<()> {
        self.delete(self.entity_url("playlists/", id, None)?).await
    }

    /// Videos of a playlist in play order.
    pub async fn playlist_videos(&self, id: &PlaylistId) -> ApiResult<Vec<Video>> {
        self.get_json(self.entity_url("playlists/", id, Some("videos"))?)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Artists / Albums
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn artists(&self) -> ApiResult<Vec<Artist>> {
        self.get_json(self.url("artists/", &[])?).await
    }

    pub async fn artist(&self, id: &ArtistId) -> ApiResult<Artist> {
        self.get_json(self.entity_url("artists/", id, None)?).await
    }

    pub async fn delete_artist(&self, id: &ArtistId) -> ApiResult<()> {
        self.delete(self.entity_url("artists/", id, None)?).await
    }

    pub async fn albums(&self) -> ApiResult<Vec<Album>> {
        self.get_json(self.url("albums/", &[])?).await
    }

    pub async fn album(&self, id: &AlbumId) -> ApiResult<Album> {
        self.get_json(self.entity_url("albums/", id, None)?).await
    }

    pub async fn delete_album(&self, id: &AlbumId) -> ApiResult<()> {
        self.delete(self.entity_url("albums/", id, None)?).await
    }

    /// Fetches the full server state in parallel.
    pub async fn snapshot(&self) -> ApiResult<LibrarySnapshot> {
        let (player, videos, playlists, artists, albums) = tokio::try_join!(
            self.player_state(),
            self.videos(),
            self.playlists(),
            self.artists(),
            self.albums(),
        )?;
        log::info!(
            "[Api] Snapshot: {} videos, {} playlists, {} artists, {} albums",
            videos.len(),
            playlists.len(),
            artists.len(),
            albums.len()
        );
        Ok(LibrarySnapshot {
            player,
            videos,
            playlists,
            artists,
            albums,
        })
    }
}

#[async_trait]
impl PlayerApi for ApiClient {
    async fn stream(&self, url: &str) -> ApiResult<()> {
        self.command("player/stream", &[("url", url.to_string())])
            .await
    }

    async fn queue(&self, url: &str) -> ApiResult<()> {
        self.command("player/queue", &[("url", url.to_string())])
            .await
    }

    async fn play(&self, video: &VideoId, playlist: Option<&PlaylistId>) -> ApiResult<()> {
        let mut query = vec![("video_id", video.to_string())];
        if let Some(playlist) = playlist {
            query.push(("playlist_id", playlist.to_string()));
        }
        self.command("player/play", &query).await
    }

    async fn stop(&self) -> ApiResult<()> {
        self.command("player/stop", &[]).await
    }

    async fn pause(&self) -> ApiResult<()> {
        self.command("player/pause", &[]).await
    }

    async fn seek(&self, position: f64) -> ApiResult<()> {
        self.command("player/seek", &[("position", position.to_string())])
            .await
    }

    async fn volume(&self, value: u8) -> ApiResult<()> {
        self.command("player/volume", &[("value", value.min(100).to_string())])
            .await
    }

    async fn toggle_subtitles(&self) -> ApiResult<()> {
        self.command("player/subtitle/toggle", &[]).await
    }

    async fn seek_subtitles(&self, delay_ms: i64) -> ApiResult<()> {
        self.command("player/subtitle/seek", &[("delay_ms", delay_ms.to_string())])
            .await
    }
}

#[async_trait]
impl PlaylistApi for ApiClient {
    async fn update_playlist(&self, id: &PlaylistId, update: &PlaylistUpdate) -> ApiResult<()> {
        ApiClient::update_playlist(self, id, update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn client() -> ApiClient {
        ApiClient::new(&ClientConfig::for_server("http://media.local:8000")).unwrap()
    }

    #[test]
    fn urls_are_relative_to_api_base() {
        let client = client();
        assert_eq!(
            client.url("player/", &[]).unwrap().as_str(),
            "http://media.local:8000/api/player/"
        );
        assert_eq!(
            client.url("/playlists/7/videos", &[]).unwrap().as_str(),
            "http://media.local:8000/api/playlists/7/videos"
        );
    }

    #[test]
    fn entity_ids_stay_one_path_segment() {
        let client = client();
        assert_eq!(
            client.entity_url("videos/", &"a/b?c#d".into(), None).unwrap().as_str(),
            "http://media.local:8000/api/videos/a%2Fb%3Fc%23d"
        );
        assert_eq!(
            client.entity_url("playlists/", &7u64.into(), Some("videos")).unwrap().as_str(),
            "http://media.local:8000/api/playlists/7/videos"
        );
    }

    #[test]
    fn query_parameters_are_encoded() {
        let url = client()
            .url("player/stream", &[("url", "https://v.example/watch?v=a b".into())])
            .unwrap();
        assert_eq!(
            url.query(),
            Some("url=https%3A%2F%2Fv.example%2Fwatch%3Fv%3Da+b")
        );
    }

    #[test]
    fn error_message_prefers_server_fields() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":"Unsupported URL"}"#),
            "Unsupported URL"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"error":"no such playlist"}"#),
            "no such playlist"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "  upstream down \n"),
            "upstream down"
        );
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }

    #[test]
    fn user_message_uses_server_text() {
        let err = ApiError::Status {
            status: 400,
            message: "Unsupported URL".into(),
        };
        assert_eq!(err.user_message(), "Unsupported URL");
        assert_eq!(err.status(), Some(400));

        let err = ApiError::Url("bad".into());
        assert_eq!(err.status(), None);
        assert!(err.user_message().contains("bad"));
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(ApiClient::new(&ClientConfig::for_server("")).is_err());
    }
}
