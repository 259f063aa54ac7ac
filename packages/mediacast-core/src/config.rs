//! Client configuration.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol_constants::{
    API_PREFIX, DEFAULT_EVENT_CHANNELS, DEFAULT_RECONNECT_DELAYS_MS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_URL,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("server_url must not be empty")]
    EmptyServerUrl,

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{0}")]
    InvalidValue(String),
}

/// Configuration for connecting to a Mediacast server.
///
/// All fields have sensible defaults.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    /// Base address of the media server, e.g. `http://192.168.1.20:8000`.
    pub server_url: String,

    /// Timeout for REST requests (seconds).
    pub request_timeout_secs: u64,

    /// Whether to open the push channels at all.
    pub connect_channels: bool,

    /// Push channel endpoints, relative to `/api/`.
    pub event_channels: Vec<String>,

    /// Delays between reconnect attempts (milliseconds).
    pub reconnect_delays_ms: Vec<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_channels: true,
            event_channels: DEFAULT_EVENT_CHANNELS.iter().map(|s| s.to_string()).collect(),
            reconnect_delays_ms: DEFAULT_RECONNECT_DELAYS_MS.to_vec(),
        }
    }
}

impl ClientConfig {
    /// Creates a config for `server_url` with every other field defaulted.
    pub fn for_server(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Default::default()
        }
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.trim().is_empty() {
            return Err(ConfigError::EmptyServerUrl);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "request_timeout_secs must be >= 1".to_string(),
            ));
        }
        if self.reconnect_delays_ms.is_empty() {
            return Err(ConfigError::InvalidValue(
                "reconnect_delays_ms must list at least one delay".to_string(),
            ));
        }
        self.api_base()?;
        Ok(())
    }

    /// Base URL of the REST API (always ends in `/api/`).
    pub fn api_base(&self) -> Result<Url, ConfigError> {
        let raw = self.server_url.trim();
        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason,
        };

        let mut server = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        if !matches!(server.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", server.scheme())));
        }
        if !server.path().ends_with('/') {
            let path = format!("{}/", server.path());
            server.set_path(&path);
        }
        server.join(API_PREFIX).map_err(|e| invalid(e.to_string()))
    }

    /// WebSocket URLs of the configured push channels.
    pub fn channel_urls(&self) -> Result<Vec<Url>, ConfigError> {
        let base = self.api_base()?;
        self.event_channels
            .iter()
            .map(|path| {
                let mut url = base
                    .join(path.trim_start_matches('/'))
                    .map_err(|e| ConfigError::InvalidUrl {
                        url: path.clone(),
                        reason: e.to_string(),
                    })?;
                let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
                url.set_scheme(scheme).map_err(|()| ConfigError::InvalidUrl {
                    url: url.to_string(),
                    reason: format!("cannot switch scheme to {scheme}"),
                })?;
                Ok(url)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_server_url() {
        let config = ClientConfig::for_server("  ");
        assert!(matches!(config.validate(), Err(ConfigError::EmptyServerUrl)));
    }

    #[test]
    fn rejects_zero_timeout_and_missing_delays() {
        let mut config = ClientConfig::default();
        config.request_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let mut config = ClientConfig::default();
        config.reconnect_delays_ms.clear();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let config = ClientConfig::for_server("ftp://media.local");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn api_base_appends_prefix() {
        let config = ClientConfig::for_server("http://media.local:8000");
        assert_eq!(config.api_base().unwrap().as_str(), "http://media.local:8000/api/");

        let config = ClientConfig::for_server("http://media.local/cast");
        assert_eq!(config.api_base().unwrap().as_str(), "http://media.local/cast/api/");
    }

    #[test]
    fn channel_urls_use_websocket_scheme() {
        let mut config = ClientConfig::for_server("https://media.local");
        config.event_channels = vec!["/playlists/events".into()];
        let urls = config.channel_urls().unwrap();
        assert_eq!(urls[0].as_str(), "wss://media.local/api/playlists/events");

        let config = ClientConfig::for_server("http://media.local");
        let urls = config.channel_urls().unwrap();
        assert_eq!(urls.len(), 3);
        assert!(urls.iter().all(|u| u.scheme() == "ws"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"server_url":"http://box:9000"}"#).unwrap();
        assert_eq!(config.server_url, "http://box:9000");
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert!(config.connect_channels);
    }
}
