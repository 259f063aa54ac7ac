//! Remote configuration.
//!
//! Supports loading from YAML files with environment variable overrides.

use std::path::Path;

use anyhow::{Context, Result};
use mediacast_core::ClientConfig;
use serde::Deserialize;

/// Remote configuration loaded from YAML with environment overrides.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Address of the media server.
    /// Override: `MEDIACAST_SERVER_URL`
    pub server_url: String,

    /// REST request timeout in seconds.
    /// Override: `MEDIACAST_REQUEST_TIMEOUT`
    pub request_timeout_secs: u64,

    /// Push channel endpoints relative to `/api/`.
    pub event_channels: Vec<String>,

    /// Reconnect schedule for push channels (milliseconds).
    pub reconnect_delays_ms: Vec<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        let core = ClientConfig::default();
        Self {
            server_url: core.server_url,
            request_timeout_secs: core.request_timeout_secs,
            event_channels: core.event_channels,
            reconnect_delays_ms: core.reconnect_delays_ms,
        }
    }
}

impl RemoteConfig {
    /// Loads configuration from a YAML file, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies overrides looked up by variable name.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("MEDIACAST_SERVER_URL").filter(|v| !v.trim().is_empty()) {
            self.server_url = url;
        }

        if let Some(val) = lookup("MEDIACAST_REQUEST_TIMEOUT") {
            match val.parse() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => log::warn!("Ignoring invalid MEDIACAST_REQUEST_TIMEOUT={}", val),
            }
        }
    }

    /// Converts to mediacast-core's config type.
    pub fn to_client_config(&self, connect_channels: bool) -> ClientConfig {
        ClientConfig {
            server_url: self.server_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
            connect_channels,
            event_channels: self.event_channels.clone(),
            reconnect_delays_ms: self.reconnect_delays_ms.clone(),
        }
    }
}
