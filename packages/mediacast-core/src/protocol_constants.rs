//! Fixed values of the backend contract.
//!
//! These are defined by the media server's API and changing them would
//! break compatibility. Tunable values live in [`crate::config`].

// ─────────────────────────────────────────────────────────────────────────────
// REST API
// ─────────────────────────────────────────────────────────────────────────────

/// Path prefix of every REST endpoint and push channel.
pub const API_PREFIX: &str = "api/";

/// Payload fields the backend uses for error text, in lookup order.
pub const ERROR_MESSAGE_FIELDS: [&str; 3] = ["message", "error", "detail"];

// ─────────────────────────────────────────────────────────────────────────────
// Push Channels
// ─────────────────────────────────────────────────────────────────────────────

/// Event feed endpoints, relative to the API prefix.
pub const DEFAULT_EVENT_CHANNELS: [&str; 3] = ["playlists/events", "player/events", "videos/events"];

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Timeout for REST requests (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Delays between push-channel reconnect attempts (milliseconds).
/// The last value repeats once the list is exhausted.
pub const DEFAULT_RECONNECT_DELAYS_MS: [u64; 4] = [500, 1000, 2000, 5000];
