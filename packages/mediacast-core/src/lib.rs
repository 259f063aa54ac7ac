//! Mediacast Core - client library for a Mediacast media server.
//!
//! The server downloads and plays videos; this crate is the remote control
//! side. It mirrors the server's state locally and keeps it current from
//! pushed events, and sends user actions back over REST.
//!
//! # Architecture
//!
//! - [`events`]: event envelope, names and the scoped [`Dispatcher`]
//! - [`store`]: local mirror of player, videos, playlists, artists and albums
//! - [`queue`]: pure playlist reordering (queue next/last, shuffle)
//! - [`api`]: REST client for the server's `/api/` endpoints
//! - [`transport`]: WebSocket push channels with reconnect
//! - [`actions`]: user actions with failure notification
//! - [`session`]: composition root wiring all of the above
//! - [`error`]: centralized error types
//!
//! # Abstraction Traits
//!
//! - [`PlayerApi`](api::PlayerApi) / [`PlaylistApi`](api::PlaylistApi):
//!   backend calls made by actions
//! - [`Notifier`](notify::Notifier): where user-visible failures go

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod actions;
pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod notify;
pub mod protocol_constants;
pub mod queue;
pub mod session;
pub mod store;
pub mod transport;

// Re-export commonly used types at the crate root
pub use actions::{PlayerActions, PlaylistActions};
pub use api::{ApiClient, ApiError, ApiResult, PlayerApi, PlaylistApi};
pub use config::{ClientConfig, ConfigError};
pub use error::{ErrorCode, MediacastError, MediacastResult};
pub use events::{DispatchOutcome, Dispatcher, Event, EventName, Subscription};
pub use notify::{LoggingNotifier, NoopNotifier, Notification, Notifier, Severity};
pub use session::Session;
pub use store::{LibrarySnapshot, MediaStore, SharedStore, StoreError};
pub use transport::{Backoff, ChannelError, ChannelManager};
