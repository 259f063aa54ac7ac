//! Server-pushed events and their routing.
//!
//! This module provides:
//! - [`Event`], the `{ name, event }` envelope delivered by every push channel
//! - [`EventName`], the names this client understands
//! - [`Dispatcher`], which routes events to observers by name and optional
//!   entity id
//! - typed payloads in [`payloads`]

mod dispatcher;
pub mod payloads;

pub use dispatcher::{
    handler, DispatchOutcome, Dispatcher, Handler, HandlerError, Subscription,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload field naming the entity an event targets.
pub const MODEL_ID_FIELD: &str = "model_id";

/// Wire envelope for a pushed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub event: Value,
}

impl Event {
    pub fn new(name: impl Into<String>, event: Value) -> Self {
        Self {
            name: name.into(),
            event,
        }
    }

    /// The targeted entity id, if the payload carries one.
    ///
    /// Numeric ids are returned in their decimal string form.
    #[must_use]
    pub fn model_id(&self) -> Option<String> {
        model_id_of(&self.event)
    }

    /// The known event name, or `None` for names this client does not handle.
    #[must_use]
    pub fn kind(&self) -> Option<EventName> {
        self.name.parse().ok()
    }
}

/// Extracts the `model_id` field from a payload as a string.
#[must_use]
pub fn model_id_of(payload: &Value) -> Option<String> {
    match payload.get(MODEL_ID_FIELD)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Generates [`EventName`] with its string mapping and the list of all names.
macro_rules! event_names {
    ($($variant:ident),+ $(,)?) => {
        /// Event names emitted by the backend.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum EventName {
            $($variant,)+
        }

        impl EventName {
            /// Every known event name, in declaration order.
            pub const ALL: &'static [EventName] = &[$(EventName::$variant,)+];

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(EventName::$variant => stringify!($variant),)+
                }
            }
        }

        impl FromStr for EventName {
            type Err = UnknownEventName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok(EventName::$variant),)+
                    other => Err(UnknownEventName(other.to_string())),
                }
            }
        }
    };
}

event_names!(
    VideoCreated,
    VideoDeleted,
    PlaylistCreated,
    PlaylistDeleted,
    PlaylistContentUpdated,
    PlaylistRenamed,
    PlayerStateUpdated,
    PlayerVideoUpdated,
    VolumeUpdated,
    SubtitleStateUpdated,
    SubtitleDelayUpdated,
    DownloadInfo,
    ArtistVideosUpdated,
    ArtistThumbnailUpdated,
    AlbumVideosUpdated,
);

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EventName> for String {
    fn from(name: EventName) -> Self {
        name.as_str().to_string()
    }
}

/// Returned when parsing a name this client does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event name: {0}")]
pub struct UnknownEventName(pub String);
