//! Centralized error types for the Mediacast client core.
//!
//! Each subsystem has its own `thiserror` enum; [`MediacastError`] unifies
//! them for callers that cross subsystem boundaries, and [`ErrorCode`] gives
//! every error a stable machine-readable code.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::events::HandlerError;
use crate::store::StoreError;
use crate::transport::ChannelError;

/// Trait for error types that provide machine-readable error codes.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;
}

impl ErrorCode for ApiError {
    fn code(&self) -> &'static str {
        match self {
            Self::Http(e) if e.is_timeout() => "request_timeout",
            Self::Http(_) => "http_request_failed",
            Self::Status { .. } => "http_error_status",
            Self::Url(_) => "invalid_url",
            Self::Decode(_) => "unexpected_response",
        }
    }
}

impl ErrorCode for StoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::Payload { .. } => "invalid_payload",
            Self::Unsupported(_) => "unsupported_event",
        }
    }
}

impl ErrorCode for ChannelError {
    fn code(&self) -> &'static str {
        match self {
            Self::Connect(_) => "channel_connect_failed",
            Self::Closed => "channel_closed",
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyServerUrl => "missing_server_url",
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidValue(_) => "invalid_config_value",
        }
    }
}

impl ErrorCode for HandlerError {
    fn code(&self) -> &'static str {
        match self {
            Self::Payload(_) => "invalid_payload",
            Self::Rejected(_) => "handler_rejected",
        }
    }
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum MediacastError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An entity referenced by the caller is not in the local store.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller asked for something that cannot be done.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl MediacastError {
    /// Returns a machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Api(e) => e.code(),
            Self::Store(e) => e.code(),
            Self::Channel(e) => e.code(),
            Self::Config(e) => e.code(),
            Self::NotFound(_) => "not_found",
            Self::InvalidRequest(_) => "invalid_request",
        }
    }

    /// Text suitable for showing the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Convenient Result alias for application-wide operations.
pub type MediacastResult<T> = Result<T, MediacastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_status_keeps_server_message() {
        let err = MediacastError::from(ApiError::Status {
            status: 422,
            message: "Unsupported URL".into(),
        });
        assert_eq!(err.code(), "http_error_status");
        assert_eq!(err.user_message(), "Unsupported URL");
    }

    #[test]
    fn local_errors_have_codes() {
        assert_eq!(MediacastError::NotFound("playlist 3".into()).code(), "not_found");
        assert_eq!(
            MediacastError::from(ConfigError::EmptyServerUrl).code(),
            "missing_server_url"
        );
        assert_eq!(
            MediacastError::from(StoreError::Unsupported("X".into())).code(),
            "unsupported_event"
        );
    }
}
