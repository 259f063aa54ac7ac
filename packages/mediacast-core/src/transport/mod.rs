//! Push channels.
//!
//! Each configured endpoint is a WebSocket that carries `{ name, event }`
//! frames. Frames are handed to the [`crate::events::Dispatcher`] as they
//! arrive. Lost connections are re-established following a [`Backoff`]
//! schedule until the [`ChannelManager`] closes them.

mod manager;
mod socket;

use std::time::Duration;

use thiserror::Error;
use tokio_tungstenite::tungstenite;

pub use manager::{ChannelGuard, ChannelManager};

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("WebSocket error: {0}")]
    Connect(#[from] tungstenite::Error),

    #[error("channel closed")]
    Closed,
}

/// Delay used when no reconnect schedule is configured.
const FALLBACK_DELAY: Duration = Duration::from_secs(1);

/// Reconnect schedule. The last delay repeats forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    delays: Vec<Duration>,
}

impl Backoff {
    pub fn from_millis(delays_ms: &[u64]) -> Self {
        Self {
            delays: delays_ms.iter().copied().map(Duration::from_millis).collect(),
        }
    }

    /// Delay before reconnect attempt number `attempt` (0-based).
    #[must_use]
    pub fn delay(&self, attempt: usize) -> Duration {
        self.delays
            .get(attempt)
            .or_else(|| self.delays.last())
            .copied()
            .unwrap_or(FALLBACK_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_repeats_last_delay() {
        let backoff = Backoff::from_millis(&[100, 250]);
        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(1), Duration::from_millis(250));
        assert_eq!(backoff.delay(7), Duration::from_millis(250));
    }

    #[test]
    fn empty_backoff_uses_fallback() {
        assert_eq!(Backoff::from_millis(&[]).delay(3), FALLBACK_DELAY);
    }
}
