//! Push channel tracking and shutdown.
//!
//! - `ChannelManager`: owns every running channel task
//! - `ChannelGuard`: RAII handle held by a channel task, unregisters on exit

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use reqwest::Url;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::socket::run_channel;
use super::Backoff;
use crate::events::Dispatcher;

struct ChannelState {
    url: Url,
    connected: bool,
}

/// Tracks running push channels.
///
/// Every channel task holds a child of one global cancellation token, so
/// [`ChannelManager::close_all`] stops them all at once. The token is
/// replaced afterwards and new channels can be spawned.
pub struct ChannelManager {
    channels: DashMap<String, ChannelState>,
    next_id: AtomicU64,
    global_cancel: RwLock<CancellationToken>,
}

impl ChannelManager {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
            next_id: AtomicU64::new(1),
            global_cancel: RwLock::new(CancellationToken::new()),
        }
    }

    /// Starts a task that keeps `url` connected and feeds its frames to
    /// `dispatcher`.
    pub fn spawn(self: &Arc<Self>, url: Url, dispatcher: Dispatcher, backoff: Backoff) -> JoinHandle<()> {
        let guard = self.register(url.clone());
        tokio::spawn(run_channel(guard, url, dispatcher, backoff))
    }

    fn register(self: &Arc<Self>, url: Url) -> ChannelGuard {
        let id = format!("ch-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let cancel_token = self.global_cancel.read().child_token();

        log::info!("[Channel] Registered {} for {} (total: {})", id, url, self.channels.len() + 1);
        self.channels.insert(
            id.clone(),
            ChannelState {
                url,
                connected: false,
            },
        );

        ChannelGuard {
            id,
            manager: Arc::clone(self),
            cancel_token,
        }
    }

    fn unregister(&self, id: &str) {
        if let Some((_, state)) = self.channels.remove(id) {
            log::info!(
                "[Channel] Unregistered {} for {} (remaining: {})",
                id,
                state.url,
                self.channels.len()
            );
        }
    }

    fn set_connected(&self, id: &str, connected: bool) {
        if let Some(mut state) = self.channels.get_mut(id) {
            state.connected = connected;
        }
    }

    /// Number of channel tasks still running.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of channels with a live socket.
    #[must_use]
    pub fn connected_count(&self) -> usize {
        self.channels.iter().filter(|c| c.connected).count()
    }

    /// Whether every running channel currently has a live socket.
    #[must_use]
    pub fn all_connected(&self) -> bool {
        self.channels.iter().all(|c| c.connected)
    }

    /// Stops every channel. Returns how many were signalled.
    pub fn close_all(&self) -> usize {
        let count = self.channels.len();
        if count > 0 {
            log::info!("[Channel] Closing {} channel(s)", count);
        }
        let mut guard = self.global_cancel.write();
        guard.cancel();
        *guard = CancellationToken::new();
        count
    }
}

impl Default for ChannelManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Held by a running channel task; unregisters the channel when dropped.
pub struct ChannelGuard {
    id: String,
    manager: Arc<ChannelManager>,
    cancel_token: CancellationToken,
}

impl ChannelGuard {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Cancelled when the manager closes this channel.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    pub(crate) fn set_connected(&self, connected: bool) {
        self.manager.set_connected(&self.id, connected);
    }
}

impl Drop for ChannelGuard {
    fn drop(&mut self) {
        self.manager.unregister(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("ws://127.0.0.1:9/api/player/events").unwrap()
    }

    #[test]
    fn guard_drop_unregisters() {
        let manager = Arc::new(ChannelManager::new());
        let guard = manager.register(url());
        assert_eq!(manager.channel_count(), 1);
        assert!(!manager.all_connected());

        guard.set_connected(true);
        assert_eq!(manager.connected_count(), 1);

        drop(guard);
        assert_eq!(manager.channel_count(), 0);
        assert_eq!(manager.connected_count(), 0);
    }

    #[test]
    fn close_all_cancels_existing_but_not_new_channels() {
        let manager = Arc::new(ChannelManager::new());
        let first = manager.register(url());
        let second = manager.register(url());
        assert_ne!(first.id(), second.id());

        assert_eq!(manager.close_all(), 2);
        assert!(first.cancel_token().is_cancelled());
        assert!(second.cancel_token().is_cancelled());

        let third = manager.register(url());
        assert!(!third.cancel_token().is_cancelled());
    }
}
