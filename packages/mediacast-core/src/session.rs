//! Session bootstrap and dependency wiring.
//!
//! [`Session`] is the composition root: it builds the REST client, the
//! event dispatcher, the store and the push channels, and wires them
//! together in this order:
//!
//! 1. the store is attached to the dispatcher,
//! 2. the push channels are started,
//! 3. the full state is paged in over REST.
//!
//! Events that arrive while the snapshot is in flight are applied live and
//! recorded, then replayed over the snapshot once it lands (see
//! [`MediaStore::begin_sync`](crate::store::MediaStore::begin_sync)).
//! Events lost while a channel is reconnecting are not recovered; call
//! [`Session::resync`] for that.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::actions::{PlayerActions, PlaylistActions};
use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::{MediacastError, MediacastResult};
use crate::events::{Dispatcher, Subscription};
use crate::notify::{Notification, Notifier};
use crate::store::SharedStore;
use crate::transport::{Backoff, ChannelManager};

/// A connected client: shared state plus everything needed to change it.
pub struct Session {
    config: ClientConfig,
    api: Arc<ApiClient>,
    dispatcher: Dispatcher,
    store: SharedStore,
    channels: Arc<ChannelManager>,
    notifier: Arc<dyn Notifier>,
    /// Present while the store tracks pushed events.
    store_subscription: Mutex<Option<Subscription>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl Session {
    /// Wires up a session without touching the network.
    pub fn new(config: ClientConfig, notifier: Arc<dyn Notifier>) -> MediacastResult<Self> {
        config.validate()?;
        let api = Arc::new(ApiClient::new(&config)?);
        log::info!("[Session] Using API at {}", api.base_url());

        Ok(Self {
            config,
            api,
            dispatcher: Dispatcher::new(),
            store: SharedStore::new(),
            channels: Arc::new(ChannelManager::new()),
            notifier,
            store_subscription: Mutex::new(None),
            tasks: Mutex::new(Vec::new()),
        })
    }

    /// Creates a session and brings it online.
    pub async fn connect(config: ClientConfig, notifier: Arc<dyn Notifier>) -> MediacastResult<Self> {
        let session = Self::new(config, notifier)?;
        session.start().await?;
        Ok(session)
    }

    /// Attaches the store, opens the push channels and pages in the state.
    pub async fn start(&self) -> MediacastResult<()> {
        self.attach_store();
        let started = self.start_channels()?;
        log::info!("[Session] Started {} push channel(s)", started);
        self.resync().await
    }

    /// Re-fetches the full state over REST and replaces the local mirror.
    ///
    /// Push channels are best effort; call this after a reconnect gap to
    /// catch up on anything missed.
    pub async fn resync(&self) -> MediacastResult<()> {
        self.store.begin_sync();
        match self.api.snapshot().await {
            Ok(snapshot) => {
                let replayed = self.store.finish_sync(snapshot);
                log::info!(
                    "[Session] Server state loaded (revision {}, {} event(s) replayed)",
                    self.store.revision(),
                    replayed
                );
                Ok(())
            }
            Err(e) => {
                self.store.cancel_sync();
                log::error!("[Session] Failed to load server state: {}", e);
                self.notifier.notify(Notification::error(e.user_message()));
                Err(MediacastError::from(e))
            }
        }
    }

    /// Spawns one task per configured channel. Returns how many were started.
    ///
    /// Does nothing when channels are disabled or already running.
    pub fn start_channels(&self) -> MediacastResult<usize> {
        if !self.config.connect_channels {
            log::info!("[Session] Push channels disabled");
            return Ok(0);
        }
        let mut tasks = self.tasks.lock();
        tasks.retain(|task| !task.is_finished());
        if !tasks.is_empty() {
            return Ok(0);
        }

        let backoff = Backoff::from_millis(&self.config.reconnect_delays_ms);
        for url in self.config.channel_urls()? {
            tasks.push(self.channels.spawn(url, self.dispatcher.clone(), backoff.clone()));
        }
        Ok(tasks.len())
    }

    fn attach_store(&self) {
        let mut slot = self.store_subscription.lock();
        if slot.is_none() {
            *slot = Some(self.store.attach(&self.dispatcher));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    /// Dispatcher for registering additional observers.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn channels(&self) -> &Arc<ChannelManager> {
        &self.channels
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub fn playlist_actions(&self) -> PlaylistActions {
        PlaylistActions::new(self.api.clone(), self.store.clone(), self.notifier.clone())
    }

    pub fn player_actions(&self) -> PlayerActions {
        PlayerActions::new(self.api.clone(), self.notifier.clone())
    }

    /// Closes every channel and stops tracking pushed events.
    pub async fn shutdown(&self) {
        log::info!("[Session] Shutting down...");
        self.channels.close_all();

        let tasks: Vec<_> = self.tasks.lock().drain(..).collect();
        for task in tasks {
            if let Err(e) = task.await {
                log::warn!("[Session] Channel task ended abnormally: {}", e);
            }
        }

        if let Some(subscription) = self.store_subscription.lock().take() {
            subscription.cancel();
        }
        log::info!("[Session] Shutdown complete");
    }
}
