//! Name- and entity-scoped event routing.
//!
//! The [`Dispatcher`] decouples push transports from the code that reacts to
//! events. Observers register handlers per event name, optionally scoped to
//! one entity id; every inbound message is routed by name only, so any number
//! of transport channels can feed the same dispatcher.
//!
//! Registrations live exactly as long as the [`Subscription`] returned by
//! [`Dispatcher::observe`]. Each handler invocation is isolated: an error or
//! a panic in one handler is logged and delivery continues with the next.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;

use super::{model_id_of, Event};

/// Errors a handler may report back to the dispatcher.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The payload did not have the shape the handler expects.
    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The handler understood the payload but could not apply it.
    #[error("{0}")]
    Rejected(String),
}

/// A registered event callback.
pub type Handler = Arc<dyn Fn(&Value) -> Result<(), HandlerError> + Send + Sync>;

/// Wraps a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Value) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Result of delivering one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The raw message was not a valid `{ name, event }` envelope.
    Malformed,
    /// No handler is registered for the event name.
    Unhandled,
    /// Handlers for the name were walked in registration order.
    Delivered {
        /// Handlers that ran and returned `Ok`.
        invoked: usize,
        /// Scoped handlers whose scope did not match the payload's `model_id`.
        skipped: usize,
        /// Handlers that returned an error or panicked.
        failed: usize,
    },
}

impl DispatchOutcome {
    #[must_use]
    pub fn invoked(&self) -> usize {
        match self {
            Self::Delivered { invoked, .. } => *invoked,
            _ => 0,
        }
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        match self {
            Self::Delivered { failed, .. } => *failed,
            _ => 0,
        }
    }
}

struct Registration {
    id: u64,
    scope: Option<Arc<str>>,
    handler: Handler,
}

/// Event name -> registrations in insertion order.
#[derive(Default)]
struct Registry {
    handlers: RwLock<HashMap<String, Vec<Registration>>>,
    next_id: AtomicU64,
}

impl Registry {
    fn remove(&self, keys: &[(String, u64)]) {
        let mut handlers = self.handlers.write();
        for (name, id) in keys {
            if let Some(list) = handlers.get_mut(name) {
                list.retain(|r| r.id != *id);
                if list.is_empty() {
                    handlers.remove(name);
                }
            }
        }
    }
}

/// Process-wide publish/subscribe hub for server-pushed events.
///
/// Cheap to clone; clones share one registry. Registrations made or revoked
/// while a message is being delivered take effect from the next message.
#[derive(Clone, Default)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers each `(event name, handler)` pair.
    ///
    /// With `scope_id`, the handlers only fire for events whose payload
    /// `model_id` equals it; without, they fire for every event of that name.
    /// Unknown names are stored as-is for future matching.
    ///
    /// Dropping the returned [`Subscription`] unregisters every pair.
    pub fn observe<N, I>(&self, handlers: I, scope_id: Option<&str>) -> Subscription
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Handler)>,
    {
        let scope: Option<Arc<str>> = scope_id.map(Arc::from);
        let mut keys = Vec::new();

        let mut registry = self.registry.handlers.write();
        for (name, handler) in handlers {
            let name = name.into();
            let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
            registry.entry(name.clone()).or_default().push(Registration {
                id,
                scope: scope.clone(),
                handler,
            });
            keys.push((name, id));
        }
        drop(registry);

        log::debug!(
            "[Dispatcher] Registered {} handler(s){}",
            keys.len(),
            scope_id.map(|s| format!(" scoped to {s}")).unwrap_or_default()
        );

        Subscription {
            keys,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Registers a single handler.
    pub fn observe_one<N, F>(&self, name: N, scope_id: Option<&str>, f: F) -> Subscription
    where
        N: Into<String>,
        F: Fn(&Value) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.observe([(name, handler(f))], scope_id)
    }

    /// Parses one inbound transport message and dispatches it.
    ///
    /// Malformed messages are logged and dropped.
    pub fn dispatch_raw(&self, raw: &str) -> DispatchOutcome {
        match serde_json::from_str::<Event>(raw) {
            Ok(event) => self.dispatch(&event),
            Err(e) => {
                log::warn!("[Dispatcher] Dropping malformed message: {}", e);
                DispatchOutcome::Malformed
            }
        }
    }

    /// Invokes every handler registered for `event.name`, in registration order.
    pub fn dispatch(&self, event: &Event) -> DispatchOutcome {
        let targets: Vec<(Option<Arc<str>>, Handler)> = {
            let registry = self.registry.handlers.read();
            match registry.get(&event.name) {
                Some(list) => list
                    .iter()
                    .map(|r| (r.scope.clone(), Arc::clone(&r.handler)))
                    .collect(),
                None => Vec::new(),
            }
        };

        if targets.is_empty() {
            log::debug!("[Dispatcher] No handler for event {}", event.name);
            return DispatchOutcome::Unhandled;
        }

        let model_id = model_id_of(&event.event);
        let (mut invoked, mut skipped, mut failed) = (0, 0, 0);

        for (scope, handler) in targets {
            if let Some(scope) = scope {
                if model_id.as_deref() != Some(&*scope) {
                    skipped += 1;
                    continue;
                }
            }

            match catch_unwind(AssertUnwindSafe(|| handler(&event.event))) {
                Ok(Ok(())) => invoked += 1,
                Ok(Err(e)) => {
                    failed += 1;
                    log::warn!("[Dispatcher] Handler for {} failed: {}", event.name, e);
                }
                Err(panic) => {
                    failed += 1;
                    log::error!(
                        "[Dispatcher] Handler for {} panicked: {}",
                        event.name,
                        panic_message(panic.as_ref())
                    );
                }
            }
        }

        tracing::debug!(
            name = %event.name,
            model_id = ?model_id,
            invoked,
            skipped,
            failed,
            "dispatch"
        );

        DispatchOutcome::Delivered {
            invoked,
            skipped,
            failed,
        }
    }

    /// Number of live registrations for one event name.
    #[must_use]
    pub fn handler_count(&self, name: &str) -> usize {
        self.registry
            .handlers
            .read()
            .get(name)
            .map_or(0, Vec::len)
    }

    /// Number of live registrations across all names.
    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.registry.handlers.read().values().map(Vec::len).sum()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

/// RAII guard for the registrations made by one `observe` call.
///
/// Dropping it unregisters them. The guard only holds a weak reference to the
/// registry, so it may outlive the dispatcher.
#[must_use = "dropping a Subscription unregisters its handlers"]
pub struct Subscription {
    keys: Vec<(String, u64)>,
    registry: Weak<Registry>,
}

impl Subscription {
    /// Unregisters the handlers now.
    pub fn cancel(self) {}

    /// Number of registrations held by this guard.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.keys.is_empty() {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(&self.keys);
            log::debug!("[Dispatcher] Unregistered {} handler(s)", self.keys.len());
        }
    }
}
