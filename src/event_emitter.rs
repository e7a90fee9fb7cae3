use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::normalize::{for_each_event, try_for_each_event};
use crate::{
    CustomEvent, Debounce, EmitterConfig, EmitterError, EventHandler, HostTarget, Listener, OnOptions, Registration,
    Throttle, TimingOptions, Value, ERROR_EVENT,
};

/// Key of a cached timed dispatcher: one timer lineage per name and option set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TimingKey {
    event_name: String,
    wait: Option<u64>,
    leading: Option<bool>,
    trailing: Option<bool>,
}

impl TimingKey {
    fn new(event_name: &str, options: &TimingOptions) -> Self {
        Self {
            event_name: event_name.to_string(),
            wait: options.wait.map(f64::to_bits),
            leading: options.leading,
            trailing: options.trailing,
        }
    }
}

type DeferredArgs = (String, Value);

struct Shared {
    max_listeners: AtomicUsize,
    debounce_wait: Duration,
    throttle_wait: Duration,
    target: RwLock<Option<HostTarget>>,
    native: AtomicBool,
    events: DashMap<String, Vec<Registration>>,
    debounced: DashMap<TimingKey, Debounce<DeferredArgs>>,
    throttled: DashMap<TimingKey, Throttle<DeferredArgs>>,
    next_id: AtomicU64,
}

/// An event emitter that dispatches through a host target when it can, and
/// through its own registry otherwise.
///
/// The emitter is a cheap handle: clones share the same registry, host target
/// and timed dispatchers.
///
/// # Implementation Notes
/// - Uses `DashMap` for the registry; no lock is held while a listener runs.
/// - Emission iterates a snapshot, so listeners may register or remove listeners mid-dispatch.
/// - Cached timed dispatchers hold a weak reference to the emitter.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use rs_cvent::{Callback, EventEmitter, EventHandler};
///
/// let emitter = EventEmitter::new();
/// let called = Arc::new(AtomicU64::new(0));
/// let counter = Arc::clone(&called);
/// let callback: Callback = Arc::new(move |_| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// emitter.on("open, close", &callback);
/// emitter.emit(["open", "close"], ()).unwrap();
/// assert_eq!(called.load(Ordering::SeqCst), 2);
/// ```
#[derive(Clone)]
pub struct EventEmitter {
    shared: Arc<Shared>,
}

impl EventEmitter {
    /// Creates a headless emitter with the default configuration.
    pub fn new() -> Self {
        Self::with_config(None, EmitterConfig::default())
    }

    /// Creates an emitter delegating to `target` when it supports native dispatch.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_cvent::{EventEmitter, SimpleEventTarget};
    ///
    /// let host = SimpleEventTarget::new();
    /// let emitter = EventEmitter::with_target(host.target());
    /// assert!(emitter.is_native());
    /// ```
    pub fn with_target(target: HostTarget) -> Self {
        Self::with_config(Some(target), EmitterConfig::default())
    }

    pub fn with_config(target: Option<HostTarget>, config: EmitterConfig) -> Self {
        let native = target.as_ref().is_some_and(HostTarget::supports_native_dispatch);
        tracing::debug!(native, "event emitter created");
        Self {
            shared: Arc::new(Shared {
                max_listeners: AtomicUsize::new(config.max_listeners),
                debounce_wait: config.debounce_wait,
                throttle_wait: config.throttle_wait,
                target: RwLock::new(target),
                native: AtomicBool::new(native),
                events: DashMap::new(),
                debounced: DashMap::new(),
                throttled: DashMap::new(),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Whether emission goes through the host target.
    pub fn is_native(&self) -> bool {
        self.shared.native.load(Ordering::SeqCst)
    }

    /// The host target this emitter was created with, until [`EventHandler::destroy`].
    pub fn target(&self) -> Option<HostTarget> {
        self.shared.target.read().clone()
    }

    /// A snapshot of the registrations for one (trimmed) event name.
    pub fn registrations(&self, event_name: &str) -> Vec<Registration> {
        self.shared
            .events
            .get(event_name.trim())
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn native_target(&self) -> Option<HostTarget> {
        if self.is_native() {
            self.target()
        } else {
            None
        }
    }

    fn register(&self, event_name: &str, listener: &Listener, once: bool, native: Option<&HostTarget>) {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        let count = {
            let mut entry = self.shared.events.entry(event_name.to_string()).or_default();
            entry.push(Registration::new(id, event_name, listener.clone(), once));
            entry.len()
        };

        let max = self.max_listeners();
        if max > 0 && count == max + 1 {
            tracing::warn!(
                event = event_name,
                count,
                max,
                "possible listener leak: more listeners than max_listeners"
            );
        }

        if let Some(target) = native {
            if let Err(err) = target.add_listener(event_name, listener) {
                tracing::warn!(event = event_name, error = %err, "host refused listener");
            }
        }
        tracing::debug!(event = event_name, id, once, "listener registered");
    }

    fn unregister(&self, event_name: &str, listener: &Listener, native: Option<&HostTarget>) {
        let removed = self.shared.events.get_mut(event_name).and_then(|mut entry| {
            let index = entry.iter().position(|r| r.listener() == listener)?;
            Some(entry.remove(index))
        });

        if let Some(removed) = removed {
            tracing::debug!(event = event_name, id = removed.id(), "listener removed");
        }
        if let Some(target) = native {
            self.detach_from_host(target, event_name, listener);
        }
    }

    /// Removes `listener` from the host unless another registration for the name still uses it.
    fn detach_from_host(&self, target: &HostTarget, event_name: &str, listener: &Listener) {
        let still_used = self
            .shared
            .events
            .get(event_name)
            .is_some_and(|entry| entry.iter().any(|r| r.listener() == listener));
        if still_used {
            return;
        }
        if let Err(err) = target.remove_listener(event_name, listener) {
            tracing::warn!(event = event_name, error = %err, "host failed to remove listener");
        }
    }

    fn unregister_all(&self, event_name: &str, native: Option<&HostTarget>) {
        let removed: Vec<Registration> = match self.shared.events.get_mut(event_name) {
            Some(mut entry) => entry.drain(..).collect(),
            None => return,
        };

        if let Some(target) = native {
            for registration in &removed {
                if let Err(err) = target.remove_listener(event_name, registration.listener()) {
                    tracing::warn!(event = event_name, error = %err, "host failed to remove listener");
                }
            }
        }
        tracing::debug!(event = event_name, count = removed.len(), "listeners cleared");
    }

    /// Removes one registration by id, returning whether it was still present.
    fn remove_registration(&self, event_name: &str, id: u64) -> bool {
        match self.shared.events.get_mut(event_name) {
            Some(mut entry) => match entry.iter().position(|r| r.id() == id) {
                Some(index) => {
                    entry.remove(index);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Dispatches one event name through exactly one path.
    fn fire_event(&self, event_name: &str, payload: &Value) -> Result<(), EmitterError> {
        let snapshot = self.registrations(event_name);

        if let Some(target) = self.native_target() {
            match target.construct_event(event_name, payload.clone()) {
                Ok(event) => {
                    if let Err(err) = target.dispatch(&event) {
                        tracing::error!(event = event_name, error = %err, "host dispatch failed");
                    }
                }
                Err(reason) => {
                    let err = EmitterError::EventConstruction {
                        event: event_name.to_string(),
                        reason,
                    };
                    tracing::error!(error = %err, "event not dispatched");
                }
            }

            // The host already delivered to once-listeners; detach them now.
            for registration in snapshot.iter().filter(|r| r.once()) {
                if self.remove_registration(event_name, registration.id()) {
                    self.detach_from_host(&target, event_name, registration.listener());
                }
            }
            return Ok(());
        }

        if snapshot.is_empty() && event_name == ERROR_EVENT {
            if let Value::Error(err) = payload {
                return Err(EmitterError::UnhandledError(Arc::clone(err)));
            }
        }

        let event = CustomEvent::new(event_name, payload.clone());
        for registration in &snapshot {
            if registration.once() && !self.remove_registration(event_name, registration.id()) {
                // Already consumed by a re-entrant emission.
                continue;
            }
            registration.listener().call(&event);
        }
        tracing::trace!(event = event_name, listeners = snapshot.len(), "event emitted");
        Ok(())
    }

    /// The function cached timed dispatchers call.
    fn deferred_fire(&self) -> impl Fn(DeferredArgs) + Send + Sync + 'static {
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        move |(event_name, payload)| {
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let emitter = EventEmitter { shared };
            if let Err(err) = emitter.fire_event(&event_name, &payload) {
                tracing::error!(event = %event_name, error = %err, "unhandled error from timed emission");
            }
        }
    }

    fn warn_not_callable(&self, event: &Value, listener: &Value, operation: &'static str) {
        for_each_event(event, None, |each| {
            tracing::warn!(
                event = each.event_name,
                kind = %listener.tag(),
                operation,
                "listener is not callable, skipped"
            );
        });
    }
}

impl Default for EventEmitter {
    /// Creates a headless emitter with a default max listeners of 10.
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("native", &self.is_native())
            .field("events", &self.event_names())
            .field("max_listeners", &self.max_listeners())
            .finish()
    }
}

impl EventHandler for EventEmitter {
    fn event_names(&self) -> Vec<String> {
        self.shared.events.iter().map(|entry| entry.key().clone()).collect()
    }

    fn set_max_listeners(&self, max: usize) {
        self.shared.max_listeners.store(max, Ordering::SeqCst);
    }

    fn max_listeners(&self) -> usize {
        self.shared.max_listeners.load(Ordering::SeqCst)
    }

    fn listener_count(&self, event_name: &str) -> usize {
        self.shared
            .events
            .get(event_name.trim())
            .map(|entry| entry.len())
            .unwrap_or(0)
    }

    /// Registers `listener` for each name.
    ///
    /// # Example
    /// ```
    /// use rs_cvent::{EventEmitter, EventHandler, Value};
    ///
    /// let emitter = EventEmitter::new();
    /// emitter
    ///     .on("a, b", Value::function(|_| {}))
    ///     .on(["c"], Value::function(|_| {}))
    ///     .on("d", Value::from(42)); // not callable: logged and skipped
    ///
    /// assert_eq!(emitter.listener_count("a"), 1);
    /// assert_eq!(emitter.listener_count("c"), 1);
    /// assert_eq!(emitter.listener_count("d"), 0);
    /// ```
    fn on_with_options(&self, event: impl Into<Value>, listener: impl Into<Value>, options: OnOptions) -> &Self {
        let event = event.into();
        let listener = listener.into();
        if !listener.is_callable() {
            self.warn_not_callable(&event, &listener, "on");
            return self;
        }

        let native = self.native_target();
        for_each_event(&event, Some(&listener), |each| {
            if let Some(listener) = each.listener {
                self.register(each.event_name, listener, options.once, native.as_ref());
            }
        });
        self
    }

    fn off(&self, event: impl Into<Value>, listener: impl Into<Value>) -> &Self {
        let event = event.into();
        let listener = listener.into();
        if listener.is_nullish() {
            return self.off_all(event);
        }
        if !listener.is_callable() {
            self.warn_not_callable(&event, &listener, "off");
            return self;
        }

        let native = self.native_target();
        for_each_event(&event, Some(&listener), |each| {
            if let Some(listener) = each.listener {
                self.unregister(each.event_name, listener, native.as_ref());
            }
        });
        self
    }

    fn off_all(&self, event: impl Into<Value>) -> &Self {
        let event = event.into();
        let native = self.native_target();
        for_each_event(&event, None, |each| {
            self.unregister_all(each.event_name, native.as_ref());
        });
        self
    }

    /// Emits each name in order, stopping at the first unhandled `"error"`.
    ///
    /// # Example
    /// ```
    /// use std::io;
    /// use rs_cvent::{EmitterError, EventEmitter, EventHandler, Value};
    ///
    /// let emitter = EventEmitter::new();
    /// let result = emitter.emit("error", Value::error(io::Error::other("boom")));
    /// assert!(matches!(result, Err(EmitterError::UnhandledError(_))));
    ///
    /// emitter.on("error", Value::function(|_| {}));
    /// assert!(emitter.emit("error", Value::error(io::Error::other("boom"))).is_ok());
    /// ```
    fn emit(&self, event: impl Into<Value>, payload: impl Into<Value>) -> Result<&Self, EmitterError> {
        let event = event.into();
        let payload = payload.into();
        try_for_each_event(&event, None, |each| self.fire_event(each.event_name, &payload))?;
        Ok(self)
    }

    fn emit_debounce(&self, event: impl Into<Value>, payload: impl Into<Value>, options: TimingOptions) -> &Self {
        let event = event.into();
        let payload = payload.into();
        for_each_event(&event, None, |each| {
            let debounced = self
                .shared
                .debounced
                .entry(TimingKey::new(each.event_name, &options))
                .or_insert_with(|| {
                    Debounce::with_default_wait(self.deferred_fire(), options, self.shared.debounce_wait)
                })
                .value()
                .clone();
            debounced.call((each.event_name.to_string(), payload.clone()));
        });
        self
    }

    fn emit_throttle(&self, event: impl Into<Value>, payload: impl Into<Value>, options: TimingOptions) -> &Self {
        let event = event.into();
        let payload = payload.into();
        for_each_event(&event, None, |each| {
            let throttled = self
                .shared
                .throttled
                .entry(TimingKey::new(each.event_name, &options))
                .or_insert_with(|| {
                    Throttle::with_default_wait(self.deferred_fire(), options, self.shared.throttle_wait)
                })
                .value()
                .clone();
            throttled.call((each.event_name.to_string(), payload.clone()));
        });
        self
    }

    /// Detaches from the host and clears every registry and cache.
    ///
    /// Timers already armed by timed emission are not cancelled: a pending
    /// trailing call still fires once, into whatever is registered by then.
    fn destroy(&self) {
        if let Some(target) = self.native_target() {
            for event_name in self.event_names() {
                self.unregister_all(&event_name, Some(&target));
            }
        }
        self.shared.events.clear();
        self.shared.debounced.clear();
        self.shared.throttled.clear();
        self.shared.native.store(false, Ordering::SeqCst);
        *self.shared.target.write() = None;
        tracing::debug!("event emitter destroyed");
    }
}
