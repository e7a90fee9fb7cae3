use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::{CustomEvent, HostTarget, HostTargetBuilder, Listener, TargetError, Value};

/// An in-process event target with browser-like semantics.
///
/// - Adding the same listener twice to one event type is ignored.
/// - Dispatch calls a snapshot of the listeners, in the order they were added.
/// - In legacy mode the modern event constructor fails, forcing the two-step path.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use rs_cvent::{CustomEvent, Listener, SimpleEventTarget, Value};
///
/// let host = SimpleEventTarget::new();
/// let called = Arc::new(AtomicU64::new(0));
/// let counter = Arc::clone(&called);
/// let listener = Listener::Sync(Arc::new(move |_: &CustomEvent| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// host.add_event_listener("click", &listener);
/// host.add_event_listener("click", &listener);
/// host.dispatch_event(&CustomEvent::new("click", Value::Null));
/// assert_eq!(called.load(Ordering::SeqCst), 1);
/// ```
#[derive(Debug, Default)]
pub struct SimpleEventTarget {
    listeners: DashMap<String, Vec<Listener>>,
    legacy: AtomicBool,
    dispatched: AtomicU64,
}

impl SimpleEventTarget {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A target whose modern event constructor always fails.
    pub fn legacy() -> Arc<Self> {
        let target = Self::default();
        target.legacy.store(true, Ordering::SeqCst);
        Arc::new(target)
    }

    pub fn set_legacy(&self, legacy: bool) {
        self.legacy.store(legacy, Ordering::SeqCst);
    }

    pub fn add_event_listener(&self, event_type: &str, listener: &Listener) {
        let mut entry = self.listeners.entry(event_type.to_string()).or_default();
        if !entry.contains(listener) {
            entry.push(listener.clone());
        }
    }

    pub fn remove_event_listener(&self, event_type: &str, listener: &Listener) {
        if let Some(mut entry) = self.listeners.get_mut(event_type) {
            entry.retain(|l| l != listener);
        }
    }

    /// Calls every listener registered for the event's type.
    pub fn dispatch_event(&self, event: &CustomEvent) {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        let snapshot: Vec<Listener> = self
            .listeners
            .get(event.event_type())
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        for listener in snapshot {
            listener.call(event);
        }
    }

    pub fn new_custom_event(&self, event_type: &str, detail: Value) -> Result<CustomEvent, TargetError> {
        if self.legacy.load(Ordering::SeqCst) {
            return Err(TargetError::Host("CustomEvent is not a constructor".to_string()));
        }
        Ok(CustomEvent::new(event_type, detail))
    }

    pub fn create_event(&self, interface: &str) -> Result<CustomEvent, TargetError> {
        match interface {
            "CustomEvent" | "Event" => Ok(CustomEvent::uninitialized()),
            other => Err(TargetError::Host(format!("unsupported event interface `{other}`"))),
        }
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners.get(event_type).map(|entry| entry.len()).unwrap_or(0)
    }

    /// Number of events dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::SeqCst)
    }

    /// Capability record exposing every operation of this target.
    pub fn target(self: &Arc<Self>) -> HostTarget {
        self.target_builder().build()
    }

    /// Builder pre-filled with every operation, for withholding some of them.
    pub fn target_builder(self: &Arc<Self>) -> HostTargetBuilder {
        let add = Arc::clone(self);
        let remove = Arc::clone(self);
        let dispatch = Arc::clone(self);
        let construct = Arc::clone(self);
        let create = Arc::clone(self);
        HostTarget::builder()
            .add_listener(move |name, listener| add.add_event_listener(name, listener))
            .remove_listener(move |name, listener| remove.remove_event_listener(name, listener))
            .dispatch(move |event| dispatch.dispatch_event(event))
            .new_custom_event(move |name, detail| construct.new_custom_event(name, detail))
            .create_event(move |interface| create.create_event(interface))
    }
}
