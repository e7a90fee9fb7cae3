use std::fmt::{Debug, Formatter};
use std::sync::{Arc, OnceLock};

use tokio::runtime::Handle;

use crate::value::same_allocation;
use crate::{AsyncCallback, Callback, CustomEvent, Value};

/// A callable that can be registered against an event.
///
/// Equality is identity: two listeners are equal when they wrap the same
/// callback allocation, which is how `off` finds the registration to remove.
#[derive(Clone)]
pub enum Listener {
    /// Runs on the emitting caller's stack.
    Sync(Callback),
    /// Spawned onto the current Tokio runtime.
    Async(AsyncCallback),
}

impl Listener {
    /// Converts a callable [`Value`] into a listener.
    ///
    /// Returns `None` for anything that is not a function.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Function(f) => Some(Listener::Sync(Arc::clone(f))),
            Value::AsyncFunction(f) => Some(Listener::Async(Arc::clone(f))),
            _ => None,
        }
    }

    /// The shared listener that ignores every event.
    ///
    /// Every call returns a clone of the same callback, so it compares equal to itself.
    pub fn noop() -> Self {
        static NOOP: OnceLock<Callback> = OnceLock::new();
        let callback = NOOP.get_or_init(|| {
            let noop: Callback = Arc::new(|_: &CustomEvent| {});
            noop
        });
        Listener::Sync(Arc::clone(callback))
    }

    pub fn is_noop(&self) -> bool {
        self == &Listener::noop()
    }

    /// Invoke the listener with an event.
    ///
    /// Async listeners are spawned; outside a Tokio runtime they are skipped with a warning.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicU64, Ordering};
    /// use rs_cvent::{CustomEvent, Listener, Value};
    ///
    /// let called = Arc::new(AtomicU64::new(0));
    /// let counter = Arc::clone(&called);
    /// let listener = Listener::Sync(Arc::new(move |_: &CustomEvent| {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    /// }));
    ///
    /// listener.call(&CustomEvent::new("tick", Value::Null));
    /// assert_eq!(called.load(Ordering::SeqCst), 1);
    /// ```
    pub fn call(&self, event: &CustomEvent) {
        match self {
            Listener::Sync(callback) => callback(event),
            Listener::Async(callback) => match Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(callback(event.clone()));
                }
                Err(_) => tracing::warn!(
                    event = %event.event_type(),
                    "no tokio runtime available, async listener skipped"
                ),
            },
        }
    }

    /// Converts the listener back into a callable [`Value`].
    pub fn to_value(&self) -> Value {
        match self {
            Listener::Sync(f) => Value::Function(Arc::clone(f)),
            Listener::Async(f) => Value::AsyncFunction(Arc::clone(f)),
        }
    }
}

impl From<Callback> for Listener {
    fn from(callback: Callback) -> Self {
        Listener::Sync(callback)
    }
}

impl From<AsyncCallback> for Listener {
    fn from(callback: AsyncCallback) -> Self {
        Listener::Async(callback)
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Listener::Sync(a), Listener::Sync(b)) => same_allocation(a, b),
            (Listener::Async(a), Listener::Async(b)) => same_allocation(a, b),
            _ => false,
        }
    }
}
impl Eq for Listener {}

impl Debug for Listener {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Listener::Sync(_) => f.write_str("Listener::Sync"),
            Listener::Async(_) => f.write_str("Listener::Async"),
        }
    }
}

/// One entry of the registry: a listener bound to an event name.
#[derive(Debug, Clone)]
pub struct Registration {
    id: u64,
    event_name: String,
    listener: Listener,
    once: bool,
}

impl Registration {
    pub(crate) fn new(id: u64, event_name: &str, listener: Listener, once: bool) -> Self {
        Self {
            id,
            event_name: event_name.to_string(),
            listener,
            once,
        }
    }

    /// Unique per emitter; distinguishes repeated registrations of one callback.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    pub fn once(&self) -> bool {
        self.once
    }
}

/// Options accepted by [`EventHandler::on_with_options`](crate::EventHandler::on_with_options).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnOptions {
    /// Remove the registration right after its first fire.
    pub once: bool,
}
