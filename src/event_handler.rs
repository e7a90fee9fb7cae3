use crate::{EmitterError, OnOptions, TimingOptions, Value};

/// Defines the contract for event-driven types that manage listeners and emit events.
///
/// Every operation accepting an `event` takes either a comma-separated string
/// (`"open, close"`) or a sequence of names (`["open", "close"]`) and applies
/// itself to each name in order. Event arguments of any other kind are ignored.
///
/// All operations take `&self`; implementors synchronize internally so that
/// listeners may call back into the handler while an event is being emitted.
pub trait EventHandler: Send + Sync {
    /// Gets the names currently present in the registry.
    ///
    /// A name stays present after [`EventHandler::off_all`] emptied it, until [`EventHandler::destroy`].
    fn event_names(&self) -> Vec<String>;

    /// Sets the number of listeners per event above which a warning is logged.
    ///
    /// # Parameters
    /// * `max` - The soft limit. `0` disables the warning.
    fn set_max_listeners(&self, max: usize);

    /// Gets the current soft limit of listeners per event.
    fn max_listeners(&self) -> usize;

    /// Gets the number of registrations for a single event name.
    ///
    /// # Returns
    /// `0` for names that were never registered.
    fn listener_count(&self, event_name: &str) -> usize;

    /// Returns `true` if the event has at least one registration.
    fn has_listener(&self, event_name: &str) -> bool {
        self.listener_count(event_name) > 0
    }

    /// Registers a listener for every named event.
    ///
    /// # Parameters
    /// * `event` - One or more event names.
    /// * `listener` - A function value. Anything else is logged and skipped.
    fn on(&self, event: impl Into<Value>, listener: impl Into<Value>) -> &Self
    where
        Self: Sized,
    {
        self.on_with_options(event, listener, OnOptions::default())
    }

    /// Registers a listener with explicit [`OnOptions`].
    fn on_with_options(&self, event: impl Into<Value>, listener: impl Into<Value>, options: OnOptions) -> &Self
    where
        Self: Sized;

    /// Registers a listener that is removed right after it first fires.
    fn once(&self, event: impl Into<Value>, listener: impl Into<Value>) -> &Self
    where
        Self: Sized,
    {
        self.on_with_options(event, listener, OnOptions { once: true })
    }

    /// Removes the first registration of `listener` for every named event.
    ///
    /// # Parameters
    /// * `event` - One or more event names.
    /// * `listener` - The function value to remove. `Undefined`/`Null` behave like [`EventHandler::off_all`].
    ///
    /// Removing something that was never registered does nothing.
    fn off(&self, event: impl Into<Value>, listener: impl Into<Value>) -> &Self
    where
        Self: Sized;

    /// Removes every registration for every named event.
    fn off_all(&self, event: impl Into<Value>) -> &Self
    where
        Self: Sized;

    /// Emits every named event synchronously.
    ///
    /// # Returns
    /// * `Ok(&Self)` once every name was dispatched.
    /// * `Err(EmitterError::UnhandledError)` if `"error"` was emitted with an error payload and nothing consumed it.
    fn emit(&self, event: impl Into<Value>, payload: impl Into<Value>) -> Result<&Self, EmitterError>
    where
        Self: Sized;

    /// Emits every named event through a debounced dispatcher.
    ///
    /// Calls with the same name and the same options share one dispatcher and therefore one timer.
    fn emit_debounce(&self, event: impl Into<Value>, payload: impl Into<Value>, options: TimingOptions) -> &Self
    where
        Self: Sized;

    /// Emits every named event through a throttled dispatcher.
    ///
    /// Calls with the same name and the same options share one dispatcher and therefore one window.
    fn emit_throttle(&self, event: impl Into<Value>, payload: impl Into<Value>, options: TimingOptions) -> &Self
    where
        Self: Sized;

    /// Removes every listener, drops the timed dispatchers and detaches from the host target.
    fn destroy(&self);
}
