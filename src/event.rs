use crate::Value;

/// The event value handed to every listener.
///
/// Listeners read the emitted payload from [`CustomEvent::detail`], whether the
/// event went through a host target or through the in-memory registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomEvent {
    event_type: String,
    detail: Value,
    bubbles: bool,
    cancelable: bool,
    initialized: bool,
}

impl CustomEvent {
    /// Constructs an initialized, non-bubbling, non-cancelable event.
    ///
    /// # Example
    /// ```
    /// use rs_cvent::{CustomEvent, Value};
    ///
    /// let event = CustomEvent::new("click", Value::from("payload"));
    /// assert_eq!(event.event_type(), "click");
    /// assert_eq!(event.detail(), &Value::from("payload"));
    /// assert!(event.is_initialized());
    /// ```
    pub fn new(event_type: impl Into<String>, detail: Value) -> Self {
        Self {
            event_type: event_type.into(),
            detail,
            bubbles: false,
            cancelable: false,
            initialized: true,
        }
    }

    /// First half of the legacy two-step construction.
    ///
    /// The event carries no type or detail until [`CustomEvent::init_custom_event`]
    /// is called on it.
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// Second half of the legacy two-step construction.
    ///
    /// # Example
    /// ```
    /// use rs_cvent::{CustomEvent, Value};
    ///
    /// let mut event = CustomEvent::uninitialized();
    /// assert!(!event.is_initialized());
    ///
    /// event.init_custom_event("click", false, false, Value::from(1));
    /// assert_eq!(event, CustomEvent::new("click", Value::from(1)));
    /// ```
    pub fn init_custom_event(
        &mut self,
        event_type: impl Into<String>,
        bubbles: bool,
        cancelable: bool,
        detail: Value,
    ) {
        self.event_type = event_type.into();
        self.bubbles = bubbles;
        self.cancelable = cancelable;
        self.detail = detail;
        self.initialized = true;
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn detail(&self) -> &Value {
        &self.detail
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
