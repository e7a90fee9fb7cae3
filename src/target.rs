//! The host event target an emitter may delegate to.
//!
//! A host exposes some subset of the operations below. The emitter probes the
//! record once, at construction, and uses native dispatch only when listener
//! registration, removal and dispatch are all present.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::{CustomEvent, Listener, TargetError, Value};

pub type AddListenerFn = Arc<dyn Fn(&str, &Listener) + Send + Sync>;
pub type RemoveListenerFn = Arc<dyn Fn(&str, &Listener) + Send + Sync>;
pub type DispatchFn = Arc<dyn Fn(&CustomEvent) + Send + Sync>;
/// Modern constructor: builds an initialized event carrying `detail`.
pub type NewCustomEventFn = Arc<dyn Fn(&str, Value) -> Result<CustomEvent, TargetError> + Send + Sync>;
/// Legacy factory: builds an uninitialized event of the given interface.
pub type CreateEventFn = Arc<dyn Fn(&str) -> Result<CustomEvent, TargetError> + Send + Sync>;

#[derive(Default)]
struct HostOps {
    add_listener: Option<AddListenerFn>,
    remove_listener: Option<RemoveListenerFn>,
    dispatch: Option<DispatchFn>,
    new_custom_event: Option<NewCustomEventFn>,
    create_event: Option<CreateEventFn>,
}

/// Capability record of a host event target.
///
/// Cloning is cheap and keeps identity: clones are [`HostTarget::same_as`] each other,
/// separately built records never are.
///
/// # Example
/// ```
/// use rs_cvent::HostTarget;
///
/// let headless = HostTarget::builder().build();
/// assert!(!headless.supports_native_dispatch());
///
/// let target = HostTarget::builder()
///     .add_listener(|_, _| {})
///     .remove_listener(|_, _| {})
///     .dispatch(|_| {})
///     .build();
/// assert!(target.supports_native_dispatch());
/// assert!(target.same_as(&target.clone()));
/// assert!(!target.same_as(&headless));
/// ```
#[derive(Clone)]
pub struct HostTarget {
    ops: Arc<HostOps>,
}

impl HostTarget {
    pub fn builder() -> HostTargetBuilder {
        HostTargetBuilder::default()
    }

    /// Whether listener registration, removal and dispatch are all available.
    pub fn supports_native_dispatch(&self) -> bool {
        self.ops.add_listener.is_some() && self.ops.remove_listener.is_some() && self.ops.dispatch.is_some()
    }

    pub fn same_as(&self, other: &HostTarget) -> bool {
        Arc::ptr_eq(&self.ops, &other.ops)
    }

    pub fn add_listener(&self, event_name: &str, listener: &Listener) -> Result<(), TargetError> {
        let add = self.ops.add_listener.as_ref().ok_or(TargetError::Unsupported("add_listener"))?;
        add(event_name, listener);
        Ok(())
    }

    pub fn remove_listener(&self, event_name: &str, listener: &Listener) -> Result<(), TargetError> {
        let remove = self
            .ops
            .remove_listener
            .as_ref()
            .ok_or(TargetError::Unsupported("remove_listener"))?;
        remove(event_name, listener);
        Ok(())
    }

    pub fn dispatch(&self, event: &CustomEvent) -> Result<(), TargetError> {
        let dispatch = self.ops.dispatch.as_ref().ok_or(TargetError::Unsupported("dispatch"))?;
        dispatch(event);
        Ok(())
    }

    /// Builds the event to dispatch for `event_name`.
    ///
    /// Uses the host's modern constructor when there is one. If it fails, the
    /// event is created through the legacy factory (or blank when the host has
    /// none) and initialized in a second step.
    pub fn construct_event(&self, event_name: &str, detail: Value) -> Result<CustomEvent, TargetError> {
        let Some(constructor) = self.ops.new_custom_event.as_ref() else {
            return Ok(CustomEvent::new(event_name, detail));
        };

        match constructor(event_name, detail.clone()) {
            Ok(event) => Ok(event),
            Err(err) => {
                tracing::debug!(event = event_name, error = %err, "custom event constructor failed, using legacy construction");
                let mut event = match self.ops.create_event.as_ref() {
                    Some(create) => create("CustomEvent")?,
                    None => CustomEvent::uninitialized(),
                };
                event.init_custom_event(event_name, false, false, detail);
                Ok(event)
            }
        }
    }
}

impl Debug for HostTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostTarget")
            .field("add_listener", &self.ops.add_listener.is_some())
            .field("remove_listener", &self.ops.remove_listener.is_some())
            .field("dispatch", &self.ops.dispatch.is_some())
            .field("new_custom_event", &self.ops.new_custom_event.is_some())
            .field("create_event", &self.ops.create_event.is_some())
            .finish()
    }
}

/// Assembles a [`HostTarget`] from whichever operations the host provides.
#[derive(Default)]
pub struct HostTargetBuilder {
    ops: HostOps,
}

impl HostTargetBuilder {
    pub fn add_listener(mut self, f: impl Fn(&str, &Listener) + Send + Sync + 'static) -> Self {
        self.ops.add_listener = Some(Arc::new(f));
        self
    }

    pub fn remove_listener(mut self, f: impl Fn(&str, &Listener) + Send + Sync + 'static) -> Self {
        self.ops.remove_listener = Some(Arc::new(f));
        self
    }

    pub fn dispatch(mut self, f: impl Fn(&CustomEvent) + Send + Sync + 'static) -> Self {
        self.ops.dispatch = Some(Arc::new(f));
        self
    }

    pub fn new_custom_event(
        mut self,
        f: impl Fn(&str, Value) -> Result<CustomEvent, TargetError> + Send + Sync + 'static,
    ) -> Self {
        self.ops.new_custom_event = Some(Arc::new(f));
        self
    }

    pub fn create_event(mut self, f: impl Fn(&str) -> Result<CustomEvent, TargetError> + Send + Sync + 'static) -> Self {
        self.ops.create_event = Some(Arc::new(f));
        self
    }

    /// Removes an operation again, e.g. to model a host lacking it.
    pub fn without(mut self, operation: HostOperation) -> Self {
        match operation {
            HostOperation::AddListener => self.ops.add_listener = None,
            HostOperation::RemoveListener => self.ops.remove_listener = None,
            HostOperation::Dispatch => self.ops.dispatch = None,
            HostOperation::NewCustomEvent => self.ops.new_custom_event = None,
            HostOperation::CreateEvent => self.ops.create_event = None,
        }
        self
    }

    pub fn build(self) -> HostTarget {
        HostTarget { ops: Arc::new(self.ops) }
    }
}

/// Names of the operations a [`HostTarget`] may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOperation {
    AddListener,
    RemoveListener,
    Dispatch,
    NewCustomEvent,
    CreateEvent,
}
