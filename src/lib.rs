//! # Rust CustomEvent Emitter
//!
//! An event emitter that delegates to a host event target when one is available
//! and falls back to its own in-memory registry when it is not.
//!
//! - **EventEmitter**: Manages listener registration and emission, including debounced and throttled emission.
//! - **EventHandler**: Trait defining the event API.
//! - **HostTarget**: Capability record describing what a host event target can do.
//! - **Value**: The dynamic value passed around as event names, listeners and payloads.
//! - **EmitterFactory**: Hands out a shared emitter, recreated when the host target changes.
//!
//! Timed emission runs on Tokio timers. Without a runtime, debounced calls run
//! immediately and throttled trailing calls are dropped, both with a warning.
//!
//! # Example
//!
//! ```
//! use rs_cvent::{EventEmitter, EventHandler, Value};
//!
//! let emitter = EventEmitter::new();
//! emitter.once("ready", Value::function(|event| {
//!     assert_eq!(event.detail(), &Value::from("payload"));
//! }));
//! emitter.emit("ready", "payload").unwrap();
//! assert_eq!(emitter.listener_count("ready"), 0);
//! ```

mod config;
mod constants;
mod error;
mod event;
mod event_emitter;
mod event_handler;
mod factory;
mod host;
mod listener;
mod normalize;
mod target;
pub mod timing;
mod value;

pub use config::EmitterConfig;
pub use constants::{
    AsyncCallback, Callback, SharedError, DEFAULT_DEBOUNCE_WAIT, DEFAULT_MAX_LISTENERS, DEFAULT_THROTTLE_WAIT,
    ERROR_EVENT, MAX_SAFE_INTEGER,
};
pub use error::{EmitterError, TargetError};
pub use event::CustomEvent;
pub use event_emitter::EventEmitter;
pub use event_handler::EventHandler;
pub use factory::EmitterFactory;
pub use host::SimpleEventTarget;
pub use listener::{Listener, OnOptions, Registration};
pub use normalize::{for_each_event, normalize, try_for_each_event, EachEvent, Normalized};
pub use target::{
    AddListenerFn, CreateEventFn, DispatchFn, HostOperation, HostTarget, HostTargetBuilder, NewCustomEventFn,
    RemoveListenerFn,
};
pub use timing::{Debounce, Throttle, TimingOptions};
pub use value::{classify, Tag, Value};

#[cfg(test)]
mod tests;
