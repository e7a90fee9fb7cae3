use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

use crate::CustomEvent;

/// Type alias for a synchronous listener pointer.
///
/// Requires `Send + Sync` so the same callback can be fired from a timer task.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use rs_cvent::{Callback, CustomEvent};
///
/// let callback: Callback = Arc::new(move |event: &CustomEvent| {
///     println!("Received {}: {}", event.event_type(), event.detail());
/// });
/// ```
pub type Callback = Arc<dyn Fn(&CustomEvent) + Send + Sync>;

/// Type alias for an asynchronous listener pointer.
///
/// The returned future is spawned on the current Tokio runtime.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use futures::FutureExt;
/// use rs_cvent::{AsyncCallback, CustomEvent};
///
/// let callback: AsyncCallback = Arc::new(|event: CustomEvent| {
///     async move {
///         let _ = event.detail();
///     }
///     .boxed()
/// });
/// ```
pub type AsyncCallback = Arc<dyn Fn(CustomEvent) -> BoxFuture<'static, ()> + Send + Sync>;

/// Type alias for an error carried as an event payload.
pub type SharedError = Arc<dyn std::error::Error + Send + Sync>;

/// Registrations per event name above which a warning is logged.
pub const DEFAULT_MAX_LISTENERS: usize = 10;

/// Wait used by debounced emission when none (or an unusable one) is given.
pub const DEFAULT_DEBOUNCE_WAIT: Duration = Duration::from_millis(5000);

/// Wait used by throttled emission when none (or an unusable one) is given.
pub const DEFAULT_THROTTLE_WAIT: Duration = Duration::from_millis(500);

/// Largest integer an `f64` represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Event name whose unhandled emission is reported back to the caller.
pub const ERROR_EVENT: &str = "error";
