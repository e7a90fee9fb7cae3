//! Rate-limiting wrappers used by debounced and throttled emission.
//!
//! Both wrappers own their timer state and fire the wrapped function either on
//! the caller's stack (leading edge) or from a Tokio task (trailing edge).
//! Timers read `tokio::time::Instant`, so they follow a paused test clock.

mod debounce;
mod throttle;

use std::time::Duration;

pub use debounce::Debounce;
pub use throttle::Throttle;

use crate::MAX_SAFE_INTEGER;

/// Wait and edge configuration shared by [`Debounce`] and [`Throttle`].
///
/// Unset fields fall back to the wrapper's defaults: the configured wait,
/// `leading = false` for debounce / `true` for throttle, and `trailing = true`.
///
/// # Example
/// ```
/// use rs_cvent::TimingOptions;
///
/// let options = TimingOptions::new().wait(1000).leading(true);
/// assert_eq!(options.wait, Some(1000.0));
/// assert_eq!(options.leading, Some(true));
/// assert_eq!(options.trailing, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimingOptions {
    /// Milliseconds. Replaced by the default when not a safe integer.
    pub wait: Option<f64>,
    pub leading: Option<bool>,
    pub trailing: Option<bool>,
}

impl TimingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wait(mut self, millis: impl Into<f64>) -> Self {
        self.wait = Some(millis.into());
        self
    }

    pub fn leading(mut self, leading: bool) -> Self {
        self.leading = Some(leading);
        self
    }

    pub fn trailing(mut self, trailing: bool) -> Self {
        self.trailing = Some(trailing);
        self
    }

    /// Resolves `wait` against `default`.
    pub fn resolve_wait(&self, default: Duration) -> Duration {
        resolve_wait(self.wait, default)
    }
}

/// Turns a millisecond wait into a `Duration`.
///
/// Missing, fractional, non-finite or unsafe (beyond 2^53 - 1) waits yield
/// `default`. Negative waits clamp to zero.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use rs_cvent::timing::resolve_wait;
///
/// let default = Duration::from_millis(500);
/// assert_eq!(resolve_wait(Some(1000.0), default), Duration::from_millis(1000));
/// assert_eq!(resolve_wait(Some(12.5), default), default);
/// assert_eq!(resolve_wait(Some(f64::MAX), default), default);
/// assert_eq!(resolve_wait(None, default), default);
/// ```
pub fn resolve_wait(wait: Option<f64>, default: Duration) -> Duration {
    match wait {
        Some(millis) if is_safe_integer(millis) => Duration::from_millis(millis.max(0.0) as u64),
        _ => default,
    }
}

fn is_safe_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER
}
