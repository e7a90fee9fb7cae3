use std::time::Duration;

use crate::{DEFAULT_DEBOUNCE_WAIT, DEFAULT_MAX_LISTENERS, DEFAULT_THROTTLE_WAIT};

/// Construction-time settings of an [`EventEmitter`](crate::EventEmitter).
///
/// # Example
/// ```
/// use std::time::Duration;
/// use rs_cvent::EmitterConfig;
///
/// let config = EmitterConfig::default()
///     .max_listeners(20)
///     .debounce_wait(Duration::from_millis(250));
/// assert_eq!(config.max_listeners, 20);
/// assert_eq!(config.throttle_wait, Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitterConfig {
    /// Registrations per event name above which a warning is logged. `0` disables the warning.
    pub max_listeners: usize,
    /// Wait for debounced emission when the call does not give a usable one.
    pub debounce_wait: Duration,
    /// Wait for throttled emission when the call does not give a usable one.
    pub throttle_wait: Duration,
}

impl EmitterConfig {
    pub fn max_listeners(mut self, max: usize) -> Self {
        self.max_listeners = max;
        self
    }

    pub fn debounce_wait(mut self, wait: Duration) -> Self {
        self.debounce_wait = wait;
        self
    }

    pub fn throttle_wait(mut self, wait: Duration) -> Self {
        self.throttle_wait = wait;
        self
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_listeners: DEFAULT_MAX_LISTENERS,
            debounce_wait: DEFAULT_DEBOUNCE_WAIT,
            throttle_wait: DEFAULT_THROTTLE_WAIT,
        }
    }
}
