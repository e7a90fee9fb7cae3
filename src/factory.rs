use parking_lot::Mutex;

use crate::{EmitterConfig, EventEmitter, EventHandler, HostTarget};

/// Hands out one shared [`EventEmitter`] per factory.
///
/// The instance is created lazily on the first [`EmitterFactory::get_instance`] and
/// replaced when a different host target is requested.
///
/// # Example
/// ```
/// use rs_cvent::{EmitterFactory, SimpleEventTarget};
///
/// let factory = EmitterFactory::new();
/// let headless = factory.get_instance(None);
/// assert!(!headless.is_native());
///
/// let host = SimpleEventTarget::new();
/// let native = factory.get_instance(Some(host.target()));
/// assert!(native.is_native());
/// ```
#[derive(Debug, Default)]
pub struct EmitterFactory {
    config: EmitterConfig,
    current: Mutex<Option<EventEmitter>>,
}

impl EmitterFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory whose emitters are built with `config`.
    pub fn with_config(config: EmitterConfig) -> Self {
        Self {
            config,
            current: Mutex::new(None),
        }
    }

    /// Returns the current emitter, creating it first if needed.
    ///
    /// # Parameters
    /// * `target` - `None` keeps whatever instance exists. `Some` target that differs
    ///   from the current instance's target replaces the instance; the old one is
    ///   left to its holders and is not destroyed.
    pub fn get_instance(&self, target: Option<HostTarget>) -> EventEmitter {
        let mut current = self.current.lock();
        if let Some(emitter) = current.as_ref() {
            let keep = match (&target, emitter.target()) {
                (None, _) => true,
                (Some(requested), Some(existing)) => requested.same_as(&existing),
                (Some(_), None) => false,
            };
            if keep {
                return emitter.clone();
            }
            tracing::debug!("host target changed, replacing shared emitter");
        }

        let emitter = EventEmitter::with_config(target, self.config);
        *current = Some(emitter.clone());
        emitter
    }

    /// The current emitter without creating one.
    pub fn current(&self) -> Option<EventEmitter> {
        self.current.lock().clone()
    }

    /// Destroys and forgets the current emitter, if any.
    pub fn destroy(&self) {
        let emitter = self.current.lock().take();
        if let Some(emitter) = emitter {
            emitter.destroy();
        }
    }
}
