use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use super::TimingOptions;
use crate::DEFAULT_DEBOUNCE_WAIT;

/// Delays calls to a function until `wait` has passed without another call.
///
/// - `leading`: the first call after an idle period runs immediately.
/// - `trailing` (default): once the calls stop for `wait`, the function runs
///   with the arguments of the most recent call not already delivered by the
///   leading edge.
///
/// Clones share the same timer.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use rs_cvent::{Debounce, TimingOptions};
///
/// let calls = Arc::new(AtomicU64::new(0));
/// let counter = Arc::clone(&calls);
/// let debounced = Debounce::new(
///     move |_: u32| {
///         counter.fetch_add(1, Ordering::SeqCst);
///     },
///     TimingOptions::new().wait(100).leading(true),
/// );
///
/// debounced.call(1);
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub struct Debounce<A> {
    inner: Arc<DebounceInner<A>>,
}

struct DebounceInner<A> {
    func: Box<dyn Fn(A) + Send + Sync>,
    wait: Duration,
    leading: bool,
    trailing: bool,
    state: Mutex<DebounceState<A>>,
}

struct DebounceState<A> {
    timer: Option<JoinHandle<()>>,
    pending: Option<A>,
    // Bumped on every restart so a timer that already woke up can tell it was superseded.
    generation: u64,
}

impl<A: Send + 'static> Debounce<A> {
    /// Wraps `func`, using [`DEFAULT_DEBOUNCE_WAIT`] when `options.wait` is unusable.
    pub fn new<F>(func: F, options: TimingOptions) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::with_default_wait(func, options, DEFAULT_DEBOUNCE_WAIT)
    }

    /// Wraps `func`, using `default_wait` when `options.wait` is unusable.
    pub fn with_default_wait<F>(func: F, options: TimingOptions, default_wait: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(DebounceInner {
                func: Box::new(func),
                wait: options.resolve_wait(default_wait),
                leading: options.leading.unwrap_or(false),
                trailing: options.trailing.unwrap_or(true),
                state: Mutex::new(DebounceState {
                    timer: None,
                    pending: None,
                    generation: 0,
                }),
            }),
        }
    }

    /// Registers a call, restarting the timer.
    ///
    /// Outside a Tokio runtime no timer can be armed, so the call runs immediately.
    pub fn call(&self, args: A) {
        let inner = &self.inner;
        let immediate = {
            let mut state = inner.state.lock();
            let idle = state.timer.is_none();
            if let Some(timer) = state.timer.take() {
                timer.abort();
            }
            state.generation = state.generation.wrapping_add(1);
            let generation = state.generation;

            match Handle::try_current() {
                Ok(handle) => {
                    let deadline = Instant::now() + inner.wait;
                    state.timer = Some(handle.spawn(Self::expire(Arc::clone(inner), generation, deadline)));
                    if inner.leading && idle {
                        state.pending = None;
                        Some(args)
                    } else {
                        state.pending = Some(args);
                        None
                    }
                }
                Err(_) => {
                    tracing::warn!("no tokio runtime available, debounced call runs immediately");
                    state.pending = None;
                    Some(args)
                }
            }
        };

        if let Some(args) = immediate {
            (inner.func)(args);
        }
    }

    /// Drops the pending timer and any undelivered arguments.
    pub fn cancel(&self) {
        let mut state = self.inner.state.lock();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.pending = None;
        state.generation = state.generation.wrapping_add(1);
    }

    /// Whether a timer is currently armed.
    pub fn is_pending(&self) -> bool {
        self.inner.state.lock().timer.is_some()
    }

    pub fn wait(&self) -> Duration {
        self.inner.wait
    }

    async fn expire(inner: Arc<DebounceInner<A>>, generation: u64, deadline: Instant) {
        sleep_until(deadline).await;

        let pending = {
            let mut state = inner.state.lock();
            if state.generation != generation {
                return;
            }
            state.timer = None;
            state.pending.take()
        };

        if inner.trailing {
            if let Some(args) = pending {
                (inner.func)(args);
            }
        }
    }
}

impl<A> Clone for Debounce<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> std::fmt::Debug for Debounce<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounce")
            .field("wait", &self.inner.wait)
            .field("leading", &self.inner.leading)
            .field("trailing", &self.inner.trailing)
            .finish()
    }
}
