use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use super::TimingOptions;
use crate::DEFAULT_THROTTLE_WAIT;

/// Runs a function at most once per `wait`.
///
/// - `leading` (default): a call after the window has elapsed runs immediately.
///   With `leading = false` it only arms the trailing timer.
/// - `trailing` (default): a call inside the window is deferred to the end of
///   the window and runs with the latest arguments. With `trailing = false`
///   such calls are dropped.
///
/// Clones share the same window.
pub struct Throttle<A> {
    inner: Arc<ThrottleInner<A>>,
}

struct ThrottleInner<A> {
    func: Box<dyn Fn(A) + Send + Sync>,
    wait: Duration,
    leading: bool,
    trailing: bool,
    state: Mutex<ThrottleState<A>>,
}

struct ThrottleState<A> {
    /// Start of the current window; `None` when idle.
    previous: Option<Instant>,
    timer: Option<JoinHandle<()>>,
    latest: Option<A>,
    generation: u64,
}

impl<A: Send + 'static> Throttle<A> {
    /// Wraps `func`, using [`DEFAULT_THROTTLE_WAIT`] when `options.wait` is unusable.
    pub fn new<F>(func: F, options: TimingOptions) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::with_default_wait(func, options, DEFAULT_THROTTLE_WAIT)
    }

    /// Wraps `func`, using `default_wait` when `options.wait` is unusable.
    pub fn with_default_wait<F>(func: F, options: TimingOptions, default_wait: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(ThrottleInner {
                func: Box::new(func),
                wait: options.resolve_wait(default_wait),
                leading: options.leading.unwrap_or(true),
                trailing: options.trailing.unwrap_or(true),
                state: Mutex::new(ThrottleState {
                    previous: None,
                    timer: None,
                    latest: None,
                    generation: 0,
                }),
            }),
        }
    }

    pub fn call(&self, args: A) {
        let inner = &self.inner;
        let now = Instant::now();
        let immediate = {
            let mut state = inner.state.lock();
            if state.previous.is_none() && !inner.leading {
                state.previous = Some(now);
            }

            // A monotonic clock never yields a window start in the future, so
            // "remaining > wait" cannot happen and only "remaining > 0" is checked.
            let elapsed = state.previous.map(|previous| now.saturating_duration_since(previous));
            match elapsed {
                Some(elapsed) if elapsed < inner.wait => {
                    if inner.trailing {
                        state.latest = Some(args);
                        if state.timer.is_none() {
                            Self::arm(inner, &mut state, now + (inner.wait - elapsed));
                        }
                    }
                    None
                }
                _ => {
                    if let Some(timer) = state.timer.take() {
                        timer.abort();
                    }
                    state.generation = state.generation.wrapping_add(1);
                    state.latest = None;
                    state.previous = Some(now);
                    Some(args)
                }
            }
        };

        if let Some(args) = immediate {
            (inner.func)(args);
        }
    }

    /// Drops the pending trailing call and resets the window.
    pub fn cancel(&self) {
        let mut state = self.inner.state.lock();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.latest = None;
        state.previous = None;
        state.generation = state.generation.wrapping_add(1);
    }

    /// Whether a trailing call is scheduled.
    pub fn is_pending(&self) -> bool {
        self.inner.state.lock().timer.is_some()
    }

    pub fn wait(&self) -> Duration {
        self.inner.wait
    }

    fn arm(inner: &Arc<ThrottleInner<A>>, state: &mut ThrottleState<A>, deadline: Instant) {
        match Handle::try_current() {
            Ok(handle) => {
                let generation = state.generation;
                state.timer = Some(handle.spawn(Self::expire(Arc::clone(inner), generation, deadline)));
            }
            Err(_) => {
                tracing::warn!("no tokio runtime available, throttled trailing call dropped");
                state.latest = None;
            }
        }
    }

    async fn expire(inner: Arc<ThrottleInner<A>>, generation: u64, deadline: Instant) {
        sleep_until(deadline).await;

        let latest = {
            let mut state = inner.state.lock();
            if state.generation != generation {
                return;
            }
            state.previous = if inner.leading { Some(Instant::now()) } else { None };
            state.timer = None;
            state.latest.take()
        };

        if let Some(args) = latest {
            (inner.func)(args);
        }
    }
}

impl<A> Clone for Throttle<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> std::fmt::Debug for Throttle<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("wait", &self.inner.wait)
            .field("leading", &self.inner.leading)
            .field("trailing", &self.inner.trailing)
            .finish()
    }
}
