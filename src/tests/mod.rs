use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::{Callback, CustomEvent};

mod debounce;
mod factory;
mod host;
mod throttle;
mod value;

/// A callback that counts its calls.
fn counter() -> (Arc<AtomicU64>, Callback) {
    let called = Arc::new(AtomicU64::new(0));
    let called_clone = called.clone();
    let cb: Callback = Arc::new(move |_: &CustomEvent| {
        called_clone.fetch_add(1, Ordering::SeqCst);
    });
    (called, cb)
}

fn count(called: &AtomicU64) -> u64 {
    called.load(Ordering::SeqCst)
}

/// Moves the paused clock forward and lets expired timer tasks run.
async fn advance(millis: u64) {
    tokio::time::advance(Duration::from_millis(millis)).await;
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}
