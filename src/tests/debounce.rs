use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::advance;
use crate::{Debounce, TimingOptions, DEFAULT_DEBOUNCE_WAIT};

fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) + Send + Sync + 'static) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let calls_clone = calls.clone();
    (calls, move |n| calls_clone.lock().push(n))
}

#[tokio::test(start_paused = true)]
async fn burst_collapses_to_last_call() {
    let (calls, func) = recorder();
    let debounced = Debounce::new(func, TimingOptions::new().wait(1000));

    for i in 0..10 {
        debounced.call(i);
        advance(100).await;
    }
    assert!(calls.lock().is_empty());
    assert!(debounced.is_pending());

    advance(1000).await;
    assert_eq!(*calls.lock(), vec![9]);
    assert!(!debounced.is_pending());
}

#[tokio::test(start_paused = true)]
async fn leading_fires_immediately_once_per_burst() {
    let (calls, func) = recorder();
    let debounced = Debounce::new(func, TimingOptions::new().wait(1000).leading(true));

    debounced.call(1);
    assert_eq!(*calls.lock(), vec![1]);

    debounced.call(2);
    debounced.call(3);
    assert_eq!(*calls.lock(), vec![1]);

    advance(1000).await;
    assert_eq!(*calls.lock(), vec![1, 3]);

    // Idle again: the next call is a new leading edge.
    debounced.call(4);
    assert_eq!(*calls.lock(), vec![1, 3, 4]);
}

#[tokio::test(start_paused = true)]
async fn leading_only_call_is_not_repeated_on_trailing_edge() {
    let (calls, func) = recorder();
    let debounced = Debounce::new(func, TimingOptions::new().wait(500).leading(true));

    debounced.call(1);
    advance(500).await;
    assert_eq!(*calls.lock(), vec![1]);
}

#[tokio::test(start_paused = true)]
async fn trailing_false_suppresses_deferred_call() {
    let (calls, func) = recorder();
    let debounced = Debounce::new(func, TimingOptions::new().wait(500).trailing(false));

    debounced.call(1);
    debounced.call(2);
    advance(1000).await;
    assert!(calls.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancel_drops_pending_call() {
    let (calls, func) = recorder();
    let debounced = Debounce::new(func, TimingOptions::new().wait(500));

    debounced.call(1);
    debounced.cancel();
    assert!(!debounced.is_pending());

    advance(1000).await;
    assert!(calls.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn unusable_wait_uses_default() {
    let (calls, func) = recorder();
    let debounced = Debounce::new(func, TimingOptions::new().wait(f64::MAX));
    assert_eq!(debounced.wait(), DEFAULT_DEBOUNCE_WAIT);

    debounced.call(1);
    advance(4999).await;
    assert!(calls.lock().is_empty());
    advance(1).await;
    assert_eq!(*calls.lock(), vec![1]);

    let (_, func) = recorder();
    let fractional = Debounce::new(func, TimingOptions::new().wait(10.5));
    assert_eq!(fractional.wait(), DEFAULT_DEBOUNCE_WAIT);
}

#[tokio::test(start_paused = true)]
async fn clones_share_one_timer() {
    let (calls, func) = recorder();
    let debounced = Debounce::with_default_wait(func, TimingOptions::new(), Duration::from_millis(200));
    let other = debounced.clone();

    debounced.call(1);
    advance(100).await;
    other.call(2);
    advance(200).await;
    assert_eq!(*calls.lock(), vec![2]);
}

#[test]
fn without_runtime_calls_run_immediately() {
    let (calls, func) = recorder();
    let debounced = Debounce::new(func, TimingOptions::new().wait(1000));

    debounced.call(1);
    debounced.call(2);
    assert_eq!(*calls.lock(), vec![1, 2]);
    assert!(!debounced.is_pending());
}
