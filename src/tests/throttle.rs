use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::advance;
use crate::{Throttle, TimingOptions, DEFAULT_THROTTLE_WAIT};

/// Ticks 250ms then calls, ten times, and reports how often the function ran.
async fn run_burst(options: TimingOptions) -> u64 {
    let called = Arc::new(AtomicU64::new(0));
    let called_clone = called.clone();
    let throttled = Throttle::new(
        move |_: ()| {
            called_clone.fetch_add(1, Ordering::SeqCst);
        },
        options,
    );

    for _ in 0..10 {
        advance(250).await;
        throttled.call(());
    }
    called.load(Ordering::SeqCst)
}

#[tokio::test(start_paused = true)]
async fn leading_and_trailing_by_default() {
    assert_eq!(run_burst(TimingOptions::new().wait(500)).await, 5);
}

#[tokio::test(start_paused = true)]
async fn leading_false_skips_first_call() {
    assert_eq!(run_burst(TimingOptions::new().wait(500).leading(false)).await, 4);
}

#[tokio::test(start_paused = true)]
async fn trailing_false_drops_calls_inside_window() {
    assert_eq!(run_burst(TimingOptions::new().wait(500).trailing(false)).await, 5);
}

#[tokio::test(start_paused = true)]
async fn neither_edge() {
    let options = TimingOptions::new().wait(500).leading(false).trailing(false);
    assert_eq!(run_burst(options).await, 4);
}

#[tokio::test(start_paused = true)]
async fn unusable_wait_uses_default() {
    let throttled = Throttle::new(|_: ()| {}, TimingOptions::new().wait(f64::MAX));
    assert_eq!(throttled.wait(), DEFAULT_THROTTLE_WAIT);
    assert_eq!(run_burst(TimingOptions::new().wait(f64::MAX)).await, 5);
}

#[tokio::test(start_paused = true)]
async fn trailing_call_gets_latest_arguments() {
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    let throttled = Throttle::new(move |n: u32| seen_clone.lock().push(n), TimingOptions::new().wait(1000));

    throttled.call(1);
    throttled.call(2);
    throttled.call(3);
    assert_eq!(*seen.lock(), vec![1]);
    assert!(throttled.is_pending());

    advance(1000).await;
    assert_eq!(*seen.lock(), vec![1, 3]);
    assert!(!throttled.is_pending());
}

#[tokio::test(start_paused = true)]
async fn leading_false_fires_after_wait() {
    let called = Arc::new(AtomicU64::new(0));
    let called_clone = called.clone();
    let throttled = Throttle::new(
        move |_: ()| {
            called_clone.fetch_add(1, Ordering::SeqCst);
        },
        TimingOptions::new().wait(500).leading(false),
    );

    throttled.call(());
    assert_eq!(called.load(Ordering::SeqCst), 0);
    advance(500).await;
    assert_eq!(called.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_resets_window() {
    let called = Arc::new(AtomicU64::new(0));
    let called_clone = called.clone();
    let throttled = Throttle::new(
        move |_: ()| {
            called_clone.fetch_add(1, Ordering::SeqCst);
        },
        TimingOptions::new().wait(500),
    );

    throttled.call(());
    throttled.call(());
    throttled.cancel();
    advance(1000).await;
    assert_eq!(called.load(Ordering::SeqCst), 1);

    // A fresh window fires on the leading edge again.
    throttled.call(());
    assert_eq!(called.load(Ordering::SeqCst), 2);
}

#[test]
fn without_runtime_trailing_calls_are_dropped() {
    let called = Arc::new(AtomicU64::new(0));
    let called_clone = called.clone();
    let throttled = Throttle::new(
        move |_: ()| {
            called_clone.fetch_add(1, Ordering::SeqCst);
        },
        TimingOptions::new().wait(60_000),
    );

    throttled.call(());
    throttled.call(());
    assert_eq!(called.load(Ordering::SeqCst), 1);
    assert!(!throttled.is_pending());
}
