//! Integration tests for the function decorators.
//!
//! Timer tests run on a paused tokio clock, so windows and delays are
//! deterministic.
//!
//! Run with: cargo test --test decorators_test -- --nocapture

#![cfg(not(target_arch = "wasm32"))]

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_test::{assert_err, assert_ok};
use underbar::{delay, memoize, once, throttle, ThrottleOptions, UnderbarError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

// ============================================================================
// once / memoize
// ============================================================================

#[test]
fn test_once_invokes_exactly_once() {
    init_tracing();
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let wrapped = once(move |x: i32| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        x * 100
    });

    let results = [wrapped.call(1), wrapped.call(2), wrapped.call(3)];
    assert_eq!(results, [100, 100, 100]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_memoize_invokes_once_per_key() {
    init_tracing();
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let wrapped = memoize(move |name: &String| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        name.len()
    });

    assert_eq!(wrapped.call("curly".to_string()), 5);
    assert_eq!(wrapped.call("curly".to_string()), 5);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// delay / throttle
// ============================================================================

#[test]
fn test_delay_requires_runtime() {
    let result = delay(|_: ()| {}, Duration::from_millis(5), ());
    match assert_err!(result) {
        UnderbarError::NoRuntime { .. } => {}
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_delay_is_fire_and_forget() {
    init_tracing();
    let fired = Arc::new(Mutex::new(Vec::new()));
    let fired_clone = fired.clone();

    assert_ok!(delay(
        move |(a, b): (&'static str, &'static str)| fired_clone.lock().push(format!("{}{}", a, b)),
        Duration::from_millis(500),
        ("a", "b"),
    ));
    assert!(fired.lock().is_empty());

    sleep(Duration::from_millis(600)).await;
    assert_eq!(*fired.lock(), vec!["ab".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_throttle_at_most_once_per_window() {
    init_tracing();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let calls_clone = calls.clone();
    let throttled = assert_ok!(throttle(
        move |x: u32| calls_clone.lock().push(x),
        ThrottleOptions::new(Duration::from_millis(100)),
    ));

    // ten calls 10ms apart all land inside the first 100ms window
    for i in 0..10 {
        throttled.call(i);
        sleep(Duration::from_millis(10)).await;
    }
    sleep(Duration::from_millis(200)).await;

    let calls = calls.lock().clone();
    assert_eq!(calls.first(), Some(&0));
    assert_eq!(calls.last(), Some(&9));
    assert!(calls.len() <= 3, "too many invocations: {:?}", calls);
}

#[tokio::test(start_paused = true)]
async fn test_throttle_drop_policy_discards_window_calls() {
    init_tracing();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let calls_clone = calls.clone();
    let options = ThrottleOptions::default().wait_ms(100).trailing(false);
    let throttled = assert_ok!(throttle(move |x: u32| calls_clone.lock().push(x), options));

    for i in 0..5 {
        throttled.call(i);
    }
    sleep(Duration::from_millis(250)).await;
    assert_eq!(*calls.lock(), vec![0]);
}
