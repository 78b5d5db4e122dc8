//! Startup connection probing with bounded backoff.

use std::sync::Arc;
use std::time::Duration;

use portfolio_db::connect_with_retry;
use portfolio_db::store::MemStore;

#[tokio::test(start_paused = true)]
async fn unreachable_store_is_probed_max_attempts_times() {
    let store = Arc::new(MemStore::new());
    store.set_online(false);

    let started = tokio::time::Instant::now();
    let connected = connect_with_retry(store.as_ref(), 3, Duration::from_millis(1000)).await;

    assert!(!connected);
    assert_eq!(store.ping_count(), 3);
    // 1000ms before the second probe, at least 2000ms before the third.
    assert!(started.elapsed() >= Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn reachable_store_connects_on_first_probe() {
    let store = Arc::new(MemStore::new());

    let started = tokio::time::Instant::now();
    let connected = connect_with_retry(store.as_ref(), 3, Duration::from_millis(1000)).await;

    assert!(connected);
    assert_eq!(store.ping_count(), 1);
    assert!(started.elapsed() < Duration::from_millis(1000));
}
