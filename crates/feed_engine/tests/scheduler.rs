use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use feed_engine::AutoRefreshScheduler;

fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let tick_count = count.clone();
    (count, move || {
        tick_count.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test]
async fn zero_interval_schedules_nothing() {
    let scheduler = AutoRefreshScheduler::new(tokio::runtime::Handle::current());
    let (count, tick) = counter();

    assert!(scheduler.start(0, tick).is_none());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn ticks_repeat_until_cancelled() {
    let scheduler = AutoRefreshScheduler::new(tokio::runtime::Handle::current());
    let (count, tick) = counter();

    let handle = scheduler.start(20, tick).expect("timer");
    assert_eq!(handle.period(), Duration::from_millis(20));
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(count.load(Ordering::SeqCst) >= 2);

    scheduler.cancel(handle);
    tokio::time::sleep(Duration::from_millis(30)).await;
    let after_cancel = count.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(count.load(Ordering::SeqCst), after_cancel);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dropping_the_handle_stops_the_timer() {
    let scheduler = AutoRefreshScheduler::new(tokio::runtime::Handle::current());
    let (count, tick) = counter();

    let handle = scheduler.start(20, tick).expect("timer");
    drop(handle);
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn first_tick_waits_a_full_period() {
    let scheduler = AutoRefreshScheduler::new(tokio::runtime::Handle::current());
    let (count, tick) = counter();

    let _handle = scheduler.start(500, tick).expect("timer");
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}
