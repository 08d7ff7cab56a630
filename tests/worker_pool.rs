mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::with_timeout;
use jobmigrate::errors::MigrateError;
use jobmigrate::exec::WorkerPool;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_results_keep_input_order() {
    let pool = WorkerPool::new("test", 4);
    let items: Vec<u64> = (0..50).collect();

    let out = with_timeout(pool.run_all(items, |n| {
        std::thread::sleep(Duration::from_millis(50 - n));
        n * 2
    }))
    .await
    .unwrap();

    assert_eq!(out, (0..50).map(|n| n * 2).collect::<Vec<_>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_pool_bounds_concurrency() {
    let pool = WorkerPool::new("bounded", 2);
    let running = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let (r, p) = (Arc::clone(&running), Arc::clone(&peak));
    with_timeout(pool.run_all((0..12).collect::<Vec<u32>>(), move |_| {
        let now = r.fetch_add(1, Ordering::SeqCst) + 1;
        p.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(10));
        r.fetch_sub(1, Ordering::SeqCst);
    }))
    .await
    .unwrap();

    assert!(peak.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn test_panicking_worker_fails_the_call() {
    let pool = WorkerPool::new("panicky", 2);

    let result = pool
        .run_all(vec![1, 2, 3], |n| {
            if n == 2 {
                panic!("boom");
            }
            n
        })
        .await;

    assert!(matches!(result, Err(MigrateError::WorkerError(_))));
}

#[tokio::test]
async fn test_shutdown_closes_pool() {
    let pool = WorkerPool::new("closing", 2);
    assert!(pool.shutdown(Duration::from_secs(1)).await);
    assert!(pool.is_shut_down());

    // Second shutdown is a no-op.
    assert!(pool.shutdown(Duration::from_secs(1)).await);

    let result = pool.run_all(vec![1], |n| n).await;
    assert!(matches!(result, Err(MigrateError::WorkerError(_))));
}

#[test]
fn test_size_is_at_least_one() {
    assert_eq!(WorkerPool::new("tiny", 0).size(), 1);
}
