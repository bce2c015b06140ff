//! `start` scenarios: background execution memoised and broadcast to any
//! number of readers, including ones that arrive after completion.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use acell_core::start;
use tokio::time::sleep;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn the_forked_computation_runs_exactly_once() {
    let run_count = Arc::new(AtomicUsize::new(0));
    let handle = {
        let run_count = Arc::clone(&run_count);
        start(async move {
            run_count.fetch_add(1, Ordering::SeqCst);
            sleep(Duration::from_millis(10)).await;
            "done"
        })
    };

    let readers: Vec<_> = (0..5).map(|_| handle.clone()).collect();
    let mut join_set = tokio::task::JoinSet::new();
    for reader in readers {
        join_set.spawn(async move { *reader.get().await.unwrap() });
    }
    while let Some(result) = join_set.join_next().await {
        assert_eq!(result.unwrap(), "done");
    }

    assert_eq!(run_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn a_reader_that_arrives_after_completion_gets_the_value_immediately() {
    let handle = start(async { 123 });
    sleep(Duration::from_millis(20)).await;
    assert_eq!(*handle.get().await.unwrap(), 123);
}
