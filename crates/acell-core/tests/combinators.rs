//! `parallel_traverse`, `parallel_sequence`, `ref_of`, and the deprecated
//! `join` — thin compositions over `start`.

use std::time::Duration;

use acell_core::{join, parallel_sequence, parallel_traverse, ref_of};
use tokio::time::sleep;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_traverse_preserves_input_order_despite_variable_latency() {
    let inputs = vec![30u64, 10, 20];
    let results = parallel_traverse(inputs, |delay_ms| async move {
        sleep(Duration::from_millis(delay_ms)).await;
        delay_ms
    })
    .await
    .unwrap();

    let results: Vec<u64> = results.into_iter().map(|arc| *arc).collect();
    assert_eq!(results, vec![30, 10, 20]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_sequence_runs_all_actions_concurrently() {
    let actions = (0..5).map(|i| async move {
        sleep(Duration::from_millis(5)).await;
        i
    });
    let results = parallel_sequence(actions).await.unwrap();
    let results: Vec<i32> = results.into_iter().map(|arc| *arc).collect();
    assert_eq!(results, vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn ref_of_is_immediately_readable() {
    let cell = ref_of("already here");
    assert_eq!(*cell.get().await.unwrap(), "already here");
}

#[tokio::test]
#[allow(deprecated)]
async fn join_forks_and_awaits_a_single_result() {
    let value = join(async { 7 }).await.unwrap();
    assert_eq!(*value, 7);
}
