//! `race` scenarios.

use std::time::Duration;

use acell_core::{Either, race};
use tokio::time::sleep;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn the_faster_branch_wins_and_the_slower_ones_result_is_discarded() {
    // race(delay(10ms, Left "a"), delay(50ms, Right "b")) yields Left "a".
    let winner = race(
        async {
            sleep(Duration::from_millis(10)).await;
            "a"
        },
        async {
            sleep(Duration::from_millis(50)).await;
            "b"
        },
    )
    .await
    .unwrap();

    assert_eq!(*winner, Either::Left("a"));

    // The loser keeps running in the background; give it time to finish and
    // confirm there is no way, through this API, for it to ever overwrite
    // the winner's result (the Cell behind `race` is private to this call).
    sleep(Duration::from_millis(60)).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn either_branch_can_win_the_cell_on_a_compare_and_set_basis() {
    // the Cell is set exactly once, by whichever branch's completion
    // linearizes first at the `won` compare-and-set.
    let winner = race(
        async {
            sleep(Duration::from_millis(5)).await;
            1
        },
        async {
            sleep(Duration::from_millis(5)).await;
            2
        },
    )
    .await
    .unwrap();

    match *winner {
        Either::Left(1) | Either::Right(2) => {}
        other => panic!("unexpected race outcome: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn a_failing_payload_can_win_or_lose_depending_on_timing() {
    // both a failure-carrying branch and a success-carrying branch are legal
    // winners; the only required property is "first to complete wins".
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct MyError(&'static str);

    let fails_fast = race(
        async {
            sleep(Duration::from_millis(5)).await;
            Err::<i32, _>(MyError("boom"))
        },
        async {
            sleep(Duration::from_millis(50)).await;
            Ok::<i32, MyError>(7)
        },
    )
    .await
    .unwrap();
    assert_eq!(*fails_fast, Either::Left(Err(MyError("boom"))));

    let succeeds_fast = race(
        async {
            sleep(Duration::from_millis(50)).await;
            Err::<i32, _>(MyError("boom"))
        },
        async {
            sleep(Duration::from_millis(5)).await;
            Ok::<i32, MyError>(7)
        },
    )
    .await
    .unwrap();
    assert_eq!(*succeeds_fast, Either::Right(Ok(7)));
}
