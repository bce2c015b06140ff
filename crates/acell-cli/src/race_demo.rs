//! `race` demonstration: two delayed computations, first one wins.

use std::time::{Duration, Instant};

use acell_core::{race, Either};
use tokio::time::sleep;

pub async fn execute(left_ms: u64, right_ms: u64) -> anyhow::Result<()> {
    println!("\nacell race");
    println!("{}", "-".repeat(40));
    println!("  left:  completes after {left_ms}ms");
    println!("  right: completes after {right_ms}ms");

    let started = Instant::now();
    let winner = race(
        async move {
            sleep(Duration::from_millis(left_ms)).await;
            "left branch"
        },
        async move {
            sleep(Duration::from_millis(right_ms)).await;
            "right branch"
        },
    )
    .await?;

    let (side, value) = match &*winner {
        Either::Left(v) => ("left", v),
        Either::Right(v) => ("right", v),
    };
    println!(
        "  winner: {side} (\"{value}\") after {:?}",
        started.elapsed()
    );
    println!();

    Ok(())
}
