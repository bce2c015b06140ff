//! `start` demonstration: fork a background computation, await it from
//! several independent readers.

use std::time::{Duration, Instant};

use acell_core::start;
use tokio::time::sleep;

pub async fn execute(delay_ms: u64, readers: usize) -> anyhow::Result<()> {
    println!("\nacell start");
    println!("{}", "-".repeat(40));
    println!("  background computation: {delay_ms}ms, then produces 42");
    println!("  readers: {readers}");

    let started = Instant::now();
    let handle = start(async move {
        sleep(Duration::from_millis(delay_ms)).await;
        42u64
    });

    let mut join_set = tokio::task::JoinSet::new();
    for id in 0..readers {
        let handle = handle.clone();
        join_set.spawn(async move {
            let value = handle.get().await?;
            Ok::<_, acell_core::Error>((id, *value))
        });
    }

    let mut results = Vec::with_capacity(readers);
    while let Some(outcome) = join_set.join_next().await {
        results.push(outcome??);
    }
    results.sort_by_key(|(id, _)| *id);

    for (id, value) in results {
        println!("  reader {id} observed {value}");
    }
    println!("  total elapsed: {:?}", started.elapsed());
    println!();

    Ok(())
}
