//! `modify` demonstration: many tasks racing to increment a shared counter
//! through compare-and-swap retries, with no lock ever taken on the value.

use std::time::Instant;

use acell_core::Cell;

pub async fn execute(count: u64) -> anyhow::Result<()> {
    println!("\nacell modify");
    println!("{}", "-".repeat(40));
    println!("  concurrent increments: {count}");

    let cell = Cell::create_of(0u64);
    let started = Instant::now();

    let mut join_set = tokio::task::JoinSet::new();
    for _ in 0..count {
        let cell = cell.clone();
        join_set.spawn(async move { cell.modify(|n| n + 1).await });
    }
    while let Some(outcome) = join_set.join_next().await {
        outcome??;
    }

    let total = *cell.get().await?;
    println!("  final value: {total}");
    println!("  elapsed: {:?}", started.elapsed());
    if total != count {
        println!("  warning: expected {count}, observed {total}");
    }
    println!();

    Ok(())
}
