//! acell CLI - demonstrations of the acell-core combinators.

mod modify_demo;
mod race_demo;
mod start_demo;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "acell")]
#[command(about = "Demonstrations of an asynchronous single-assignment cell")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Race two delayed computations and report the winner
    Race {
        /// Delay, in milliseconds, before the left branch completes
        #[arg(long, default_value_t = 10)]
        left_ms: u64,

        /// Delay, in milliseconds, before the right branch completes
        #[arg(long, default_value_t = 50)]
        right_ms: u64,
    },

    /// Fork a background computation and await it from several readers
    Start {
        /// Delay, in milliseconds, before the background computation completes
        #[arg(long, default_value_t = 20)]
        delay_ms: u64,

        /// Number of concurrent readers to await the result from
        #[arg(long, default_value_t = 3)]
        readers: usize,
    },

    /// Run N concurrent compare-and-swap increments against a Cell
    Modify {
        /// Number of concurrent modify(n -> n + 1) calls
        #[arg(long, default_value_t = 1000)]
        count: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Race { left_ms, right_ms } => race_demo::execute(left_ms, right_ms).await?,
        Commands::Start { delay_ms, readers } => start_demo::execute(delay_ms, readers).await?,
        Commands::Modify { count } => modify_demo::execute(count).await?,
    }

    Ok(())
}
