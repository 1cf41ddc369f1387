//! `pulse` - terminal consumer for the Pulse validation feed.
//!
//! Replays or tails a JSONL event feed through the processing core and
//! renders the derived session view: stage rail, actor turn, issues, and
//! the bounded event window. This is a demo and diagnostic harness; the
//! production transport and dashboard are separate consumers of the same
//! core.

mod display;
mod replay;
mod seed;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pulse_core::PulseConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pulse", version, about = "Live validation feed viewer")]
struct Cli {
    /// Path to a pulse.yml config file (windowing thresholds).
    #[arg(long, global = true, default_value = "pulse.yml")]
    config: PathBuf,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded feed and print the final derived view.
    Replay {
        /// JSONL feed file to replay.
        feed: PathBuf,
    },

    /// Tail a growing feed and re-render on new frames.
    Watch {
        /// JSONL feed file to tail.
        feed: PathBuf,

        /// Poll interval in milliseconds.
        #[arg(long, default_value_t = 500)]
        interval_ms: u64,
    },

    /// Write the canned demo feed for trying out replay/watch.
    Seed {
        /// Output path for the demo feed.
        #[arg(default_value = "demo-feed.jsonl")]
        out: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "pulse=debug" } else { "pulse=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = PulseConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Replay { feed } => replay::run_replay(&feed, &config),
        Command::Watch { feed, interval_ms } => {
            replay::run_watch(&feed, &config, interval_ms).await
        }
        Command::Seed { out } => seed::write_demo_feed(&out),
    }
}
