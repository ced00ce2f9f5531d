//! HEXCLAIM CLI - Command-line host
//!
//! Commands:
//! - play: Run AI vs AI self-play matches and report results

use clap::{Parser, Subcommand};

mod selfplay;

#[derive(Parser)]
#[command(name = "hexclaim")]
#[command(about = "HEXCLAIM hex territory game self-play runner")]
struct Cli {
    /// RNG seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play AI vs AI self-play matches
    Play(selfplay::PlayArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => selfplay::run(args, cli.seed),
    }
}
