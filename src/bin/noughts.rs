//! noughts CLI - tic-tac-toe on the terminal
//!
//! This CLI provides:
//! - Interactive play, two players or against the computer
//! - Batch simulation between computer tiers
//! - Minimax analysis of a position

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Tic-tac-toe with a computer opponent", long_about = None)]
struct Cli {
    /// Log debug events to stderr (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play on the terminal
    Play(noughts::cli::commands::play::PlayArgs),

    /// Simulate games between computer opponents
    Simulate(noughts::cli::commands::simulate::SimulateArgs),

    /// Score every legal move of a position
    Analyze(noughts::cli::commands::analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Play(args) => noughts::cli::commands::play::execute(args),
        Commands::Simulate(args) => noughts::cli::commands::simulate::execute(args),
        Commands::Analyze(args) => noughts::cli::commands::analyze::execute(args),
    }
}
