//! Simulate command - play computer tiers against each other

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::output::{format_number, format_percent, print_kv, print_section, print_subsection},
    opponent::{ComputerOpponent, Difficulty},
    pipeline::{JsonlObserver, MatchConfig, MatchPipeline, ProgressObserver},
};

#[derive(Parser, Debug)]
#[command(about = "Simulate games between computer opponents")]
pub struct SimulateArgs {
    /// Strategy playing X, which always opens (random/easy, medium, hard/minimax)
    #[arg(long, short = 'x', default_value = "hard")]
    pub x: Difficulty,

    /// Strategy playing O (random/easy, medium, hard/minimax)
    #[arg(long, short = 'o', default_value = "random")]
    pub o: Difficulty,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Export the summary as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export every game as JSON Lines
    #[arg(long)]
    pub jsonl: Option<PathBuf>,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    print_section("Simulation");
    print_kv("X", &args.x.to_string());
    print_kv("O", &args.o.to_string());
    print_kv("Games", &format_number(args.games));
    if let Some(seed) = args.seed {
        print_kv("Seed", &seed.to_string());
    }

    let config = MatchConfig {
        num_games: args.games,
        seed: args.seed,
    };

    let mut pipeline = MatchPipeline::new(config);
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.jsonl {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let mut x = ComputerOpponent::new(args.x).with_name(format!("{}-x", args.x));
    let mut o = ComputerOpponent::new(args.o).with_name(format!("{}-o", args.o));
    let result = pipeline.run(&mut x, &mut o)?;

    print_subsection("Results");
    print_kv(
        "X wins",
        &format!("{} ({})", format_number(result.x_wins), format_percent(result.x_win_rate)),
    );
    print_kv(
        "O wins",
        &format!("{} ({})", format_number(result.o_wins), format_percent(result.o_win_rate)),
    );
    print_kv(
        "Draws",
        &format!("{} ({})", format_number(result.draws), format_percent(result.draw_rate)),
    );
    print_kv("Avg game length", &format!("{:.2} moves", result.avg_game_length));

    if let Some(path) = &args.export {
        result
            .save(path)
            .with_context(|| format!("failed to export results to {}", path.display()))?;
        println!("\nResults exported to: {}", path.display());
    }
    if let Some(path) = &args.jsonl {
        println!("Games exported to: {}", path.display());
    }

    Ok(())
}
