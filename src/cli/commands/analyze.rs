//! Analyze command - minimax scores for every legal move of a position

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::output::{print_kv, print_section, print_subsection, render_board},
    opponent::{best_move, evaluate_moves},
    tictactoe::{GameState, GameStatus, Mark},
};

#[derive(Parser, Debug)]
#[command(about = "Analyze a position with minimax")]
pub struct AnalyzeArgs {
    /// Board as 9 cells, e.g. "XX.OO...." ('.' or '-' for empty), optionally
    /// suffixed with _X or _O to name the side to move
    pub board: String,

    /// Export the analysis as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoveScore {
    pub index: usize,
    pub score: i32,
    pub verdict: &'static str,
}

/// Minimax view of one position
#[derive(Debug, Clone, Serialize)]
pub struct PositionAnalysis {
    pub board: String,
    pub to_move: Mark,
    pub status: GameStatus,
    pub moves: Vec<MoveScore>,
    pub best_move: Option<usize>,
}

impl PositionAnalysis {
    pub fn of(state: &GameState) -> Self {
        let me = state.current_mark();
        let moves = if state.is_terminal() {
            Vec::new()
        } else {
            evaluate_moves(state.board(), me)
                .into_iter()
                .map(|(index, score)| MoveScore {
                    index,
                    score,
                    verdict: verdict(score),
                })
                .collect()
        };
        let best_move = if state.is_terminal() {
            None
        } else {
            best_move(state.board(), me)
        };

        Self {
            board: state.board().encode(),
            to_move: me,
            status: state.status(),
            moves,
            best_move,
        }
    }
}

fn verdict(score: i32) -> &'static str {
    match score.signum() {
        1 => "win",
        -1 => "loss",
        _ => "draw",
    }
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let state = GameState::from_string(&args.board)
        .with_context(|| format!("failed to parse board '{}'", args.board))?;
    let analysis = PositionAnalysis::of(&state);

    print_section("Position Analysis");
    println!("\n{}\n", render_board(&state));
    print_kv("Board", &analysis.board);
    print_kv("To move", &analysis.to_move.to_string());

    match analysis.status {
        GameStatus::InProgress => {
            print_subsection("Move scores");
            for m in &analysis.moves {
                println!(
                    "  cell {} (key {}): {:>3}  {}",
                    m.index,
                    m.index + 1,
                    m.score,
                    m.verdict
                );
            }
            if let Some(best) = analysis.best_move {
                print_kv("Hard choice", &format!("cell {best} (key {})", best + 1));
            }
        }
        GameStatus::Won { mark, line } => print_kv("Status", &format!("{mark} won on {line}")),
        GameStatus::Draw => print_kv("Status", "draw"),
    }

    if let Some(path) = &args.export {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &analysis)?;
        println!("\nAnalysis exported to: {}", path.display());
    }

    Ok(())
}
