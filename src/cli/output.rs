//! Output formatting for CLI

use crate::{
    session::ScoreTally,
    tictactoe::{Cell, GameState, GameStatus, Mark},
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a rate in [0, 1] as a percentage
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{key}:"), value);
}

/// Render the board for the terminal.
///
/// Empty cells show the key that selects them (1-9); cells of a completed
/// line are bracketed.
pub fn render_board(state: &GameState) -> String {
    let line = match state.status() {
        GameStatus::Won { line, .. } => Some(line),
        _ => None,
    };

    let board = state.board();
    let render_cell = |index: usize| match board.get(index) {
        Cell::Empty => format!(" {} ", index + 1),
        cell if line.is_some_and(|l| l.contains(index)) => format!("[{}]", cell.to_char()),
        cell => format!(" {} ", cell.to_char()),
    };

    (0..3)
        .map(|row| {
            (0..3)
                .map(|col| render_cell(row * 3 + col))
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect::<Vec<_>>()
        .join("\n---+---+---\n")
}

/// One-line score summary
pub fn format_scores(tally: &ScoreTally) -> String {
    format!(
        "X wins: {}  O wins: {}  Draws: {}  Games: {}",
        tally.wins(Mark::X),
        tally.wins(Mark::O),
        tally.draws(),
        tally.games_played()
    )
}
