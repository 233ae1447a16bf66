//! Winning line analysis for noughts and crosses

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Cell, Mark};

/// One of the eight index triples that constitutes a winning alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine([usize; 3]);

impl WinLine {
    pub const fn new(cells: [usize; 3]) -> Self {
        WinLine(cells)
    }

    /// Board indices covered by this line, in ascending order
    pub fn cells(&self) -> [usize; 3] {
        self.0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

impl fmt::Display for WinLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "[{a}, {b}, {c}]")
    }
}

/// Winning lines on the 3x3 board.
///
/// The order (rows, then columns, then diagonals) decides which line
/// [`LineAnalyzer::winning_line`] reports when several complete at once.
pub const WIN_LINES: [WinLine; 8] = [
    WinLine::new([0, 1, 2]),
    WinLine::new([3, 4, 5]),
    WinLine::new([6, 7, 8]), // rows
    WinLine::new([0, 3, 6]),
    WinLine::new([1, 4, 7]),
    WinLine::new([2, 5, 8]), // columns
    WinLine::new([0, 4, 8]),
    WinLine::new([2, 4, 6]), // diagonals
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a mark fills some line completely
    pub fn has_won(cells: &[Cell; 9], mark: Mark) -> bool {
        let target = mark.to_cell();
        WIN_LINES
            .iter()
            .any(|line| line.0.iter().all(|&idx| cells[idx] == target))
    }

    /// First completed line for the mark in [`WIN_LINES`] order
    pub fn winning_line(cells: &[Cell; 9], mark: Mark) -> Option<WinLine> {
        let target = mark.to_cell();
        WIN_LINES
            .iter()
            .copied()
            .find(|line| line.0.iter().all(|&idx| cells[idx] == target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_won_horizontal() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::X;
        cells[2] = Cell::X;

        assert!(LineAnalyzer::has_won(&cells, Mark::X));
        assert!(!LineAnalyzer::has_won(&cells, Mark::O));
    }

    #[test]
    fn test_has_won_vertical() {
        let mut cells = [Cell::Empty; 9];
        cells[1] = Cell::O;
        cells[4] = Cell::O;
        cells[7] = Cell::O;

        assert!(LineAnalyzer::has_won(&cells, Mark::O));
        assert_eq!(
            LineAnalyzer::winning_line(&cells, Mark::O),
            Some(WinLine::new([1, 4, 7]))
        );
    }

    #[test]
    fn test_has_won_anti_diagonal() {
        let mut cells = [Cell::Empty; 9];
        cells[2] = Cell::X;
        cells[4] = Cell::X;
        cells[6] = Cell::X;

        assert_eq!(
            LineAnalyzer::winning_line(&cells, Mark::X),
            Some(WinLine::new([2, 4, 6]))
        );
    }

    #[test]
    fn winning_line_prefers_rows_over_columns_and_diagonals() {
        // XXX
        // X..
        // X..
        let mut cells = [Cell::Empty; 9];
        for idx in [0, 1, 2, 3, 6] {
            cells[idx] = Cell::X;
        }
        assert_eq!(
            LineAnalyzer::winning_line(&cells, Mark::X),
            Some(WinLine::new([0, 1, 2]))
        );

        // O..
        // OO.
        // O.O
        let mut cells = [Cell::Empty; 9];
        for idx in [0, 3, 6, 4, 8] {
            cells[idx] = Cell::O;
        }
        assert_eq!(
            LineAnalyzer::winning_line(&cells, Mark::O),
            Some(WinLine::new([0, 3, 6]))
        );
    }

    #[test]
    fn win_line_display() {
        assert_eq!(WIN_LINES[6].to_string(), "[0, 4, 8]");
    }
}
