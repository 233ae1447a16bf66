//! Board representation and the pure rule predicates

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::lines::{LineAnalyzer, WinLine};

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// `.` or `-` is empty; marks are accepted in either case
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    /// The mark occupying this cell, if any
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
            Cell::Empty => None,
        }
    }
}

/// One of the two player symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the other mark
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert mark to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mark::X => "X",
            Mark::O => "O",
        })
    }
}

impl FromStr for Mark {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Mark::X),
            "O" | "o" => Ok(Mark::O),
            _ => Err(crate::Error::ParseMark {
                input: s.to_string(),
            }),
        }
    }
}

/// The nine cells, indexed row-major:
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
///
/// `Board` is `Copy` (nine bytes), so hypothetical positions in the search
/// are plain values and never alias the caller's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PieceCount {
    pub x: usize,
    pub o: usize,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Return a copy of the board with `mark` placed at `pos`.
    ///
    /// Bounds and occupancy are the caller's responsibility; the rules
    /// engine checks them in [`GameState::apply_move`](super::GameState::apply_move).
    #[must_use = "with_mark returns a new board; the original is unchanged"]
    pub fn with_mark(&self, pos: usize, mark: Mark) -> Board {
        debug_assert!(self.is_empty(pos), "cell {pos} is already occupied");
        let mut next = *self;
        next.cells[pos] = mark.to_cell();
        next
    }

    /// Ascending indices of all empty cells; empty iff the board is full
    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check if `mark` fills any of the eight lines
    pub fn check_win(&self, mark: Mark) -> bool {
        LineAnalyzer::has_won(&self.cells, mark)
    }

    /// First completed line for `mark`, rows before columns before diagonals
    pub fn winning_line(&self, mark: Mark) -> Option<WinLine> {
        LineAnalyzer::winning_line(&self.cells, mark)
    }

    /// True iff no cell is empty.
    ///
    /// A full board may still hold a completed line, so callers evaluate
    /// this only after ruling out a win.
    pub fn check_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Mark> {
        if self.check_win(Mark::X) {
            Some(Mark::X)
        } else if self.check_win(Mark::O) {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Check if the board is won or full
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.check_draw()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = self.count_pieces();
        count.x + count.o
    }

    pub(crate) fn count_pieces(&self) -> PieceCount {
        let mut count = PieceCount { x: 0, o: 0 };
        for cell in &self.cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    /// Parse 9 cells from a string. Whitespace between cells is ignored, so
    /// `"XO. ... ..."` and `"XO......."` are equivalent; `.` and `-` are
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns error if fewer than 9 cells are present or any character is invalid.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    /// Compact nine-character representation, e.g. `XO.......`
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        Board::from_string(s).unwrap()
    }

    #[test]
    fn test_new_board() {
        let b = Board::new();
        assert!(b.cells().iter().all(|&c| c == Cell::Empty));
        assert_eq!(b.available_moves(), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_available_moves_ascending() {
        let b = board("X.O.X.O..");
        assert_eq!(b.available_moves(), vec![1, 3, 5, 7, 8]);
        assert_eq!(b.available_moves().len() + b.occupied_count(), 9);
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let b = board("XOXOXOOXO");
        assert!(b.available_moves().is_empty());
        assert!(b.check_draw());
        assert!(!b.check_win(Mark::X));
        assert!(!b.check_win(Mark::O));
    }

    #[test]
    fn full_board_with_line_is_a_win_not_only_a_draw() {
        // XXX
        // OOX
        // XOO
        let b = board("XXXOOXXOO");
        assert!(b.check_draw());
        assert_eq!(b.winner(), Some(Mark::X));
        assert_eq!(b.winning_line(Mark::X).map(|l| l.cells()), Some([0, 1, 2]));
    }

    #[test]
    fn test_with_mark_leaves_original_untouched() {
        let b = Board::new();
        let next = b.with_mark(4, Mark::O);
        assert_eq!(b.get(4), Cell::Empty);
        assert_eq!(next.get(4), Cell::O);
    }

    #[test]
    fn test_from_string() {
        let b = board("XO. .X. ..O");
        assert_eq!(b.get(0), Cell::X);
        assert_eq!(b.get(1), Cell::O);
        assert_eq!(b.get(4), Cell::X);
        assert_eq!(b.get(8), Cell::O);

        assert!(Board::from_string("XO").is_err());
        assert!(Board::from_string("XOXOXOXOXO").is_err());
        assert!(Board::from_string("XOZ......").is_err());
    }

    #[test]
    fn test_zero_is_not_a_mark() {
        assert_eq!(Cell::from_char('0'), None);
        assert_eq!(Cell::from_char('o'), Some(Cell::O));
        assert!(matches!(
            Board::from_string("X...O...0"),
            Err(crate::Error::InvalidCellCharacter { character: '0', position: 8, .. })
        ));
    }

    #[test]
    fn test_encode_and_display() {
        let b = board("XOX.O.X..");
        assert_eq!(b.encode(), "XOX.O.X..");
        assert_eq!(format!("{b}"), "XOX\n.O.\nX..");
    }

    #[test]
    fn test_mark_parsing() {
        assert_eq!("x".parse::<Mark>().unwrap(), Mark::X);
        assert_eq!(" O ".parse::<Mark>().unwrap(), Mark::O);
        assert!("Z".parse::<Mark>().is_err());
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Cell::O.mark(), Some(Mark::O));
        assert_eq!(Cell::Empty.mark(), None);
    }
}
