//! Reachability checks and parsing of positions given as text

use super::{
    board::{Board, Mark},
    game::GameState,
    lines::WIN_LINES,
};

impl Board {
    /// Check if the board can arise from alternating legal moves with X first
    pub fn is_reachable(&self) -> bool {
        self.unreachable_reason().is_none()
    }

    /// Explain why the board cannot be reached, if it cannot
    pub fn unreachable_reason(&self) -> Option<String> {
        let count = self.count_pieces();
        if !(count.x == count.o || count.x == count.o + 1) {
            return Some(format!(
                "piece counts X={} O={} must be equal or X ahead by one",
                count.x, count.o
            ));
        }

        let x_wins = self.check_win(Mark::X);
        let o_wins = self.check_win(Mark::O);

        if x_wins && o_wins {
            return Some("both marks have a completed line".to_string());
        }
        // The winner moved last, so the counts must reflect that
        if x_wins && count.x != count.o + 1 {
            return Some("X has a line but O has moved since".to_string());
        }
        if o_wins && count.x != count.o {
            return Some("O has a line but X has moved since".to_string());
        }
        for mark in [Mark::X, Mark::O] {
            if !self.winning_lines_share_cell(mark) {
                return Some(format!("{mark} has two lines that no single move could complete"));
            }
        }

        None
    }

    /// Check if all completed lines for a mark share at least one cell.
    ///
    /// Two lines can only complete on the same move through a shared cell.
    pub fn winning_lines_share_cell(&self, mark: Mark) -> bool {
        let target = mark.to_cell();
        let lines: Vec<_> = WIN_LINES
            .iter()
            .filter(|line| line.cells().iter().all(|&idx| self.get(idx) == target))
            .collect();

        if lines.len() < 2 {
            return true;
        }

        (0..9).any(|pos| lines.iter().all(|line| line.contains(pos)))
    }
}

impl GameState {
    /// Parse a position such as `"XX.OO...."` or `"XX.OO...._X"`.
    ///
    /// Without a `_X`/`_O` suffix the mark to move is inferred from the piece
    /// counts with X opening. The board must be reachable.
    ///
    /// # Errors
    ///
    /// Returns error if the board part is malformed, the suffix is not a mark,
    /// the counts are impossible, or the suffix conflicts with the counts.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let (board_part, suffix) = match cleaned.split_once('_') {
            Some((board, suffix)) => (board, Some(suffix.parse::<Mark>()?)),
            None => (cleaned.as_str(), None),
        };

        let board = Board::from_string(board_part)?;
        if let Some(reason) = board.unreachable_reason() {
            let count = board.count_pieces();
            if !(count.x == count.o || count.x == count.o + 1) {
                return Err(crate::Error::InvalidPieceCounts {
                    x_count: count.x,
                    o_count: count.o,
                });
            }
            return Err(crate::Error::UnreachableBoard {
                board: board.encode(),
                reason,
            });
        }

        let count = board.count_pieces();
        let inferred = if count.x == count.o { Mark::X } else { Mark::O };
        let to_move = match suffix {
            // A finished board may name either mark; the turn is not flipped
            // after the final move.
            Some(mark) if mark == inferred || board.is_terminal() => mark,
            Some(mark) => {
                return Err(crate::Error::InvalidConfiguration {
                    message: format!(
                        "piece counts (X={}, O={}) are inconsistent with {mark} to move in '{s}'",
                        count.x, count.o
                    ),
                });
            }
            None => match board.winner() {
                Some(winner) => winner,
                None => inferred,
            },
        };

        Ok(GameState::from_board(board, to_move))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::{GameStatus, WinLine};

    #[test]
    fn test_reachable_positions() {
        assert!(Board::new().is_reachable());
        assert!(Board::from_string("X........").unwrap().is_reachable());
        assert!(Board::from_string("XXXOO....").unwrap().is_reachable());
    }

    #[test]
    fn test_bad_counts_unreachable() {
        assert!(!Board::from_string("XX.......").unwrap().is_reachable());
        assert!(!Board::from_string("O........").unwrap().is_reachable());
    }

    #[test]
    fn test_double_winner_unreachable() {
        let board = Board::from_string("XXXOOO...").unwrap();
        assert!(!board.is_reachable());
    }

    #[test]
    fn test_parallel_lines_unreachable() {
        // XXX
        // OOO
        // XXX
        let board = Board::from_string("XXXOOOXXX").unwrap();
        assert!(!board.is_reachable());
        assert!(!board.winning_lines_share_cell(Mark::X));
    }

    #[test]
    fn test_crossing_lines_reachable() {
        // XXX
        // XOO
        // XOO
        let board = Board::from_string("XXXXOOXOO").unwrap();
        assert!(board.winning_lines_share_cell(Mark::X));
        assert!(board.is_reachable());
    }

    #[test]
    fn test_parse_infers_turn() {
        let state = GameState::from_string("XX.OO....").unwrap();
        assert_eq!(state.current_mark(), Mark::X);
        assert_eq!(state.status(), GameStatus::InProgress);

        let state = GameState::from_string("X........").unwrap();
        assert_eq!(state.current_mark(), Mark::O);
    }

    #[test]
    fn test_parse_suffix() {
        let state = GameState::from_string("XX.OO...._X").unwrap();
        assert_eq!(state.current_mark(), Mark::X);
        assert!(GameState::from_string("XX.OO...._O").is_err());
        assert!(GameState::from_string("XX.OO...._Q").is_err());
    }

    #[test]
    fn test_parse_finished_board() {
        let state = GameState::from_string("XXXOO....").unwrap();
        assert_eq!(
            state.status(),
            GameStatus::Won {
                mark: Mark::X,
                line: WinLine::new([0, 1, 2])
            }
        );
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn test_parse_rejects_impossible_counts() {
        let err = GameState::from_string("XXXX.....").unwrap_err();
        assert!(matches!(err, crate::Error::InvalidPieceCounts { .. }));
    }
}
