//! Turn and status management

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    board::{Board, Mark},
    lines::WinLine,
};
use crate::error::MoveError;

/// Status of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won { mark: Mark, line: WinLine },
    Draw,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// The terminal event for this status, `None` while the round is running
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match *self {
            GameStatus::InProgress => None,
            GameStatus::Won { mark, line } => Some(RoundOutcome::Win { mark, line }),
            GameStatus::Draw => Some(RoundOutcome::Draw),
        }
    }
}

/// How a finished round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    Win { mark: Mark, line: WinLine },
    Draw,
}

impl RoundOutcome {
    pub fn winner(&self) -> Option<Mark> {
        match self {
            RoundOutcome::Win { mark, .. } => Some(*mark),
            RoundOutcome::Draw => None,
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundOutcome::Win { mark, line } => write!(f, "{mark} wins on {line}"),
            RoundOutcome::Draw => f.write_str("draw"),
        }
    }
}

/// Board, whose turn it is, and the round status.
///
/// A fresh state has every cell empty and X to move. The only transition is
/// [`GameState::apply_move`], which returns a new value; once the status is
/// terminal every further move is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
}

impl GameState {
    /// Create a new round; X always opens
    pub fn new() -> Self {
        GameState {
            board: Board::new(),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
        }
    }

    /// Build a state from an arbitrary board, computing its status.
    ///
    /// Used for analysis and replay of positions given as strings; the board
    /// is not checked for reachability here (see [`GameState::from_string`]).
    pub fn from_board(board: Board, to_move: Mark) -> Self {
        let status = if let Some(line) = board.winning_line(to_move.opponent()) {
            GameStatus::Won {
                mark: to_move.opponent(),
                line,
            }
        } else if let Some(line) = board.winning_line(to_move) {
            GameStatus::Won {
                mark: to_move,
                line,
            }
        } else if board.check_draw() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        };

        GameState {
            board,
            current_mark: to_move,
            status,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Legal moves: the empty cells while the round is running, none afterwards
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.available_moves()
    }

    /// Place `mark` at `index` and return the resulting state.
    ///
    /// Checks run in order: range, occupancy, terminal status, turn. The new
    /// status is a win for `mark` if it completed a line, else a draw if the
    /// board is full, else in progress with the turn passed to the opponent.
    ///
    /// # Errors
    ///
    /// Returns the first [`MoveError`] that applies; `self` is never modified.
    #[must_use = "apply_move returns a new state; the original is unchanged"]
    pub fn apply_move(&self, index: usize, mark: Mark) -> Result<GameState, MoveError> {
        if index >= 9 {
            return Err(MoveError::OutOfRange { index });
        }
        if !self.board.is_empty(index) {
            return Err(MoveError::CellOccupied { index });
        }
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if mark != self.current_mark {
            return Err(MoveError::WrongTurn {
                expected: self.current_mark,
                got: mark,
            });
        }

        let board = self.board.with_mark(index, mark);
        let status = if let Some(line) = board.winning_line(mark) {
            GameStatus::Won { mark, line }
        } else if board.check_draw() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        };
        let current_mark = if status.is_terminal() {
            mark
        } else {
            mark.opponent()
        };

        debug!(index, %mark, ?status, "move applied");
        Ok(GameState {
            board,
            current_mark,
            status,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub mark: Mark,
}

/// A complete round with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub initial: GameState,
    pub moves: Vec<Move>,
    current: GameState,
}

impl Game {
    /// Create a new game from the empty board
    pub fn new() -> Self {
        Self::starting_from(GameState::new())
    }

    /// Create a new game from an arbitrary starting state
    pub fn starting_from(initial: GameState) -> Self {
        Game {
            initial,
            moves: Vec::new(),
            current: initial,
        }
    }

    /// Apply a move and record it
    pub fn play(&mut self, position: usize, mark: Mark) -> Result<GameStatus, MoveError> {
        let next = self.current.apply_move(position, mark)?;
        self.moves.push(Move { position, mark });
        self.current = next;
        Ok(next.status())
    }

    pub fn current_state(&self) -> &GameState {
        &self.current
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.current.status().outcome()
    }

    /// Recompute the current state by replaying the move history.
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for the state it
    /// was applied to. This indicates corrupted game data.
    pub fn replay(&self) -> Result<GameState, MoveError> {
        self.moves
            .iter()
            .try_fold(self.initial, |state, m| state.apply_move(m.position, m.mark))
    }

    /// Get the sequence of states, starting with the initial one
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid.
    pub fn state_sequence(&self) -> Result<Vec<GameState>, MoveError> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut state = self.initial;
        states.push(state);
        for m in &self.moves {
            state = state.apply_move(m.position, m.mark)?;
            states.push(state);
        }
        Ok(states)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Cell;

    fn play_all(moves: &[usize]) -> GameState {
        let mut state = GameState::new();
        for &pos in moves {
            state = state.apply_move(pos, state.current_mark()).unwrap();
        }
        state
    }

    #[test]
    fn test_fresh_state() {
        let state = GameState::new();
        assert_eq!(state.current_mark(), Mark::X);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.legal_moves().len(), 9);
    }

    #[test]
    fn test_turn_alternates() {
        let state = GameState::new().apply_move(4, Mark::X).unwrap();
        assert_eq!(state.current_mark(), Mark::O);
        assert_eq!(state.board().get(4), Cell::X);

        let state = state.apply_move(0, Mark::O).unwrap();
        assert_eq!(state.current_mark(), Mark::X);
    }

    #[test]
    fn test_out_of_range() {
        let state = GameState::new();
        assert_eq!(
            state.apply_move(9, Mark::X),
            Err(MoveError::OutOfRange { index: 9 })
        );
    }

    #[test]
    fn test_occupied_cell_leaves_state_unchanged() {
        let state = GameState::new().apply_move(4, Mark::X).unwrap();
        let before = state;
        assert_eq!(
            state.apply_move(4, Mark::O),
            Err(MoveError::CellOccupied { index: 4 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_wrong_turn() {
        let state = GameState::new();
        assert_eq!(
            state.apply_move(0, Mark::O),
            Err(MoveError::WrongTurn {
                expected: Mark::X,
                got: Mark::O
            })
        );
    }

    #[test]
    fn test_no_moves_after_win() {
        // X wins on the top row
        let state = play_all(&[0, 3, 1, 4, 2]);
        assert_eq!(
            state.status(),
            GameStatus::Won {
                mark: Mark::X,
                line: WinLine::new([0, 1, 2])
            }
        );
        // turn does not flip on a terminal move
        assert_eq!(state.current_mark(), Mark::X);
        assert!(state.legal_moves().is_empty());
        assert_eq!(state.apply_move(8, Mark::O), Err(MoveError::GameOver));
        assert_eq!(state.apply_move(8, Mark::X), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw_detection() {
        let state = play_all(&[0, 1, 2, 4, 3, 6, 5, 8, 7]);
        assert_eq!(state.status(), GameStatus::Draw);
        assert_eq!(state.status().outcome(), Some(RoundOutcome::Draw));
    }

    #[test]
    fn test_last_cell_completing_a_line_is_a_win() {
        // the ninth move fills the board and completes the main diagonal
        let state = play_all(&[0, 1, 2, 5, 3, 6, 4, 7, 8]);
        assert!(state.board().check_draw());
        assert_eq!(
            state.status(),
            GameStatus::Won {
                mark: Mark::X,
                line: WinLine::new([0, 4, 8])
            }
        );
    }

    #[test]
    fn test_game_record_replay() {
        let mut game = Game::new();
        for (pos, mark) in [(4, Mark::X), (0, Mark::O), (8, Mark::X)] {
            game.play(pos, mark).unwrap();
        }
        assert!(game.play(8, Mark::O).is_err());
        assert_eq!(game.moves.len(), 3);
        assert_eq!(game.replay().unwrap(), *game.current_state());

        let states = game.state_sequence().unwrap();
        assert_eq!(states.len(), 4);
        assert_eq!(states[0], GameState::new());
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn test_from_board_reports_previous_mover_win() {
        let board = Board::from_string("XXXOO....").unwrap();
        let state = GameState::from_board(board, Mark::O);
        assert_eq!(state.status().outcome().and_then(|o| o.winner()), Some(Mark::X));
    }
}
