//! Exhaustive minimax search (the hard tier)
//!
//! The search runs on owned `Board` copies, one per call frame, so nothing
//! the caller holds is mutated and reentrant calls are safe. A 3x3 board is
//! small enough to search to the end without pruning or depth limits: every
//! line of play terminates within nine plies.

use tracing::trace;

use crate::tictactoe::{Board, Mark};

/// Score of an immediate win for the searching side.
pub const WIN_SCORE: i32 = 10;

/// Score `board` from the point of view of `me`.
///
/// `depth` counts plies below the root. A win for `me` scores
/// `WIN_SCORE - depth` and a loss `depth - WIN_SCORE`, so quicker wins and
/// slower losses are preferred; a draw scores 0. On a maximizing ply `me` is
/// to move, otherwise the opponent is.
pub fn minimax(board: &Board, depth: i32, maximizing: bool, me: Mark) -> i32 {
    if board.check_win(me) {
        return WIN_SCORE - depth;
    }
    if board.check_win(me.opponent()) {
        return depth - WIN_SCORE;
    }
    if board.check_draw() {
        return 0;
    }

    let mover = if maximizing { me } else { me.opponent() };
    let scores = (0..9)
        .filter(|&pos| board.is_empty(pos))
        .map(|pos| minimax(&board.with_mark(pos, mover), depth + 1, !maximizing, me));

    let best = if maximizing { scores.max() } else { scores.min() };
    // not full and not won, so at least one continuation exists
    best.unwrap_or(0)
}

/// Minimax score of every empty cell for `me`, in ascending index order
pub fn evaluate_moves(board: &Board, me: Mark) -> Vec<(usize, i32)> {
    board
        .available_moves()
        .into_iter()
        .map(|pos| (pos, minimax(&board.with_mark(pos, me), 0, false, me)))
        .collect()
}

/// The optimal move for `me`, or `None` on a full board.
///
/// Ties go to the lowest index: a later move replaces the current best only
/// with a strictly greater score. From the empty board this picks 0.
pub fn best_move(board: &Board, me: Mark) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (pos, score) in evaluate_moves(board, me) {
        trace!(pos, score, %me, "minimax score");
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }
    best.map(|(pos, _)| pos)
}
