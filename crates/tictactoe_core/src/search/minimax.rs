//! Minimax search with alpha-beta pruning.
//!
//! Every branch explores its own clone of the board, so no hypothetical
//! move is ever visible to the caller or to a sibling branch. Search runs
//! to terminal positions; scores favour quick wins and slow losses.

use super::MoveSelector;
use crate::{Board, Coord, Mark};
use tracing::{debug, instrument};

/// Score of a win for the computer found at depth zero.
pub const MAX_SCORE: i32 = 1000;

/// Score of a loss for the computer found at depth zero.
pub const MIN_SCORE: i32 = -1000;

/// Exhaustive minimax engine playing a fixed mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minimax {
    computer: Mark,
    opponent: Mark,
    pruning: bool,
}

impl Minimax {
    /// Creates an alpha-beta engine playing `computer`.
    #[instrument]
    pub fn new(computer: Mark) -> Self {
        Self {
            computer,
            opponent: computer.opponent(),
            pruning: true,
        }
    }

    /// Creates an engine that scores every branch without cutoffs.
    ///
    /// Results are identical to [`Minimax::new`]; only the amount of work
    /// differs.
    #[instrument]
    pub fn exhaustive(computer: Mark) -> Self {
        Self {
            pruning: false,
            ..Self::new(computer)
        }
    }

    /// Mark played by the engine.
    pub fn computer(&self) -> Mark {
        self.computer
    }

    /// Mark played by the opponent.
    pub fn opponent(&self) -> Mark {
        self.opponent
    }

    /// Chooses the cell that maximizes the computer's worst-case outcome.
    ///
    /// Returns `None` only when the board has no empty cell. The caller's
    /// board is never modified.
    pub fn find_best_move(&self, board: &Board) -> Option<Coord> {
        self.best_move_with_score(board).map(|(at, _)| at)
    }

    /// Like [`Minimax::find_best_move`], also returning the root score.
    ///
    /// Root candidates are tried in [`priority_moves`] order and the first
    /// strictly best one is kept. If no candidate beats [`MIN_SCORE`], the
    /// first empty cell in row-major order is returned with that score.
    #[instrument(skip(self, board), fields(computer = %self.computer, size = board.size()))]
    pub fn best_move_with_score(&self, board: &Board) -> Option<(Coord, i32)> {
        let root = board.clone();

        let mut best_score = MIN_SCORE;
        let mut best = None;
        let mut alpha = MIN_SCORE;
        let beta = MAX_SCORE;

        for at in priority_moves(root.size()) {
            if !root.is_empty(at.row, at.col) {
                continue;
            }
            let Some(child) = play(&root, at, self.computer) else {
                continue;
            };

            let score = self.minimax(&child, 0, false, alpha, beta);
            if score > best_score {
                best_score = score;
                best = Some(at);
            }

            if self.pruning {
                alpha = alpha.max(best_score);
                if alpha >= beta {
                    break;
                }
            }
        }

        match best {
            Some(at) => {
                debug!(%at, score = best_score, "Best move found");
                Some((at, best_score))
            }
            None => {
                let fallback = root.empty_cells().next();
                debug!(?fallback, "No scoring move, falling back to first empty cell");
                fallback.map(|at| (at, best_score))
            }
        }
    }

    fn minimax(&self, board: &Board, depth: i32, maximizing: bool, mut alpha: i32, mut beta: i32) -> i32 {
        match board.winner() {
            Some(mark) if mark == self.computer => return MAX_SCORE - depth,
            Some(_) => return depth - MAX_SCORE,
            None if board.is_full() => return 0,
            None => {}
        }

        let (mark, mut best) = if maximizing {
            (self.computer, MIN_SCORE)
        } else {
            (self.opponent, MAX_SCORE)
        };

        for at in board.empty_cells() {
            let Some(child) = play(board, at, mark) else {
                continue;
            };
            let score = self.minimax(&child, depth + 1, !maximizing, alpha, beta);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.pruning && alpha >= beta {
                break;
            }
        }

        best
    }
}

impl MoveSelector for Minimax {
    fn mark(&self) -> Mark {
        self.computer
    }

    fn select_move(&self, board: &Board) -> Option<Coord> {
        self.find_best_move(board)
    }
}

/// Root move order: centre (odd sizes only), the four corners, then every
/// other cell in row-major order.
///
/// Only the root uses this order; deeper plies scan row-major.
pub fn priority_moves(size: usize) -> Vec<Coord> {
    let mut moves = Vec::with_capacity(size * size);
    if size == 0 {
        return moves;
    }

    let last = size - 1;
    if size % 2 == 1 {
        moves.push(Coord::new(size / 2, size / 2));
    }
    for corner in [
        Coord::new(0, 0),
        Coord::new(0, last),
        Coord::new(last, 0),
        Coord::new(last, last),
    ] {
        if !moves.contains(&corner) {
            moves.push(corner);
        }
    }

    let head = moves.len();
    for row in 0..size {
        for col in 0..size {
            let at = Coord::new(row, col);
            if !moves[..head].contains(&at) {
                moves.push(at);
            }
        }
    }

    moves
}

/// Clone of `board` with `mark` placed at `at`.
fn play(board: &Board, at: Coord, mark: Mark) -> Option<Board> {
    let mut child = board.clone();
    child.apply_move(at.row, at.col, mark).ok()?;
    Some(child)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order_odd() {
        let moves = priority_moves(3);
        assert_eq!(
            &moves[..5],
            &[
                Coord::new(1, 1),
                Coord::new(0, 0),
                Coord::new(0, 2),
                Coord::new(2, 0),
                Coord::new(2, 2),
            ]
        );
        assert_eq!(
            &moves[5..],
            &[
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 2),
                Coord::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_priority_order_even_has_no_centre() {
        let moves = priority_moves(4);
        assert_eq!(moves.len(), 16);
        assert_eq!(moves[0], Coord::new(0, 0));
        assert_eq!(moves[3], Coord::new(3, 3));
        assert_eq!(moves[4], Coord::new(0, 1));
    }

    #[test]
    fn test_priority_order_tiny_boards_unique() {
        assert_eq!(priority_moves(1), vec![Coord::new(0, 0)]);
        assert_eq!(priority_moves(2).len(), 4);
    }

    #[test]
    fn test_opponent_inferred() {
        assert_eq!(Minimax::new(Mark::O).opponent(), Mark::X);
        assert_eq!(Minimax::new(Mark::X).opponent(), Mark::O);
    }
}
