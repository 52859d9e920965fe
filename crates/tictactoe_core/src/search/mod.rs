//! Adversarial move search.

mod minimax;

pub use minimax::{MAX_SCORE, MIN_SCORE, Minimax, priority_moves};

use crate::{Board, Coord, Mark};

/// Chooses the computer's next move.
///
/// The service only depends on this trait, so any engine can be plugged
/// in behind it.
pub trait MoveSelector {
    /// Mark the selector plays.
    fn mark(&self) -> Mark;

    /// Picks a cell for [`MoveSelector::mark`], or `None` if the board has
    /// no empty cell.
    fn select_move(&self, board: &Board) -> Option<Coord>;
}
