//! Board construction and move errors.

use derive_more::{Display, Error};

/// Error raised when building a board or applying a move.
///
/// A failed move never modifies the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Board dimensions are unusable.
    #[display("Invalid board size: {}", _0)]
    InvalidSize(#[error(not(source))] usize),

    /// Coordinates fall outside the board.
    #[display("Cell ({}, {}) is outside the {}x{} board", row, col, size, size)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Board side length.
        size: usize,
    },

    /// Target cell already holds a mark.
    #[display("Cell ({}, {}) is already occupied", row, col)]
    CellOccupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// A grid value is not one of the known cell codes.
    #[display("Invalid cell value {} (must be 0, 1, or 2)", _0)]
    InvalidCell(#[error(not(source))] u8),
}
