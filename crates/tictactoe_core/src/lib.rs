//! Pure N×N tic-tac-toe game logic.
//!
//! # Architecture
//!
//! - **Board**: owned N×N grid, move application, win/draw queries
//! - **Rules**: win, draw and single-move continuation checks
//! - **Search**: minimax with alpha-beta pruning over board clones
//!
//! Nothing in this crate performs I/O. Given a board and the computer's
//! mark, the search result is fully deterministic.
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{Board, Coord, Mark, Minimax};
//!
//! let board = Board::new_empty(3).unwrap();
//! let engine = Minimax::new(Mark::O);
//! assert_eq!(engine.find_best_move(&board), Some(Coord::new(1, 1)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod rules;
mod search;
mod types;

pub use error::BoardError;
pub use rules::{find_single_move, is_valid_single_move_continuation};
pub use search::{MAX_SCORE, MIN_SCORE, Minimax, MoveSelector, priority_moves};
pub use types::{Board, Cell, Coord, GameStatus, MIN_BOARD_SIZE, Mark};
