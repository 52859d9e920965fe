//! Game rules for N×N tic-tac-toe.
//!
//! Pure functions over [`Board`](crate::Board) snapshots. Rules are kept
//! apart from board storage so the search engine and the service can
//! compose them freely.

pub mod continuation;
pub mod draw;
pub mod win;

pub use continuation::{find_single_move, is_valid_single_move_continuation};
pub use draw::is_full;
pub use win::winner;
