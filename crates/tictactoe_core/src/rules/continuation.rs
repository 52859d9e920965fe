//! Single-move continuation check.
//!
//! A client submits the whole grid after making its move. The proposal is
//! only accepted when it differs from the stored board in exactly one cell,
//! that cell was empty, and it now holds a real mark.

use crate::{Board, Cell, Coord, Mark};
use tracing::{debug, instrument};

/// Locates the single move that turns `old` into `proposed`.
///
/// Returns `None` when dimensions differ, a mark was erased or overwritten,
/// a changed cell holds an unknown code, or the number of changed cells is
/// anything other than one.
#[instrument(skip(old, proposed), fields(size = old.size()))]
pub fn find_single_move(old: &Board, proposed: &[Vec<u8>]) -> Option<(Coord, Mark)> {
    let n = old.size();
    if proposed.len() != n || proposed.iter().any(|row| row.len() != n) {
        debug!(rows = proposed.len(), "Dimension mismatch");
        return None;
    }

    let mut change = None;
    for (row, codes) in proposed.iter().enumerate() {
        for (col, &code) in codes.iter().enumerate() {
            let before = old.get(row, col);
            if before.code() == code {
                continue;
            }
            if before != Cell::Empty {
                debug!(row, col, "Existing mark changed");
                return None;
            }
            let mark = Mark::from_code(code)?;
            if change.replace((Coord::new(row, col), mark)).is_some() {
                debug!(row, col, "More than one cell changed");
                return None;
            }
        }
    }

    change
}

/// True iff `proposed` is `old` plus exactly one newly placed mark.
pub fn is_valid_single_move_continuation(old: &Board, proposed: &[Vec<u8>]) -> bool {
    find_single_move(old, proposed).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Board {
        let rows = vec![vec![1, 0, 0], vec![0, 2, 0], vec![0, 0, 0]];
        Board::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_one_new_mark_accepted() {
        let proposed = vec![vec![1, 0, 1], vec![0, 2, 0], vec![0, 0, 0]];
        assert_eq!(
            find_single_move(&stored(), &proposed),
            Some((Coord::new(0, 2), Mark::X))
        );
        assert!(is_valid_single_move_continuation(&stored(), &proposed));
    }

    #[test]
    fn test_unchanged_board_rejected() {
        assert!(!is_valid_single_move_continuation(&stored(), &stored().rows()));
    }

    #[test]
    fn test_two_new_marks_rejected() {
        let proposed = vec![vec![1, 1, 0], vec![0, 2, 0], vec![0, 0, 1]];
        assert!(!is_valid_single_move_continuation(&stored(), &proposed));
    }

    #[test]
    fn test_overwrite_rejected() {
        let proposed = vec![vec![2, 0, 0], vec![0, 2, 0], vec![0, 0, 0]];
        assert!(!is_valid_single_move_continuation(&stored(), &proposed));
    }

    #[test]
    fn test_erase_rejected() {
        let proposed = vec![vec![0, 0, 0], vec![0, 2, 0], vec![0, 0, 0]];
        assert!(!is_valid_single_move_continuation(&stored(), &proposed));
    }

    #[test]
    fn test_unknown_code_rejected() {
        let proposed = vec![vec![1, 0, 7], vec![0, 2, 0], vec![0, 0, 0]];
        assert!(!is_valid_single_move_continuation(&stored(), &proposed));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let short = vec![vec![1, 0, 0], vec![0, 2, 0]];
        assert!(!is_valid_single_move_continuation(&stored(), &short));

        let ragged = vec![vec![1, 0, 0, 1], vec![0, 2, 0], vec![0, 0, 0]];
        assert!(!is_valid_single_move_continuation(&stored(), &ragged));

        let larger = Board::new_empty(4).unwrap().rows();
        assert!(!is_valid_single_move_continuation(&stored(), &larger));
    }
}
