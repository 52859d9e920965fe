//! Win detection logic.

use crate::{Board, Cell, Mark};

/// Checks if a mark owns a complete line.
///
/// Lines are scanned rows top-to-bottom, then columns left-to-right, then
/// the main diagonal, then the anti-diagonal. The first complete line
/// decides. An all-empty line never counts.
pub fn winner(board: &Board) -> Option<Mark> {
    let n = board.size();

    (0..n)
        .find_map(|r| line_owner(board, (0..n).map(|c| (r, c))))
        .or_else(|| (0..n).find_map(|c| line_owner(board, (0..n).map(|r| (r, c)))))
        .or_else(|| line_owner(board, (0..n).map(|i| (i, i))))
        .or_else(|| line_owner(board, (0..n).map(|i| (i, n - 1 - i))))
}

/// Returns the mark filling every cell of the line, if one does.
fn line_owner(board: &Board, mut line: impl Iterator<Item = (usize, usize)>) -> Option<Mark> {
    let (r, c) = line.next()?;
    let first = board.get(r, c).mark()?;
    line.all(|(r, c)| board.get(r, c) == Cell::Occupied(first))
        .then_some(first)
}
