//! Tests for board construction, moves and status evaluation.

use std::str::FromStr;

use strum::IntoEnumIterator;
use tictactoe_core::{Board, BoardError, Cell, Coord, GameStatus, Mark};

fn board(rows: &[&[u8]]) -> Board {
    let rows: Vec<Vec<u8>> = rows.iter().map(|r| r.to_vec()).collect();
    Board::from_rows(&rows).expect("valid grid")
}

#[test]
fn test_new_empty_board() {
    let board = Board::new_empty(4).expect("size 4 is valid");
    assert_eq!(board.size(), 4);
    assert_eq!(board.to_move(), Mark::X);
    assert_eq!(board.empty_cells().count(), 16);
    assert!(board.cells().iter().all(|c| *c == Cell::Empty));
}

#[test]
fn test_zero_size_rejected() {
    assert_eq!(Board::new_empty(0), Err(BoardError::InvalidSize(0)));
}

#[test]
fn test_apply_move_sets_cell_and_flips_turn() {
    let mut board = Board::new_empty(3).unwrap();
    board.apply_move(0, 2, Mark::X).unwrap();

    assert_eq!(board.get(0, 2), Cell::Occupied(Mark::X));
    assert!(!board.is_empty(0, 2));
    assert_eq!(board.to_move(), Mark::O);
    assert_eq!(board.empty_cells().count(), 8);
}

#[test]
fn test_apply_move_out_of_bounds_leaves_board_unchanged() {
    let mut board = Board::new_empty(3).unwrap();
    board.apply_move(1, 1, Mark::X).unwrap();
    let before = board.clone();

    let err = board.apply_move(3, 0, Mark::O).unwrap_err();
    assert_eq!(err, BoardError::OutOfBounds { row: 3, col: 0, size: 3 });
    let err = board.apply_move(0, 7, Mark::O).unwrap_err();
    assert!(matches!(err, BoardError::OutOfBounds { .. }));
    assert_eq!(board, before);
}

#[test]
fn test_apply_move_occupied_leaves_board_unchanged() {
    let mut board = Board::new_empty(3).unwrap();
    board.apply_move(1, 1, Mark::X).unwrap();
    let before = board.clone();

    let err = board.apply_move(1, 1, Mark::O).unwrap_err();
    assert_eq!(err, BoardError::CellOccupied { row: 1, col: 1 });
    assert!(err.to_string().contains("occupied"));
    assert_eq!(board, before);
}

#[test]
fn test_clone_is_independent() {
    let original = board(&[&[1, 0, 0], &[0, 2, 0], &[0, 0, 0]]);
    let snapshot = original.clone();

    let mut copy = original.clone();
    copy.apply_move(2, 2, Mark::X).unwrap();
    assert_eq!(original, snapshot);
    assert_ne!(copy, original);

    let mut original = original;
    original.apply_move(0, 1, Mark::X).unwrap();
    assert!(copy.is_empty(0, 1));
}

#[test]
fn test_from_rows_round_trips_grid() {
    let rows = vec![vec![1, 0, 2], vec![0, 1, 0], vec![2, 0, 0]];
    let board = Board::from_rows(&rows).unwrap();
    assert_eq!(board.rows(), rows);
    assert_eq!(board.to_move(), Mark::X);
}

#[test]
fn test_from_rows_infers_turn() {
    let board = board(&[&[1, 0, 0], &[0, 0, 0], &[0, 0, 0]]);
    assert_eq!(board.to_move(), Mark::O);
}

#[test]
fn test_from_rows_rejects_bad_grids() {
    assert_eq!(Board::from_rows(&[]), Err(BoardError::InvalidSize(0)));
    assert_eq!(
        Board::from_rows(&[vec![0, 0], vec![0]]),
        Err(BoardError::InvalidSize(1))
    );
    assert_eq!(
        Board::from_rows(&[vec![0, 3], vec![0, 0]]),
        Err(BoardError::InvalidCell(3))
    );
}

#[test]
fn test_top_row_win_not_full() {
    let board = board(&[&[1, 1, 1], &[0, 2, 2], &[0, 0, 2]]);
    assert_eq!(board.winner(), Some(Mark::X));
    assert!(!board.is_full());
    assert_eq!(GameStatus::evaluate(&board, Mark::O), GameStatus::PlayerWon);
    assert_eq!(GameStatus::evaluate(&board, Mark::X), GameStatus::ComputerWon);
}

#[test]
fn test_alternating_full_board_is_draw() {
    let board = board(&[&[1, 2, 1], &[2, 1, 2], &[2, 1, 2]]);
    assert_eq!(board.winner(), None);
    assert!(board.is_full());
    assert_eq!(GameStatus::evaluate(&board, Mark::O), GameStatus::Draw);
    assert!(GameStatus::Draw.is_terminal());
}

#[test]
fn test_empty_board_in_progress() {
    let board = Board::new_empty(5).unwrap();
    assert_eq!(GameStatus::evaluate(&board, Mark::O), GameStatus::InProgress);
    assert!(!GameStatus::InProgress.is_terminal());
}

#[test]
fn test_status_labels_parse_back() {
    for status in GameStatus::iter() {
        assert_eq!(GameStatus::from_str(status.as_ref()), Ok(status));
    }
    assert_eq!(GameStatus::InProgress.to_string(), "Game in progress");
    assert_eq!(GameStatus::ComputerWon.to_string(), "AI won");
}

#[test]
fn test_mark_codes() {
    for mark in Mark::iter() {
        assert_eq!(Mark::from_code(mark.code()), Some(mark));
        assert_eq!(Cell::from_code(mark.code()), Some(Cell::Occupied(mark)));
        assert_ne!(mark.opponent(), mark);
    }
    assert_eq!(Cell::from_code(0), Some(Cell::Empty));
    assert_eq!(Cell::from_code(9), None);
}

#[test]
fn test_display_renders_grid() {
    let board = board(&[&[1, 0, 0], &[0, 2, 0], &[0, 0, 0]]);
    assert_eq!(board.to_string(), "X|.|.\n.|O|.\n.|.|.");
    assert_eq!(Coord::new(1, 2).to_string(), "(1, 2)");
}

#[test]
fn test_mark_serializes_by_name() {
    assert_eq!(serde_json::to_string(&Mark::X).unwrap(), "\"X\"");
    let mark: Mark = serde_json::from_str("\"O\"").unwrap();
    assert_eq!(mark, Mark::O);
    assert!(serde_json::from_str::<Mark>("\"Z\"").is_err());
}
