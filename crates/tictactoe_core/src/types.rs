//! Core domain types for N×N tic-tac-toe.

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Smallest board the model accepts.
pub const MIN_BOARD_SIZE: usize = 1;

/// A player's mark.
///
/// On the wire `X` is encoded as `1` and `O` as `2`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Mark X (moves first).
    X,
    /// Mark O (moves second).
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Wire code of this mark.
    pub fn code(self) -> u8 {
        match self {
            Mark::X => 1,
            Mark::O => 2,
        }
    }

    /// Parses a wire code (`1` or `2`).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Mark::X),
            2 => Some(Mark::O),
            _ => None,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell occupied by a mark.
    Occupied(Mark),
}

impl Cell {
    /// Wire code of this cell (`0` for empty).
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(mark) => mark.code(),
        }
    }

    /// Parses a wire code (`0`, `1` or `2`).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            other => Mark::from_code(other).map(Cell::Occupied),
        }
    }

    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

/// Row/column address of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("({}, {})", row, col)]
pub struct Coord {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// N×N tic-tac-toe board.
///
/// Cells are stored row-major in a single owned buffer, so `clone` is a
/// deep O(N²) copy and no two boards ever share storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    to_move: Mark,
}

impl Board {
    /// Creates an empty board with X to move.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSize`] for a zero size. The playable
    /// range is a policy of the calling service.
    #[instrument]
    pub fn new_empty(size: usize) -> Result<Self, BoardError> {
        if size < MIN_BOARD_SIZE {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
            to_move: Mark::X,
        })
    }

    /// Builds a board from a square grid of wire codes.
    ///
    /// The side to move is inferred from the piece counts: X moves
    /// whenever both marks have been placed equally often.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSize`] for an empty or ragged grid and
    /// [`BoardError::InvalidCell`] for an unknown code.
    #[instrument(skip(rows), fields(rows = rows.len()))]
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size < MIN_BOARD_SIZE {
            return Err(BoardError::InvalidSize(size));
        }

        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(BoardError::InvalidSize(row.len()));
            }
            for &code in row {
                cells.push(Cell::from_code(code).ok_or(BoardError::InvalidCell(code))?);
            }
        }

        let count = |mark: Mark| cells.iter().filter(|c| **c == Cell::Occupied(mark)).count();
        let to_move = if count(Mark::X) > count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        };

        Ok(Self {
            size,
            cells,
            to_move,
        })
    }

    /// Overrides the side to move, e.g. when restoring a stored game.
    pub fn with_to_move(mut self, mark: Mark) -> Self {
        self.to_move = mark;
        self
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Mark expected to move next.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Checks if the cell at `(row, col)` is empty.
    ///
    /// Coordinates must be in range; [`Board::apply_move`] is the checked path.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Cell::Empty
    }

    /// Places `mark` at `(row, col)` and passes the turn to the other mark.
    ///
    /// Status is not recomputed here; callers evaluate the board afterwards.
    /// On error the board is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] or [`BoardError::CellOccupied`].
    pub fn apply_move(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), BoardError> {
        if row >= self.size || col >= self.size {
            return Err(BoardError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        let idx = self.index(row, col);
        if self.cells[idx] != Cell::Empty {
            return Err(BoardError::CellOccupied { row, col });
        }
        self.cells[idx] = Cell::Occupied(mark);
        self.to_move = mark.opponent();
        Ok(())
    }

    /// Mark owning a complete row, column or diagonal, if any.
    pub fn winner(&self) -> Option<Mark> {
        crate::rules::winner(self)
    }

    /// True when no empty cell remains.
    pub fn is_full(&self) -> bool {
        crate::rules::is_full(self)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(idx, _)| Coord::new(idx / self.size, idx % self.size))
    }

    /// The grid as rows of wire codes.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|c| c.code()).collect())
            .collect()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "cell ({row}, {col}) outside {0}x{0} board",
            self.size
        );
        row * self.size + col
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.cells.chunks(self.size).enumerate() {
            let line = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".",
                    Cell::Occupied(Mark::X) => "X",
                    Cell::Occupied(Mark::O) => "O",
                })
                .collect::<Vec<_>>()
                .join("|");
            f.write_str(&line)?;
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Lifecycle status of a game, from the human player's point of view.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
pub enum GameStatus {
    /// Game is ongoing.
    #[strum(serialize = "Game in progress")]
    InProgress,
    /// The human player completed a line.
    #[strum(serialize = "Player won")]
    PlayerWon,
    /// The computer completed a line.
    #[strum(serialize = "AI won")]
    ComputerWon,
    /// Board filled with no winner.
    #[strum(serialize = "Draw")]
    Draw,
}

impl GameStatus {
    /// Derives the status of `board` given which mark the computer plays.
    #[instrument(skip(board), fields(size = board.size()))]
    pub fn evaluate(board: &Board, computer: Mark) -> Self {
        match board.winner() {
            Some(mark) if mark == computer => GameStatus::ComputerWon,
            Some(_) => GameStatus::PlayerWon,
            None if board.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    /// True once the game no longer accepts moves.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}
