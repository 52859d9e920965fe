//! Game records and their stored representation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tictactoe_core::{Board, BoardError, Coord, GameStatus, Mark};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::store::{StoreError, StoreErrorKind};

/// Opaque identifier of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{}", _0)]
pub struct GameId(Uuid);

impl GameId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A game as the service sees it.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Game {
    id: GameId,
    board: Board,
    status: GameStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Game {
    /// Creates an in-progress game around `board`, stamped with the current time.
    #[instrument(skip(board), fields(size = board.size()))]
    pub fn new(id: GameId, board: Board) -> Self {
        let now = Utc::now();
        Self {
            id,
            board,
            status: GameStatus::InProgress,
            created_at: now,
            updated_at: now,
        }
    }

    /// Places `mark` at `at` and refreshes the update timestamp.
    ///
    /// Status is left alone; call [`Game::refresh_status`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns the board's error; the game is unchanged in that case.
    pub fn apply_move(&mut self, at: Coord, mark: Mark) -> Result<(), BoardError> {
        self.board.apply_move(at.row, at.col, mark)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Recomputes status from the grid.
    pub fn refresh_status(&mut self, computer: Mark) -> GameStatus {
        self.status = GameStatus::evaluate(&self.board, computer);
        self.status
    }
}

/// Row layout used by the in-memory store.
///
/// The grid is kept as a JSON string and the status as its label.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StoredGame {
    id: String,
    field: String,
    status: String,
    to_move: u8,
    size: usize,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoredGame {
    /// Converts a game into its stored row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the grid cannot be encoded.
    #[instrument(skip(game), fields(id = %game.id))]
    pub fn from_game(game: &Game) -> Result<Self, StoreError> {
        Ok(Self {
            id: game.id.to_string(),
            field: serde_json::to_string(&game.board.rows())?,
            status: game.status.as_ref().to_string(),
            to_move: game.board.to_move().code(),
            size: game.board.size(),
            created_at: game.created_at,
            updated_at: game.updated_at,
        })
    }

    /// Converts a stored row back into a game.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreErrorKind::Corrupt`] error if any column fails to parse.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn into_game(self) -> Result<Game, StoreError> {
        let id = GameId::from_str(&self.id)?;
        let rows: Vec<Vec<u8>> = serde_json::from_str(&self.field)?;
        if rows.len() != self.size {
            return Err(StoreError::new(
                StoreErrorKind::Corrupt,
                format!("Stored size {} but grid has {} rows", self.size, rows.len()),
            ));
        }
        let to_move = Mark::from_code(self.to_move).ok_or_else(|| {
            StoreError::new(StoreErrorKind::Corrupt, format!("Bad turn code {}", self.to_move))
        })?;
        let status = GameStatus::from_str(&self.status).map_err(|_| {
            StoreError::new(StoreErrorKind::Corrupt, format!("Bad status '{}'", self.status))
        })?;
        let board = Board::from_rows(&rows)?.with_to_move(to_move);

        debug!(%status, "Stored game decoded");
        Ok(Game {
            id,
            board,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> StoredGame {
        let game = Game::new(GameId::generate(), Board::new_empty(3).unwrap());
        StoredGame::from_game(&game).unwrap()
    }

    #[test]
    fn test_stored_row_layout() {
        let row = stored();
        assert_eq!(row.field(), "[[0,0,0],[0,0,0],[0,0,0]]");
        assert_eq!(row.status(), "Game in progress");
        assert_eq!(*row.to_move(), 1);
        assert_eq!(*row.size(), 3);
    }

    #[test]
    fn test_turn_survives_storage() {
        let mut game = Game::new(GameId::generate(), Board::new_empty(3).unwrap());
        game.apply_move(Coord::new(0, 0), Mark::X).unwrap();
        let back = StoredGame::from_game(&game).unwrap().into_game().unwrap();
        assert_eq!(back.board().to_move(), Mark::O);
        assert_eq!(back, game);
    }

    #[test]
    fn test_corrupt_rows_rejected() {
        let mut row = stored();
        row.field = "not json".to_string();
        assert_eq!(row.into_game().unwrap_err().kind, StoreErrorKind::Corrupt);

        let mut row = stored();
        row.size = 4;
        assert_eq!(row.into_game().unwrap_err().kind, StoreErrorKind::Corrupt);

        let mut row = stored();
        row.status = "Paused".to_string();
        assert_eq!(row.into_game().unwrap_err().kind, StoreErrorKind::Corrupt);

        let mut row = stored();
        row.to_move = 7;
        assert_eq!(row.into_game().unwrap_err().kind, StoreErrorKind::Corrupt);

        let mut row = stored();
        row.field = "[[0,0,0],[0,9,0],[0,0,0]]".to_string();
        assert_eq!(row.into_game().unwrap_err().kind, StoreErrorKind::Corrupt);
    }
}
