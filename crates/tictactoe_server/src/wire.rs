//! JSON request/response bodies and field validation.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::service::ServiceError;
use crate::store::Game;

/// Body of `POST /game`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGameRequest {
    /// Board side length; the configured default when absent.
    #[serde(default)]
    pub size: Option<usize>,
}

/// Body of `POST /game/{id}`: the full grid after the human's move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Grid of cell codes (`0` empty, `1` X, `2` O).
    pub field: Vec<Vec<i64>>,
}

/// A game as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResponse {
    /// Game identifier.
    pub game_id: String,
    /// Grid of cell codes.
    pub field: Vec<Vec<u8>>,
    /// Status label, e.g. `"Game in progress"`.
    pub status: String,
}

impl From<&Game> for GameResponse {
    fn from(game: &Game) -> Self {
        Self {
            game_id: game.id().to_string(),
            field: game.board().rows(),
            status: game.status().to_string(),
        }
    }
}

/// Error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

/// Checks that a submitted grid is `expected`×`expected` with codes 0–2.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidField`] naming the first offending row or cell.
#[instrument(skip(field), fields(rows = field.len()))]
pub fn validate_field(field: &[Vec<i64>], expected: usize) -> Result<Vec<Vec<u8>>, ServiceError> {
    if field.len() != expected {
        return Err(ServiceError::InvalidField(format!(
            "field must be {expected}x{expected}, got {0}x{0}",
            field.len()
        )));
    }

    field
        .iter()
        .enumerate()
        .map(|(i, row)| -> Result<Vec<u8>, ServiceError> {
            if row.len() != expected {
                return Err(ServiceError::InvalidField(format!(
                    "row {i} has invalid length: expected {expected}, got {}",
                    row.len()
                )));
            }
            row.iter()
                .enumerate()
                .map(|(j, &cell)| match u8::try_from(cell) {
                    Ok(code) if code <= 2 => Ok(code),
                    _ => Err(ServiceError::InvalidField(format!(
                        "invalid cell value at [{i}][{j}]: {cell} (must be 0, 1, or 2)"
                    ))),
                })
                .collect()
        })
        .collect()
}
