//! Storage error types.

use derive_more::{Display, Error};

/// Category of a storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StoreErrorKind {
    /// No game is stored under the identifier.
    #[display("not found")]
    NotFound,
    /// A stored row could not be converted back into a game.
    #[display("corrupt record")]
    Corrupt,
    /// The backing map's lock was poisoned by a panicking writer.
    #[display("lock poisoned")]
    Poisoned,
}

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error ({}): {} at {}:{}", kind, message, file, line)]
pub struct StoreError {
    /// Failure category.
    pub kind: StoreErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// True if the error means the game does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind == StoreErrorKind::NotFound
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(StoreErrorKind::Corrupt, format!("Field encoding error: {}", err))
    }
}

impl From<uuid::Error> for StoreError {
    #[track_caller]
    fn from(err: uuid::Error) -> Self {
        Self::new(StoreErrorKind::Corrupt, format!("Bad game id: {}", err))
    }
}

impl From<tictactoe_core::BoardError> for StoreError {
    #[track_caller]
    fn from(err: tictactoe_core::BoardError) -> Self {
        Self::new(StoreErrorKind::Corrupt, format!("Bad stored board: {}", err))
    }
}
