//! Game persistence: identifiers, records and the repository seam.

mod error;
mod models;
mod repository;

pub use error::{StoreError, StoreErrorKind};
pub use models::{Game, GameId, StoredGame};
pub use repository::{GameRepository, MemoryRepository};
