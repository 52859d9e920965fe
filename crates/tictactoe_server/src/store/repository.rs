//! Repository seam and the in-memory store behind it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, info, instrument, warn};

use crate::store::{Game, GameId, StoreError, StoreErrorKind, StoredGame};

/// Get/put access to stored games, keyed by identifier.
///
/// Implementations decide their own concurrency guarantees; the service
/// serializes writers to the same identifier itself.
pub trait GameRepository: Send + Sync {
    /// Loads a game.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreErrorKind::NotFound`] error if no game is stored under `id`.
    fn get(&self, id: &GameId) -> Result<Game, StoreError>;

    /// Stores a game, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the game cannot be written.
    fn put(&self, game: &Game) -> Result<(), StoreError>;
}

/// Process-wide concurrent map of stored games.
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    games: Arc<RwLock<HashMap<String, StoredGame>>>,
}

impl MemoryRepository {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory game store");
        Self::default()
    }

    /// Number of stored games.
    pub fn len(&self) -> usize {
        self.games.read().map(|games| games.len()).unwrap_or(0)
    }

    /// True if nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GameRepository for MemoryRepository {
    #[instrument(skip(self), fields(id = %id))]
    fn get(&self, id: &GameId) -> Result<Game, StoreError> {
        let row = {
            let games = self.games.read().map_err(|_| {
                warn!("Store lock poisoned");
                StoreError::new(StoreErrorKind::Poisoned, "game map lock poisoned")
            })?;
            games.get(&id.to_string()).cloned()
        };

        match row {
            Some(row) => {
                debug!("Game found");
                row.into_game()
            }
            None => {
                debug!("Game not found");
                Err(StoreError::new(
                    StoreErrorKind::NotFound,
                    format!("can't find game {}", id),
                ))
            }
        }
    }

    #[instrument(skip(self, game), fields(id = %game.id(), status = %game.status()))]
    fn put(&self, game: &Game) -> Result<(), StoreError> {
        let row = StoredGame::from_game(game)?;
        let mut games = self.games.write().map_err(|_| {
            warn!("Store lock poisoned");
            StoreError::new(StoreErrorKind::Poisoned, "game map lock poisoned")
        })?;
        games.insert(row.id().clone(), row);
        debug!(stored = games.len(), "Game saved");
        Ok(())
    }
}
