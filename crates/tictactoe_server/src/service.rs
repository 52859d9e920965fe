//! Game service: the rules of play between a human and the engine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use derive_more::{Display, Error, From};
use tictactoe_core::{Board, BoardError, Coord, GameStatus, Mark, MoveSelector, find_single_move};
use tracing::{debug, info, instrument, warn};

use crate::store::{Game, GameId, GameRepository, StoreError, StoreErrorKind};

/// Smallest playable board.
pub const MIN_SIZE: usize = 3;

/// Largest playable board.
pub const MAX_SIZE: usize = 10;

/// Error returned by [`GameService`] operations.
#[derive(Debug, Display, Error, From)]
pub enum ServiceError {
    /// Requested board size is outside the playable range.
    #[display("Invalid size {}: must be between {} and {}", _0, MIN_SIZE, MAX_SIZE)]
    InvalidSize(#[error(not(source))] usize),

    /// Submitted grid has the wrong shape or unknown values.
    #[display("Invalid field: {}", _0)]
    InvalidField(#[error(not(source))] String),

    /// Submitted grid is not a single legal move.
    #[display("Invalid move: {}", _0)]
    InvalidMove(#[error(not(source))] String),

    /// The game no longer accepts moves.
    #[display("Game is already finished: {}", _0)]
    GameFinished(#[error(not(source))] GameStatus),

    /// The mark is not the one expected to move.
    #[display("It is not {}'s turn", _0)]
    WrongTurn(#[error(not(source))] Mark),

    /// Board rejected the move.
    #[display("{}", _0)]
    #[from]
    Board(#[error(source)] BoardError),

    /// Storage failed.
    #[display("{}", _0)]
    #[from]
    Store(#[error(source)] StoreError),
}

impl ServiceError {
    /// True if the referenced game does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Store(err) if err.is_not_found())
    }
}

/// Plays games between a human and a [`MoveSelector`], persisting each step.
///
/// Operations on the same game are serialized through a per-identifier lock.
pub struct GameService<R, S> {
    repo: R,
    selector: S,
    locks: Mutex<HashMap<GameId, Arc<Mutex<()>>>>,
}

impl<R: GameRepository, S: MoveSelector> GameService<R, S> {
    /// Creates a service over a repository and an engine.
    #[instrument(skip_all, fields(computer = %selector.mark()))]
    pub fn new(repo: R, selector: S) -> Self {
        info!("Creating game service");
        Self {
            repo,
            selector,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Mark played by the computer.
    pub fn computer(&self) -> Mark {
        self.selector.mark()
    }

    /// Mark played by the human.
    pub fn human(&self) -> Mark {
        self.selector.mark().opponent()
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates and stores a new empty game.
    ///
    /// If the computer holds the first-moving mark it moves straight away.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidSize`] outside `MIN_SIZE..=MAX_SIZE`.
    #[instrument(skip(self))]
    pub fn create_game(&self, size: usize) -> Result<Game, ServiceError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            warn!(size, "Rejected board size");
            return Err(ServiceError::InvalidSize(size));
        }

        let mut game = Game::new(GameId::generate(), Board::new_empty(size)?);
        if game.board().to_move() == self.computer() {
            debug!("Computer opens the game");
            self.computer_step(&mut game)?;
        }
        self.repo.put(&game)?;

        info!(id = %game.id(), size, "Game created");
        Ok(game)
    }

    /// Loads a game.
    ///
    /// # Errors
    ///
    /// Returns a not-found [`ServiceError::Store`] for unknown identifiers.
    #[instrument(skip(self), fields(id = %id))]
    pub fn get_game(&self, id: &GameId) -> Result<Game, ServiceError> {
        Ok(self.repo.get(id)?)
    }

    /// Checks whether `proposed` is the stored board plus exactly one new mark.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the game cannot be loaded.
    #[instrument(skip(self, proposed), fields(id = %id))]
    pub fn validate_field(&self, id: &GameId, proposed: &[Vec<u8>]) -> Result<bool, ServiceError> {
        let game = self.repo.get(id)?;
        Ok(tictactoe_core::is_valid_single_move_continuation(game.board(), proposed))
    }

    /// Applies the human's move at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Fails if the game is over, it is not the human's turn, or the board
    /// rejects the move.
    #[instrument(skip(self), fields(id = %id))]
    pub fn make_player_move(&self, id: &GameId, row: usize, col: usize) -> Result<Game, ServiceError> {
        let lock = self.game_lock(id)?;
        let _guard = lock.lock().map_err(|_| poisoned())?;

        let mut game = self.repo.get(id)?;
        self.player_step(&mut game, Coord::new(row, col))?;
        self.repo.put(&game)?;
        Ok(game)
    }

    /// Lets the computer reply on a stored game.
    ///
    /// # Errors
    ///
    /// Fails if the game is over or it is not the computer's turn.
    #[instrument(skip(self), fields(id = %id))]
    pub fn make_computer_move(&self, id: &GameId) -> Result<Game, ServiceError> {
        let lock = self.game_lock(id)?;
        let _guard = lock.lock().map_err(|_| poisoned())?;

        let mut game = self.repo.get(id)?;
        self.computer_step(&mut game)?;
        self.repo.put(&game)?;
        Ok(game)
    }

    /// Accepts a full grid from the human and answers with the computer's move.
    ///
    /// The grid must be the stored board plus one new human mark. After the
    /// human move is applied, the computer replies unless the game ended.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidMove`] for a grid that is not a single
    /// legal human move, plus any error of the individual steps.
    #[instrument(skip(self, proposed), fields(id = %id))]
    pub fn play_turn(&self, id: &GameId, proposed: &[Vec<u8>]) -> Result<Game, ServiceError> {
        let lock = self.game_lock(id)?;
        let _guard = lock.lock().map_err(|_| poisoned())?;

        let mut game = self.repo.get(id)?;
        let Some((at, mark)) = find_single_move(game.board(), proposed) else {
            warn!("Submitted field is not a single-move continuation");
            return Err(ServiceError::InvalidMove(
                "previous moves have been changed or more than one cell differs".to_string(),
            ));
        };
        if mark != self.human() {
            warn!(%mark, "Submitted move uses the computer's mark");
            return Err(ServiceError::InvalidMove(format!(
                "new mark must be {}",
                self.human()
            )));
        }

        self.player_step(&mut game, at)?;
        if !game.status().is_terminal() {
            self.computer_step(&mut game)?;
        }
        self.repo.put(&game)?;

        info!(status = %game.status(), "Turn complete");
        Ok(game)
    }

    fn player_step(&self, game: &mut Game, at: Coord) -> Result<(), ServiceError> {
        self.ensure_turn(game, self.human())?;
        game.apply_move(at, self.human())?;
        let status = game.refresh_status(self.computer());
        debug!(%at, %status, "Player moved");
        Ok(())
    }

    fn computer_step(&self, game: &mut Game) -> Result<(), ServiceError> {
        self.ensure_turn(game, self.computer())?;
        let at = self
            .selector
            .select_move(game.board())
            .ok_or(ServiceError::GameFinished(GameStatus::Draw))?;
        game.apply_move(at, self.computer())?;
        let status = game.refresh_status(self.computer());
        debug!(%at, %status, "Computer moved");
        Ok(())
    }

    fn ensure_turn(&self, game: &Game, mark: Mark) -> Result<(), ServiceError> {
        if game.status().is_terminal() {
            return Err(ServiceError::GameFinished(*game.status()));
        }
        if game.board().to_move() != mark {
            return Err(ServiceError::WrongTurn(mark));
        }
        Ok(())
    }

    fn game_lock(&self, id: &GameId) -> Result<Arc<Mutex<()>>, ServiceError> {
        let mut locks = self.locks.lock().map_err(|_| poisoned())?;
        Ok(locks.entry(*id).or_default().clone())
    }
}

fn poisoned() -> ServiceError {
    StoreError::new(StoreErrorKind::Poisoned, "game lock poisoned").into()
}
