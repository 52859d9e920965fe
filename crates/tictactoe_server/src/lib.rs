//! Tic-tac-toe game server library.
//!
//! Plays N×N tic-tac-toe between a human client and the minimax engine
//! from [`tictactoe_core`].
//!
//! # Architecture
//!
//! - **Store**: game records behind a get/put repository seam
//! - **Service**: move validation, turn order, computer replies
//! - **Server**: REST routes over the service
//! - **Play**: the same service driven from a terminal
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tictactoe_core::{Mark, Minimax};
//! use tictactoe_server::{AppState, GameService, MemoryRepository, router};
//!
//! # async fn example() -> std::io::Result<()> {
//! let service = GameService::new(MemoryRepository::new(), Minimax::new(Mark::O));
//! let app = router(AppState::new(Arc::new(service), 3));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod play;
mod server;
mod service;
mod store;
mod wire;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Terminal play
pub use play::{PlayError, run_terminal_game};

// Crate-level exports - HTTP server
pub use server::{ApiError, AppService, AppState, router};

// Crate-level exports - Game service
pub use service::{GameService, MAX_SIZE, MIN_SIZE, ServiceError};

// Crate-level exports - Persistence
pub use store::{Game, GameId, GameRepository, MemoryRepository, StoreError, StoreErrorKind, StoredGame};

// Crate-level exports - Wire types
pub use wire::{CreateGameRequest, ErrorResponse, GameResponse, MoveRequest, validate_field};
