//! Tic-tac-toe - Unified CLI
//!
//! HTTP game server and terminal play against the minimax engine.

#![warn(missing_docs)]

mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_core::{Mark, Minimax};
use tictactoe_server::{AppState, GameService, MemoryRepository, ServerConfig, router};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictactoe_server=debug")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
        Command::Play { size, computer } => run_play(size, computer.into()).await,
    }
}

/// Run the HTTP game server until Ctrl+C or SIGTERM.
#[instrument(skip_all)]
async fn run_server(
    config_path: Option<std::path::PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => ServerConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    }
    .with_overrides(host, port);
    config.validate()?;

    info!(
        host = %config.host(),
        port = config.port(),
        computer = %config.computer_mark(),
        "Starting tic-tac-toe server"
    );

    let service = GameService::new(MemoryRepository::new(), Minimax::new(*config.computer_mark()));
    let app = router(AppState::new(Arc::new(service), *config.default_size()));

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Server ready at http://{}:{}/", config.host(), config.port());
    info!("Endpoints: POST /game, GET /game/{{id}}, POST /game/{{id}}, GET /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Run a terminal game on stdin/stdout.
async fn run_play(size: usize, computer: Mark) -> Result<()> {
    let status = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        tictactoe_server::run_terminal_game(stdin.lock(), std::io::stdout(), size, computer)
    })
    .await??;

    info!(%status, "Game finished");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
