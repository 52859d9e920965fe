//! Command-line interface for the tic-tac-toe server.

use clap::{Parser, Subcommand, ValueEnum};
use tictactoe_core::Mark;

/// N×N tic-tac-toe against a minimax engine
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play N×N tic-tac-toe against an alpha-beta engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Play a game in the terminal
    Play {
        /// Board side length (3-10)
        #[arg(short, long, default_value = "3")]
        size: usize,

        /// Mark the computer plays; X moves first
        #[arg(long, value_enum, default_value = "o")]
        computer: MarkArg,
    },
}

/// Mark choice on the command line.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum MarkArg {
    /// Mark X
    X,
    /// Mark O
    O,
}

impl From<MarkArg> for Mark {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Mark::X,
            MarkArg::O => Mark::O,
        }
    }
}
