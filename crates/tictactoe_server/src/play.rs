//! Terminal game against the engine.

use std::io::{BufRead, Write};

use derive_more::{Display, Error, From};
use tictactoe_core::{GameStatus, Mark, Minimax};
use tracing::{info, instrument};

use crate::service::{GameService, ServiceError};
use crate::store::MemoryRepository;

/// Error ending a terminal game early.
#[derive(Debug, Display, Error, From)]
pub enum PlayError {
    /// Reading input or writing the board failed.
    #[display("I/O error: {}", _0)]
    Io(std::io::Error),
    /// The service refused to continue.
    #[display("{}", _0)]
    Service(ServiceError),
    /// Input ended before the game did.
    #[display("Input closed before the game finished")]
    #[from(ignore)]
    InputClosed,
}

/// Plays one game, reading `row col` lines from `input`.
///
/// Illegal or unparsable moves are reported and asked for again.
///
/// # Errors
///
/// Returns [`PlayError::InputClosed`] if input ends mid-game.
#[instrument(skip(input, output))]
pub fn run_terminal_game<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    size: usize,
    computer: Mark,
) -> Result<GameStatus, PlayError> {
    let service = GameService::new(MemoryRepository::new(), Minimax::new(computer));
    let mut game = service.create_game(size)?;
    let id = *game.id();
    let mut lines = input.lines();

    writeln!(output, "You play {}, the computer plays {}.", service.human(), computer)?;
    loop {
        writeln!(output, "\n{}\n", game.board())?;
        if game.status().is_terminal() {
            writeln!(output, "{}", game.status())?;
            info!(status = %game.status(), "Terminal game over");
            return Ok(*game.status());
        }

        write!(output, "Your move as `row col`: ")?;
        output.flush()?;
        let Some(line) = lines.next() else {
            return Err(PlayError::InputClosed);
        };
        let line = line?;
        let Some((row, col)) = parse_coord(&line) else {
            writeln!(output, "Enter two numbers, e.g. `1 1`.")?;
            continue;
        };

        game = match service.make_player_move(&id, row, col) {
            Ok(game) => game,
            Err(ServiceError::Board(err)) => {
                writeln!(output, "{}", err)?;
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if !game.status().is_terminal() {
            game = service.make_computer_move(&id)?;
        }
    }
}

fn parse_coord(line: &str) -> Option<(usize, usize)> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("1 2"), Some((1, 2)));
        assert_eq!(parse_coord(" 0,2 "), Some((0, 2)));
        assert_eq!(parse_coord("1"), None);
        assert_eq!(parse_coord("a b"), None);
        assert_eq!(parse_coord("1 2 3"), None);
    }

    #[test]
    fn test_input_closed_mid_game() {
        let mut out = Vec::new();
        let result = run_terminal_game(Cursor::new(""), &mut out, 3, Mark::O);
        assert!(matches!(result, Err(PlayError::InputClosed)));
    }

    #[test]
    fn test_bad_input_is_retried() {
        let mut out = Vec::new();
        let result = run_terminal_game(Cursor::new("nonsense\n9 9\n"), &mut out, 3, Mark::O);
        assert!(matches!(result, Err(PlayError::InputClosed)));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Enter two numbers"));
        assert!(text.contains("outside the 3x3 board"));
    }

    #[test]
    fn test_engine_never_loses() {
        // Corner opening; the engine answers each move and the game cannot
        // be won by the human, so it ends as a draw or an AI win.
        let moves = "0 0\n0 1\n0 2\n1 0\n1 1\n1 2\n2 0\n2 1\n2 2\n";
        let mut out = Vec::new();
        let status = run_terminal_game(Cursor::new(moves), &mut out, 3, Mark::O).unwrap();
        assert!(matches!(status, GameStatus::Draw | GameStatus::ComputerWon));
    }
}
