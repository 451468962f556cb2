//! Console protocol: commands typed by players and messages printed back.

use noughts_core::{Line, MoveError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Mark the space at this 1-based position
    Place(usize),

    /// Print the command list
    Help,

    /// Redraw the board
    Board,

    /// Abandon the game
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("No input")]
    Empty,

    #[error("'{0}' is not a space number")]
    NotANumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        match input.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => Ok(Command::Quit),
            "h" | "help" | "?" => Ok(Command::Help),
            "b" | "board" => Ok(Command::Board),
            _ => input
                .parse()
                .map(Command::Place)
                .map_err(|_| CommandError::NotANumber(input.to_string())),
        }
    }
}

/// Text printed to the players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleMessage {
    /// Game start banner
    Welcome { size: usize, symbols: Vec<String> },

    /// Command list
    Help { max_position: usize },

    /// Rendered board, framed by blank lines
    Board(String),

    /// Ask a player for a move (no trailing newline)
    Prompt { symbol: String, max_position: usize },

    /// Input was not understood
    Unrecognized(CommandError),

    /// Move refused by the board
    Rejected(MoveError),

    Won { symbol: String, line: Line },

    Draw,

    Abandoned,
}

impl fmt::Display for ConsoleMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleMessage::Welcome { size, symbols } => writeln!(
                f,
                "Tic-tac-toe on a {size}x{size} board. Players: {}",
                symbols.join(", ")
            ),
            ConsoleMessage::Help { max_position } => writeln!(
                f,
                "Enter a space number (1-{max_position}) to place your mark.\n\
                 Other commands: board (b), help (h), quit (q)"
            ),
            ConsoleMessage::Board(rendered) => write!(f, "\n{rendered}\n"),
            ConsoleMessage::Prompt {
                symbol,
                max_position,
            } => write!(f, "Player {symbol}, choose a space (1-{max_position}): "),
            ConsoleMessage::Unrecognized(err) => writeln!(f, "{err}. Type 'help' for commands."),
            ConsoleMessage::Rejected(err) => writeln!(f, "{err}. Try again."),
            ConsoleMessage::Won { symbol, line } => {
                writeln!(f, "Player {symbol} wins with a full {line}!")
            }
            ConsoleMessage::Draw => writeln!(f, "The board is full. It's a draw!"),
            ConsoleMessage::Abandoned => writeln!(f, "Game abandoned."),
        }
    }
}
