//! Game board: a square grid of spaces.
//!
//! This module contains:
//! - Board construction for the supported sizes
//! - Move recording by 1-based linear position
//! - Win and fullness detection
//! - Text rendering of the grid

use crate::player::Player;
use crate::space::Space;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Smallest supported board size
pub const MIN_SIZE: usize = 3;

/// Largest supported board size
pub const MAX_SIZE: usize = 6;

/// Errors from building a board
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("Board size must be between 3 and 6, got {0}")]
    InvalidSize(usize),

    #[error("Board grid is not {0}x{0}")]
    MismatchedGrid(usize),
}

/// Reasons a move can be rejected
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveError {
    #[error("Space {position} is not on the board (1-{max})")]
    OutOfRange { position: usize, max: usize },

    #[error("Space {position} is already taken by {symbol}")]
    Occupied { position: usize, symbol: String },

    #[error("Symbol {0:?} cannot be placed on the board")]
    InvalidSymbol(String),
}

/// A line of cells that wins when filled with one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Line {
    Row(usize),
    Column(usize),
    /// Top-left to bottom-right
    Diagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

impl Line {
    /// Coordinates covered by this line on a board of `size`
    pub fn cells(&self, size: usize) -> Vec<(usize, usize)> {
        match *self {
            Line::Row(row) => (0..size).map(|col| (row, col)).collect(),
            Line::Column(col) => (0..size).map(|row| (row, col)).collect(),
            Line::Diagonal => (0..size).map(|i| (i, i)).collect(),
            Line::AntiDiagonal => (0..size).map(|i| (i, size - 1 - i)).collect(),
        }
    }

    /// Every line of a board of `size`, in win-check order:
    /// rows, then columns, then the two diagonals.
    pub fn all(size: usize) -> Vec<Line> {
        (0..size)
            .map(Line::Row)
            .chain((0..size).map(Line::Column))
            .chain([Line::Diagonal, Line::AntiDiagonal])
            .collect()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(row) => write!(f, "row {}", row + 1),
            Line::Column(col) => write!(f, "column {}", col + 1),
            Line::Diagonal => write!(f, "diagonal"),
            Line::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

/// The tic-tac-toe grid. Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    size: usize,
    /// Row-major grid, `size` rows of `size` spaces
    spaces: Vec<Vec<Space>>,
}

/// Unchecked wire form of [`Board`]
#[derive(Deserialize)]
struct BoardData {
    size: usize,
    spaces: Vec<Vec<Space>>,
}

impl TryFrom<BoardData> for Board {
    type Error = BoardError;

    fn try_from(data: BoardData) -> Result<Self, Self::Error> {
        let mut board = Board::new(data.size)?;
        if data.spaces.len() != data.size || data.spaces.iter().any(|row| row.len() != data.size) {
            return Err(BoardError::MismatchedGrid(data.size));
        }
        board.spaces = data.spaces;
        Ok(board)
    }
}

impl Board {
    /// Create an empty board of `size` x `size`
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }

        Ok(Self {
            size,
            spaces: vec![vec![Space::new(); size]; size],
        })
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of spaces on the board
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Get a space, or `None` if `(row, col)` is off the board
    pub fn space(&self, row: usize, col: usize) -> Option<&Space> {
        self.spaces.get(row)?.get(col)
    }

    /// Map a 1-based linear position to `(row, col)`
    pub fn coords_of(&self, position: usize) -> Option<(usize, usize)> {
        if position < 1 || position > self.cell_count() {
            return None;
        }
        let index = position - 1;
        Some((index / self.size, index % self.size))
    }

    /// Place `player`'s symbol at `position`, explaining any rejection
    pub fn try_record_move(&mut self, position: usize, player: &Player) -> Result<(), MoveError> {
        let max = self.cell_count();
        let (row, col) = self
            .coords_of(position)
            .ok_or(MoveError::OutOfRange { position, max })?;

        let space = &mut self.spaces[row][col];
        if space.occupy(player.symbol()) {
            Ok(())
        } else if space.is_blank() {
            Err(MoveError::InvalidSymbol(player.symbol().to_string()))
        } else {
            Err(MoveError::Occupied {
                position,
                symbol: space.symbol().to_string(),
            })
        }
    }

    /// Place `player`'s symbol at `position`.
    ///
    /// Returns `true` only if the position is on the board and was blank.
    pub fn record_move(&mut self, position: usize, player: &Player) -> bool {
        self.try_record_move(position, player).is_ok()
    }

    /// Check if every space is occupied
    pub fn is_full(&self) -> bool {
        self.spaces.iter().flatten().all(|space| !space.is_blank())
    }

    /// Positions still open for a move, ascending
    pub fn open_positions(&self) -> Vec<usize> {
        self.spaces
            .iter()
            .flatten()
            .enumerate()
            .filter(|(_, space)| space.is_blank())
            .map(|(index, _)| index + 1)
            .collect()
    }

    /// First completed line and its symbol, in win-check order
    pub fn winning_line(&self) -> Option<(Line, &str)> {
        Line::all(self.size)
            .into_iter()
            .find_map(|line| self.line_owner(line).map(|symbol| (line, symbol)))
    }

    /// Symbol of the winner, `None` if nobody has completed a line.
    ///
    /// Lines of blank spaces never count as a win.
    pub fn check_winner(&self) -> Option<&str> {
        self.winning_line().map(|(_, symbol)| symbol)
    }

    /// The symbol filling every cell of `line`, if there is one
    fn line_owner(&self, line: Line) -> Option<&str> {
        let mut cells = line
            .cells(self.size)
            .into_iter()
            .map(|(row, col)| &self.spaces[row][col]);

        let first = cells.next()?;
        if first.is_blank() {
            return None;
        }

        cells
            .all(|space| space.symbol() == first.symbol())
            .then_some(first.symbol())
    }

    /// Render the grid as text.
    ///
    /// Blank spaces show their position number right-aligned in two
    /// columns, occupied ones a space and their symbol. Every cell is
    /// followed by `|` and every row by a line of `3 * size` dashes.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(3 * self.size);

        for (row, spaces) in self.spaces.iter().enumerate() {
            for (col, space) in spaces.iter().enumerate() {
                if space.is_blank() {
                    write!(f, "{:>2}|", row * self.size + col + 1)?;
                } else {
                    write!(f, " {}|", space.symbol())?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{}", separator)?;
        }

        Ok(())
    }
}
