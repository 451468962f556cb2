//! Players and the symbols they play with.
//!
//! This module contains:
//! - Player, an immutable symbol holder
//! - SymbolPalette, the ordered list of symbols handed out at game setup

use crate::game::GameError;
use crate::space::BLANK;
use serde::{Deserialize, Serialize};

/// Player identifier: index into the game's turn order
pub type PlayerId = usize;

/// Symbols handed out to players, in seating order
pub const DEFAULT_SYMBOLS: [&str; 4] = ["X", "O", "$", "#"];

/// Fewest players a game can have
pub const MIN_PLAYERS: usize = 2;

/// A participant, identified only by the symbol they place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    symbol: String,
}

impl Player {
    /// Create a player. The palette is not enforced here.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// The symbol this player marks spaces with
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// Ordered set of symbols allowed for players in a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolPalette {
    symbols: Vec<String>,
}

impl SymbolPalette {
    /// Create a palette from an ordered list of symbols
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// All symbols, in seating order
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Most players this palette can seat
    pub fn max_players(&self) -> usize {
        self.symbols.len()
    }

    /// Seat the first `count` players of the palette.
    ///
    /// Seated symbols must be distinct single characters other than
    /// [`BLANK`], so players can be told apart and every cell renders two
    /// columns wide.
    pub fn players(&self, count: usize) -> Result<Vec<Player>, GameError> {
        if count < MIN_PLAYERS || count > self.max_players() {
            return Err(GameError::InvalidPlayerCount {
                count,
                min: MIN_PLAYERS,
                max: self.max_players(),
            });
        }

        let seated = &self.symbols[..count];
        for (i, symbol) in seated.iter().enumerate() {
            if symbol == BLANK || symbol.chars().count() != 1 {
                return Err(GameError::InvalidSymbol(symbol.clone()));
            }
            if seated[..i].contains(symbol) {
                return Err(GameError::DuplicateSymbol(symbol.clone()));
            }
        }

        Ok(seated.iter().map(Player::new).collect())
    }
}

impl Default for SymbolPalette {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOLS)
    }
}
