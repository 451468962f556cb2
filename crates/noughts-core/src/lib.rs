//! Noughts - a tic-tac-toe game engine for boards from 3x3 up to 6x6
//!
//! This crate provides the core game logic for Noughts, including:
//! - Spaces that can be claimed exactly once
//! - Board representation with move recording, win and fullness checks
//! - Players and the symbol palette they are seated from
//! - Game state machine with turn order and end-of-game detection
//!
//! # Architecture
//!
//! The engine does no I/O. A driver (the `noughts` console binary, or a
//! test) feeds it positions and reads back events and the rendered board.
//!
//! # Modules
//!
//! - [`space`]: A single cell and the blank sentinel
//! - [`board`]: The square grid, move validation and win detection
//! - [`player`]: Players and the symbol palette
//! - [`game`]: Game state machine
//! - [`actions`]: Actions players submit and the events they produce

pub mod actions;
pub mod board;
pub mod game;
pub mod player;
pub mod space;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use board::{Board, BoardError, Line, MoveError, MAX_SIZE, MIN_SIZE};
pub use game::{GameConfig, GameError, GamePhase, GameState};
pub use player::{Player, PlayerId, SymbolPalette, DEFAULT_SYMBOLS, MIN_PLAYERS};
pub use space::{Space, BLANK};
