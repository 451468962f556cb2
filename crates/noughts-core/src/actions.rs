//! Game actions that players can take.
//!
//! This module defines the actions a player submits on their turn and the
//! events that result from those actions.

use crate::board::Line;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};

/// All possible actions a player can take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Mark the space at a 1-based linear position
    PlaceMark(usize),
}

/// Events generated by applying an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    MarkPlaced {
        player: PlayerId,
        symbol: String,
        position: usize,
    },
    TurnChanged {
        player: PlayerId,
    },
    GameWon {
        player: PlayerId,
        symbol: String,
        line: Line,
    },
    /// Board filled up without a completed line
    GameDrawn,
}
