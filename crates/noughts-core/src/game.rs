//! Core game state machine.
//!
//! This module contains the main `GameState` struct: turn order, move
//! application and end-of-game detection on top of a [`Board`].

use crate::actions::{GameAction, GameEvent};
use crate::board::{Board, BoardError, Line, MoveError};
use crate::player::{Player, PlayerId, SymbolPalette};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board size and seat count for a new game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board_size: usize,
    pub player_count: usize,
}

impl GameConfig {
    pub fn new(board_size: usize, player_count: usize) -> Self {
        Self {
            board_size,
            player_count,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(3, 2)
    }
}

/// Game phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Players are still taking turns
    InProgress,

    /// A player completed a line
    Won {
        winner: PlayerId,
        symbol: String,
        line: Line,
    },

    /// Board is full and nobody completed a line
    Draw,
}

/// Errors that can occur when setting up a game or applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("A game needs {min}-{max} players, got {count}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },

    #[error("Player symbol {0:?} must be a single non-blank character")]
    InvalidSymbol(String),

    #[error("Player symbol {0:?} is used by more than one player")]
    DuplicateSymbol(String),

    #[error("Saved game names player {current} but seats only {players}")]
    InvalidCurrentPlayer { current: PlayerId, players: usize },

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Invalid move: {0}")]
    InvalidMove(#[from] MoveError),

    #[error("Game is over")]
    GameOver,
}

/// The complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GameStateData")]
pub struct GameState {
    /// The game board
    board: Board,
    /// Players in turn order
    players: Vec<Player>,
    /// Index of the player to move
    current_player: PlayerId,
    /// Current game phase
    phase: GamePhase,
    /// Moves made so far
    turn_number: u32,
}

/// Unchecked wire form of [`GameState`]
#[derive(Deserialize)]
struct GameStateData {
    board: Board,
    players: Vec<Player>,
    current_player: PlayerId,
    phase: GamePhase,
    turn_number: u32,
}

impl TryFrom<GameStateData> for GameState {
    type Error = GameError;

    fn try_from(data: GameStateData) -> Result<Self, Self::Error> {
        let symbols: Vec<&str> = data.players.iter().map(Player::symbol).collect();
        SymbolPalette::new(symbols).players(data.players.len())?;

        if data.current_player >= data.players.len() {
            return Err(GameError::InvalidCurrentPlayer {
                current: data.current_player,
                players: data.players.len(),
            });
        }

        Ok(Self {
            board: data.board,
            players: data.players,
            current_player: data.current_player,
            phase: data.phase,
            turn_number: data.turn_number,
        })
    }
}

impl GameState {
    /// Create a new game; the first seat moves first
    pub fn new(config: GameConfig, palette: &SymbolPalette) -> Result<Self, GameError> {
        Ok(Self {
            board: Board::new(config.board_size)?,
            players: palette.players(config.player_count)?,
            current_player: 0,
            phase: GamePhase::InProgress,
            turn_number: 0,
        })
    }

    /// Create a new game with a randomly chosen first player
    pub fn with_random_first_player<R: Rng>(
        config: GameConfig,
        palette: &SymbolPalette,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let mut game = Self::new(config, palette)?;
        game.current_player = rng.gen_range(0..game.players.len());
        Ok(game)
    }

    /// The game board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Players in turn order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get number of players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Id of the player to move
    pub fn current_player_id(&self) -> PlayerId {
        self.current_player
    }

    /// The player to move
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    /// Number of marks placed so far
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Check if the game has ended
    pub fn is_finished(&self) -> bool {
        !matches!(self.phase, GamePhase::InProgress)
    }

    /// The winning player, if any
    pub fn winner(&self) -> Option<&Player> {
        match self.phase {
            GamePhase::Won { winner, .. } => self.players.get(winner),
            _ => None,
        }
    }

    /// All actions the current player may take
    pub fn valid_actions(&self) -> Vec<GameAction> {
        if self.is_finished() {
            return Vec::new();
        }

        self.board
            .open_positions()
            .into_iter()
            .map(GameAction::PlaceMark)
            .collect()
    }

    /// Apply an action to the game state
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: GameAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if player != self.current_player {
            return Err(GameError::NotYourTurn);
        }

        let mut events = Vec::new();

        match action {
            GameAction::PlaceMark(position) => {
                let mover = &self.players[player];
                self.board.try_record_move(position, mover)?;
                self.turn_number += 1;

                events.push(GameEvent::MarkPlaced {
                    player,
                    symbol: mover.symbol().to_string(),
                    position,
                });
            }
        }

        events.extend(self.check_end_condition());

        if !self.is_finished() {
            self.current_player = (self.current_player + 1) % self.players.len();
            events.push(GameEvent::TurnChanged {
                player: self.current_player,
            });
        }

        Ok(events)
    }

    /// Finish the game if the last move completed a line or filled the board.
    /// A completed line wins even when it also fills the board.
    fn check_end_condition(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();

        // Only the player who just moved can have completed a line
        if let Some((line, symbol)) = self.board.winning_line() {
            let symbol = symbol.to_string();
            let winner = self.current_player;

            events.push(GameEvent::GameWon {
                player: winner,
                symbol: symbol.clone(),
                line,
            });
            self.phase = GamePhase::Won {
                winner,
                symbol,
                line,
            };
        } else if self.board.is_full() {
            events.push(GameEvent::GameDrawn);
            self.phase = GamePhase::Draw;
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn new_game(board_size: usize, player_count: usize) -> GameState {
        GameState::new(
            GameConfig::new(board_size, player_count),
            &SymbolPalette::default(),
        )
        .unwrap()
    }

    fn play(game: &mut GameState, positions: &[usize]) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for &position in positions {
            let player = game.current_player_id();
            events = game
                .apply_action(player, GameAction::PlaceMark(position))
                .unwrap();
        }
        events
    }

    #[test]
    fn test_new_game_starts_in_progress() {
        let game = new_game(3, 2);
        assert_eq!(game.phase(), &GamePhase::InProgress);
        assert_eq!(game.current_player_id(), 0);
        assert_eq!(game.current_player().symbol(), "X");
        assert_eq!(game.turn_number(), 0);
        assert_eq!(game.valid_actions().len(), 9);
    }

    #[test]
    fn test_invalid_setup_rejected() {
        let palette = SymbolPalette::default();
        assert_eq!(
            GameState::new(GameConfig::new(7, 2), &palette).unwrap_err(),
            GameError::Board(BoardError::InvalidSize(7))
        );
        assert!(matches!(
            GameState::new(GameConfig::new(3, 5), &palette),
            Err(GameError::InvalidPlayerCount { count: 5, .. })
        ));
    }

    #[test]
    fn test_turns_rotate_through_all_players() {
        let mut game = new_game(4, 3);
        let events = play(&mut game, &[1]);
        assert_eq!(
            events,
            vec![
                GameEvent::MarkPlaced {
                    player: 0,
                    symbol: "X".into(),
                    position: 1
                },
                GameEvent::TurnChanged { player: 1 },
            ]
        );

        play(&mut game, &[2, 3]);
        assert_eq!(game.current_player_id(), 0);
        assert_eq!(game.turn_number(), 3);
    }

    #[test]
    fn test_wrong_player_rejected() {
        let mut game = new_game(3, 2);
        assert_eq!(
            game.apply_action(1, GameAction::PlaceMark(5)),
            Err(GameError::NotYourTurn)
        );
        assert_eq!(game.turn_number(), 0);
    }

    #[test]
    fn test_invalid_move_keeps_turn() {
        let mut game = new_game(3, 2);
        play(&mut game, &[5]);

        let err = game.apply_action(1, GameAction::PlaceMark(5)).unwrap_err();
        assert!(matches!(err, GameError::InvalidMove(MoveError::Occupied { .. })));

        let err = game.apply_action(1, GameAction::PlaceMark(10)).unwrap_err();
        assert!(matches!(err, GameError::InvalidMove(MoveError::OutOfRange { .. })));

        assert_eq!(game.current_player_id(), 1);
        assert_eq!(game.turn_number(), 1);
    }

    #[test]
    fn test_win_ends_game() {
        let mut game = new_game(3, 2);
        // X: 1, 2, 3  O: 4, 5
        let events = play(&mut game, &[1, 4, 2, 5, 3]);

        assert_eq!(
            events.last(),
            Some(&GameEvent::GameWon {
                player: 0,
                symbol: "X".into(),
                line: Line::Row(0)
            })
        );
        assert!(game.is_finished());
        assert_eq!(game.winner().map(Player::symbol), Some("X"));
        assert!(game.valid_actions().is_empty());
        assert_eq!(
            game.apply_action(1, GameAction::PlaceMark(9)),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn test_draw_when_board_fills() {
        let mut game = new_game(3, 2);
        // X O X / X O O / O X X
        let events = play(&mut game, &[1, 2, 3, 5, 4, 6, 8, 7, 9]);

        assert_eq!(events.last(), Some(&GameEvent::GameDrawn));
        assert_eq!(game.phase(), &GamePhase::Draw);
        assert!(game.winner().is_none());
    }

    #[test]
    fn test_win_on_last_space_beats_draw() {
        let mut game = new_game(3, 2);
        // X O X / O X O / O X X, final X on 9 completes the diagonal
        play(&mut game, &[1, 2, 3, 4, 5, 6, 8, 7]);
        let events = play(&mut game, &[9]);

        assert!(game.board().is_full());
        assert!(matches!(
            game.phase(),
            GamePhase::Won {
                winner: 0,
                line: Line::Diagonal,
                ..
            }
        ));
        assert!(!events.contains(&GameEvent::GameDrawn));
    }

    #[test]
    fn test_indistinct_palettes_rejected() {
        let config = GameConfig::new(3, 2);
        assert_eq!(
            GameState::new(config, &SymbolPalette::new(["X", "X"])).unwrap_err(),
            GameError::DuplicateSymbol("X".into())
        );
        assert_eq!(
            GameState::new(config, &SymbolPalette::new(["X", " "])).unwrap_err(),
            GameError::InvalidSymbol(" ".into())
        );
        assert_eq!(
            GameState::new(config, &SymbolPalette::new(["", "O"])).unwrap_err(),
            GameError::InvalidSymbol("".into())
        );
    }

    #[test]
    fn test_saved_game_round_trips() {
        let mut game = new_game(4, 3);
        play(&mut game, &[1, 6]);

        let json = serde_json::to_string(&game).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.current_player().symbol(), "$");
        assert_eq!(restored.board(), game.board());
    }

    #[test]
    fn test_saved_game_with_bad_current_player_rejected() {
        let game = new_game(3, 2);
        let mut json = serde_json::to_value(&game).unwrap();
        json["current_player"] = 2.into();

        let err = serde_json::from_value::<GameState>(json).unwrap_err();
        assert!(err.to_string().contains("seats only 2"));
    }

    #[test]
    fn test_saved_game_with_duplicate_players_rejected() {
        let game = new_game(3, 2);
        let mut json = serde_json::to_value(&game).unwrap();
        json["players"][1]["symbol"] = "X".into();

        assert!(serde_json::from_value::<GameState>(json).is_err());
    }

    #[test]
    fn test_random_first_player_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let game = GameState::with_random_first_player(
                GameConfig::new(3, 4),
                &SymbolPalette::default(),
                &mut rng,
            )
            .unwrap();
            assert!(game.current_player_id() < 4);
        }
    }
}
