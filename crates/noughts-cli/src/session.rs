//! Console game session: the turn loop between players and the engine.

use crate::console::{Command, CommandError, ConsoleMessage};
use noughts_core::{GameAction, GameError, GameEvent, GamePhase, GameState};
use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Game rejected a move: {0}")]
    Game(#[from] GameError),
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Won { symbol: String },
    Draw,
    /// A player quit or input ran out
    Abandoned,
}

/// End-of-game report, printed as JSON on request
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub outcome: Outcome,
    pub turns: u32,
    pub board: String,
    pub state: GameState,
}

/// A single game played over a line-based console.
pub struct Session {
    game: GameState,
}

impl Session {
    pub fn new(game: GameState) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Play until someone wins, the board fills, or the players leave.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<Outcome, SessionError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let max_position = self.game.board().cell_count();
        let symbols = self
            .game
            .players()
            .iter()
            .map(|p| p.symbol().to_string())
            .collect();

        info!(
            "Starting {}x{} game with {} players",
            self.game.board().size(),
            self.game.board().size(),
            self.game.player_count()
        );

        send(
            output,
            &ConsoleMessage::Welcome {
                size: self.game.board().size(),
                symbols,
            },
        )
        .await?;
        send(output, &ConsoleMessage::Help { max_position }).await?;
        self.send_board(output).await?;

        let mut lines = input.lines();

        while !self.game.is_finished() {
            let prompt = ConsoleMessage::Prompt {
                symbol: self.game.current_player().symbol().to_string(),
                max_position,
            };
            send(output, &prompt).await?;

            let Some(line) = lines.next_line().await? else {
                info!("Input closed before the game finished");
                send(output, &ConsoleMessage::Abandoned).await?;
                return Ok(Outcome::Abandoned);
            };

            match line.parse::<Command>() {
                Ok(Command::Place(position)) => self.place(position, output).await?,
                Ok(Command::Board) => self.send_board(output).await?,
                Ok(Command::Help) => send(output, &ConsoleMessage::Help { max_position }).await?,
                Ok(Command::Quit) => {
                    info!("Player {} quit", self.game.current_player().symbol());
                    send(output, &ConsoleMessage::Abandoned).await?;
                    return Ok(Outcome::Abandoned);
                }
                Err(CommandError::Empty) => {}
                Err(err) => {
                    debug!("Unrecognized input {:?}", line);
                    send(output, &ConsoleMessage::Unrecognized(err)).await?;
                }
            }
        }

        Ok(self.outcome())
    }

    /// Build the end-of-game report
    pub fn summary(&self, outcome: Outcome) -> GameSummary {
        GameSummary {
            outcome,
            turns: self.game.turn_number(),
            board: self.game.board().render(),
            state: self.game.clone(),
        }
    }

    /// Try a move for the current player and announce the result
    async fn place<W>(&mut self, position: usize, output: &mut W) -> Result<(), SessionError>
    where
        W: AsyncWrite + Unpin,
    {
        let player = self.game.current_player_id();

        let events = match self
            .game
            .apply_action(player, GameAction::PlaceMark(position))
        {
            Ok(events) => events,
            Err(GameError::InvalidMove(err)) => {
                debug!("Rejected move: {}", err);
                return send(output, &ConsoleMessage::Rejected(err)).await;
            }
            Err(err) => {
                warn!("Unexpected game error: {}", err);
                return Err(err.into());
            }
        };

        for event in events {
            match event {
                GameEvent::MarkPlaced {
                    symbol, position, ..
                } => {
                    debug!("{} placed at {}", symbol, position);
                    self.send_board(output).await?;
                }
                GameEvent::TurnChanged { player } => {
                    debug!("Turn passes to player {}", player);
                }
                GameEvent::GameWon { symbol, line, .. } => {
                    info!("Player {} won on {}", symbol, line);
                    send(output, &ConsoleMessage::Won { symbol, line }).await?;
                }
                GameEvent::GameDrawn => {
                    info!("Game drawn after {} moves", self.game.turn_number());
                    send(output, &ConsoleMessage::Draw).await?;
                }
            }
        }

        Ok(())
    }

    async fn send_board<W>(&self, output: &mut W) -> Result<(), SessionError>
    where
        W: AsyncWrite + Unpin,
    {
        send(output, &ConsoleMessage::Board(self.game.board().render())).await
    }

    fn outcome(&self) -> Outcome {
        match self.game.phase() {
            GamePhase::Won { symbol, .. } => Outcome::Won {
                symbol: symbol.clone(),
            },
            GamePhase::Draw => Outcome::Draw,
            GamePhase::InProgress => Outcome::Abandoned,
        }
    }
}

/// Write one message and flush so prompts show up before reading
async fn send<W>(output: &mut W, msg: &ConsoleMessage) -> Result<(), SessionError>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(msg.to_string().as_bytes()).await?;
    output.flush().await?;
    Ok(())
}
