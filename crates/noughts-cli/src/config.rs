//! Startup configuration read from environment variables.

use noughts_core::GameConfig;
use thiserror::Error;

pub const BOARD_SIZE_VAR: &str = "NOUGHTS_BOARD_SIZE";
pub const PLAYERS_VAR: &str = "NOUGHTS_PLAYERS";
pub const RANDOM_START_VAR: &str = "NOUGHTS_RANDOM_START";
pub const SUMMARY_VAR: &str = "NOUGHTS_SUMMARY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be one of 1/0/true/false/yes/no, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },

    #[error("{var} must be \"json\" or \"none\", got {value:?}")]
    InvalidSummary { var: &'static str, value: String },
}

/// What to print once the game is over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryFormat {
    #[default]
    None,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub game: GameConfig,
    /// Pick the first player at random instead of seat 0
    pub random_start: bool,
    pub summary: SummaryFormat,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or blank variables. Board size and player count are range
    /// checked when the game is created.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = GameConfig::default();

        let board_size = match get(BOARD_SIZE_VAR) {
            Some(value) => parse_number(BOARD_SIZE_VAR, value)?,
            None => defaults.board_size,
        };
        let player_count = match get(PLAYERS_VAR) {
            Some(value) => parse_number(PLAYERS_VAR, value)?,
            None => defaults.player_count,
        };
        let random_start = match get(RANDOM_START_VAR) {
            Some(value) => parse_flag(RANDOM_START_VAR, value)?,
            None => false,
        };
        let summary = match get(SUMMARY_VAR) {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "json" => SummaryFormat::Json,
                "none" | "off" => SummaryFormat::None,
                _ => {
                    return Err(ConfigError::InvalidSummary {
                        var: SUMMARY_VAR,
                        value,
                    })
                }
            },
            None => SummaryFormat::None,
        };

        Ok(Self {
            game: GameConfig::new(board_size, player_count),
            random_start,
            summary,
        })
    }
}

fn parse_number(var: &'static str, value: String) -> Result<usize, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value })
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { var, value }),
    }
}
