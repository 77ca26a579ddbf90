//! Session configuration
//!
//! Defaults match the classic 25x25 board at NORMAL speed. `from_env` lets a
//! front-end override any field through `SNAKE_*` environment variables;
//! values that do not parse fall back to the default.

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::types::{
    Difficulty, GameMode, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_HIGHSCORE_CAPACITY,
    DEFAULT_PLAYER_NAME, DEFAULT_TICK_MS, DEFAULT_TIME_LIMIT_MS, MAX_HIGHSCORE_CAPACITY,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_width: u16,
    pub board_height: u16,
    /// Initial tick interval in milliseconds
    pub tick_interval_ms: u32,
    pub difficulty: Difficulty,
    pub game_mode: GameMode,
    /// Run length for TimeAttack
    pub time_limit_ms: u64,
    pub highscore_capacity: usize,
    /// Name recorded on automatic highscore entries
    pub player_name: String,
    /// RNG seed; `None` lets the front-end pick one
    pub seed: Option<u64>,
    /// Highscore file; `None` keeps highscores in memory only
    pub highscore_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            tick_interval_ms: DEFAULT_TICK_MS,
            difficulty: Difficulty::default(),
            game_mode: GameMode::default(),
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            highscore_capacity: DEFAULT_HIGHSCORE_CAPACITY,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            seed: None,
            highscore_path: None,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by `from_env` and tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            board_width: get("SNAKE_BOARD_WIDTH")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.board_width),
            board_height: get("SNAKE_BOARD_HEIGHT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.board_height),
            tick_interval_ms: get("SNAKE_TICK_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.tick_interval_ms),
            difficulty: get("SNAKE_DIFFICULTY")
                .and_then(|s| Difficulty::from_str(&s))
                .unwrap_or(defaults.difficulty),
            game_mode: get("SNAKE_MODE")
                .and_then(|s| GameMode::from_str(&s))
                .unwrap_or(defaults.game_mode),
            time_limit_ms: get("SNAKE_TIME_LIMIT_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.time_limit_ms),
            highscore_capacity: get("SNAKE_HIGHSCORE_CAPACITY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.highscore_capacity),
            player_name: get("SNAKE_PLAYER").unwrap_or(defaults.player_name),
            seed: get("SNAKE_SEED").and_then(|s| s.parse().ok()),
            highscore_path: get("SNAKE_HIGHSCORE_PATH").map(PathBuf::from),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::InvalidBoard {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }
        if self.highscore_capacity == 0 {
            return Err(ConfigError::InvalidCapacity);
        }
        if self.highscore_capacity > MAX_HIGHSCORE_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                capacity: self.highscore_capacity,
                max: MAX_HIGHSCORE_CAPACITY,
            });
        }
        if self.game_mode.is_timed() && self.time_limit_ms == 0 {
            return Err(ConfigError::InvalidTimeLimit);
        }
        Ok(())
    }

    /// Time limit in effect for the configured mode
    pub fn time_limit(&self) -> Option<u64> {
        self.game_mode.is_timed().then_some(self.time_limit_ms)
    }
}
