//! Core game logic - deterministic snake simulation
//!
//! This crate contains all the game rules, state management and highscore
//! persistence. It has no dependency on terminals or input devices, so the
//! same session runs under the terminal front-end, in tests and in
//! benchmarks.
//!
//! - **Deterministic**: the RNG is injected; a fixed seed replays a run
//! - **Tick driven**: the caller owns the clock and calls `advance`
//! - **Observable**: events are queued and drained, never pushed
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with bounds checks, wrapping and free-cell scans
//! - [`snake`]: ordered body plus occupancy set
//! - [`food`]: food and power-up placement
//! - [`scoring`]: multiplicative points formula
//! - [`highscore`]: ranked, bounded, JSON-persisted highscore table
//! - [`session`]: the root object tying everything together
//! - [`config`], [`error`], [`events`], [`snapshot`], [`rng`]
//!
//! # Example
//!
//! ```
//! use snake_arcade_core::{GameConfig, GameSession, HighscoreStore, SimpleRng};
//! use snake_arcade_core::types::Direction;
//!
//! let config = GameConfig { board_width: 5, board_height: 5, ..GameConfig::default() };
//! let mut session =
//!     GameSession::new(config, SimpleRng::new(7), HighscoreStore::in_memory(10)).unwrap();
//!
//! assert!(session.change_direction(Direction::Up));
//! assert!(!session.change_direction(Direction::Left)); // reverse of Right
//! session.advance();
//! assert_eq!(session.snake().len(), session.snapshot().snake.len());
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod food;
pub mod highscore;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snake;
pub mod snapshot;

pub use snake_arcade_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use error::{ConfigError, HighscoreError};
pub use events::{GameEvent, GameOutcome, GameOverSummary, GameState};
pub use food::{Food, FoodSpawner, Placement, PowerUpItem};
pub use highscore::{HighScoreEntry, HighscoreStore};
pub use rng::SimpleRng;
pub use scoring::{calculate_points, score_breakdown, ScoreBreakdown, ScoreInput};
pub use session::GameSession;
pub use snake::Snake;
pub use snapshot::{ActivePowerUp, GameSnapshot};
