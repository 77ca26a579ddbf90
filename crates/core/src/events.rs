//! Observer payloads raised by the session.
//!
//! The session never calls into a renderer. It queues `GameEvent`s and the
//! caller drains them with `GameSession::take_events` after each mutation.

use crate::food::{Food, PowerUpItem};
use crate::highscore::HighScoreEntry;
use crate::types::PowerUpKind;

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Running,
    Paused,
    GameOver,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Running => "running",
            GameState::Paused => "paused",
            GameState::GameOver => "game over",
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Wall,
    SelfCollision,
    TimeUp,
    /// The snake filled every cell
    BoardComplete,
}

impl GameOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOutcome::Wall => "hit the wall",
            GameOutcome::SelfCollision => "bit itself",
            GameOutcome::TimeUp => "time up",
            GameOutcome::BoardComplete => "board complete",
        }
    }
}

/// Everything a front-end needs to present the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverSummary {
    pub final_score: u32,
    pub high_score: u32,
    pub is_new_high_score: bool,
    pub duration_ms: u64,
    pub snake_length: usize,
    pub outcome: GameOutcome,
    /// 1-based rank in the highscore table, if the run was recorded
    pub rank: Option<usize>,
    /// Leading entries of the table after recording
    pub top_entries: Vec<HighScoreEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Raised once per successful `advance`
    StateChanged,
    ScoreChanged { score: u32, high_score: u32 },
    FoodPlaced(Food),
    FoodEaten { food: Food, points: u32, combo: u32 },
    PowerUpSpawned(PowerUpItem),
    PowerUpActivated(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    PauseChanged { paused: bool },
    GameOver(GameOverSummary),
    SessionReset { episode_id: u32 },
    HighscoresChanged,
}
