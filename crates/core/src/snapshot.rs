use crate::events::GameState;
use crate::food::{Food, PowerUpItem};
use crate::types::{Cell, Difficulty, GameMode, PowerUpKind};

/// Power-up currently in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub remaining_ticks: u32,
}

/// Read-only view of a session for renderers.
///
/// `GameSession::snapshot_into` refills an existing snapshot so the render
/// loop can keep one buffer alive for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board_width: u16,
    pub board_height: u16,
    /// Head first
    pub snake: Vec<Cell>,
    pub food: Option<Food>,
    pub power_up_item: Option<PowerUpItem>,
    pub active_power_up: Option<ActivePowerUp>,
    pub state: GameState,
    pub difficulty: Difficulty,
    pub game_mode: GameMode,
    pub score: u32,
    pub high_score: u32,
    pub tick_interval_ms: u32,
    pub elapsed_ms: u64,
    /// Time left in a timed mode
    pub remaining_ms: Option<u64>,
    pub combo: u32,
    pub foods_eaten: u32,
    pub ticks: u64,
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board_width = 0;
        self.board_height = 0;
        self.snake.clear();
        self.food = None;
        self.power_up_item = None;
        self.active_power_up = None;
        self.state = GameState::Running;
        self.difficulty = Difficulty::default();
        self.game_mode = GameMode::default();
        self.score = 0;
        self.high_score = 0;
        self.tick_interval_ms = 0;
        self.elapsed_ms = 0;
        self.remaining_ms = None;
        self.combo = 0;
        self.foods_eaten = 0;
        self.ticks = 0;
        self.episode_id = 0;
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }

    pub fn paused(&self) -> bool {
        self.state == GameState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn playable(&self) -> bool {
        self.state == GameState::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board_width: 0,
            board_height: 0,
            snake: Vec::new(),
            food: None,
            power_up_item: None,
            active_power_up: None,
            state: GameState::Running,
            difficulty: Difficulty::default(),
            game_mode: GameMode::default(),
            score: 0,
            high_score: 0,
            tick_interval_ms: 0,
            elapsed_ms: 0,
            remaining_ms: None,
            combo: 0,
            foods_eaten: 0,
            ticks: 0,
            episode_id: 0,
        };
        s.clear();
        s
    }
}
