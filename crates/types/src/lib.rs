//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no I/O, making them usable in any context
//! (simulation core, terminal rendering, persistence).
//!
//! # Coordinates
//!
//! Cells are `(x, y)` pairs with `x` growing to the right and `y` growing
//! downwards. `Direction::Up` therefore decrements `y`.
//!
//! # Timing Constants
//!
//! The simulation is tick driven. Tick intervals are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 100 | Initial interval ("NORMAL") |
//! | `MIN_TICK_MS` | 50 | Floor reached by Speed food and `speed_up` |
//! | `MAX_TICK_MS` | 200 | Cap reached by Slow food and `slow_down` |
//! | `TICK_STEP_MS` | 10 | Change per speed adjustment |
//!
//! # Examples
//!
//! ```
//! use snake_arcade_types::{Cell, Direction, FoodType};
//!
//! let head = Cell::new(2, 2);
//! assert_eq!(head.step(Direction::Right), Cell::new(3, 2));
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//! assert_eq!(FoodType::Bonus.base_points(), 300);
//! assert_eq!(Direction::from_str("left"), Some(Direction::Left));
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: u16 = 25;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: u16 = 25;

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u32 = 100;

/// Fastest interval reachable by Speed food or manual speed-up
pub const MIN_TICK_MS: u32 = 50;

/// Slowest interval reachable by Slow food or manual slow-down
pub const MAX_TICK_MS: u32 = 200;

/// Interval change applied by one speed adjustment
pub const TICK_STEP_MS: u32 = 10;

/// Default TimeAttack limit (2 minutes)
pub const DEFAULT_TIME_LIMIT_MS: u64 = 120_000;

/// Default number of retained highscore entries
pub const DEFAULT_HIGHSCORE_CAPACITY: usize = 10;

/// Largest accepted highscore table
pub const MAX_HIGHSCORE_CAPACITY: usize = 1000;

/// Name used when a highscore is recorded without one
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Food eaten within this many ticks of placement earns the quick-eat bonus
pub const QUICK_EAT_TICKS: u32 = 30;

/// On Hard difficulty, uneaten food is relocated after this many ticks
pub const FOOD_AGE_LIMIT_TICKS: u32 = 100;

/// Cumulative thresholds over `[0, 100)` for the food type draw
pub const FOOD_BONUS_THRESHOLD: u32 = 5;
pub const FOOD_SPEED_THRESHOLD: u32 = 10;
pub const FOOD_SLOW_THRESHOLD: u32 = 15;

/// Score awarded when the snake fills the whole board
pub const BOARD_COMPLETE_BONUS: u32 = 1000;

/// Percent chance of spawning a power-up item after a consumption
pub const POWER_UP_SPAWN_PERCENT: u32 = 10;

/// Ticks an activated power-up stays in effect
pub const POWER_UP_DURATION_TICKS: u32 = 100;

/// Ticks an uncollected power-up item stays on the board
pub const POWER_UP_ITEM_LIFETIME_TICKS: u32 = 80;

/// Manhattan radius within which the Magnet pulls food
pub const MAGNET_RADIUS: u32 = 5;

/// Selectable speed presets, slowest first
pub const SPEED_PRESETS: [(u32, &str); 6] = [
    (150, "SNAIL"),
    (120, "SLOW"),
    (100, "NORMAL"),
    (80, "FAST"),
    (60, "HYPER"),
    (40, "GODLIKE"),
];

/// Human readable description of a tick interval.
///
/// ```
/// use snake_arcade_types::speed_level_label;
///
/// assert_eq!(speed_level_label(60), "EXTREME");
/// assert_eq!(speed_level_label(100), "FAST");
/// assert_eq!(speed_level_label(500), "VERY SLOW");
/// ```
pub fn speed_level_label(interval_ms: u32) -> &'static str {
    match interval_ms {
        0..=60 => "EXTREME",
        61..=80 => "VERY FAST",
        81..=100 => "FAST",
        101..=120 => "MEDIUM",
        121..=150 => "SLOW",
        _ => "VERY SLOW",
    }
}

/// A board coordinate.
///
/// Signed so a candidate head one step past an edge can be represented
/// before it is rejected or wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `dir` (may be off the board)
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to `other`
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Movement direction of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector `(dx, dy)`; `y` grows downwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The 180° reverse
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parse direction from string (case-insensitive, full name or first letter)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Kind of food currently on the board
///
/// - **Normal**: plain growth
/// - **Bonus**: worth more, no side effect
/// - **Speed**: shortens the tick interval
/// - **Slow**: lengthens the tick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodType {
    Normal,
    Bonus,
    Speed,
    Slow,
}

impl FoodType {
    /// Base points before any multiplier
    pub fn base_points(self) -> u32 {
        match self {
            FoodType::Normal => 100,
            FoodType::Bonus => 300,
            FoodType::Speed => 150,
            FoodType::Slow => 200,
        }
    }

    /// Map a roll in `[0, 100)` onto a food type using the fixed thresholds
    ///
    /// ```
    /// use snake_arcade_types::FoodType;
    ///
    /// assert_eq!(FoodType::from_roll(0), FoodType::Bonus);
    /// assert_eq!(FoodType::from_roll(7), FoodType::Speed);
    /// assert_eq!(FoodType::from_roll(14), FoodType::Slow);
    /// assert_eq!(FoodType::from_roll(15), FoodType::Normal);
    /// ```
    pub fn from_roll(roll: u32) -> Self {
        if roll < FOOD_BONUS_THRESHOLD {
            FoodType::Bonus
        } else if roll < FOOD_SPEED_THRESHOLD {
            FoodType::Speed
        } else if roll < FOOD_SLOW_THRESHOLD {
            FoodType::Slow
        } else {
            FoodType::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodType::Normal => "normal",
            FoodType::Bonus => "bonus",
            FoodType::Speed => "speed",
            FoodType::Slow => "slow",
        }
    }
}

/// Difficulty level; scales points and enables food aging on Hard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn score_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Whether uneaten food is relocated after `FOOD_AGE_LIMIT_TICKS`
    pub fn ages_food(self) -> bool {
        matches!(self, Difficulty::Hard)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "normal" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Game mode
///
/// - **Classic**: walls are fatal, no time limit
/// - **TimeAttack**: walls are fatal, the run ends when the time limit expires
/// - **Survival**: the snake wraps through walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Classic,
    TimeAttack,
    Survival,
}

impl GameMode {
    pub fn wraps_walls(self) -> bool {
        matches!(self, GameMode::Survival)
    }

    pub fn is_timed(self) -> bool {
        matches!(self, GameMode::TimeAttack)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(|c: char| c == '-' || c == '_', "").as_str() {
            "classic" => Some(GameMode::Classic),
            "timeattack" => Some(GameMode::TimeAttack),
            "survival" => Some(GameMode::Survival),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::TimeAttack => "time_attack",
            GameMode::Survival => "survival",
        }
    }
}

/// Collectable power-ups
///
/// - **Ghost**: invincible; walls wrap and the body blocks instead of killing
/// - **DoubleScore**: points are doubled
/// - **Magnet**: nearby food drifts toward the head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Ghost,
    DoubleScore,
    Magnet,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Ghost,
        PowerUpKind::DoubleScore,
        PowerUpKind::Magnet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Ghost => "ghost",
            PowerUpKind::DoubleScore => "double_score",
            PowerUpKind::Magnet => "magnet",
        }
    }
}

/// Front-end requests that can be applied to a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Buffer a new direction for the next tick
    Turn(Direction),
    /// Toggle pause state
    Pause,
    /// Abort the current run and start over
    Restart,
    /// Shorten the tick interval by one step
    SpeedUp,
    /// Lengthen the tick interval by one step
    SlowDown,
}

impl GameAction {
    /// Parse action from string
    ///
    /// ```
    /// use snake_arcade_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("up"), Some(GameAction::Turn(Direction::Up)));
    /// assert_eq!(GameAction::from_str("pause"), Some(GameAction::Pause));
    /// assert_eq!(GameAction::from_str("fly"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        if let Some(dir) = Direction::from_str(s) {
            return Some(GameAction::Turn(dir));
        }
        match s.to_lowercase().as_str() {
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "speedup" | "faster" => Some(GameAction::SpeedUp),
            "slowdown" | "slower" => Some(GameAction::SlowDown),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn step_follows_screen_coordinates() {
        let c = Cell::new(5, 5);
        assert_eq!(c.step(Direction::Up), Cell::new(5, 4));
        assert_eq!(c.step(Direction::Down), Cell::new(5, 6));
        assert_eq!(c.step(Direction::Left), Cell::new(4, 5));
        assert_eq!(c.step(Direction::Right), Cell::new(6, 5));
    }

    #[test]
    fn food_roll_thresholds_cover_expected_shares() {
        let mut counts = [0u32; 4];
        for roll in 0..100 {
            let idx = match FoodType::from_roll(roll) {
                FoodType::Bonus => 0,
                FoodType::Speed => 1,
                FoodType::Slow => 2,
                FoodType::Normal => 3,
            };
            counts[idx] += 1;
        }
        assert_eq!(counts, [5, 5, 5, 85]);
    }

    #[test]
    fn difficulty_multipliers() {
        assert_eq!(Difficulty::Easy.score_multiplier(), 0.7);
        assert_eq!(Difficulty::Medium.score_multiplier(), 1.0);
        assert_eq!(Difficulty::Hard.score_multiplier(), 1.5);
        assert!(Difficulty::Hard.ages_food());
        assert!(!Difficulty::Medium.ages_food());
    }

    #[test]
    fn mode_parsing_accepts_separators() {
        assert_eq!(GameMode::from_str("time-attack"), Some(GameMode::TimeAttack));
        assert_eq!(GameMode::from_str("TIME_ATTACK"), Some(GameMode::TimeAttack));
        assert_eq!(GameMode::from_str("Survival"), Some(GameMode::Survival));
        assert_eq!(GameMode::from_str("arcade"), None);
    }

    #[test]
    fn speed_presets_are_ordered_slowest_first() {
        assert!(SPEED_PRESETS.windows(2).all(|w| w[0].0 > w[1].0));
        assert_eq!(SPEED_PRESETS[2], (DEFAULT_TICK_MS, "NORMAL"));
    }
}
