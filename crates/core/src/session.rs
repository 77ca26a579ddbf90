//! Game session - owns the whole simulation and exposes the tick API
//!
//! A session ties together the board, the snake, the food spawner, the
//! scoring rules and the highscore store. Front-ends drive it with
//! `change_direction`, `toggle_pause`, `reset` and a periodic `advance`, then
//! read the result through `snapshot_into` and `take_events`.
//!
//! One `advance` call is one tick:
//!
//! 1. no-op while paused or game over
//! 2. TimeAttack ends the run once the limit is reached
//! 3. the buffered direction is committed and the head moves one cell
//! 4. walls are fatal unless the mode (or Ghost) wraps them
//! 5. hitting the body is fatal; under Ghost the move is blocked instead
//! 6. food grows the snake, otherwise the tail follows and the combo resets
//! 7. power-up timers, Magnet drift, food aging and the clock advance

use std::collections::HashSet;

use arrayvec::ArrayVec;
use chrono::Utc;
use rand::{RngCore, SeedableRng};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::events::{GameEvent, GameOutcome, GameOverSummary, GameState};
use crate::food::{Food, FoodSpawner, Placement, PowerUpItem};
use crate::highscore::{HighScoreEntry, HighscoreStore};
use crate::rng::SimpleRng;
use crate::scoring::{calculate_points, ScoreInput};
use crate::snake::Snake;
use crate::snapshot::{ActivePowerUp, GameSnapshot};
use crate::types::*;

/// Number of leading highscore entries carried in a game-over summary
pub const SUMMARY_TOP_ENTRIES: usize = 3;

#[derive(Debug)]
pub struct GameSession<R: RngCore = SimpleRng> {
    config: GameConfig,
    board: Board,
    snake: Snake,
    /// Direction used by the last move
    direction: Direction,
    /// Direction to commit on the next move
    pending_direction: Direction,
    food: Option<Food>,
    spawner: FoodSpawner<R>,
    power_up_item: Option<PowerUpItem>,
    active_power_up: Option<ActivePowerUp>,
    store: HighscoreStore,
    state: GameState,
    outcome: Option<GameOutcome>,
    score: u32,
    high_score: u32,
    tick_interval_ms: u32,
    elapsed_ms: u64,
    combo: u32,
    food_age_ticks: u32,
    ticks: u64,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    foods_eaten: u32,
    food_relocations: u32,
    events: Vec<GameEvent>,
    last_summary: Option<GameOverSummary>,
}

impl GameSession<SimpleRng> {
    /// Session with the default RNG, seeded from `config.seed`, and a store
    /// opened at `config.highscore_path` (in memory when unset).
    pub fn from_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SimpleRng::seed_from_u64(seed),
            None => SimpleRng::default(),
        };
        let store = match &config.highscore_path {
            Some(path) => HighscoreStore::open(path.clone(), config.highscore_capacity),
            None => HighscoreStore::in_memory(config.highscore_capacity),
        };
        Self::new(config, rng, store)
    }
}

impl<R: RngCore> GameSession<R> {
    /// Create a running session: one-cell snake at the board center heading
    /// right, with the first food placed.
    pub fn new(config: GameConfig, rng: R, store: HighscoreStore) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.board_width, config.board_height)?;
        let high_score = store.best_score().unwrap_or(0);

        let mut session = Self {
            snake: Snake::new(board.center()),
            board,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food: None,
            spawner: FoodSpawner::new(rng),
            power_up_item: None,
            active_power_up: None,
            store,
            state: GameState::Running,
            outcome: None,
            score: 0,
            high_score,
            tick_interval_ms: config.tick_interval_ms,
            elapsed_ms: 0,
            combo: 0,
            food_age_ticks: 0,
            ticks: 0,
            episode_id: 0,
            foods_eaten: 0,
            food_relocations: 0,
            events: Vec::with_capacity(8),
            last_summary: None,
            config,
        };
        session.start_episode();
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn food(&self) -> Option<Food> {
        self.food
    }

    pub fn power_up_item(&self) -> Option<PowerUpItem> {
        self.power_up_item
    }

    pub fn active_power_up(&self) -> Option<ActivePowerUp> {
        self.active_power_up
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == GameState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Time left in a timed mode
    pub fn remaining_ms(&self) -> Option<u64> {
        self.config
            .time_limit()
            .map(|limit| limit.saturating_sub(self.elapsed_ms))
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn food_age_ticks(&self) -> u32 {
        self.food_age_ticks
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn foods_eaten(&self) -> u32 {
        self.foods_eaten
    }

    pub fn food_relocations(&self) -> u32 {
        self.food_relocations
    }

    pub fn highscores(&self) -> &HighscoreStore {
        &self.store
    }

    /// Summary of the most recent game over in this episode
    pub fn last_summary(&self) -> Option<&GameOverSummary> {
        self.last_summary.as_ref()
    }

    pub fn rng(&self) -> &R {
        self.spawner.rng()
    }

    /// Drain every event raised since the previous call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board_width = self.board.width();
        out.board_height = self.board.height();
        out.snake.clear();
        out.snake.extend(self.snake.iter());
        out.food = self.food;
        out.power_up_item = self.power_up_item;
        out.active_power_up = self.active_power_up;
        out.state = self.state;
        out.difficulty = self.config.difficulty;
        out.game_mode = self.config.game_mode;
        out.score = self.score;
        out.high_score = self.high_score;
        out.tick_interval_ms = self.tick_interval_ms;
        out.elapsed_ms = self.elapsed_ms;
        out.remaining_ms = self.remaining_ms();
        out.combo = self.combo;
        out.foods_eaten = self.foods_eaten;
        out.ticks = self.ticks;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Buffer a direction for the next move.
    ///
    /// Rejected when it reverses the committed direction or the run is over.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.state == GameState::GameOver || direction == self.direction.opposite() {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Running <-> Paused. Ignored once the run is over.
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            GameState::Running => GameState::Paused,
            GameState::Paused => GameState::Running,
            GameState::GameOver => return false,
        };
        self.events.push(GameEvent::PauseChanged {
            paused: self.state == GameState::Paused,
        });
        true
    }

    /// Start a new episode with the same configuration
    pub fn reset(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.start_episode();
        self.events.push(GameEvent::SessionReset {
            episode_id: self.episode_id,
        });
    }

    /// Lower the tick interval by one step (not below the fastest speed)
    pub fn speed_up(&mut self) -> bool {
        if self.state == GameState::GameOver {
            return false;
        }
        self.faster()
    }

    /// Raise the tick interval by one step (not above the slowest speed)
    pub fn slow_down(&mut self) -> bool {
        if self.state == GameState::GameOver {
            return false;
        }
        self.slower()
    }

    /// Record a named score in the highscore table and persist it.
    ///
    /// Returns the 1-based rank, or `None` if the score did not make the table.
    pub fn add_high_score(&mut self, name: &str, score: u32) -> Option<usize> {
        let entry = self.entry_for(name, score);
        let rank = self.store.record(entry);
        if let Some(rank) = rank {
            log::info!("highscore {} recorded at rank {}", score, rank);
            self.high_score = self.high_score.max(score);
            self.events.push(GameEvent::HighscoresChanged);
        }
        rank
    }

    /// Empty the highscore table and persist the empty list
    pub fn clear_high_scores(&mut self) {
        self.store.clear();
        self.high_score = self.score;
        self.events.push(GameEvent::HighscoresChanged);
    }

    /// Apply a front-end action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Turn(direction) => self.change_direction(direction),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.reset();
                true
            }
            GameAction::SpeedUp => self.speed_up(),
            GameAction::SlowDown => self.slow_down(),
        }
    }

    /// One simulation tick. Returns false when nothing happened (paused or
    /// game over).
    pub fn advance(&mut self) -> bool {
        if self.state != GameState::Running {
            return false;
        }

        if let Some(limit) = self.config.time_limit() {
            if self.elapsed_ms >= limit {
                self.finish(GameOutcome::TimeUp);
                return true;
            }
        }

        self.direction = self.pending_direction;
        let ghost = self.power_up_active(PowerUpKind::Ghost);

        let mut next = self.snake.head().step(self.direction);
        if !self.board.contains(next) {
            if ghost || self.config.game_mode.wraps_walls() {
                next = self.board.wrap(next);
            } else {
                self.finish(GameOutcome::Wall);
                return true;
            }
        }

        if self.snake.contains(next) {
            if !ghost {
                self.finish(GameOutcome::SelfCollision);
                return true;
            }
            // Ghost: hold position this tick. No food was eaten.
            self.combo = 0;
            self.end_tick();
            return true;
        }

        self.snake.push_head(next);

        if self.food.is_some_and(|food| food.cell == next) {
            self.consume_food();
            if self.state == GameState::GameOver {
                return true;
            }
        } else {
            self.snake.pop_tail();
            self.combo = 0;
        }

        if let Some(item) = self.power_up_item {
            if item.cell == next {
                self.power_up_item = None;
                self.activate_power_up(item.kind);
            }
        }

        self.end_tick();
        true
    }

    fn start_episode(&mut self) {
        self.snake = Snake::new(self.board.center());
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.food = None;
        self.power_up_item = None;
        self.active_power_up = None;
        self.state = GameState::Running;
        self.outcome = None;
        self.score = 0;
        self.high_score = self.store.best_score().unwrap_or(0);
        self.tick_interval_ms = self.config.tick_interval_ms;
        self.elapsed_ms = 0;
        self.combo = 0;
        self.food_age_ticks = 0;
        self.ticks = 0;
        self.foods_eaten = 0;
        self.food_relocations = 0;
        self.last_summary = None;

        if !self.place_food() {
            self.finish(GameOutcome::BoardComplete);
        }
    }

    fn power_up_active(&self, kind: PowerUpKind) -> bool {
        self.active_power_up.is_some_and(|p| p.kind == kind)
    }

    /// Cells food must avoid: the snake and any power-up item
    fn blocked_for_food(&self) -> HashSet<Cell> {
        let mut blocked = self.snake.occupied().clone();
        if let Some(item) = self.power_up_item {
            blocked.insert(item.cell);
        }
        blocked
    }

    /// Place a fresh food item. Returns false only when the snake fills the
    /// board.
    ///
    /// Food avoids the power-up item, but when the item covers the last free
    /// cell the item is dropped and the food takes its place.
    fn place_food(&mut self) -> bool {
        let blocked = self.blocked_for_food();
        let mut placement = self.spawner.place_food(&self.board, &blocked);
        if placement == Placement::BoardComplete && self.snake.len() < self.board.area() {
            if let Some(item) = self.power_up_item.take() {
                log::debug!("power-up item at {:?} removed to make room for food", item.cell);
            }
            placement = self.spawner.place_food(&self.board, self.snake.occupied());
        }
        match placement {
            Placement::Placed(food) => {
                self.food = Some(food);
                self.food_age_ticks = 0;
                self.events.push(GameEvent::FoodPlaced(food));
                true
            }
            Placement::BoardComplete => {
                self.food = None;
                false
            }
        }
    }

    fn consume_food(&mut self) {
        let Some(food) = self.food.take() else {
            return;
        };

        self.combo += 1;
        self.foods_eaten += 1;
        let points = calculate_points(&ScoreInput {
            food_type: food.food_type,
            tick_interval_ms: self.tick_interval_ms,
            snake_length: self.snake.len(),
            elapsed_ms: self.elapsed_ms,
            combo: self.combo,
            difficulty: self.config.difficulty,
            food_age_ticks: self.food_age_ticks,
            double_score: self.power_up_active(PowerUpKind::DoubleScore),
        });
        self.add_points(points);
        self.events.push(GameEvent::FoodEaten {
            food,
            points,
            combo: self.combo,
        });

        match food.food_type {
            FoodType::Speed => {
                self.faster();
            }
            FoodType::Slow => {
                self.slower();
            }
            FoodType::Normal | FoodType::Bonus => {}
        }

        if !self.place_food() {
            self.add_points(BOARD_COMPLETE_BONUS);
            self.finish(GameOutcome::BoardComplete);
            return;
        }

        self.maybe_spawn_power_up();
    }

    fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.high_score = self.high_score.max(self.score);
        self.events.push(GameEvent::ScoreChanged {
            score: self.score,
            high_score: self.high_score,
        });
    }

    fn faster(&mut self) -> bool {
        if self.tick_interval_ms <= MIN_TICK_MS {
            return false;
        }
        self.tick_interval_ms = self
            .tick_interval_ms
            .saturating_sub(TICK_STEP_MS)
            .max(MIN_TICK_MS);
        true
    }

    fn slower(&mut self) -> bool {
        if self.tick_interval_ms >= MAX_TICK_MS {
            return false;
        }
        self.tick_interval_ms = (self.tick_interval_ms + TICK_STEP_MS).min(MAX_TICK_MS);
        true
    }

    fn maybe_spawn_power_up(&mut self) {
        if self.power_up_item.is_some() || self.active_power_up.is_some() {
            return;
        }
        if !self.spawner.roll_chance(POWER_UP_SPAWN_PERCENT) {
            return;
        }
        let mut blocked = self.snake.occupied().clone();
        if let Some(food) = self.food {
            blocked.insert(food.cell);
        }
        if let Some(item) =
            self.spawner
                .place_power_up(&self.board, &blocked, POWER_UP_ITEM_LIFETIME_TICKS)
        {
            self.power_up_item = Some(item);
            self.events.push(GameEvent::PowerUpSpawned(item));
        }
    }

    fn activate_power_up(&mut self, kind: PowerUpKind) {
        self.active_power_up = Some(ActivePowerUp {
            kind,
            remaining_ticks: POWER_UP_DURATION_TICKS,
        });
        self.events.push(GameEvent::PowerUpActivated(kind));
    }

    /// Timers and drift shared by every completed tick
    fn end_tick(&mut self) {
        if let Some(active) = self.active_power_up.as_mut() {
            active.remaining_ticks = active.remaining_ticks.saturating_sub(1);
            if active.remaining_ticks == 0 {
                let kind = active.kind;
                self.active_power_up = None;
                self.events.push(GameEvent::PowerUpExpired(kind));
            }
        }

        if let Some(item) = self.power_up_item.as_mut() {
            item.remaining_ticks = item.remaining_ticks.saturating_sub(1);
            if item.remaining_ticks == 0 {
                self.power_up_item = None;
            }
        }

        if self.power_up_active(PowerUpKind::Magnet) {
            self.pull_food();
        }

        self.food_age_ticks = self.food_age_ticks.saturating_add(1);
        if self.config.difficulty.ages_food() && self.food_age_ticks >= FOOD_AGE_LIMIT_TICKS {
            self.relocate_food();
        }

        self.elapsed_ms += u64::from(self.tick_interval_ms);
        self.ticks += 1;
        self.events.push(GameEvent::StateChanged);
    }

    /// Move the food one cell toward the head when it is within reach
    fn pull_food(&mut self) {
        let Some(food) = self.food else {
            return;
        };
        let head = self.snake.head();
        let distance = head.manhattan(food.cell);
        if distance == 0 || distance > MAGNET_RADIUS {
            return;
        }

        let mut candidates: ArrayVec<Cell, 2> = ArrayVec::new();
        let dx = (head.x - food.cell.x).signum();
        let dy = (head.y - food.cell.y).signum();
        if dx != 0 {
            candidates.push(Cell::new(food.cell.x + dx, food.cell.y));
        }
        if dy != 0 {
            candidates.push(Cell::new(food.cell.x, food.cell.y + dy));
        }

        let target = candidates.into_iter().find(|&cell| {
            self.board.contains(cell)
                && !self.snake.contains(cell)
                && self.power_up_item.map_or(true, |item| item.cell != cell)
        });
        if let Some(cell) = target {
            self.food = Some(Food { cell, ..food });
        }
    }

    fn relocate_food(&mut self) {
        let previous = self.food;
        self.food_relocations += 1;
        if self.place_food() {
            log::debug!(
                "food aged out at {:?}, moved to {:?}",
                previous.map(|f| f.cell),
                self.food.map(|f| f.cell)
            );
        } else {
            // Only a snake filling the whole board leaves no cell.
            self.food = previous;
        }
    }

    fn entry_for(&self, name: &str, score: u32) -> HighScoreEntry {
        HighScoreEntry {
            player_name: HighScoreEntry::normalize_name(name),
            score,
            difficulty: self.config.difficulty,
            game_mode: self.config.game_mode,
            date: Utc::now(),
            duration_ms: self.elapsed_ms,
            snake_length: self.snake.len(),
            speed_ms: self.tick_interval_ms,
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.state = GameState::GameOver;
        self.outcome = Some(outcome);

        let is_new_high_score = self.score > 0
            && self
                .store
                .best_score()
                .map_or(true, |best| self.score > best);

        let mut rank = None;
        if self.score > 0 && self.store.is_qualifying(self.score) {
            let entry = self.entry_for(&self.config.player_name, self.score);
            rank = self.store.record(entry);
            if rank.is_some() {
                self.events.push(GameEvent::HighscoresChanged);
            }
        }
        self.high_score = self.high_score.max(self.score);

        log::info!(
            "game over ({}): score {}, length {}, {}ms, rank {:?}",
            outcome.as_str(),
            self.score,
            self.snake.len(),
            self.elapsed_ms,
            rank
        );

        let summary = GameOverSummary {
            final_score: self.score,
            high_score: self.high_score,
            is_new_high_score,
            duration_ms: self.elapsed_ms,
            snake_length: self.snake.len(),
            outcome,
            rank,
            top_entries: self.store.top(SUMMARY_TOP_ENTRIES).to_vec(),
        };
        self.last_summary = Some(summary.clone());
        self.events.push(GameEvent::GameOver(summary));
    }

    #[cfg(test)]
    fn put_food(&mut self, cell: Cell, food_type: FoodType) {
        self.food = Some(Food { cell, food_type });
        self.food_age_ticks = 0;
    }

    #[cfg(test)]
    fn put_power_up_item(&mut self, cell: Cell, kind: PowerUpKind) {
        self.power_up_item = Some(PowerUpItem {
            cell,
            kind,
            remaining_ticks: POWER_UP_ITEM_LIFETIME_TICKS,
        });
    }

    /// Replace the body (head first) and committed direction
    #[cfg(test)]
    fn put_snake(&mut self, cells: &[Cell], direction: Direction) {
        let mut iter = cells.iter().rev();
        if let Some(&tail) = iter.next() {
            let mut snake = Snake::new(tail);
            for &cell in iter {
                assert!(snake.push_head(cell));
            }
            self.snake = snake;
        }
        self.direction = direction;
        self.pending_direction = direction;
    }
}
