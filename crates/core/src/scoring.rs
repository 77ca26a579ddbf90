//! Scoring module - points awarded for one consumption event
//!
//! Points are a product of independent multipliers applied to the food's
//! base value:
//! - speed: faster ticks pay more (banded step function of the interval)
//! - length: `1 + (length / 10) * 0.5`, integer tenths of length
//! - time: `1 + minutes * 0.1`, whole minutes elapsed
//! - combo: `1 + streak * 0.1` once the streak reaches 3
//! - difficulty: Easy 0.7, Medium 1.0, Hard 1.5
//! - quick eat: `1.3` when eaten within `QUICK_EAT_TICKS` of placement
//! - double score power-up: `2`
//!
//! The product is floored exactly once, at the end.

use crate::types::{Difficulty, FoodType, QUICK_EAT_TICKS};

/// Combo streak at which the combo multiplier starts to apply
pub const COMBO_THRESHOLD: u32 = 3;

const QUICK_EAT_MULTIPLIER: f64 = 1.3;
const DOUBLE_SCORE_MULTIPLIER: f64 = 2.0;

/// Absorbs binary representation error (e.g. 0.7 * 100) before flooring.
const FLOOR_TOLERANCE: f64 = 1e-9;

/// Everything the scoring formula looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInput {
    pub food_type: FoodType,
    pub tick_interval_ms: u32,
    pub snake_length: usize,
    pub elapsed_ms: u64,
    /// Streak including the food being scored
    pub combo: u32,
    pub difficulty: Difficulty,
    /// Ticks since the food was placed
    pub food_age_ticks: u32,
    pub double_score: bool,
}

/// Score calculation result with each factor exposed for HUDs and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub base: u32,
    pub speed: f64,
    pub length: f64,
    pub time: f64,
    pub combo: f64,
    pub difficulty: f64,
    pub quick_eat: f64,
    pub double_score: f64,
    pub total: u32,
}

impl ScoreBreakdown {
    /// Product of every multiplier (without the base)
    pub fn multiplier(&self) -> f64 {
        self.speed
            * self.length
            * self.time
            * self.combo
            * self.difficulty
            * self.quick_eat
            * self.double_score
    }
}

/// Speed multiplier for a tick interval; monotonically non-increasing
pub fn speed_multiplier(tick_interval_ms: u32) -> f64 {
    match tick_interval_ms {
        0..=50 => 3.0,
        51..=70 => 2.5,
        71..=90 => 2.0,
        91..=100 => 1.5,
        101..=130 => 1.0,
        131..=160 => 0.75,
        _ => 0.5,
    }
}

pub fn length_multiplier(snake_length: usize) -> f64 {
    1.0 + (snake_length / 10) as f64 * 0.5
}

pub fn time_multiplier(elapsed_ms: u64) -> f64 {
    let minutes = elapsed_ms / 60_000;
    1.0 + minutes as f64 * 0.1
}

pub fn combo_multiplier(combo: u32) -> f64 {
    if combo >= COMBO_THRESHOLD {
        1.0 + combo as f64 * 0.1
    } else {
        1.0
    }
}

pub fn is_quick_eat(food_age_ticks: u32) -> bool {
    food_age_ticks < QUICK_EAT_TICKS
}

/// Calculate the full breakdown for one consumption
pub fn score_breakdown(input: &ScoreInput) -> ScoreBreakdown {
    let base = input.food_type.base_points();
    let speed = speed_multiplier(input.tick_interval_ms);
    let length = length_multiplier(input.snake_length);
    let time = time_multiplier(input.elapsed_ms);
    let combo = combo_multiplier(input.combo);
    let difficulty = input.difficulty.score_multiplier();
    let quick_eat = if is_quick_eat(input.food_age_ticks) {
        QUICK_EAT_MULTIPLIER
    } else {
        1.0
    };
    let double_score = if input.double_score {
        DOUBLE_SCORE_MULTIPLIER
    } else {
        1.0
    };

    let raw = base as f64 * speed * length * time * combo * difficulty * quick_eat * double_score;
    let total = (raw + FLOOR_TOLERANCE).floor().min(u32::MAX as f64) as u32;

    ScoreBreakdown {
        base,
        speed,
        length,
        time,
        combo,
        difficulty,
        quick_eat,
        double_score,
        total,
    }
}

/// Points for one consumption
pub fn calculate_points(input: &ScoreInput) -> u32 {
    score_breakdown(input).total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> ScoreInput {
        ScoreInput {
            food_type: FoodType::Normal,
            tick_interval_ms: 100,
            snake_length: 1,
            elapsed_ms: 0,
            combo: 0,
            difficulty: Difficulty::Medium,
            food_age_ticks: QUICK_EAT_TICKS,
            double_score: false,
        }
    }

    #[test]
    fn test_baseline_normal_food() {
        // 100 * 1.5 (speed) * 1.0 * 1.0 * 1.0 * 1.0
        assert_eq!(calculate_points(&baseline()), 150);
    }

    #[test]
    fn test_base_points_by_type() {
        let mut input = baseline();
        input.tick_interval_ms = 120; // 1.0x
        for (ty, expected) in [
            (FoodType::Normal, 100),
            (FoodType::Bonus, 300),
            (FoodType::Speed, 150),
            (FoodType::Slow, 200),
        ] {
            input.food_type = ty;
            assert_eq!(calculate_points(&input), expected, "{:?}", ty);
        }
    }

    #[test]
    fn test_speed_bands() {
        assert_eq!(speed_multiplier(40), 3.0);
        assert_eq!(speed_multiplier(50), 3.0);
        assert_eq!(speed_multiplier(51), 2.5);
        assert_eq!(speed_multiplier(70), 2.5);
        assert_eq!(speed_multiplier(90), 2.0);
        assert_eq!(speed_multiplier(100), 1.5);
        assert_eq!(speed_multiplier(130), 1.0);
        assert_eq!(speed_multiplier(160), 0.75);
        assert_eq!(speed_multiplier(161), 0.5);
        assert_eq!(speed_multiplier(1000), 0.5);
    }

    #[test]
    fn test_speed_multiplier_is_non_increasing() {
        let mut prev = speed_multiplier(0);
        for ms in 1..400 {
            let m = speed_multiplier(ms);
            assert!(m <= prev, "multiplier rose at {}ms", ms);
            prev = m;
        }
    }

    #[test]
    fn test_length_uses_whole_tens() {
        assert_eq!(length_multiplier(1), 1.0);
        assert_eq!(length_multiplier(9), 1.0);
        assert_eq!(length_multiplier(10), 1.5);
        assert_eq!(length_multiplier(25), 2.0);
    }

    #[test]
    fn test_time_uses_whole_minutes() {
        assert_eq!(time_multiplier(59_999), 1.0);
        assert_eq!(time_multiplier(60_000), 1.0 + 0.1);
        assert_eq!(time_multiplier(180_000), 1.0 + 3.0 * 0.1);
    }

    #[test]
    fn test_combo_starts_at_three() {
        assert_eq!(combo_multiplier(0), 1.0);
        assert_eq!(combo_multiplier(2), 1.0);
        assert_eq!(combo_multiplier(3), 1.0 + 3.0 * 0.1);
        assert_eq!(combo_multiplier(5), 1.0 + 5.0 * 0.1);
    }

    #[test]
    fn test_quick_eat_bonus() {
        let mut input = baseline();
        input.food_age_ticks = QUICK_EAT_TICKS - 1;
        // 150 * 1.3
        assert_eq!(calculate_points(&input), 195);
    }

    #[test]
    fn test_difficulty_scaling() {
        let mut input = baseline();
        input.difficulty = Difficulty::Easy;
        assert_eq!(calculate_points(&input), 105);
        input.difficulty = Difficulty::Hard;
        assert_eq!(calculate_points(&input), 225);
    }

    #[test]
    fn test_double_score() {
        let mut input = baseline();
        input.double_score = true;
        assert_eq!(calculate_points(&input), 300);
    }

    #[test]
    fn test_rounding_happens_once() {
        // 100 * 0.75 * 0.7 * 1.3 = 68.25; flooring each step would give 67.
        let input = ScoreInput {
            tick_interval_ms: 150,
            difficulty: Difficulty::Easy,
            food_age_ticks: 0,
            ..baseline()
        };
        let b = score_breakdown(&input);
        assert_eq!(b.total, 68);
        assert!((b.multiplier() - 0.6825).abs() < 1e-12);
    }

    #[test]
    fn test_everything_combined() {
        // 300 * 2.0 * 1.5 * 1.1 * 1.4 * 1.5 * 1.3 = 2702.7
        let input = ScoreInput {
            food_type: FoodType::Bonus,
            tick_interval_ms: 80,
            snake_length: 12,
            elapsed_ms: 61_000,
            combo: 4,
            difficulty: Difficulty::Hard,
            food_age_ticks: 3,
            double_score: false,
        };
        assert_eq!(calculate_points(&input), 2702);
    }
}
