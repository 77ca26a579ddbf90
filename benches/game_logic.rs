use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use snake_arcade::core::{
    calculate_points, Board, FoodSpawner, GameConfig, GameSession, GameSnapshot, ScoreInput,
    SimpleRng,
};
use snake_arcade::term::{FrameBuffer, GameView, Viewport};
use snake_arcade::types::{Cell, Difficulty, Direction, FoodType, GameMode};

fn survival_session() -> GameSession {
    GameSession::from_config(GameConfig {
        game_mode: GameMode::Survival,
        seed: Some(12345),
        ..GameConfig::default()
    })
    .unwrap()
}

fn bench_advance(c: &mut Criterion) {
    let mut session = survival_session();
    let dirs = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
    let mut i = 0usize;

    c.bench_function("advance_survival", |b| {
        b.iter(|| {
            i += 1;
            if i % 9 == 0 {
                session.change_direction(dirs[(i / 9) % 4]);
            }
            session.advance();
            if session.is_game_over() {
                session.reset();
            }
            session.take_events();
        })
    });
}

fn bench_calculate_points(c: &mut Criterion) {
    let input = ScoreInput {
        food_type: FoodType::Bonus,
        tick_interval_ms: 80,
        snake_length: 30,
        elapsed_ms: 95_000,
        combo: 4,
        difficulty: Difficulty::Hard,
        food_age_ticks: 12,
        double_score: true,
    };

    c.bench_function("calculate_points", |b| {
        b.iter(|| calculate_points(black_box(&input)))
    });
}

fn bench_place_food(c: &mut Criterion) {
    let board = Board::new(25, 25).unwrap();
    // Half the board taken.
    let occupied: HashSet<Cell> = board.cells().filter(|cell| cell.y % 2 == 0).collect();
    let mut spawner = FoodSpawner::new(SimpleRng::new(7));

    c.bench_function("place_food_half_full", |b| {
        b.iter(|| spawner.place_food(&board, black_box(&occupied)))
    });
}

fn bench_snapshot_and_render(c: &mut Criterion) {
    let session = survival_session();
    let view = GameView::default();
    let viewport = Viewport::new(100, 30);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            session.snapshot_into(&mut snap);
            view.render_into(black_box(&snap), viewport, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_advance,
    bench_calculate_points,
    bench_place_food,
    bench_snapshot_and_render
);
criterion_main!(benches);
