use snake_arcade::core::{ActivePowerUp, GameConfig, GameSession, GameSnapshot};
use snake_arcade::term::{AnchorY, FrameBuffer, GameView, Viewport};
use snake_arcade::types::{Direction, GameMode, PowerUpKind};

fn default_snapshot() -> GameSnapshot {
    GameSession::from_config(GameConfig {
        seed: Some(1),
        ..GameConfig::default()
    })
    .unwrap()
    .snapshot()
}

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = default_snapshot();
    let view = GameView::default();

    // With two columns per cell:
    // board = 25*2 by 25 => 50x25, plus border => 52x27
    let fb = view.render(&snap, Viewport::new(52, 27));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(51, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 26).unwrap().ch, '└');
    assert_eq!(fb.get(51, 26).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_head_two_chars_wide() {
    let snap = default_snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(52, 27));

    // Head at (12,12); inside the border the origin is (1,1).
    let x0 = 1 + 12 * 2;
    let y0 = 1 + 12;
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_ne!(fb.get(x0 + 2, y0).unwrap().ch, '█');
}

#[test]
fn term_view_follows_the_snake() {
    let mut session = GameSession::from_config(GameConfig {
        board_width: 10,
        board_height: 10,
        game_mode: GameMode::Survival,
        seed: Some(3),
        ..GameConfig::default()
    })
    .unwrap();
    session.change_direction(Direction::Down);
    session.advance();

    let snap = session.snapshot();
    let head = snap.head().unwrap();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(22, 12));

    let glyph = fb
        .get(1 + head.x as u16 * 2, 1 + head.y as u16)
        .unwrap();
    assert_eq!(glyph.ch, '█');
    assert!(glyph.style.bold);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = default_snapshot();
    snap.score = 4321;
    snap.high_score = 9999;
    snap.active_power_up = Some(ActivePowerUp {
        kind: PowerUpKind::Magnet,
        remaining_ticks: 42,
    });

    let text = screen_text(&GameView::default().render(&snap, Viewport::new(100, 30)));
    assert!(text.contains("SCORE"));
    assert!(text.contains("4321"));
    assert!(text.contains("9999"));
    assert!(text.contains("FAST 100ms"));
    assert!(text.contains("classic medium"));
    assert!(text.contains("magnet 42"));
}

#[test]
fn term_view_skips_side_panel_on_narrow_viewports() {
    let snap = default_snapshot();
    let text = screen_text(&GameView::default().render(&snap, Viewport::new(52, 27)));
    assert!(!text.contains("SCORE"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = default_snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(52, 35));

    // start_y = (35 - 27) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = default_snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(52, 35));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_shows_final_table_after_game_over() {
    let mut session = GameSession::from_config(GameConfig {
        board_width: 3,
        board_height: 3,
        player_name: "Ada".to_string(),
        seed: Some(1),
        ..GameConfig::default()
    })
    .unwrap();
    session.add_high_score("Bob", 50);
    while !session.is_game_over() {
        session.advance();
    }

    let snap = session.snapshot();
    let mut fb = FrameBuffer::new(0, 0);
    GameView::default().render_into_with_summary(
        &snap,
        session.last_summary(),
        Viewport::new(80, 24),
        &mut fb,
    );
    let text = screen_text(&fb);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("Bob"));
}
