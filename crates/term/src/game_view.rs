//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameOverSummary, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{speed_level_label, Cell, FoodType, PowerUpKind};

const BOARD_BG: Rgb = Rgb::new(20, 24, 20);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Terminal renderer for the snake board and its side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps the board roughly square.
        Self {
            cell_w: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the board frame landed in the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, reusing its allocation.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_summary(snap, None, viewport, fb);
    }

    /// Like `render_into`, with the end-of-run table drawn over the board.
    pub fn render_into_with_summary(
        &self,
        snap: &GameSnapshot,
        summary: Option<&GameOverSummary>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let frame = self.layout(snap, viewport);
        let border = CellStyle::new(Rgb::new(160, 200, 160), PANEL_BG);
        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w.saturating_sub(2),
            frame.h.saturating_sub(2),
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        draw_border(fb, frame, border);

        if let Some(food) = snap.food {
            let (ch, fg) = food_glyph(food.food_type);
            self.draw_cell(fb, frame, food.cell, ch, CellStyle::new(fg, BOARD_BG).bold());
        }

        if let Some(item) = snap.power_up_item {
            let style = CellStyle::new(Rgb::new(230, 120, 230), BOARD_BG).bold();
            self.draw_cell(fb, frame, item.cell, power_up_letter(item.kind), style);
        }

        let ghost = snap
            .active_power_up
            .is_some_and(|p| p.kind == PowerUpKind::Ghost);
        let body = if ghost {
            CellStyle::new(Rgb::new(150, 170, 150), BOARD_BG).dim()
        } else {
            CellStyle::new(Rgb::new(70, 200, 90), BOARD_BG)
        };
        // Tail first so the head wins if cells ever overlap.
        for &cell in snap.snake.iter().skip(1).rev() {
            self.draw_cell(fb, frame, cell, '█', body);
        }
        if let Some(head) = snap.head() {
            let head_style = CellStyle {
                fg: Rgb::new(170, 255, 150),
                ..body
            }
            .bold();
            self.draw_cell(fb, frame, head, '█', head_style);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.paused() {
            draw_overlay_line(fb, frame, 0, "PAUSED");
        } else if snap.game_over() {
            draw_overlay_line(fb, frame, 0, "GAME OVER");
            if let Some(summary) = summary {
                draw_summary(fb, frame, summary);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let w = snap.board_width.saturating_mul(self.cell_w).saturating_add(2);
        let h = snap.board_height.saturating_add(2);
        let x = viewport.width.saturating_sub(w + PANEL_WIDTH) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, frame: Frame, cell: Cell, ch: char, style: CellStyle) {
        let (Ok(cx), Ok(cy)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
            return;
        };
        let px = frame.x + 1 + cx * self.cell_w;
        let py = frame.y + 1 + cy;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = frame.y;
        let mut row = |fb: &mut FrameBuffer, name: &str| {
            fb.put_str(panel_x, y, name, label);
            let at = y.saturating_add(1);
            y = y.saturating_add(3);
            at
        };

        let at = row(fb, "SCORE");
        fb.put_u32(panel_x, at, snap.score, value);

        let at = row(fb, "BEST");
        fb.put_u32(panel_x, at, snap.high_score, value);

        let at = row(fb, "LENGTH");
        let end = fb.put_u64(panel_x, at, snap.snake.len() as u64, value);
        if snap.combo >= 2 {
            let end = fb.put_str(end + 1, at, "x", dim);
            fb.put_u32(end, at, snap.combo, dim);
        }

        let at = row(fb, "SPEED");
        let end = fb.put_str(panel_x, at, speed_level_label(snap.tick_interval_ms), value);
        let end = fb.put_u32(end + 1, at, snap.tick_interval_ms, dim);
        fb.put_str(end, at, "ms", dim);

        let at = row(fb, "MODE");
        let end = fb.put_str(panel_x, at, snap.game_mode.as_str(), value);
        fb.put_str(end + 1, at, snap.difficulty.as_str(), dim);

        let at = row(fb, "TIME");
        match snap.remaining_ms {
            Some(left) => {
                let end = put_clock(fb, panel_x, at, left, value);
                fb.put_str(end + 1, at, "left", dim);
            }
            None => {
                put_clock(fb, panel_x, at, snap.elapsed_ms, value);
            }
        }

        let at = row(fb, "POWER");
        match snap.active_power_up {
            Some(active) => {
                let end = fb.put_str(panel_x, at, active.kind.as_str(), value);
                fb.put_u32(end + 1, at, active.remaining_ticks, dim);
            }
            None => {
                fb.put_str(panel_x, at, "-", value);
            }
        }

        let help_y = viewport.height.saturating_sub(1);
        fb.put_str(panel_x, help_y, "p pause  r restart  q quit", dim);
    }
}

/// Columns reserved for the side panel when centering
const PANEL_WIDTH: u16 = 28;

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centered text `offset` rows below the middle of the board
fn draw_overlay_line(fb: &mut FrameBuffer, frame: Frame, offset: u16, text: &str) {
    let y = frame.y.saturating_add(frame.h / 2).saturating_add(offset);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, y, text, style);
}

fn draw_summary(fb: &mut FrameBuffer, frame: Frame, summary: &GameOverSummary) {
    let mut lines = Vec::with_capacity(summary.top_entries.len() + 2);
    lines.push(format!(
        "{} - {} pts",
        summary.outcome.as_str(),
        summary.final_score
    ));
    if summary.is_new_high_score {
        lines.push("NEW HIGH SCORE".to_string());
    }
    for (i, entry) in summary.top_entries.iter().enumerate() {
        let marker = if summary.rank == Some(i + 1) { '>' } else { ' ' };
        lines.push(format!(
            "{}{}. {:<10} {:>6}",
            marker,
            i + 1,
            entry.player_name,
            entry.score
        ));
    }
    for (i, line) in lines.iter().enumerate() {
        draw_overlay_line(fb, frame, 2 + i as u16, line);
    }
}

/// `m:ss` clock
fn put_clock(fb: &mut FrameBuffer, x: u16, y: u16, ms: u64, style: CellStyle) -> u16 {
    let secs = ms / 1000;
    let end = fb.put_u64(x, y, secs / 60, style);
    fb.put_char(end, y, ':', style);
    let rem = secs % 60;
    fb.put_char(end + 1, y, char::from(b'0' + (rem / 10) as u8), style);
    fb.put_char(end + 2, y, char::from(b'0' + (rem % 10) as u8), style);
    end + 3
}

fn food_glyph(food_type: FoodType) -> (char, Rgb) {
    match food_type {
        FoodType::Normal => ('●', Rgb::new(230, 70, 70)),
        FoodType::Bonus => ('★', Rgb::new(250, 210, 60)),
        FoodType::Speed => ('»', Rgb::new(80, 220, 230)),
        FoodType::Slow => ('«', Rgb::new(90, 130, 240)),
    }
}

fn power_up_letter(kind: PowerUpKind) -> char {
    match kind {
        PowerUpKind::Ghost => 'G',
        PowerUpKind::DoubleScore => '2',
        PowerUpKind::Magnet => 'M',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Food, GameOutcome, GameState};
    use crate::types::GameMode;

    fn snapshot() -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        snap.board_width = 5;
        snap.board_height = 5;
        snap.snake = vec![Cell::new(2, 2), Cell::new(1, 2)];
        snap.food = Some(Food {
            cell: Cell::new(4, 0),
            food_type: FoodType::Bonus,
        });
        snap.score = 1234;
        snap.high_score = 5000;
        snap.tick_interval_ms = 100;
        snap
    }

    fn top_view() -> GameView {
        GameView::default().with_anchor_y(AnchorY::Top)
    }

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_board_glyphs_land_on_cells() {
        let view = top_view();
        let fb = view.render(&snapshot(), Viewport::new(80, 24));
        let frame = view.layout(&snapshot(), Viewport::new(80, 24));

        // Head at (2,2): columns 1 + 2*2 and the row below the border.
        let head = fb.get(frame.x + 1 + 4, frame.y + 3).unwrap();
        assert_eq!(head.ch, '█');
        assert!(head.style.bold);
        let food = fb.get(frame.x + 1 + 8, frame.y + 1).unwrap();
        assert_eq!(food.ch, '★');
        assert_eq!(fb.get(frame.x, frame.y).unwrap().ch, '┌');
    }

    #[test]
    fn test_side_panel_shows_stats() {
        let fb = top_view().render(&snapshot(), Viewport::new(80, 24));
        let text = screen_text(&fb);
        assert!(text.contains("SCORE"));
        assert!(text.contains("1234"));
        assert!(text.contains("5000"));
        assert!(text.contains("FAST 100ms"));
        assert!(text.contains("0:00"));
    }

    #[test]
    fn test_time_attack_shows_remaining() {
        let mut snap = snapshot();
        snap.game_mode = GameMode::TimeAttack;
        snap.remaining_ms = Some(95_000);
        let text = screen_text(&top_view().render(&snap, Viewport::new(80, 24)));
        assert!(text.contains("1:35 left"));
    }

    #[test]
    fn test_overlays() {
        let mut snap = snapshot();
        snap.state = GameState::Paused;
        let text = screen_text(&top_view().render(&snap, Viewport::new(80, 24)));
        assert!(text.contains("PAUSED"));

        snap.state = GameState::GameOver;
        let summary = GameOverSummary {
            final_score: 1234,
            high_score: 5000,
            is_new_high_score: false,
            duration_ms: 10_000,
            snake_length: 2,
            outcome: GameOutcome::Wall,
            rank: None,
            top_entries: Vec::new(),
        };
        let mut fb = FrameBuffer::new(1, 1);
        top_view().render_into_with_summary(&snap, Some(&summary), Viewport::new(80, 24), &mut fb);
        let text = screen_text(&fb);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("1234 pts"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let fb = GameView::default().render(&snapshot(), Viewport::new(3, 2));
        assert_eq!((fb.width(), fb.height()), (3, 2));
    }
}
