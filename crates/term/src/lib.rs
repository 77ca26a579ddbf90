//! Terminal "game renderer" module.
//!
//! A small game-oriented rendering layer: a snapshot is drawn into a plain
//! framebuffer of styled glyphs, and the framebuffer is flushed to the
//! terminal with crossterm, rewriting only what changed since the last frame.
//!
//! Each board cell is two terminal columns wide to compensate for the usual
//! glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use snake_arcade_core as core;
pub use snake_arcade_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{changed_spans, encode_diff_into, encode_full_into, Span, TerminalRenderer};
