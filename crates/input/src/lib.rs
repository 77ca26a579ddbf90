//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. There is
//! no repeat handling: the snake keeps moving on its own, so only key
//! presses matter.

pub mod map;

pub use snake_arcade_types as types;

pub use map::{handle_key_event, should_quit};
