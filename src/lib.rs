//! Snake arcade (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `snake_arcade::{core,input,term,types}`.

pub use snake_arcade_core as core;
pub use snake_arcade_input as input;
pub use snake_arcade_term as term;
pub use snake_arcade_types as types;
