//! Terminal input module.
//!
//! Maps `crossterm` key events into screen-level [`Intent`]s. The mapping is
//! context-sensitive: letters select menu entries on the menu screen but tap
//! grid cells on the game screen, so callers pass a [`KeyContext`]. The
//! [`GridCursor`] tracks the arrow-key selection on the grid.

pub mod cursor;
pub mod map;

pub use memory_quest_types as types;

pub use cursor::{Direction, GridCursor};
pub use map::{cell_for_key, handle_key_event, should_quit, Intent, KeyContext};
