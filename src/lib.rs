//! Memory Quest (workspace facade crate).
//!
//! A terminal memory-pattern game. The implementation lives in dedicated
//! crates under `crates/` and is re-exported here as
//! `memory_quest::{core,input,store,term,types}`. This crate adds the
//! environment configuration and the screen-level [`app::App`].

pub mod app;
pub mod config;

pub use memory_quest_core as core;
pub use memory_quest_input as input;
pub use memory_quest_store as store;
pub use memory_quest_term as term;
pub use memory_quest_types as types;

pub use app::App;
pub use config::AppConfig;
