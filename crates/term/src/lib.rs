//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for the terminal. It avoids widget
//! toolkits and renders into a plain framebuffer that is diffed and flushed
//! to the terminal.
//!
//! - [`fb`]: styled character framebuffer
//! - [`renderer`]: crossterm backend with changed-run diffing
//! - [`game_view`], [`screens`]: pure state → framebuffer views
//! - [`bell`]: terminal bell [`AudioSink`](crate::core::AudioSink)

pub mod bell;
pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod screens;

pub use memory_quest_core as core;
pub use memory_quest_types as types;

pub use bell::BellSink;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameFrame, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screens::{render_menu, render_settings, render_stats, SettingsFrame};
