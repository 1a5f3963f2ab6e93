//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management and timing logic
//! of the memory game. It performs no I/O: storage and audio are reached
//! through the [`StatsStore`] and [`AudioSink`] traits, and time only moves
//! when the caller says so.
//!
//! - **Deterministic**: Same seed produces identical patterns
//! - **Testable**: Time is fed in explicitly through `tick(elapsed_ms)`
//! - **Portable**: Runs behind any front end (terminal, headless tests)
//!
//! # Module Structure
//!
//! - [`game_state`]: The session aggregate and its reducer
//! - [`action`]: Actions accepted by the reducer
//! - [`pattern`]: Grid sizing and pattern generation
//! - [`validator`]: Prefix-based tap judging
//! - [`sequencer`]: Timed, cancellable pattern presentation
//! - [`scheduler`]: Generation-keyed delayed tasks
//! - [`session`]: Controller tying the above to audio and storage
//! - [`stats`], [`themes`]: Lifetime stats, achievements and the theme catalog
//!
//! # Game Rules
//!
//! - **Grid**: 2x2 for levels 1-3, 3x3 for levels 4-6, 4x4 from level 7
//! - **Pattern**: `min(level + 1, cells)` independent uniform draws
//! - **Success**: `level * 10` points and `ceil(level / 2)` stars
//! - **Failure**: One wrong tap ends the session
//! - **Themes**: Unlocked at 50, 100 and 200 lifetime stars
//!
//! # Example
//!
//! ```
//! use memory_quest_core::{validate_sequence, GameAction, GameState, TapOutcome};
//! use memory_quest_core::types::{Pattern, Phase};
//!
//! let mut game = GameState::new();
//! game.apply_action(GameAction::StartGame);
//!
//! let pattern: Pattern = [2, 0].into_iter().collect();
//! game.apply_action(GameAction::SetPattern(pattern));
//! game.apply_action(GameAction::BeginPlayerTurn);
//! assert_eq!(game.phase(), Phase::PlayerTurn);
//!
//! assert_eq!(validate_sequence(game.pattern(), &[2, 0]), TapOutcome::LevelComplete);
//! game.apply_action(GameAction::PatternSucceeded);
//! assert_eq!(game.score(), 10);
//! ```

pub mod action;
pub mod audio;
pub mod game_state;
pub mod pattern;
pub mod rng;
pub mod scheduler;
pub mod sequencer;
pub mod session;
pub mod stats;
pub mod themes;
pub mod validator;

pub use memory_quest_types as types;

// Re-export commonly used types for convenience
pub use action::{ActionKind, GameAction};
pub use audio::{AudioSink, Mixer, NullAudio, RecordingAudio};
pub use game_state::GameState;
pub use pattern::{generate_pattern, grid_size_for_level, is_valid_pattern, pattern_len};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scheduler::Scheduler;
pub use sequencer::{Generation, PatternSequencer, SequencerEvent};
pub use session::{Session, SessionResult, StatsStore};
pub use stats::{Achievement, PlayerStats};
pub use themes::{theme, themes_earned, Swatch, Theme, THEMES};
pub use validator::{validate_sequence, validate_tap, TapOutcome};
