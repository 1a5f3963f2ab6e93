//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the game. All
//! types are plain data with no behavior beyond parsing and naming, so they
//! can be shared by the core rules, the terminal renderer and the input layer.
//!
//! # Grid
//!
//! The play area is a square grid whose edge grows with the level:
//!
//! - **Minimum edge**: 2 (4 cells)
//! - **Maximum edge**: 4 (16 cells)
//! - **Cell index**: row-major, `row * grid_size + col`
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `PATTERN_SPEED_MS` | 1000 | Highlight duration per pattern step |
//! | `PATTERN_LEAD_MS` | 300 | Pause before each highlight |
//! | `PATTERN_TRAIL_MS` | 200 | Pause after each highlight |
//! | `FAILURE_RESOLVE_MS` | 500 | Delay between a wrong tap and the results |
//! | `SUCCESS_RESOLVE_MS` | 800 | Delay between a completed pattern and the next one |
//!
//! # Examples
//!
//! ```
//! use memory_quest_types::{Difficulty, Phase, Screen, ThemeId, MAX_CELLS};
//!
//! assert_eq!(ThemeId::from_str("Space"), Some(ThemeId::Space));
//! assert_eq!(Difficulty::default(), Difficulty::Auto);
//! assert_eq!(Phase::default(), Phase::Idle);
//! assert_eq!(Screen::from_str("stats"), Some(Screen::Stats));
//! assert_eq!(MAX_CELLS, 16);
//! ```

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Smallest grid edge (2x2)
pub const MIN_GRID_SIZE: u8 = 2;

/// Largest grid edge (4x4)
pub const MAX_GRID_SIZE: u8 = 4;

/// Number of cells on the largest grid
pub const MAX_CELLS: usize = (MAX_GRID_SIZE as usize) * (MAX_GRID_SIZE as usize);

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default highlight duration for one pattern step
pub const PATTERN_SPEED_MS: u32 = 1000;

/// Pause before each step is highlighted
pub const PATTERN_LEAD_MS: u32 = 300;

/// Pause after each highlight is cleared
pub const PATTERN_TRAIL_MS: u32 = 200;

/// Delay between a wrong tap and ending the session
pub const FAILURE_RESOLVE_MS: u32 = 500;

/// Delay between completing a pattern and presenting the next one
pub const SUCCESS_RESOLVE_MS: u32 = 800;

/// Points awarded per completed level, multiplied by the level number
pub const POINTS_PER_LEVEL: u32 = 10;

/// Storage key of the persisted stats record
pub const STATS_STORAGE_KEY: &str = "memoryMatchQuest_stats";

/// Index of a grid cell (row-major)
pub type CellIndex = u8;

/// A cell sequence. Capacity covers the largest grid, which also bounds the
/// pattern length (`min(level + 1, cells)`).
pub type Pattern = ArrayVec<CellIndex, MAX_CELLS>;

/// Cell count for a grid edge
pub fn cell_count(grid_size: u8) -> usize {
    (grid_size as usize) * (grid_size as usize)
}

/// Turn phase of a session
///
/// - **Idle**: no pattern on screen (before start, between resolution and
///   the next pattern, or after the session ended)
/// - **ShowingPattern**: the sequencer is presenting the pattern
/// - **PlayerTurn**: taps are accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    ShowingPattern,
    PlayerTurn,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::ShowingPattern => "showingPattern",
            Phase::PlayerTurn => "playerTurn",
        }
    }
}

/// Selected difficulty mode.
///
/// Held in the game state for the session, but no rule reads it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    #[default]
    Auto,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Auto,
    ];

    /// Parse difficulty from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use memory_quest_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
    /// assert_eq!(Difficulty::from_str("insane"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "auto" => Some(Difficulty::Auto),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Auto => "auto",
        }
    }

    /// Next mode in settings order, wrapping around
    pub fn cycle(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Auto,
            Difficulty::Auto => Difficulty::Easy,
        }
    }
}

/// Visual theme identifiers, in catalog order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Classic,
    Space,
    Jungle,
    Ocean,
}

impl ThemeId {
    pub const ALL: [ThemeId; 4] = [
        ThemeId::Classic,
        ThemeId::Space,
        ThemeId::Jungle,
        ThemeId::Ocean,
    ];

    /// Parse theme id from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(ThemeId::Classic),
            "space" => Some(ThemeId::Space),
            "jungle" => Some(ThemeId::Jungle),
            "ocean" => Some(ThemeId::Ocean),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Classic => "classic",
            ThemeId::Space => "space",
            ThemeId::Jungle => "jungle",
            ThemeId::Ocean => "ocean",
        }
    }
}

/// Named audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Success,
    Error,
    Tap,
    Star,
    Unlock,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Success => "success",
            SoundCue::Error => "error",
            SoundCue::Tap => "tap",
            SoundCue::Star => "star",
            SoundCue::Unlock => "unlock",
        }
    }
}

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Menu,
    Game,
    Settings,
    Stats,
}

impl Screen {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "menu" => Some(Screen::Menu),
            "game" => Some(Screen::Game),
            "settings" => Some(Screen::Settings),
            "stats" => Some(Screen::Stats),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Menu => "menu",
            Screen::Game => "game",
            Screen::Settings => "settings",
            Screen::Stats => "stats",
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale each channel by `pct` percent (clamped to 255).
    pub const fn scaled(self, pct: u16) -> Self {
        const fn ch(v: u8, pct: u16) -> u8 {
            let s = (v as u16) * pct / 100;
            if s > 255 {
                255
            } else {
                s as u8
            }
        }
        Self {
            r: ch(self.r, pct),
            g: ch(self.g, pct),
            b: ch(self.b, pct),
        }
    }
}
