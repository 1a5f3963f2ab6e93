//! Actions accepted by the game-state reducer.

use chrono::{DateTime, Utc};

use crate::stats::PlayerStats;
use crate::types::{CellIndex, Difficulty, Pattern, ThemeId};

/// Game actions that transition [`crate::GameState`]
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    /// Reset the session to level 1 and mark it active
    StartGame,
    /// Install the target pattern and start showing it
    SetPattern(Pattern),
    /// Presentation finished; accept taps
    BeginPlayerTurn,
    /// Append a validated tap
    RecordInput(CellIndex),
    /// Pattern reproduced: award points and stars, advance the level
    PatternSucceeded,
    /// Wrong tap: clear the attempt
    PatternFailed,
    /// End the session and fold it into the lifetime stats
    EndGame { played_at: DateTime<Utc> },
    /// Select a theme (ignored unless unlocked)
    SetTheme(ThemeId),
    /// Unlock a theme (idempotent)
    UnlockTheme(ThemeId),
    SetDifficulty(Difficulty),
    /// Replace the lifetime stats with a loaded record
    LoadStats(PlayerStats),
    /// Forget every lifetime stat and return to the default theme
    ResetProgress,
}

/// Payload-free discriminant of [`GameAction`], used for names in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    StartGame,
    SetPattern,
    BeginPlayerTurn,
    RecordInput,
    PatternSucceeded,
    PatternFailed,
    EndGame,
    SetTheme,
    UnlockTheme,
    SetDifficulty,
    LoadStats,
    ResetProgress,
}

impl ActionKind {
    /// Parse an action name (case-insensitive).
    ///
    /// Unknown names yield `None`; callers treat that as "dispatch nothing".
    ///
    /// # Examples
    ///
    /// ```
    /// use memory_quest_core::ActionKind;
    ///
    /// assert_eq!(ActionKind::from_str("PATTERN_SUCCESS"), Some(ActionKind::PatternSucceeded));
    /// assert_eq!(ActionKind::from_str("endGame"), Some(ActionKind::EndGame));
    /// assert_eq!(ActionKind::from_str("DANCE"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "startgame" => Some(ActionKind::StartGame),
            "setpattern" => Some(ActionKind::SetPattern),
            "beginplayerturn" | "startplayerturn" => Some(ActionKind::BeginPlayerTurn),
            "recordinput" | "addplayerinput" => Some(ActionKind::RecordInput),
            "patternsucceeded" | "patternsuccess" => Some(ActionKind::PatternSucceeded),
            "patternfailed" => Some(ActionKind::PatternFailed),
            "endgame" => Some(ActionKind::EndGame),
            "settheme" => Some(ActionKind::SetTheme),
            "unlocktheme" => Some(ActionKind::UnlockTheme),
            "setdifficulty" => Some(ActionKind::SetDifficulty),
            "loadstats" | "updatestats" => Some(ActionKind::LoadStats),
            "resetprogress" => Some(ActionKind::ResetProgress),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::StartGame => "startGame",
            ActionKind::SetPattern => "setPattern",
            ActionKind::BeginPlayerTurn => "beginPlayerTurn",
            ActionKind::RecordInput => "recordInput",
            ActionKind::PatternSucceeded => "patternSucceeded",
            ActionKind::PatternFailed => "patternFailed",
            ActionKind::EndGame => "endGame",
            ActionKind::SetTheme => "setTheme",
            ActionKind::UnlockTheme => "unlockTheme",
            ActionKind::SetDifficulty => "setDifficulty",
            ActionKind::LoadStats => "loadStats",
            ActionKind::ResetProgress => "resetProgress",
        }
    }
}

impl GameAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            GameAction::StartGame => ActionKind::StartGame,
            GameAction::SetPattern(_) => ActionKind::SetPattern,
            GameAction::BeginPlayerTurn => ActionKind::BeginPlayerTurn,
            GameAction::RecordInput(_) => ActionKind::RecordInput,
            GameAction::PatternSucceeded => ActionKind::PatternSucceeded,
            GameAction::PatternFailed => ActionKind::PatternFailed,
            GameAction::EndGame { .. } => ActionKind::EndGame,
            GameAction::SetTheme(_) => ActionKind::SetTheme,
            GameAction::UnlockTheme(_) => ActionKind::UnlockTheme,
            GameAction::SetDifficulty(_) => ActionKind::SetDifficulty,
            GameAction::LoadStats(_) => ActionKind::LoadStats,
            GameAction::ResetProgress => ActionKind::ResetProgress,
        }
    }
}
