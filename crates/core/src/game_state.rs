//! Game state module - the session aggregate and its reducer
//!
//! `GameState` owns the level, grid, pattern, taps and turn phase of the
//! current session together with the lifetime [`PlayerStats`]. Every change
//! goes through [`GameState::apply_action`]. Actions whose preconditions don't
//! hold (wrong phase, no active session, out-of-range cells) are no-ops, so a
//! misbehaving caller can never push the state into an illegal shape.

use crate::action::GameAction;
use crate::pattern::{grid_size_for_level, is_valid_pattern};
use crate::stats::PlayerStats;
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    level: u32,
    score: u32,
    stars: u32,
    is_playing: bool,
    phase: Phase,
    pattern: Pattern,
    player_input: Pattern,
    grid_size: u8,
    pattern_speed_ms: u32,
    theme: ThemeId,
    difficulty: Difficulty,
    stats: PlayerStats,
    /// Bumped on every stats mutation (consumed by the persistence listener).
    stats_revision: u64,
}

impl GameState {
    /// Fresh state: idle, empty pattern, first-launch stats
    pub fn new() -> Self {
        Self::with_pattern_speed(PATTERN_SPEED_MS)
    }

    pub fn with_pattern_speed(pattern_speed_ms: u32) -> Self {
        Self {
            level: 1,
            score: 0,
            stars: 0,
            is_playing: false,
            phase: Phase::Idle,
            pattern: Pattern::new(),
            player_input: Pattern::new(),
            grid_size: MIN_GRID_SIZE,
            pattern_speed_ms,
            theme: ThemeId::default(),
            difficulty: Difficulty::default(),
            stats: PlayerStats::default(),
            stats_revision: 0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn stars(&self) -> u32 {
        self.stars
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pattern(&self) -> &[CellIndex] {
        &self.pattern
    }

    pub fn player_input(&self) -> &[CellIndex] {
        &self.player_input
    }

    pub fn grid_size(&self) -> u8 {
        self.grid_size
    }

    pub fn cell_count(&self) -> usize {
        cell_count(self.grid_size)
    }

    pub fn pattern_speed_ms(&self) -> u32 {
        self.pattern_speed_ms
    }

    pub fn theme(&self) -> ThemeId {
        self.theme
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn stats_revision(&self) -> u64 {
        self.stats_revision
    }

    /// Apply a game action.
    ///
    /// Returns whether the state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        let kind = action.kind();
        let changed = match action {
            GameAction::StartGame => {
                self.level = 1;
                self.score = 0;
                self.stars = 0;
                self.pattern.clear();
                self.player_input.clear();
                self.grid_size = MIN_GRID_SIZE;
                self.phase = Phase::Idle;
                self.is_playing = true;
                true
            }
            GameAction::SetPattern(seq) => {
                if !self.is_playing || !is_valid_pattern(&seq, self.grid_size) {
                    false
                } else {
                    self.pattern = seq;
                    self.player_input.clear();
                    self.phase = Phase::ShowingPattern;
                    true
                }
            }
            GameAction::BeginPlayerTurn => {
                if self.phase != Phase::ShowingPattern {
                    false
                } else {
                    self.phase = Phase::PlayerTurn;
                    true
                }
            }
            GameAction::RecordInput(cell) => self.record_input(cell),
            GameAction::PatternSucceeded => self.advance_level(),
            GameAction::PatternFailed => {
                self.player_input.clear();
                true
            }
            GameAction::EndGame { played_at } => {
                if !self.is_playing {
                    false
                } else {
                    self.phase = Phase::Idle;
                    self.is_playing = false;
                    self.stats.record_session(self.score, self.stars, played_at);
                    self.bump_stats();
                    true
                }
            }
            GameAction::SetTheme(id) => {
                if !self.stats.is_unlocked(id) {
                    false
                } else {
                    self.theme = id;
                    true
                }
            }
            GameAction::UnlockTheme(id) => {
                let inserted = self.stats.unlock(id);
                if inserted {
                    self.bump_stats();
                }
                inserted
            }
            GameAction::SetDifficulty(d) => {
                self.difficulty = d;
                true
            }
            GameAction::LoadStats(stats) => {
                self.stats = stats.normalized();
                if !self.stats.is_unlocked(self.theme) {
                    self.theme = ThemeId::default();
                }
                self.bump_stats();
                true
            }
            GameAction::ResetProgress => {
                self.stats = PlayerStats::default();
                self.theme = ThemeId::default();
                self.bump_stats();
                true
            }
        };

        if !changed {
            log::debug!("ignored {} in phase {}", kind.as_str(), self.phase.as_str());
        }
        changed
    }

    /// Consuming form of [`GameState::apply_action`].
    pub fn reduce(mut self, action: GameAction) -> Self {
        self.apply_action(action);
        self
    }

    fn record_input(&mut self, cell: CellIndex) -> bool {
        if self.phase != Phase::PlayerTurn
            || (cell as usize) >= self.cell_count()
            || self.player_input.len() >= self.pattern.len()
        {
            return false;
        }
        self.player_input.push(cell);
        true
    }

    fn advance_level(&mut self) -> bool {
        if !self.is_playing {
            return false;
        }
        let previous = self.level;
        self.level = previous.saturating_add(1);
        self.score = self
            .score
            .saturating_add(previous.saturating_mul(POINTS_PER_LEVEL));
        self.stars = self.stars.saturating_add(previous.div_ceil(2));
        self.player_input.clear();
        self.grid_size = grid_size_for_level(self.level);
        true
    }

    fn bump_stats(&mut self) {
        self.stats_revision = self.stats_revision.wrapping_add(1);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
