//! Pattern sequencer - timed presentation of a pattern
//!
//! The sequencer turns a pattern into a time-ordered stream of highlight
//! events. Time is fed in with [`PatternSequencer::advance`] and events are
//! pulled one at a time with [`PatternSequencer::poll`]; an event only comes
//! out once its full delay has elapsed. Per step the timeline is:
//!
//! ```text
//! lead (300ms) -> Highlight -> lit (pattern speed) -> Clear -> trail (200ms)
//! ```
//!
//! After the last trail the sequencer yields `Finished` once and goes quiet.
//! Every sequencer is bound to the [`Generation`] it was started under.
//! Polling with any other generation cancels it for good.

use crate::types::{CellIndex, Pattern, PATTERN_LEAD_MS, PATTERN_TRAIL_MS};

/// Monotonic session token. Work tagged with an older generation is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// Light up `cell` (step `step` of the pattern)
    Highlight { step: usize, cell: CellIndex },
    /// Turn the highlight off again
    Clear { step: usize },
    /// Every step has been shown; hand over to the player
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Lead,
    Lit,
    Trail,
    Done,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct PatternSequencer {
    pattern: Pattern,
    speed_ms: u32,
    generation: Generation,
    step: usize,
    stage: Stage,
    budget_ms: u64,
}

impl PatternSequencer {
    pub fn new(pattern: &[CellIndex], speed_ms: u32, generation: Generation) -> Self {
        let pattern: Pattern = pattern.iter().copied().collect();
        let stage = if pattern.is_empty() {
            Stage::Trail
        } else {
            Stage::Lead
        };
        Self {
            pattern,
            speed_ms,
            generation,
            step: 0,
            stage,
            budget_ms: 0,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Add elapsed time.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.is_active() {
            self.budget_ms = self.budget_ms.saturating_add(elapsed_ms as u64);
        }
    }

    /// Pull the next event whose delay has fully elapsed.
    pub fn poll(&mut self, live: Generation) -> Option<SequencerEvent> {
        if live != self.generation {
            self.cancel();
        }

        loop {
            match self.stage {
                Stage::Done | Stage::Cancelled => return None,
                Stage::Lead => {
                    if !self.spend(PATTERN_LEAD_MS) {
                        return None;
                    }
                    self.stage = Stage::Lit;
                    return Some(SequencerEvent::Highlight {
                        step: self.step,
                        cell: self.pattern[self.step],
                    });
                }
                Stage::Lit => {
                    if !self.spend(self.speed_ms) {
                        return None;
                    }
                    self.stage = Stage::Trail;
                    return Some(SequencerEvent::Clear { step: self.step });
                }
                Stage::Trail => {
                    // An empty pattern has nothing to trail.
                    if !self.pattern.is_empty() && !self.spend(PATTERN_TRAIL_MS) {
                        return None;
                    }
                    self.step += 1;
                    if self.step >= self.pattern.len() {
                        self.stage = Stage::Done;
                        return Some(SequencerEvent::Finished);
                    }
                    self.stage = Stage::Lead;
                }
            }
        }
    }

    /// Stop for good; no further events are emitted.
    pub fn cancel(&mut self) {
        if self.is_active() {
            self.stage = Stage::Cancelled;
            self.budget_ms = 0;
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.stage, Stage::Done | Stage::Cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        self.stage == Stage::Cancelled
    }

    /// Cell currently lit, if any
    pub fn highlighted(&self) -> Option<CellIndex> {
        match self.stage {
            Stage::Lit => self.pattern.get(self.step).copied(),
            _ => None,
        }
    }

    /// Index of the step being presented (for "step n of m" displays)
    pub fn current_step(&self) -> usize {
        self.step.min(self.pattern.len())
    }

    /// Total presentation time for the whole pattern.
    pub fn total_duration_ms(&self) -> u64 {
        let per_step = (PATTERN_LEAD_MS + PATTERN_TRAIL_MS) as u64 + self.speed_ms as u64;
        per_step * self.pattern.len() as u64
    }

    fn spend(&mut self, cost_ms: u32) -> bool {
        let cost = cost_ms as u64;
        if self.budget_ms < cost {
            return false;
        }
        self.budget_ms -= cost;
        true
    }
}
