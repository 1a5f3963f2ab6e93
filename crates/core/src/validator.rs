//! Input validation - judges each tap against the target pattern prefix.

use crate::types::CellIndex;

/// Result of judging one tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Correct so far; keep waiting for taps
    Continue,
    /// The tap completed the pattern
    LevelComplete,
    /// The tap diverged from the pattern at `position`
    ///
    /// `expected` is `None` when the tap fell past the end of the pattern.
    Failure {
        position: usize,
        expected: Option<CellIndex>,
    },
}

impl TapOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, TapOutcome::Failure { .. })
    }
}

/// Judge `tap` given the taps already accepted for this attempt.
///
/// `accepted` must itself be a prefix of `pattern` (the session only records
/// matching taps).
pub fn validate_tap(pattern: &[CellIndex], accepted: &[CellIndex], tap: CellIndex) -> TapOutcome {
    let position = accepted.len();
    let Some(&expected) = pattern.get(position) else {
        return TapOutcome::Failure {
            position,
            expected: None,
        };
    };

    if tap != expected {
        return TapOutcome::Failure {
            position,
            expected: Some(expected),
        };
    }

    if position + 1 == pattern.len() {
        TapOutcome::LevelComplete
    } else {
        TapOutcome::Continue
    }
}

/// Judge a whole tap sequence, stopping at the first divergence.
///
/// An empty sequence is `Continue` (nothing tapped yet).
pub fn validate_sequence(pattern: &[CellIndex], taps: &[CellIndex]) -> TapOutcome {
    let mut outcome = TapOutcome::Continue;
    for (i, &tap) in taps.iter().enumerate() {
        outcome = validate_tap(pattern, &taps[..i], tap);
        match outcome {
            TapOutcome::Continue => {}
            TapOutcome::LevelComplete if i + 1 == taps.len() => {}
            // Extra taps after completion run past the end.
            TapOutcome::LevelComplete => {
                return TapOutcome::Failure {
                    position: i + 1,
                    expected: None,
                }
            }
            TapOutcome::Failure { .. } => return outcome,
        }
    }
    outcome
}
