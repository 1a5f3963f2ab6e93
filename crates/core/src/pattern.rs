//! Pattern generation and level progression rules.

use crate::rng::RandomSource;
use crate::types::{cell_count, Pattern, MAX_GRID_SIZE, MIN_GRID_SIZE};

/// Grid edge for a level: `min(4, floor((level - 1) / 3) + 2)`.
///
/// Levels 1-3 play on 2x2, 4-6 on 3x3, 7+ on 4x4. Level 0 is treated as 1.
pub fn grid_size_for_level(level: u32) -> u8 {
    let step = level.max(1).saturating_sub(1) / 3;
    let size = (MIN_GRID_SIZE as u32).saturating_add(step);
    size.min(MAX_GRID_SIZE as u32) as u8
}

/// Pattern length for a level on a grid: `min(level + 1, grid_size²)`.
pub fn pattern_len(level: u32, grid_size: u8) -> usize {
    let wanted = level.saturating_add(1) as usize;
    wanted.min(cell_count(grid_size))
}

/// Generate the pattern for `level` on a `grid_size` grid.
///
/// Each step is an independent uniform draw, so cells may repeat.
pub fn generate_pattern(level: u32, grid_size: u8, rng: &mut impl RandomSource) -> Pattern {
    let grid_size = grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
    let cells = cell_count(grid_size) as u32;
    let len = pattern_len(level, grid_size);

    let mut pattern = Pattern::new();
    for _ in 0..len {
        pattern.push(rng.next_below(cells) as u8);
    }
    pattern
}

/// Check that a pattern is installable on a grid: non-empty, and every index
/// is in `[0, grid_size²)`. Cells may repeat, so length is not bounded by the
/// cell count.
pub fn is_valid_pattern(pattern: &[u8], grid_size: u8) -> bool {
    let cells = cell_count(grid_size);
    !pattern.is_empty() && pattern.iter().all(|&c| (c as usize) < cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRng, SimpleRng};
    use proptest::prelude::*;

    #[test]
    fn grid_size_steps_every_three_levels() {
        let sizes: Vec<u8> = (1..=10).map(grid_size_for_level).collect();
        assert_eq!(sizes, vec![2, 2, 2, 3, 3, 3, 4, 4, 4, 4]);
        assert_eq!(grid_size_for_level(0), 2);
        assert_eq!(grid_size_for_level(u32::MAX), 4);
    }

    #[test]
    fn pattern_len_caps_at_cell_count() {
        assert_eq!(pattern_len(1, 2), 2);
        assert_eq!(pattern_len(3, 2), 4);
        assert_eq!(pattern_len(5, 2), 4);
        assert_eq!(pattern_len(5, 3), 6);
        assert_eq!(pattern_len(40, 4), 16);
    }

    #[test]
    fn level_five_on_small_grid_truncates_to_four() {
        let mut rng = ScriptedRng::new(vec![0, 3, 1, 2, 0, 1]);
        let p = generate_pattern(5, 2, &mut rng);
        assert_eq!(p.as_slice(), &[0, 3, 1, 2]);
    }

    #[test]
    fn generated_patterns_are_reproducible() {
        let a = generate_pattern(6, 3, &mut SimpleRng::new(99));
        let b = generate_pattern(6, 3, &mut SimpleRng::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn validity_checks_bounds_and_emptiness() {
        assert!(is_valid_pattern(&[0, 3], 2));
        assert!(!is_valid_pattern(&[], 2));
        assert!(!is_valid_pattern(&[4], 2));
        assert!(is_valid_pattern(&[8], 3));
        assert!(is_valid_pattern(&[0, 1, 2, 3, 0], 2));
    }

    proptest! {
        #[test]
        fn generated_length_and_range(level in 1u32..200, grid in 2u8..=4, seed in any::<u32>()) {
            let p = generate_pattern(level, grid, &mut SimpleRng::new(seed));
            let cells = cell_count(grid);
            prop_assert_eq!(p.len(), ((level + 1) as usize).min(cells));
            prop_assert!(p.iter().all(|&c| (c as usize) < cells));
            prop_assert!(is_valid_pattern(&p, grid));
        }

        #[test]
        fn grid_size_is_monotone_and_bounded(level in 1u32..10_000) {
            let g = grid_size_for_level(level);
            prop_assert!((2..=4).contains(&g));
            prop_assert!(grid_size_for_level(level + 1) >= g);
            prop_assert_eq!(g as u32, 4u32.min((level - 1) / 3 + 2));
        }
    }
}
