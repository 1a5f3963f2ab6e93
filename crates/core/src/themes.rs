//! Theme catalog - static palettes and their star unlock thresholds.

use crate::types::{Rgb, ThemeId};

/// One visual variant of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub color: Rgb,
    /// Single-width glyph drawn in the middle of the cell
    pub glyph: char,
}

const fn swatch(r: u8, g: u8, b: u8, glyph: char) -> Swatch {
    Swatch {
        color: Rgb::new(r, g, b),
        glyph,
    }
}

/// Immutable catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: ThemeId,
    pub name: &'static str,
    pub palette: [Swatch; 6],
    /// Screen background behind the grid
    pub backdrop: Rgb,
    /// Total stars required; 0 for the default theme
    pub unlock_requirement: u32,
}

impl Theme {
    /// Swatch for a cell (palette repeats across the grid)
    pub fn swatch_for_cell(&self, cell: u8) -> Swatch {
        self.palette[(cell as usize) % self.palette.len()]
    }

    /// Unlock progress in percent, capped at 100
    pub fn unlock_progress(&self, total_stars: u32) -> u8 {
        if self.unlock_requirement == 0 {
            return 100;
        }
        let pct = (total_stars as u64) * 100 / (self.unlock_requirement as u64);
        pct.min(100) as u8
    }

    pub fn is_earned(&self, total_stars: u32) -> bool {
        total_stars >= self.unlock_requirement
    }
}

pub const THEMES: [Theme; 4] = [
    Theme {
        id: ThemeId::Classic,
        name: "Classic Shapes",
        palette: [
            swatch(239, 68, 68, '●'),
            swatch(59, 130, 246, '■'),
            swatch(34, 197, 94, '▲'),
            swatch(250, 204, 21, '◆'),
            swatch(168, 85, 247, '★'),
            swatch(236, 72, 153, '♥'),
        ],
        backdrop: Rgb::new(60, 30, 70),
        unlock_requirement: 0,
    },
    Theme {
        id: ThemeId::Space,
        name: "Space Adventure",
        palette: [
            swatch(79, 70, 229, '▲'),
            swatch(147, 51, 234, '★'),
            swatch(37, 99, 235, '☾'),
            swatch(6, 182, 212, '◎'),
            swatch(236, 72, 153, '○'),
            swatch(249, 115, 22, '✦'),
        ],
        backdrop: Rgb::new(20, 20, 60),
        unlock_requirement: 50,
    },
    Theme {
        id: ThemeId::Jungle,
        name: "Jungle Friends",
        palette: [
            swatch(22, 163, 74, '♣'),
            swatch(16, 185, 129, '❦'),
            swatch(132, 204, 22, '✿'),
            swatch(234, 179, 8, '♠'),
            swatch(249, 115, 22, '☘'),
            swatch(239, 68, 68, '♦'),
        ],
        backdrop: Rgb::new(15, 50, 25),
        unlock_requirement: 100,
    },
    Theme {
        id: ThemeId::Ocean,
        name: "Ocean World",
        palette: [
            swatch(37, 99, 235, '≈'),
            swatch(6, 182, 212, '§'),
            swatch(20, 184, 166, '¤'),
            swatch(96, 165, 250, '∞'),
            swatch(99, 102, 241, '~'),
            swatch(168, 85, 247, '*'),
        ],
        backdrop: Rgb::new(10, 35, 60),
        unlock_requirement: 200,
    },
];

/// Look up a theme by id
pub fn theme(id: ThemeId) -> &'static Theme {
    THEMES
        .iter()
        .find(|t| t.id == id)
        .unwrap_or(&THEMES[0])
}

/// Themes whose threshold `total_stars` meets, in catalog order
pub fn themes_earned(total_stars: u32) -> impl Iterator<Item = ThemeId> {
    THEMES
        .iter()
        .filter(move |t| t.is_earned(total_stars))
        .map(|t| t.id)
}
