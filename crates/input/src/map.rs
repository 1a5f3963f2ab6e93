//! Key mapping from terminal events to UI intents.

use crate::cursor::Direction;
use crate::types::{CellIndex, MAX_GRID_SIZE};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Direct-tap keys, one keyboard row per grid row.
const CELL_ROWS: [&str; MAX_GRID_SIZE as usize] = ["1234", "qwer", "asdf", "zxcv"];

/// Which screen the key arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Menu,
    Game { grid_size: u8 },
    Settings,
    Stats,
}

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Enter/Space: start, play again, or tap the cursor cell
    Confirm,
    /// Esc: leave the current screen or end the running game
    Back,
    Quit,
    Play,
    ShowStats,
    ShowSettings,
    MoveCursor(Direction),
    TapCell(CellIndex),
    ToggleMute,
    CycleDifficulty,
    CycleTheme,
    /// First half of "reset all progress"
    RequestReset,
    /// Second half: the player said yes
    ConfirmReset,
}

/// Map keyboard input to intents for the given screen.
pub fn handle_key_event(key: KeyEvent, ctx: KeyContext) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Esc {
        return match ctx {
            KeyContext::Menu => None,
            _ => Some(Intent::Back),
        };
    }

    match ctx {
        KeyContext::Menu => match key.code {
            KeyCode::Enter => Some(Intent::Play),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'p' => Some(Intent::Play),
                's' => Some(Intent::ShowStats),
                'o' => Some(Intent::ShowSettings),
                'q' => Some(Intent::Quit),
                _ => None,
            },
            _ => None,
        },

        KeyContext::Game { grid_size } => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::Confirm),
            KeyCode::Left => Some(Intent::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Intent::MoveCursor(Direction::Right)),
            KeyCode::Up => Some(Intent::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Intent::MoveCursor(Direction::Down)),
            KeyCode::Char(c) => cell_for_key(c, grid_size).map(Intent::TapCell),
            _ => None,
        },

        KeyContext::Settings => match key.code {
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'm' => Some(Intent::ToggleMute),
                'd' => Some(Intent::CycleDifficulty),
                't' => Some(Intent::CycleTheme),
                'r' => Some(Intent::RequestReset),
                'y' => Some(Intent::ConfirmReset),
                _ => None,
            },
            KeyCode::Backspace => Some(Intent::Back),
            _ => None,
        },

        KeyContext::Stats => match key.code {
            KeyCode::Backspace | KeyCode::Enter => Some(Intent::Back),
            _ => None,
        },
    }
}

/// Cell tapped by a direct key on a `grid_size` grid.
///
/// Keys outside the top-left `grid_size x grid_size` block of the key rows
/// map to nothing.
pub fn cell_for_key(ch: char, grid_size: u8) -> Option<CellIndex> {
    let ch = ch.to_ascii_lowercase();
    let size = grid_size.min(MAX_GRID_SIZE) as usize;
    CELL_ROWS
        .iter()
        .take(size)
        .enumerate()
        .find_map(|(row, keys)| {
            keys.chars()
                .take(size)
                .position(|k| k == ch)
                .map(|col| (row * size + col) as CellIndex)
        })
}

/// Ctrl-C quits from any screen.
pub fn should_quit(key: KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
