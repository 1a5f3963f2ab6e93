//! Menu, stats and settings screens.
//!
//! Like [`crate::GameView`] these are pure functions of state into a
//! framebuffer.

use crate::core::{theme, Achievement, PlayerStats, Theme, THEMES};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;
use crate::types::{Difficulty, ThemeId};

const TITLE: Rgb = Rgb::new(250, 204, 21);
const TEXT: Rgb = Rgb::new(230, 230, 235);
const MUTED: Rgb = Rgb::new(150, 150, 165);
const OK: Rgb = Rgb::new(34, 197, 94);

/// Settings screen inputs
#[derive(Debug, Clone, Copy)]
pub struct SettingsFrame<'a> {
    pub stats: &'a PlayerStats,
    pub theme: ThemeId,
    pub difficulty: Difficulty,
    pub muted: bool,
    /// "reset all progress" was requested and awaits `y`
    pub reset_armed: bool,
}

fn panel(fb: &mut FrameBuffer, viewport: Viewport, theme: &Theme, w: u16, h: u16) -> (u16, u16, u16) {
    fb.resize(viewport.width, viewport.height);
    fb.clear(CellStyle::new(TEXT, theme.backdrop).into_cell(' '));

    let w = w.min(viewport.width);
    let h = h.min(viewport.height);
    let x = viewport.width.saturating_sub(w) / 2;
    let y = viewport.height.saturating_sub(h) / 2;
    fb.draw_box(x, y, w, h, CellStyle::new(MUTED, theme.backdrop));
    (x, y, w)
}

pub fn render_menu(stats: &PlayerStats, current: ThemeId, viewport: Viewport, fb: &mut FrameBuffer) {
    let theme = theme(current);
    let (x, y, w) = panel(fb, viewport, theme, 40, 14);
    let bg = theme.backdrop;
    let title = CellStyle::new(TITLE, bg).bold();
    let text = CellStyle::new(TEXT, bg);
    let muted = CellStyle::new(MUTED, bg);

    fb.put_str_centered(x, y + 2, w, "MEMORY QUEST", title);
    fb.put_str_centered(x, y + 3, w, "watch, remember, repeat", muted);

    // Palette preview row.
    let preview_w = (theme.palette.len() as u16) * 2 - 1;
    let preview_x = x.saturating_add(w.saturating_sub(preview_w) / 2);
    for (i, s) in theme.palette.iter().enumerate() {
        fb.put_char(preview_x + (i as u16) * 2, y + 5, s.glyph, CellStyle::new(s.color, bg));
    }

    fb.put_str_centered(x, y + 7, w, "[Enter] Play", text.bold());
    fb.put_str_centered(x, y + 8, w, "[S] Stats   [O] Settings", text);
    fb.put_str_centered(x, y + 9, w, "[Q] Quit", text);

    let best = format!("Best {}  Stars {}", stats.best_score, stats.total_stars);
    fb.put_str_centered(x, y + 11, w, &best, muted);
}

pub fn render_stats(stats: &PlayerStats, current: ThemeId, viewport: Viewport, fb: &mut FrameBuffer) {
    let theme = theme(current);
    let (x, y, w) = panel(fb, viewport, theme, 48, 26);
    let bg = theme.backdrop;
    let title = CellStyle::new(TITLE, bg).bold();
    let text = CellStyle::new(TEXT, bg);
    let muted = CellStyle::new(MUTED, bg);
    let left = x + 3;

    fb.put_str_centered(x, y + 1, w, "YOUR STATS", title);
    fb.put_str_centered(x, y + 2, w, stats.player_title(), muted);

    let rows: [(&str, u32); 4] = [
        ("Games played", stats.total_games_played),
        ("Best score", stats.best_score),
        ("Total stars", stats.total_stars),
        ("Longest streak", stats.longest_streak),
    ];
    let mut row_y = y + 4;
    for (label, v) in rows {
        fb.put_str(left, row_y, label, text);
        fb.put_u32(left + 18, row_y, v, text.bold());
        row_y += 1;
    }
    if let Some(at) = stats.last_play_date {
        fb.put_str(left, row_y, "Last played", text);
        fb.put_str(left + 18, row_y, &at.format("%Y-%m-%d").to_string(), text);
    }
    row_y += 2;

    fb.put_str(left, row_y, "ACHIEVEMENTS", title);
    row_y += 1;
    for a in Achievement::ALL {
        let done = a.is_achieved(stats);
        let (mark, style) = if done {
            ('✓', CellStyle::new(OK, bg))
        } else {
            ('·', muted)
        };
        fb.put_char(left, row_y, mark, style);
        fb.put_str(left + 2, row_y, a.name(), if done { text } else { muted });
        row_y += 1;
    }
    row_y += 1;

    fb.put_str(left, row_y, "THEMES", title);
    row_y += 1;
    for t in THEMES.iter() {
        fb.put_str(left, row_y, t.name, text);
        let status = if stats.is_unlocked(t.id) {
            "unlocked".to_string()
        } else {
            format!("{:>3}%", t.unlock_progress(stats.total_stars))
        };
        fb.put_str(left + 18, row_y, &status, muted);
        row_y += 1;
    }

    fb.put_str_centered(x, y + 24, w, "[Esc] Back", muted);
}

pub fn render_settings(frame: &SettingsFrame<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
    let theme = theme(frame.theme);
    let (x, y, w) = panel(fb, viewport, theme, 44, 14);
    let bg = theme.backdrop;
    let title = CellStyle::new(TITLE, bg).bold();
    let text = CellStyle::new(TEXT, bg);
    let muted = CellStyle::new(MUTED, bg);
    let left = x + 3;

    fb.put_str_centered(x, y + 1, w, "SETTINGS", title);

    let sound = if frame.muted { "off" } else { "on" };
    let rows: [(&str, &str); 3] = [
        ("[M] Sound", sound),
        ("[D] Difficulty", frame.difficulty.as_str()),
        ("[T] Theme", theme.name),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
        let row_y = y + 3 + i as u16;
        fb.put_str(left, row_y, label, text);
        fb.put_str(left + 18, row_y, value, text.bold());
    }

    let unlocked = frame.stats.unlocked_themes.len();
    let summary = format!("{unlocked} of {} themes unlocked", THEMES.len());
    fb.put_str(left, y + 7, &summary, muted);

    if frame.reset_armed {
        let warn = CellStyle::new(Rgb::new(239, 68, 68), bg).bold();
        fb.put_str(left, y + 9, "Reset ALL progress? [Y] yes", warn);
    } else {
        fb.put_str(left, y + 9, "[R] Reset progress", text);
    }

    fb.put_str_centered(x, y + 12, w, "[Esc] Back", muted);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport::new(80, 30)
    }

    #[test]
    fn menu_lists_entries() {
        let mut fb = FrameBuffer::new(1, 1);
        render_menu(&PlayerStats::default(), ThemeId::Classic, vp(), &mut fb);
        assert!(fb.contains_text("MEMORY QUEST"));
        assert!(fb.contains_text("[Enter] Play"));
        assert!(fb.contains_text("[Q] Quit"));
    }

    #[test]
    fn stats_show_title_and_progress() {
        let stats = PlayerStats {
            total_games_played: 12,
            total_stars: 25,
            ..PlayerStats::default()
        };
        let mut fb = FrameBuffer::new(1, 1);
        render_stats(&stats, ThemeId::Classic, vp(), &mut fb);
        assert!(fb.contains_text("Regular Player"));
        assert!(fb.contains_text(" 50%"));
        assert!(fb.contains_text("unlocked"));
    }

    #[test]
    fn settings_show_reset_confirmation() {
        let stats = PlayerStats::default();
        let mut frame = SettingsFrame {
            stats: &stats,
            theme: ThemeId::Classic,
            difficulty: Difficulty::Hard,
            muted: true,
            reset_armed: false,
        };
        let mut fb = FrameBuffer::new(1, 1);
        render_settings(&frame, vp(), &mut fb);
        assert!(fb.contains_text("hard"));
        assert!(fb.contains_text("[R] Reset progress"));

        frame.reset_armed = true;
        render_settings(&frame, vp(), &mut fb);
        assert!(fb.contains_text("[Y] yes"));
    }
}
