//! GameView: maps a running session into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{theme, GameState, SessionResult, Swatch, TapOutcome, Theme};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CellIndex, Phase};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything the game screen shows for one frame.
#[derive(Debug, Clone, Copy)]
pub struct GameFrame<'a> {
    pub state: &'a GameState,
    /// Cell lit by the sequencer
    pub highlighted: Option<CellIndex>,
    /// Arrow-key selection; drawn only during the player turn
    pub cursor: Option<CellIndex>,
    /// One-based `(step, total)` while the pattern is shown
    pub step: Option<(usize, usize)>,
    pub pending: Option<TapOutcome>,
    pub result: Option<SessionResult>,
}

impl<'a> GameFrame<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            highlighted: None,
            cursor: None,
            step: None,
            pending: None,
            result: None,
        }
    }
}

const TEXT: Rgb = Rgb::new(230, 230, 235);
const MUTED: Rgb = Rgb::new(150, 150, 165);
const GOLD: Rgb = Rgb::new(250, 204, 21);

/// Renderer for the game screen.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2:1 columns to rows keeps cells roughly square.
        Self {
            cell_w: 8,
            cell_h: 3,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(3),
            cell_h: cell_h.max(1),
        }
    }

    /// Status line above the grid.
    pub fn banner(frame: &GameFrame<'_>) -> String {
        match frame.state.phase() {
            Phase::ShowingPattern => match frame.step {
                Some((step, total)) => format!("WATCH! {step}/{total}"),
                None => "WATCH!".to_string(),
            },
            Phase::PlayerTurn => match frame.pending {
                Some(TapOutcome::LevelComplete) => "GREAT!".to_string(),
                Some(TapOutcome::Failure { .. }) => "OOPS!".to_string(),
                _ => "YOUR TURN!".to_string(),
            },
            Phase::Idle => "GET READY...".to_string(),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, frame: &GameFrame<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        let state = frame.state;
        let theme = theme(state.theme());
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT, theme.backdrop).into_cell(' '));

        let grid = state.grid_size() as u16;
        let inner_w = grid * self.cell_w + grid + 1;
        let inner_h = grid * self.cell_h + grid + 1;
        let frame_w = inner_w + 2;
        let frame_h = inner_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::new(Rgb::new(200, 200, 210), theme.backdrop);
        let well = CellStyle::new(MUTED, theme.backdrop.scaled(60));
        fb.fill_rect(start_x + 1, start_y + 1, inner_w, inner_h, ' ', well);
        fb.draw_box(start_x, start_y, frame_w, frame_h, border);

        let banner = Self::banner(frame);
        let banner_style = CellStyle::new(GOLD, theme.backdrop).bold();
        fb.put_str_centered(
            start_x,
            start_y.saturating_sub(2),
            frame_w,
            &banner,
            banner_style,
        );

        let show_cursor = state.phase() == Phase::PlayerTurn && frame.pending.is_none();
        for cell in 0..state.cell_count() as u8 {
            let lit = frame.highlighted == Some(cell);
            let cursor = show_cursor && frame.cursor == Some(cell);
            self.draw_grid_cell(fb, theme, start_x, start_y, grid, cell, lit, cursor);
        }

        self.draw_side_panel(fb, frame, theme, viewport, start_x, start_y, frame_w);
        self.draw_footer(fb, frame, theme, viewport);

        if let (Some(result), false) = (frame.result, state.is_playing()) {
            self.draw_results(fb, &result, theme, viewport);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &GameFrame<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    /// Top-left corner of `cell` in screen coordinates.
    pub fn cell_origin(&self, start_x: u16, start_y: u16, grid: u16, cell: u8) -> (u16, u16) {
        let col = cell as u16 % grid;
        let row = cell as u16 / grid;
        let px = start_x + 2 + col * (self.cell_w + 1);
        let py = start_y + 2 + row * (self.cell_h + 1);
        (px, py)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_grid_cell(
        &self,
        fb: &mut FrameBuffer,
        theme: &Theme,
        start_x: u16,
        start_y: u16,
        grid: u16,
        cell: u8,
        lit: bool,
        cursor: bool,
    ) {
        let Swatch { color, glyph } = theme.swatch_for_cell(cell);
        let (px, py) = self.cell_origin(start_x, start_y, grid, cell);

        let style = if lit {
            CellStyle::new(Rgb::new(255, 255, 255), color).bold()
        } else {
            CellStyle::new(color.scaled(80), color.scaled(35))
        };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

        let mid_y = py + self.cell_h / 2;
        fb.put_char(px + self.cell_w / 2, mid_y, glyph, style);

        if cursor {
            let mark = CellStyle { fg: TEXT, ..style }.bold();
            fb.put_char(px, mid_y, '▶', mark);
            fb.put_char(px + self.cell_w - 1, mid_y, '◀', mark);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        frame: &GameFrame<'_>,
        theme: &Theme,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(3);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(TEXT, theme.backdrop).bold();
        let value = CellStyle::new(MUTED, theme.backdrop);
        let state = frame.state;

        let rows: [(&str, u32); 4] = [
            ("LEVEL", state.level()),
            ("SCORE", state.score()),
            ("STARS", state.stars()),
            ("BEST", state.stats().best_score),
        ];
        let mut y = start_y;
        for (name, v) in rows {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }
        fb.put_str(panel_x, y, "THEME", label);
        fb.put_str(panel_x, y.saturating_add(1), theme.name, value);
    }

    fn draw_footer(&self, fb: &mut FrameBuffer, frame: &GameFrame<'_>, theme: &Theme, viewport: Viewport) {
        let y = viewport.height.saturating_sub(1);
        let hint = if frame.state.is_playing() {
            "arrows move  enter/space tap  1234 qwer asdf zxcv  esc end"
        } else {
            "enter start  esc menu"
        };
        let style = CellStyle::new(MUTED, theme.backdrop).dim();
        fb.put_str_centered(0, y, viewport.width, hint, style);
    }

    fn draw_results(&self, fb: &mut FrameBuffer, result: &SessionResult, theme: &Theme, viewport: Viewport) {
        let w = 28u16.min(viewport.width);
        let h = if result.new_best { 9 } else { 8 };
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;

        let panel = CellStyle::new(TEXT, Rgb::new(15, 15, 25));
        fb.fill_rect(x, y, w, h, ' ', panel);
        fb.draw_box(x, y, w, h, panel);

        let inner_x = x + 1;
        let inner_w = w.saturating_sub(2);
        fb.put_str_centered(inner_x, y + 1, inner_w, "GAME OVER", panel.bold());

        let line = |label: &str, v: u32| format!("{label:<7}{v:>6}");
        fb.put_str_centered(inner_x, y + 3, inner_w, &line("Score", result.score), panel);
        fb.put_str_centered(inner_x, y + 4, inner_w, &line("Level", result.level), panel);
        fb.put_str_centered(inner_x, y + 5, inner_w, &line("Stars", result.stars), panel);

        let mut next_y = y + 6;
        if result.new_best {
            let gold = CellStyle { fg: GOLD, ..panel }.bold();
            fb.put_str_centered(inner_x, next_y, inner_w, "NEW BEST!", gold);
            next_y += 1;
        }
        let hint = CellStyle {
            fg: theme.palette[1].color,
            ..panel
        };
        fb.put_str_centered(inner_x, next_y, inner_w, "enter again  esc menu", hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameAction;
    use crate::types::Pattern;

    fn showing(cells: &[u8]) -> GameState {
        let mut state = GameState::new();
        state.apply_action(GameAction::StartGame);
        let pattern: Pattern = cells.iter().copied().collect();
        state.apply_action(GameAction::SetPattern(pattern));
        state
    }

    #[test]
    fn banner_follows_phase() {
        let idle = GameState::new();
        assert_eq!(GameView::banner(&GameFrame::new(&idle)), "GET READY...");

        let state = showing(&[1, 2]);
        let frame = GameFrame {
            step: Some((1, 2)),
            ..GameFrame::new(&state)
        };
        assert_eq!(GameView::banner(&frame), "WATCH! 1/2");

        let mut state = state;
        state.apply_action(GameAction::BeginPlayerTurn);
        assert_eq!(GameView::banner(&GameFrame::new(&state)), "YOUR TURN!");
    }

    #[test]
    fn highlighted_cell_uses_full_color() {
        let view = GameView::default();
        let state = showing(&[3]);
        let vp = Viewport::new(80, 30);
        let frame = GameFrame {
            highlighted: Some(3),
            ..GameFrame::new(&state)
        };
        let fb = view.render(&frame, vp);

        let frame_w = 2 * 8 + 3 + 2;
        let frame_h = 2 * 3 + 3 + 2;
        let start_x = (80 - frame_w) / 2;
        let start_y = (30 - frame_h) / 2;
        let (px, py) = view.cell_origin(start_x, start_y, 2, 3);
        let lit = fb.get(px, py).unwrap();
        let swatch = theme(state.theme()).swatch_for_cell(3);
        assert_eq!(lit.style.bg, swatch.color);

        let (qx, qy) = view.cell_origin(start_x, start_y, 2, 0);
        let unlit = fb.get(qx, qy).unwrap();
        assert_ne!(unlit.style.bg, theme(state.theme()).swatch_for_cell(0).color);
    }

    #[test]
    fn side_panel_shows_score_labels() {
        let view = GameView::default();
        let state = showing(&[0]);
        let fb = view.render(&GameFrame::new(&state), Viewport::new(80, 30));
        assert!(fb.contains_text("SCORE"));
        assert!(fb.contains_text("LEVEL"));
        assert!(fb.contains_text("Classic Shapes"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let state = showing(&[0, 1]);
        let fb = view.render(&GameFrame::new(&state), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
