use memory_quest::core::{theme, GameAction, GameState, SessionResult, TapOutcome};
use memory_quest::term::{encode_diff_into, FrameBuffer, GameFrame, GameView, Viewport};
use memory_quest::types::{Pattern, ThemeId};

fn player_turn() -> GameState {
    let mut state = GameState::new();
    state.apply_action(GameAction::StartGame);
    let pattern: Pattern = [0, 3].into_iter().collect();
    state.apply_action(GameAction::SetPattern(pattern));
    state.apply_action(GameAction::BeginPlayerTurn);
    state
}

#[test]
fn term_view_renders_border_corners() {
    let state = GameState::new();
    let view = GameView::default();

    // 2x2 grid of 8x3 cells with 1-cell gaps: 19x9 inside, 21x11 with border,
    // centered vertically between the banner and the footer.
    let fb = view.render(&GameFrame::new(&state), Viewport::new(21, 15));

    assert_eq!(fb.get(0, 2).unwrap().ch, '┌');
    assert_eq!(fb.get(20, 2).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 12).unwrap().ch, '└');
    assert_eq!(fb.get(20, 12).unwrap().ch, '┘');
}

#[test]
fn term_view_lights_the_highlighted_cell() {
    let mut state = GameState::new();
    state.apply_action(GameAction::StartGame);
    let pattern: Pattern = [3].into_iter().collect();
    state.apply_action(GameAction::SetPattern(pattern));

    let view = GameView::default();
    let vp = Viewport::new(21, 15);
    let frame = GameFrame {
        highlighted: Some(3),
        step: Some((1, 1)),
        ..GameFrame::new(&state)
    };
    let fb = view.render(&frame, vp);

    let palette = &theme(ThemeId::Classic).palette;
    let (x3, y3) = view.cell_origin(0, 2, 2, 3);
    let lit = fb.get(x3, y3).unwrap();
    assert_eq!(lit.style.bg, palette[3].color);
    assert!(lit.style.bold);

    let (x0, y0) = view.cell_origin(0, 2, 2, 0);
    let unlit = fb.get(x0, y0).unwrap();
    assert_ne!(unlit.style.bg, palette[0].color);
    assert!(!unlit.style.bold);

    // Glyph sits in the middle of the cell.
    assert_eq!(fb.get(x3 + 4, y3 + 1).unwrap().ch, palette[3].glyph);
}

#[test]
fn term_view_cursor_only_during_player_turn() {
    let state = player_turn();
    let view = GameView::default();
    let vp = Viewport::new(21, 15);
    let (x, y) = view.cell_origin(0, 2, 2, 1);

    let frame = GameFrame {
        cursor: Some(1),
        ..GameFrame::new(&state)
    };
    let fb = view.render(&frame, vp);
    assert_eq!(fb.get(x, y + 1).unwrap().ch, '▶');
    assert_eq!(fb.get(x + 7, y + 1).unwrap().ch, '◀');

    // Hidden while an outcome is resolving.
    let frame = GameFrame {
        cursor: Some(1),
        pending: Some(TapOutcome::LevelComplete),
        ..GameFrame::new(&state)
    };
    let fb = view.render(&frame, vp);
    assert_ne!(fb.get(x, y + 1).unwrap().ch, '▶');
}

#[test]
fn term_view_results_overlay_after_game_over() {
    let mut state = player_turn();
    state.apply_action(GameAction::PatternSucceeded);
    state.apply_action(GameAction::EndGame {
        played_at: chrono::Utc::now(),
    });

    let frame = GameFrame {
        result: Some(SessionResult {
            score: 10,
            level: 2,
            stars: 1,
            new_best: true,
        }),
        ..GameFrame::new(&state)
    };
    let fb = GameView::default().render(&frame, Viewport::new(80, 30));
    assert!(fb.contains_text("GAME OVER"));
    assert!(fb.contains_text("Score      10"));
    assert!(fb.contains_text("NEW BEST!"));
}

#[test]
fn term_view_unchanged_frame_encodes_to_nothing() {
    let state = player_turn();
    let view = GameView::default();
    let vp = Viewport::new(80, 30);

    let a = view.render(&GameFrame::new(&state), vp);
    let mut b = FrameBuffer::new(1, 1);
    view.render_into(&GameFrame::new(&state), vp, &mut b);

    let mut out = Vec::new();
    encode_diff_into(&a, &b, &mut out).unwrap();
    assert!(out.is_empty());

    let lit = GameFrame {
        highlighted: Some(0),
        ..GameFrame::new(&state)
    };
    view.render_into(&lit, vp, &mut b);
    encode_diff_into(&a, &b, &mut out).unwrap();
    assert!(!out.is_empty());
}
