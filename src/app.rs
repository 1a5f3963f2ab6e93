//! App: screen navigation and intent dispatch.
//!
//! The app owns the visible [`Screen`] and the game [`Session`]. Keys are
//! mapped to intents for the current screen and applied here. Leaving the
//! game screen always ends the running session so none of its timers
//! outlive the screen.

use crossterm::event::KeyEvent;

use crate::core::{AudioSink, RandomSource, Session, StatsStore};
use crate::input::{handle_key_event, should_quit, GridCursor, Intent, KeyContext};
use crate::term::{render_menu, render_settings, render_stats};
use crate::term::{FrameBuffer, GameFrame, GameView, SettingsFrame, Viewport};
use crate::types::{Phase, Screen};

pub struct App<A, S, R> {
    screen: Screen,
    session: Session<A, S, R>,
    cursor: GridCursor,
    view: GameView,
    reset_armed: bool,
    quit: bool,
}

impl<A, S, R> App<A, S, R>
where
    A: AudioSink,
    S: StatsStore,
    R: RandomSource,
{
    pub fn new(session: Session<A, S, R>) -> Self {
        Self {
            screen: Screen::default(),
            session,
            cursor: GridCursor::new(),
            view: GameView::default(),
            reset_armed: false,
            quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &Session<A, S, R> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<A, S, R> {
        &mut self.session
    }

    pub fn cursor(&self) -> GridCursor {
        self.cursor
    }

    pub fn reset_armed(&self) -> bool {
        self.reset_armed
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn key_context(&self) -> KeyContext {
        match self.screen {
            Screen::Menu => KeyContext::Menu,
            Screen::Game => KeyContext::Game {
                grid_size: self.session.state().grid_size(),
            },
            Screen::Settings => KeyContext::Settings,
            Screen::Stats => KeyContext::Stats,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if should_quit(key) {
            self.quit = true;
            return;
        }
        if let Some(intent) = handle_key_event(key, self.key_context()) {
            self.handle_intent(intent);
        }
    }

    pub fn handle_intent(&mut self, intent: Intent) {
        log::debug!("{:?} on {}", intent, self.screen.as_str());
        match self.screen {
            Screen::Menu => self.on_menu(intent),
            Screen::Game => self.on_game(intent),
            Screen::Settings => self.on_settings(intent),
            Screen::Stats => {
                if intent == Intent::Back {
                    self.navigate(Screen::Menu);
                }
            }
        }
    }

    /// Switch screens. Leaving the game screen ends any running session.
    pub fn navigate(&mut self, to: Screen) {
        if to == self.screen {
            return;
        }
        if self.screen == Screen::Game {
            self.session.leave();
        }
        self.reset_armed = false;
        log::debug!("screen {} -> {}", self.screen.as_str(), to.as_str());
        self.screen = to;
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.session.tick(elapsed_ms);
        self.cursor.clamp(self.session.state().grid_size());
    }

    /// Final cleanup before the process exits.
    pub fn shutdown(&mut self) {
        self.session.leave();
    }

    pub fn render(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        let state = self.session.state();
        match self.screen {
            Screen::Menu => render_menu(state.stats(), state.theme(), viewport, fb),
            Screen::Stats => render_stats(state.stats(), state.theme(), viewport, fb),
            Screen::Settings => {
                let frame = SettingsFrame {
                    stats: state.stats(),
                    theme: state.theme(),
                    difficulty: state.difficulty(),
                    muted: self.session.is_muted(),
                    reset_armed: self.reset_armed,
                };
                render_settings(&frame, viewport, fb);
            }
            Screen::Game => {
                let grid = state.grid_size();
                let frame = GameFrame {
                    state,
                    highlighted: self.session.highlighted_cell(),
                    cursor: Some(self.cursor.cell(grid)),
                    step: self.session.presentation_step(),
                    pending: self.session.pending_outcome(),
                    result: self.session.last_result(),
                };
                self.view.render_into(&frame, viewport, fb);
            }
        }
    }

    fn on_menu(&mut self, intent: Intent) {
        match intent {
            Intent::Play => self.navigate(Screen::Game),
            Intent::ShowStats => self.navigate(Screen::Stats),
            Intent::ShowSettings => self.navigate(Screen::Settings),
            Intent::Quit => self.quit = true,
            _ => {}
        }
    }

    fn on_game(&mut self, intent: Intent) {
        let playing = self.session.state().is_playing();
        match intent {
            Intent::Confirm if playing => {
                if self.session.state().phase() == Phase::PlayerTurn {
                    let cell = self.cursor.cell(self.session.state().grid_size());
                    self.session.tap(cell);
                }
            }
            Intent::Confirm => {
                self.cursor.reset();
                self.session.start_game();
            }
            Intent::Back if playing => self.session.end_game(),
            Intent::Back => self.navigate(Screen::Menu),
            Intent::MoveCursor(dir) => {
                self.cursor.move_by(dir, self.session.state().grid_size());
            }
            Intent::TapCell(cell) => {
                self.session.tap(cell);
            }
            _ => {}
        }
    }

    fn on_settings(&mut self, intent: Intent) {
        let armed = std::mem::take(&mut self.reset_armed);
        match intent {
            Intent::ToggleMute => {
                let muted = !self.session.is_muted();
                self.session.set_muted(muted);
            }
            Intent::CycleDifficulty => {
                let next = self.session.state().difficulty().cycle();
                self.session.set_difficulty(next);
            }
            Intent::CycleTheme => {
                self.session.cycle_theme();
            }
            Intent::RequestReset => self.reset_armed = true,
            Intent::ConfirmReset if armed => self.session.reset_progress(),
            Intent::Back => self.navigate(Screen::Menu),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameState, RecordingAudio, ScriptedRng};
    use crate::store::MemoryStore;
    use crate::types::{Difficulty, ThemeId};

    type TestApp = App<RecordingAudio, MemoryStore, ScriptedRng>;

    fn app_with(store: MemoryStore) -> TestApp {
        App::new(Session::new(
            GameState::new(),
            ScriptedRng::new([1]),
            RecordingAudio::new(),
            store,
        ))
    }

    fn app() -> TestApp {
        app_with(MemoryStore::new())
    }

    #[test]
    fn menu_navigation() {
        let mut app = app();
        assert_eq!(app.screen(), Screen::Menu);
        app.handle_intent(Intent::ShowStats);
        assert_eq!(app.screen(), Screen::Stats);
        app.handle_intent(Intent::Back);
        app.handle_intent(Intent::ShowSettings);
        assert_eq!(app.screen(), Screen::Settings);
        app.handle_intent(Intent::Back);
        app.handle_intent(Intent::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn confirm_starts_then_taps_the_cursor_cell() {
        let mut app = app();
        app.handle_intent(Intent::Play);
        assert!(!app.session().state().is_playing());

        app.handle_intent(Intent::Confirm);
        assert!(app.session().state().is_playing());
        app.tick(60_000);
        assert_eq!(app.session().state().phase(), Phase::PlayerTurn);

        // Pattern is all ones; the cursor starts on cell 0.
        app.handle_intent(Intent::MoveCursor(crate::input::Direction::Right));
        app.handle_intent(Intent::Confirm);
        assert_eq!(app.session().state().player_input(), &[1]);
    }

    #[test]
    fn back_during_play_ends_the_session_then_returns_to_menu() {
        let mut app = app();
        app.handle_intent(Intent::Play);
        app.handle_intent(Intent::Confirm);
        app.handle_intent(Intent::Back);
        assert_eq!(app.screen(), Screen::Game);
        assert!(app.session().last_result().is_some());
        app.handle_intent(Intent::Back);
        assert_eq!(app.screen(), Screen::Menu);
    }

    #[test]
    fn leaving_the_game_screen_ends_the_session() {
        let mut app = app();
        app.handle_intent(Intent::Play);
        app.handle_intent(Intent::Confirm);
        app.navigate(Screen::Stats);
        assert!(!app.session().state().is_playing());
        assert_eq!(app.session().state().stats().total_games_played, 1);
    }

    #[test]
    fn settings_toggle_and_cycle() {
        let mut app = app();
        app.handle_intent(Intent::ShowSettings);
        app.handle_intent(Intent::ToggleMute);
        assert!(app.session().is_muted());
        app.handle_intent(Intent::CycleDifficulty);
        assert_eq!(app.session().state().difficulty(), Difficulty::Auto.cycle());
        app.handle_intent(Intent::CycleTheme);
        assert_eq!(app.session().state().theme(), ThemeId::Classic);
    }

    #[test]
    fn reset_needs_confirmation() {
        let mut app = app_with(MemoryStore::with_raw(r#"{"bestScore":80}"#));
        app.handle_intent(Intent::ShowSettings);

        app.handle_intent(Intent::ConfirmReset);
        assert_eq!(app.session().state().stats().best_score, 80);

        app.handle_intent(Intent::RequestReset);
        assert!(app.reset_armed());
        app.handle_intent(Intent::ToggleMute);
        assert!(!app.reset_armed());
        app.handle_intent(Intent::ConfirmReset);
        assert_eq!(app.session().state().stats().best_score, 80);

        app.handle_intent(Intent::RequestReset);
        app.handle_intent(Intent::ConfirmReset);
        assert_eq!(app.session().state().stats().best_score, 0);
    }

    #[test]
    fn every_screen_renders() {
        let mut app = app();
        let mut fb = FrameBuffer::new(1, 1);
        for screen in [Screen::Menu, Screen::Game, Screen::Settings, Screen::Stats] {
            app.navigate(screen);
            app.render(Viewport::new(80, 30), &mut fb);
            assert_eq!(fb.width(), 80);
        }
    }
}
