//! Session controller - runs one game screen's worth of play
//!
//! `Session` wires the pure reducer to its timed and external collaborators:
//! the pattern sequencer, delayed resolutions, the random source, audio and
//! the stats store. It is driven by two inputs only: taps and elapsed time.
//!
//! Every scheduled continuation is tagged with the current [`Generation`].
//! Starting a new game or leaving the screen bumps it, which discards the
//! sequencer and every pending timer at once.
//!
//! After each dispatched action the stats listener checks the stats
//! revision. If it moved, the theme unlock rule runs and the full record is
//! saved. Save failures are logged and play continues.

use std::fmt;

use chrono::Utc;

use crate::action::GameAction;
use crate::audio::{AudioSink, Mixer};
use crate::game_state::GameState;
use crate::pattern::generate_pattern;
use crate::rng::RandomSource;
use crate::scheduler::Scheduler;
use crate::sequencer::{Generation, PatternSequencer, SequencerEvent};
use crate::stats::PlayerStats;
use crate::types::{
    CellIndex, Difficulty, Phase, SoundCue, ThemeId, FAILURE_RESOLVE_MS, SUCCESS_RESOLVE_MS,
};
use crate::validator::{validate_tap, TapOutcome};

/// Durable home of [`PlayerStats`].
///
/// `load` returns `Ok(None)` when nothing has been saved yet.
pub trait StatsStore {
    type Error: fmt::Display;

    fn load(&mut self) -> Result<Option<PlayerStats>, Self::Error>;
    fn save(&mut self, stats: &PlayerStats) -> Result<(), Self::Error>;
}

impl<T: StatsStore + ?Sized> StatsStore for Box<T> {
    type Error = T::Error;

    fn load(&mut self) -> Result<Option<PlayerStats>, Self::Error> {
        (**self).load()
    }

    fn save(&mut self, stats: &PlayerStats) -> Result<(), Self::Error> {
        (**self).save(stats)
    }
}

/// Summary of a finished session, shown on the results overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResult {
    pub score: u32,
    pub level: u32,
    pub stars: u32,
    /// Score beat the best score recorded before this session.
    pub new_best: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTask {
    ResolveFailure,
    ResolveSuccess,
    PlayCue(SoundCue),
}

pub struct Session<A, S, R> {
    state: GameState,
    generation: Generation,
    sequencer: Option<PatternSequencer>,
    scheduler: Scheduler<SessionTask>,
    pending: Option<TapOutcome>,
    last_result: Option<SessionResult>,
    saved_revision: u64,
    rng: R,
    mixer: Mixer<A>,
    store: S,
}

impl<A, S, R> Session<A, S, R>
where
    A: AudioSink,
    S: StatsStore,
    R: RandomSource,
{
    /// Build a session and load the saved stats.
    ///
    /// Missing or unreadable stats leave the first-launch defaults in place.
    pub fn new(state: GameState, rng: R, audio: A, store: S) -> Self {
        let saved_revision = state.stats_revision();
        let mut session = Self {
            state,
            generation: Generation::default(),
            sequencer: None,
            scheduler: Scheduler::new(),
            pending: None,
            last_result: None,
            saved_revision,
            rng,
            mixer: Mixer::new(audio),
            store,
        };
        session.load_stats();
        session
    }

    fn load_stats(&mut self) {
        match self.store.load() {
            Ok(Some(stats)) => {
                log::info!(
                    "loaded stats: {} games, best {}, {} stars",
                    stats.total_games_played,
                    stats.best_score,
                    stats.total_stars
                );
                self.state.apply_action(GameAction::LoadStats(stats));
                // What we just read is already on disk.
                self.saved_revision = self.state.stats_revision();
                if self.apply_unlock_rule() {
                    self.persist();
                }
            }
            Ok(None) => log::info!("no saved stats, starting fresh"),
            Err(e) => log::warn!("could not load saved stats, using defaults: {e}"),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn last_result(&self) -> Option<SessionResult> {
        self.last_result
    }

    /// Outcome waiting for its resolution delay, if any.
    pub fn pending_outcome(&self) -> Option<TapOutcome> {
        self.pending
    }

    /// Cell lit by the sequencer right now
    pub fn highlighted_cell(&self) -> Option<CellIndex> {
        self.sequencer.as_ref().and_then(PatternSequencer::highlighted)
    }

    /// `(step, total)` while the pattern is being shown, one-based.
    pub fn presentation_step(&self) -> Option<(usize, usize)> {
        if self.state.phase() != Phase::ShowingPattern {
            return None;
        }
        let total = self.state.pattern().len();
        let step = self
            .sequencer
            .as_ref()
            .map_or(0, PatternSequencer::current_step);
        Some(((step + 1).min(total), total))
    }

    pub fn is_muted(&self) -> bool {
        self.mixer.is_muted()
    }

    pub fn audio(&self) -> &A {
        self.mixer.sink()
    }

    pub fn audio_mut(&mut self) -> &mut A {
        self.mixer.sink_mut()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply an action and run the stats listener.
    pub fn dispatch(&mut self, action: GameAction) -> bool {
        let changed = self.state.apply_action(action);
        self.sync_stats();
        changed
    }

    /// Start (or restart) a game at level 1.
    pub fn start_game(&mut self) {
        self.invalidate();
        self.last_result = None;
        self.dispatch(GameAction::StartGame);
        log::info!("session started (generation {})", self.generation.value());
        self.next_pattern();
    }

    /// Player tapped `cell`.
    ///
    /// Returns `None` when the tap was ignored: not the player's turn, an
    /// outcome already waiting to resolve, or a cell off the grid.
    pub fn tap(&mut self, cell: CellIndex) -> Option<TapOutcome> {
        if self.state.phase() != Phase::PlayerTurn
            || self.pending.is_some()
            || (cell as usize) >= self.state.cell_count()
        {
            return None;
        }

        self.mixer.play(SoundCue::Tap);
        let outcome = validate_tap(self.state.pattern(), self.state.player_input(), cell);
        match outcome {
            TapOutcome::Continue => {
                self.dispatch(GameAction::RecordInput(cell));
            }
            TapOutcome::LevelComplete => {
                self.dispatch(GameAction::RecordInput(cell));
                self.mixer.play(SoundCue::Success);
                self.mixer.play(SoundCue::Star);
                self.pending = Some(outcome);
                self.scheduler
                    .schedule(SUCCESS_RESOLVE_MS, self.generation, SessionTask::ResolveSuccess);
            }
            TapOutcome::Failure { position, .. } => {
                log::debug!("wrong tap {cell} at position {position}");
                self.mixer.play(SoundCue::Error);
                self.pending = Some(outcome);
                self.scheduler
                    .schedule(FAILURE_RESOLVE_MS, self.generation, SessionTask::ResolveFailure);
            }
        }
        Some(outcome)
    }

    /// Advance time by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.scheduler.advance(elapsed_ms);
        if let Some(seq) = self.sequencer.as_mut() {
            seq.advance(elapsed_ms);
        }

        let live = self.generation;
        loop {
            let Some(event) = self.sequencer.as_mut().and_then(|s| s.poll(live)) else {
                break;
            };
            match event {
                SequencerEvent::Highlight { .. } => self.mixer.play(SoundCue::Tap),
                SequencerEvent::Clear { .. } => {}
                SequencerEvent::Finished => {
                    self.dispatch(GameAction::BeginPlayerTurn);
                }
            }
        }

        while let Some(task) = self.scheduler.pop_due(self.generation) {
            self.run_task(task);
        }
    }

    /// Quit the running game (the "home" button).
    pub fn end_game(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.invalidate();
        self.finish_session();
    }

    /// The game screen is going away.
    pub fn leave(&mut self) {
        self.end_game();
        // Silences the celebration too.
        self.invalidate();
    }

    pub fn set_theme(&mut self, id: ThemeId) -> bool {
        self.dispatch(GameAction::SetTheme(id))
    }

    /// Select the next unlocked theme after the current one.
    pub fn cycle_theme(&mut self) -> ThemeId {
        let current = self.state.theme();
        let unlocked = &self.state.stats().unlocked_themes;
        let next = unlocked
            .range((std::ops::Bound::Excluded(current), std::ops::Bound::Unbounded))
            .next()
            .or_else(|| unlocked.iter().next())
            .copied()
            .unwrap_or_default();
        self.set_theme(next);
        self.state.theme()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.dispatch(GameAction::SetDifficulty(difficulty));
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.mixer.set_muted(muted);
    }

    pub fn reset_progress(&mut self) {
        log::info!("resetting all progress");
        self.dispatch(GameAction::ResetProgress);
    }

    fn run_task(&mut self, task: SessionTask) {
        match task {
            SessionTask::ResolveFailure => {
                self.pending = None;
                self.dispatch(GameAction::PatternFailed);
                self.finish_session();
            }
            SessionTask::ResolveSuccess => {
                self.pending = None;
                self.dispatch(GameAction::PatternSucceeded);
                self.next_pattern();
            }
            SessionTask::PlayCue(cue) => self.mixer.play(cue),
        }
    }

    fn next_pattern(&mut self) {
        let pattern = generate_pattern(self.state.level(), self.state.grid_size(), &mut self.rng);
        let sequencer =
            PatternSequencer::new(&pattern, self.state.pattern_speed_ms(), self.generation);
        log::debug!(
            "level {} pattern {:?} on {}x{} grid",
            self.state.level(),
            pattern.as_slice(),
            self.state.grid_size(),
            self.state.grid_size()
        );
        if self.dispatch(GameAction::SetPattern(pattern)) {
            self.sequencer = Some(sequencer);
        }
    }

    fn finish_session(&mut self) {
        let previous_best = self.state.stats().best_score;
        let score = self.state.score();
        let level = self.state.level();
        let stars = self.state.stars();

        if !self.dispatch(GameAction::EndGame {
            played_at: Utc::now(),
        }) {
            return;
        }
        if let Some(seq) = self.sequencer.as_mut() {
            seq.cancel();
        }

        let result = SessionResult {
            score,
            level,
            stars,
            new_best: score > previous_best,
        };
        log::info!(
            "session over: score {score}, level {level}, stars {stars}{}",
            if result.new_best { " (new best)" } else { "" }
        );
        self.schedule_celebration(&result);
        self.last_result = Some(result);
    }

    fn schedule_celebration(&mut self, result: &SessionResult) {
        let g = self.generation;
        let s = &mut self.scheduler;
        let mut push = |at: u32, cue: SoundCue| s.schedule(at, g, SessionTask::PlayCue(cue));
        push(0, SoundCue::Success);
        push(400, SoundCue::Success);
        if result.stars > 0 {
            for at in [300, 450, 600] {
                push(at, SoundCue::Star);
            }
        }
        if result.new_best {
            push(0, SoundCue::Unlock);
            push(200, SoundCue::Star);
            push(400, SoundCue::Success);
        }
    }

    /// Bump the generation so every in-flight continuation goes stale.
    fn invalidate(&mut self) {
        self.generation = self.generation.next();
        self.scheduler.retain_live(self.generation);
        if let Some(seq) = self.sequencer.as_mut() {
            seq.cancel();
        }
        self.pending = None;
    }

    fn sync_stats(&mut self) {
        if self.state.stats_revision() == self.saved_revision {
            return;
        }
        self.apply_unlock_rule();
        self.persist();
    }

    /// Unlock every theme the star total has earned. Returns whether any
    /// theme was unlocked.
    fn apply_unlock_rule(&mut self) -> bool {
        let earned: Vec<ThemeId> = self.state.stats().pending_unlocks().collect();
        let mut any = false;
        for id in earned {
            if self.state.apply_action(GameAction::UnlockTheme(id)) {
                log::info!("unlocked theme {}", id.as_str());
                self.mixer.play(SoundCue::Unlock);
                any = true;
            }
        }
        any
    }

    fn persist(&mut self) {
        match self.store.save(self.state.stats()) {
            Ok(()) => log::info!("saved stats (revision {})", self.state.stats_revision()),
            Err(e) => log::warn!("failed to save stats: {e}"),
        }
        self.saved_revision = self.state.stats_revision();
    }
}

impl<A, S, R> fmt::Debug for Session<A, S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("generation", &self.generation)
            .field("phase", &self.state.phase())
            .field("level", &self.state.level())
            .field("pending", &self.pending)
            .field("last_result", &self.last_result)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::rng::ScriptedRng;
    use SoundCue::*;

    #[derive(Default)]
    struct TestStore {
        initial: Option<PlayerStats>,
        saved: Vec<PlayerStats>,
        fail_saves: bool,
    }

    impl StatsStore for TestStore {
        type Error = String;

        fn load(&mut self) -> Result<Option<PlayerStats>, String> {
            Ok(self.initial.take())
        }

        fn save(&mut self, stats: &PlayerStats) -> Result<(), String> {
            if self.fail_saves {
                return Err("disk full".to_string());
            }
            self.saved.push(stats.clone());
            Ok(())
        }
    }

    type TestSession = Session<RecordingAudio, TestStore, ScriptedRng>;

    /// Every generated pattern is all zeros.
    fn session_with(store: TestStore) -> TestSession {
        Session::new(
            GameState::new(),
            ScriptedRng::new([0]),
            RecordingAudio::new(),
            store,
        )
    }

    fn session() -> TestSession {
        session_with(TestStore::default())
    }

    fn to_player_turn(s: &mut TestSession) {
        s.tick(60_000);
        assert_eq!(s.state().phase(), Phase::PlayerTurn);
    }

    fn clear_level(s: &mut TestSession) {
        to_player_turn(s);
        let len = s.state().pattern().len();
        for _ in 0..len {
            assert!(s.tap(0).is_some());
        }
        s.tick(SUCCESS_RESOLVE_MS);
    }

    #[test]
    fn start_game_installs_first_pattern() {
        let mut s = session();
        s.start_game();
        assert!(s.state().is_playing());
        assert_eq!(s.state().phase(), Phase::ShowingPattern);
        assert_eq!(s.state().pattern(), &[0, 0]);
        assert_eq!(s.presentation_step(), Some((1, 2)));
    }

    #[test]
    fn sequencer_hands_over_to_the_player() {
        let mut s = session();
        s.start_game();
        s.tick(300);
        assert_eq!(s.highlighted_cell(), Some(0));
        s.tick(1000);
        assert_eq!(s.highlighted_cell(), None);
        // The whole pattern takes 2 * 1500ms.
        s.tick(1699);
        assert_eq!(s.state().phase(), Phase::ShowingPattern);
        s.tick(1);
        assert_eq!(s.state().phase(), Phase::PlayerTurn);
        assert_eq!(s.audio().cues(), &[Tap, Tap]);
    }

    #[test]
    fn taps_before_the_player_turn_are_ignored() {
        let mut s = session();
        assert_eq!(s.tap(0), None);
        s.start_game();
        assert_eq!(s.tap(0), None);
        assert!(s.state().player_input().is_empty());
    }

    #[test]
    fn completing_a_level_resolves_after_delay() {
        let mut s = session();
        s.start_game();
        to_player_turn(&mut s);
        s.audio_mut().take();

        assert_eq!(s.tap(0), Some(TapOutcome::Continue));
        assert_eq!(s.tap(0), Some(TapOutcome::LevelComplete));
        assert_eq!(s.audio().cues(), &[Tap, Tap, Success, Star]);
        // Locked until resolution.
        assert_eq!(s.tap(0), None);

        s.tick(SUCCESS_RESOLVE_MS - 1);
        assert_eq!(s.state().level(), 1);
        s.tick(1);
        assert_eq!(s.state().level(), 2);
        assert_eq!(s.state().score(), 10);
        assert_eq!(s.state().stars(), 1);
        assert_eq!(s.state().phase(), Phase::ShowingPattern);
        assert_eq!(s.state().pattern().len(), 3);
        assert!(s.pending_outcome().is_none());
    }

    #[test]
    fn wrong_tap_ends_the_session() {
        let mut s = session();
        s.start_game();
        to_player_turn(&mut s);
        s.audio_mut().take();

        let outcome = s.tap(1);
        assert_eq!(
            outcome,
            Some(TapOutcome::Failure {
                position: 0,
                expected: Some(0)
            })
        );
        assert_eq!(s.audio().cues(), &[Tap, Error]);
        assert!(s.state().player_input().is_empty());

        s.tick(FAILURE_RESOLVE_MS - 1);
        assert!(s.state().is_playing());
        s.tick(1);
        assert!(!s.state().is_playing());
        assert_eq!(s.state().phase(), Phase::Idle);
        assert_eq!(
            s.last_result(),
            Some(SessionResult {
                score: 0,
                level: 1,
                stars: 0,
                new_best: false
            })
        );
        assert_eq!(s.state().stats().total_games_played, 1);
        assert_eq!(s.store().saved.len(), 1);
    }

    #[test]
    fn restart_discards_pending_failure() {
        let mut s = session();
        s.start_game();
        to_player_turn(&mut s);
        s.tap(3);
        s.start_game();
        s.tick(FAILURE_RESOLVE_MS * 4);
        assert!(s.state().is_playing());
        assert!(s.last_result().is_none());
        assert_eq!(s.state().stats().total_games_played, 0);
    }

    #[test]
    fn restart_mid_presentation_cancels_the_old_sequence() {
        let mut s = session();
        s.start_game();
        s.tick(300);
        assert_eq!(s.highlighted_cell(), Some(0));
        let before = s.generation();
        s.start_game();
        assert!(s.generation() > before);
        assert_eq!(s.highlighted_cell(), None);
        assert_eq!(s.state().phase(), Phase::ShowingPattern);
    }

    #[test]
    fn end_game_records_result_and_celebrates() {
        let mut s = session();
        s.start_game();
        clear_level(&mut s);
        s.end_game();
        let result = s.last_result().unwrap();
        assert_eq!(result.score, 10);
        assert_eq!(result.stars, 1);
        assert!(result.new_best);

        s.audio_mut().take();
        s.tick(1_000);
        assert_eq!(
            s.audio().cues(),
            &[Success, Unlock, Star, Star, Success, Success, Star, Star]
        );
    }

    #[test]
    fn leaving_silences_the_celebration() {
        let mut s = session();
        s.start_game();
        clear_level(&mut s);
        s.leave();
        assert!(s.last_result().is_some());
        s.audio_mut().take();
        s.tick(1_000);
        assert!(s.audio().cues().is_empty());
    }

    #[test]
    fn end_game_when_idle_does_nothing() {
        let mut s = session();
        s.end_game();
        assert!(s.last_result().is_none());
        assert_eq!(s.state().stats().total_games_played, 0);
    }

    #[test]
    fn loads_saved_stats_at_startup() {
        let saved = PlayerStats {
            best_score: 70,
            total_stars: 12,
            ..PlayerStats::default()
        };
        let s = session_with(TestStore {
            initial: Some(saved),
            ..TestStore::default()
        });
        assert_eq!(s.state().stats().best_score, 70);
        // Nothing changed, nothing written.
        assert!(s.store().saved.is_empty());
    }

    #[test]
    fn stars_crossing_a_threshold_unlock_once() {
        let saved = PlayerStats {
            total_stars: 48,
            ..PlayerStats::default()
        };
        let mut s = session_with(TestStore {
            initial: Some(saved),
            ..TestStore::default()
        });
        s.start_game();
        // Levels 1, 2 and 3 give 1 + 1 + 2 stars.
        for _ in 0..3 {
            clear_level(&mut s);
        }
        assert_eq!(s.state().stars(), 4);
        s.audio_mut().take();
        s.end_game();

        let stats = s.state().stats();
        assert_eq!(stats.total_stars, 52);
        assert!(stats.is_unlocked(ThemeId::Space));
        assert_eq!(s.audio().cues(), &[Unlock]);

        let last = s.store().saved.last().unwrap();
        assert!(last.is_unlocked(ThemeId::Space));

        // Further stats changes don't unlock it again.
        s.audio_mut().take();
        s.start_game();
        s.end_game();
        s.tick(0);
        assert!(!s.audio().cues().contains(&Unlock));
    }

    #[test]
    fn save_failures_do_not_interrupt_play() {
        let mut s = session_with(TestStore {
            fail_saves: true,
            ..TestStore::default()
        });
        s.start_game();
        s.end_game();
        assert_eq!(s.state().stats().total_games_played, 1);
        s.start_game();
        assert!(s.state().is_playing());
    }

    #[test]
    fn theme_cycles_through_unlocked_only() {
        let mut s = session();
        assert_eq!(s.cycle_theme(), ThemeId::Classic);
        s.dispatch(GameAction::UnlockTheme(ThemeId::Jungle));
        assert_eq!(s.cycle_theme(), ThemeId::Jungle);
        assert_eq!(s.cycle_theme(), ThemeId::Classic);
    }

    #[test]
    fn reset_progress_saves_defaults() {
        let saved = PlayerStats {
            total_stars: 120,
            best_score: 300,
            ..PlayerStats::default()
        };
        let mut s = session_with(TestStore {
            initial: Some(saved),
            ..TestStore::default()
        });
        s.set_theme(ThemeId::Jungle);
        s.reset_progress();
        assert_eq!(s.state().theme(), ThemeId::Classic);
        assert_eq!(s.store().saved.last(), Some(&PlayerStats::default()));
    }

    #[test]
    fn muted_session_plays_nothing() {
        let mut s = session();
        s.set_muted(true);
        s.start_game();
        to_player_turn(&mut s);
        s.tap(2);
        assert!(s.is_muted());
        assert!(s.audio().cues().is_empty());
    }
}
