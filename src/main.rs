//! Memory Quest terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from
//! `memory_quest::term`. Logs go to a file since the alternate screen owns
//! the terminal.

use std::fs::{self, OpenOptions};
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{self, Event};

use memory_quest::core::{GameState, Session, SimpleRng};
use memory_quest::store::JsonFileStore;
use memory_quest::term::{BellSink, FrameBuffer, TerminalRenderer, Viewport};
use memory_quest::types::TICK_MS;
use memory_quest::{App, AppConfig};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config);
    log::info!("starting; stats at {}", config.stats_path.display());

    let seed = config.seed.unwrap_or_else(clock_seed);
    let session = Session::new(
        GameState::with_pattern_speed(config.pattern_speed_ms),
        SimpleRng::new(seed),
        BellSink::stdout(),
        JsonFileStore::new(config.stats_path.clone()),
    );
    let mut app = App::new(session);
    app.session_mut().set_muted(config.muted);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);
    app.shutdown();

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("exiting on error: {e:#}");
    }
    result
}

fn run<A, S, R>(term: &mut TerminalRenderer, app: &mut App<A, S, R>) -> Result<()>
where
    A: memory_quest::core::AudioSink,
    S: memory_quest::core::StatsStore,
    R: memory_quest::core::RandomSource,
{
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render(Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
            if app.should_quit() {
                return Ok(());
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            app.tick(TICK_MS);
        }
    }
}

/// Send `log` output to the configured file. Without a writable file the
/// logger stays uninitialized and every macro is a no-op.
fn init_logging(config: &AppConfig) {
    if let Some(dir) = config.log_path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
    {
        Ok(file) => file,
        Err(_) => return,
    };
    env_logger::Builder::new()
        .parse_filters(&config.log_filter)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn clock_seed() -> u32 {
    let now = Utc::now();
    (now.timestamp() as u32) ^ now.timestamp_subsec_nanos()
}
