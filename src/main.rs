//! Terminal shifting-maze runner (default binary).
//!
//! Reads the configuration from the environment (`MAZE_CONFIG`, `MAZE_SEED`,
//! `MAZE_SLIDE_INTERVAL_MS`), logs to a file, and runs a fixed-tick loop:
//! poll input, apply commands, advance the slide clock, redraw.

use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use shifting_maze::core::{ErrorSeverity, GameSession, MazeConfig, MazeError, SessionSnapshot};
use shifting_maze::input::{handle_key_event, should_quit};
use shifting_maze::term::{FrameBuffer, GameView, Screen, TerminalRenderer};
use shifting_maze::types::TICK_MS;

const LOG_DIR_ENV: &str = "MAZE_LOG_DIR";

fn main() -> Result<()> {
    let _guard = setup_logging()?;

    let config = MazeConfig::from_env().context("loading maze configuration")?;
    let session = GameSession::new(config).context("building maze session")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!(error = %err, "maze exited with an error");
    }
    result
}

/// File-only logging; the terminal belongs to the renderer.
fn setup_logging() -> Result<WorkerGuard> {
    let log_dir = env::var(LOG_DIR_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("shifting-maze"));
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "maze.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    info!(dir = %log_dir.display(), "logging started");
    Ok(guard)
}

/// Recoverable errors (an empty bag) are logged and play goes on.
fn absorb(result: Result<(), MazeError>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.severity() == ErrorSeverity::Recoverable => {
            warn!(error = %err, "command skipped");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn run(term: &mut TerminalRenderer, mut session: GameSession) -> Result<()> {
    let view = GameView::default();
    let mut snap = SessionSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Screen::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        absorb(session.apply(command).map(|_| ()))?;
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            absorb(session.tick(elapsed.as_millis() as u32).map(|_| ()))?;
        }
    }
}
