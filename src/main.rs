//! Terminal snake runner (default binary).
//!
//! Configuration comes from `SNAKE_*` environment variables. Logs go to a
//! file because the terminal is in raw mode for the whole run.

use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use directories::ProjectDirs;
use simplelog::{Config, LevelFilter, WriteLogger};

use snake_arcade::core::{GameConfig, GameEvent, GameSession, GameSnapshot};
use snake_arcade::input::{handle_key_event, should_quit};
use snake_arcade::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

const DEFAULT_LOG_PATH: &str = "snake-arcade.log";

fn main() -> Result<()> {
    init_logging()?;

    let mut config = GameConfig::from_env();
    if config.highscore_path.is_none() {
        config.highscore_path = Some(default_highscore_path());
    }
    if config.seed.is_none() {
        config.seed = Some(time_seed());
    }
    log::info!(
        "starting: {}x{} board, {}ms, {} {}, seed {:?}, highscores at {:?}",
        config.board_width,
        config.board_height,
        config.tick_interval_ms,
        config.game_mode.as_str(),
        config.difficulty.as_str(),
        config.seed,
        config.highscore_path
    );

    let mut session = GameSession::from_config(config).context("invalid configuration")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let path = env::var("SNAKE_LOG_PATH").unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());
    let file = File::create(&path).with_context(|| format!("cannot create log file {}", path))?;
    WriteLogger::init(LevelFilter::Info, Config::default(), file)?;
    Ok(())
}

fn default_highscore_path() -> PathBuf {
    ProjectDirs::from("com", "snake-arcade", "Snake Arcade")
        .map(|dirs| dirs.data_local_dir().join("highscores.json"))
        .unwrap_or_else(|| PathBuf::from("highscores.json"))
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last_tick = Instant::now();

    loop {
        for ev in session.take_events() {
            match ev {
                GameEvent::PowerUpActivated(kind) => log::info!("power-up {}", kind.as_str()),
                GameEvent::SessionReset { episode_id } => log::info!("episode {}", episode_id),
                GameEvent::HighscoresChanged => log::debug!(
                    "highscore table now has {} entries",
                    session.highscores().len()
                ),
                _ => {}
            }
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into_with_summary(&snap, session.last_summary(), Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let tick = Duration::from_millis(u64::from(session.tick_interval_ms()));
        let timeout = tick.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            session.advance();
        }
    }
}
