//! Terminal tetris runner (default binary).
//!
//! Polls crossterm for keys, advances the session one tick per `tick_ms`
//! and redraws through the framebuffer renderer at most once per `frame_ms`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tetris_clone::core::{GameConfig, GameSnapshot, Session, UniformShapes};
use tetris_clone::input::{handle_key_event, CommandBuffer};
use tetris_clone::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};

/// Redraw an unchanged screen at least this often.
const IDLE_REFRESH_MS: u64 = 1000;

/// Upper bound on ticks replayed after a stall (e.g. a suspended process).
const MAX_CATCH_UP_TICKS: u64 = 1000;

/// Falling-block puzzle in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON config file; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    columns: Option<u16>,
    #[arg(long)]
    rows: Option<u16>,
    /// Ticks between gravity steps.
    #[arg(long)]
    move_delay: Option<u32>,
    /// Ticks after a lock during which clears score the bonus.
    #[arg(long)]
    bonus_threshold: Option<u32>,
    /// Seed for shape selection; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs here (the terminal itself is never logged to).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn load_config(&self) -> Result<GameConfig> {
        let config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("read config {}", path.display()))?;
                GameConfig::from_json_str(&text)
                    .with_context(|| format!("parse config {}", path.display()))?
            }
            None => GameConfig::default(),
        };
        self.apply_overrides(config)
    }

    /// Overlay the CLI flags on a file or default config, then validate.
    fn apply_overrides(&self, mut config: GameConfig) -> Result<GameConfig> {
        if let Some(v) = self.columns {
            config.columns = v;
        }
        if let Some(v) = self.rows {
            config.rows = v;
        }
        if let Some(v) = self.move_delay {
            config.move_delay = v;
        }
        if let Some(v) = self.bonus_threshold {
            config.bonus_threshold = v;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tetris_clone=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    let config = args.load_config()?;

    let source = match args.seed {
        Some(seed) => UniformShapes::seeded(seed),
        None => UniformShapes::from_entropy(),
    };
    let mut session = Session::with_source(config, source)?;
    info!(
        seed = ?args.seed,
        columns = session.config().columns,
        rows = session.config().rows,
        "starting"
    );

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|_| run(&mut term, &mut session));

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!(error = %err, "failed to restore terminal");
    }
    info!(score = session.score(), lines = session.lines(), "exiting");
    result
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let tick = Duration::from_millis(u64::from(session.config().tick_ms));
    let frame_ms = u64::from(session.config().frame_ms);

    let view = GameView::default();
    let mut throttle = RenderThrottle::new(frame_ms, IDLE_REFRESH_MS);
    let mut commands = CommandBuffer::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let start = Instant::now();
    let mut next_tick = start + tick;

    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout).context("poll terminal events")? {
            match event::read().context("read terminal event")? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(command) = handle_key_event(key) {
                        commands.push(command);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        let now = Instant::now();
        if now < next_tick {
            continue;
        }

        // Commands ride on the first due tick; the rest only advance time.
        let due = (now.duration_since(next_tick).as_millis() as u64
            / tick.as_millis().max(1) as u64)
            .saturating_add(1)
            .min(MAX_CATCH_UP_TICKS);
        let report = commands.drain_with(|cmds| session.tick(cmds))?;
        if report.quit {
            return Ok(());
        }
        for _ in 1..due {
            session.tick(&[])?;
        }
        next_tick += tick * due as u32;
        if next_tick < now {
            next_tick = now + tick;
        }

        session.snapshot_into(&mut snap);
        let now_ms = start.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, snap.fingerprint()) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = r#"{ "columns": 12, "rows": 24, "move_delay": 200, "bonus_threshold": 900 }"#;

    #[test]
    fn cli_flags_override_config_file() {
        let args = Args::parse_from(["tetris-clone", "--columns", "8", "--move-delay", "50"]);
        let file = GameConfig::from_json_str(FILE).unwrap();

        let config = args.apply_overrides(file).unwrap();
        assert_eq!(config.columns, 8);
        assert_eq!(config.move_delay, 50);
        // Values without a flag come from the file.
        assert_eq!(config.rows, 24);
        assert_eq!(config.bonus_threshold, 900);
    }

    #[test]
    fn overridden_config_is_validated() {
        let args = Args::parse_from(["tetris-clone", "--rows", "2"]);
        assert!(args.apply_overrides(GameConfig::default()).is_err());
    }
}
