use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use pointer_shooter::clock::{Clock, FramePacer, MonotonicClock};
use pointer_shooter::compute::{handle_input, init_state, tick};
use pointer_shooter::config::GameConfig;
use pointer_shooter::display;
use pointer_shooter::input::{HeldKeys, InputEvent};
use pointer_shooter::terminal::{TerminalSurface, Viewport};

const HINT: &str = "Mouse: aim   Click / any key / right-click: fire   Q: quit";

#[derive(Parser, Debug)]
#[command(name = "pointer_shooter", about = "Pointer-driven arcade shooter for the terminal")]
struct Args {
    /// TOML file overriding any of the default tunables.
    #[arg(long, env = "POINTER_SHOOTER_CONFIG")]
    config: Option<PathBuf>,

    /// Write logs here (the terminal itself is taken by the game).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed enemy spawning for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .compact()
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits. Each frame: drain input, tick, draw, sleep.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    rng: &mut StdRng,
) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    // Last row is kept for the controls hint.
    let mut surface = TerminalSurface::new(Viewport::new(cols, rows.saturating_sub(1), config.arena));
    let mut pacer = FramePacer::new(Duration::from_millis(config.frame_ms));
    let clock = MonotonicClock::new();
    let mut keys = HeldKeys::new();
    let mut state = init_state(config);

    loop {
        pacer.begin();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(cols, rows) = ev {
                debug!(cols, rows, "terminal resized");
                let arena = state.config.arena;
                surface.resize(Viewport::new(cols, rows.saturating_sub(1), arena));
                out.queue(terminal::Clear(terminal::ClearType::All))?;
                continue;
            }
            match keys.translate(&ev, surface.viewport(), clock.now_ms()) {
                Some(InputEvent::Quit) => {
                    info!(frame = state.frame, "quit requested");
                    return Ok(());
                }
                Some(event) => handle_input(&mut state, event),
                None => {}
            }
        }

        let report = tick(&mut state, clock.now_ms(), rng);
        if report.hits > 0 || report.enemies_destroyed > 0 {
            debug!(
                frame = state.frame,
                hits = report.hits,
                destroyed = report.enemies_destroyed,
                "tick"
            );
        }

        surface.clear();
        display::render(&mut surface, &state);
        surface.present(out)?;
        draw_controls_hint(out, surface.viewport().rows)?;
        out.flush()?;

        pacer.wait();
    }
}

fn draw_controls_hint<W: Write>(out: &mut W, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(HINT))?;
    out.queue(style::ResetColor)?;
    Ok(())
}

fn restore_terminal<W: Write>(out: &mut W) {
    // Harmless on terminals that never took the flags.
    let _ = out.execute(PopKeyboardEnhancementFlags);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let config = GameConfig::load(args.config.as_deref())?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?args.seed, arena = ?config.arena, "starting");

    // A panic inside raw mode would leave the terminal unusable.
    std::panic::set_hook(Box::new(|info| {
        restore_terminal(&mut stdout());
        tracing::error!(%info, "panic");
        eprintln!("{info}");
    }));

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Ask for repeat/release events so held keys fire once. Terminals without
    // the kitty keyboard protocol ignore this and `HeldKeys` falls back to
    // its hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    debug!(keyboard_enhanced, "terminal ready");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, config, &mut rng);

    // Always restore the terminal
    restore_terminal(&mut out);
    info!("shut down");

    result
}
