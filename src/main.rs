mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing_subscriber::filter::EnvFilter;

use alien_invasion::compute::{apply_command, init_state, tick, Command};
use alien_invasion::input::{decode_press, KeyTracker, FIRE_KEY};
use alien_invasion::{sprite, GameConfig, GameSession, Settings};

const FRAME: Duration = Duration::from_nanos(1_000_000_000 / 60); // 60 FPS

#[derive(Parser, Debug)]
#[command(about = "Alien Invasion, in the terminal", version)]
struct Cli {
    /// TOML file overriding the built-in tunables.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Image whose dimensions are used as the alien size (BMP or PNG).
    #[arg(long)]
    sprite: Option<PathBuf>,
    /// Write the generated alien sprite as a BMP file and exit.
    #[arg(long)]
    write_sprite: Option<PathBuf>,
    /// Append log output to this file.  The terminal is the game screen, so
    /// nothing is logged without it.  Level is taken from RUST_LOG (default: info).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Apply `command`, returning `false` when the player asked to quit.
fn step(state: &mut GameSession, command: Command) -> bool {
    match apply_command(state, command) {
        ControlFlow::Continue(next) => {
            *state = next;
            true
        }
        ControlFlow::Break(()) => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Every frame the pending key events are folded into a [`KeyTracker`], whose
/// held movement keys become the ship's movement flags.  Fire is
/// edge-triggered: only a new Space keystroke fires, so key-repeat does not
/// auto-fire but quick taps each get a bullet.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameSession,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut keys = KeyTracker::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    let fresh = keys.press(code, frame);
                    if code == FIRE_KEY && fresh && !step(state, Command::Fire) {
                        return Ok(());
                    }
                    if let Some(command) = decode_press(code, modifiers) {
                        if !step(state, command) {
                            return Ok(());
                        }
                    }
                }
                KeyEventKind::Repeat => keys.repeat(code, frame),
                KeyEventKind::Release => keys.release(code),
            }
        }

        // ── Held keys → ship intent ───────────────────────────────────────────
        let left = keys.moving_left(frame);
        let right = keys.moving_right(frame);
        step(state, Command::MoveLeft { held: left });
        step(state, Command::MoveRight { held: right });

        *state = tick(state);

        let (cols, rows) = terminal::size()?;
        display::render(out, &state.snapshot(), cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    if let Some(path) = &cli.write_sprite {
        sprite::write_bmp(&sprite::generate_alien(), path)
            .with_context(|| format!("cannot write sprite to {}", path.display()))?;
        println!("Alien sprite written to {}", path.display());
        return Ok(());
    }

    // Everything that can fail is checked before the terminal goes raw.
    let config = GameConfig::load_or_default(cli.config.as_deref())?;
    let alien_size = sprite::alien_size(cli.sprite.as_deref())?;
    let mut state = init_state(Settings::new(&config), alien_size)?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut state, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    tracing::info!(score = state.score, level = state.level, "quit");
    result.context("terminal I/O failed")
}
