mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use fight_kokaton::clock::FrameClock;
use fight_kokaton::compute::{fire_beam, init_state, tick};
use fight_kokaton::input::{InputEvent, KeyTracker};
use fight_kokaton::{GameConfig, GameState, GameStatus};

const TITLE: &str = "Fight! Kokaton";

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw alternate-screen mode while the game runs, so log
/// lines go to a file instead of stderr.
fn log_path() -> PathBuf {
    std::env::var_os("KOKATON_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("fight_kokaton.log"))
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialised")?;
    Ok(())
}

/// Logging is optional: if the log file can't be opened the game still
/// runs, just without a logger.  Returns whether logging is on.
fn try_init_logging(path: &Path) -> bool {
    match init_logging(path) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("fight_kokaton: running without a log file: {err:#}");
            false
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum Outcome {
    Quit,
    GameOver(GameState),
}

/// Run ticks until the player quits or is hit.
///
/// Each tick: drain pending terminal events (non-blocking), spawn a beam per
/// fire press, advance the simulation with the held-key snapshot, draw, then
/// sleep out the rest of the frame.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    config: &GameConfig,
) -> Result<Outcome> {
    let mut keys = KeyTracker::new();
    let mut clock = FrameClock::new(config.frame_period());

    loop {
        keys.begin_frame();

        while event::poll(Duration::ZERO).context("polling terminal events")? {
            if let Event::Key(key) = event::read().context("reading terminal event")? {
                match keys.handle(&key) {
                    Some(InputEvent::Quit) => return Ok(Outcome::Quit),
                    Some(InputEvent::Fire) => state = fire_beam(&state, config),
                    None => {}
                }
            }
        }

        state = tick(&state, &keys.controls(), config);

        if state.status == GameStatus::GameOver {
            return Ok(Outcome::GameOver(state));
        }

        display::render(out, &state, config).context("rendering frame")?;
        clock.tick();
    }
}

fn run<W: Write>(out: &mut W, config: &GameConfig) -> Result<()> {
    let seed: u64 = rand::random();
    let mut rng = StdRng::seed_from_u64(seed);
    let state = init_state(config, &mut rng);
    info!(
        "starting: field {}x{}, {} bombs, seed {}",
        config.width, config.height, config.num_bombs, seed
    );

    match game_loop(out, state, config)? {
        Outcome::Quit => info!("quit requested"),
        Outcome::GameOver(state) => {
            info!("game over after {} frames with score {}", state.frame, state.score);
            display::render_game_over(out, &state, config).context("rendering game over")?;
            thread::sleep(config.game_over_hold);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    try_init_logging(&log_path());

    let config = GameConfig::default();
    config.validate().context("invalid game configuration")?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(TITLE))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Terminals without the kitty protocol fall back to the hold window.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    if !keyboard_enhanced {
        warn!("terminal lacks key-release events; using hold window");
    }

    let result = run(&mut out, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
