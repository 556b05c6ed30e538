//! Terminal Blockfall runner (default binary).
//!
//! Gravity runs on its own thread and ticks the shared engine every
//! `BLOCKFALL_TICK_MS`. The main thread polls crossterm for keys, applies the
//! mapped commands and renders one snapshot per frame.
//!
//! The game owns the terminal, so log lines never go to a terminal stderr.
//! Set `BLOCKFALL_LOG_FILE` to collect them, or redirect stderr.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{error, info};

use blockfall::core::{Engine, GameSnapshot, SharedEngine};
use blockfall::input::{map_key, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::DriverConfig;

fn main() -> Result<()> {
    let config = DriverConfig::from_env().context("invalid configuration")?;
    init_logging(&config)?;

    info!(
        "starting: tick {}ms, frame {}ms, seed {}",
        config.tick_ms, config.frame_ms, config.seed
    );

    let engine = SharedEngine::new(Engine::new(config.seed));

    let mut term = TerminalRenderer::new();
    if let Err(err) = term.enter() {
        let _ = term.exit();
        return Err(err);
    }

    let stop = Arc::new(AtomicBool::new(false));
    let gravity = spawn_gravity(engine.clone(), config.tick_interval(), Arc::clone(&stop));

    let result = run(&mut term, &engine, &config);

    stop.store(true, Ordering::Relaxed);
    if gravity.join().is_err() {
        error!("gravity thread panicked");
    }

    // Always try to restore terminal state.
    let restored = term.exit();
    result?;
    restored
}

/// Log to `BLOCKFALL_LOG_FILE` when set, otherwise to stderr unless stderr
/// is the terminal the game draws on.
fn init_logging(config: &DriverConfig) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    match &config.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if io::stderr().is_terminal() => return Ok(()),
        None => {}
    }
    builder.init();
    Ok(())
}

fn spawn_gravity(engine: SharedEngine, period: Duration, stop: Arc<AtomicBool>) -> JoinHandle<()> {
    thread::spawn(move || {
        // The stop flag is checked at least every 20ms.
        let step = period.min(Duration::from_millis(20));
        let mut next = Instant::now() + period;
        while !stop.load(Ordering::Relaxed) {
            let now = Instant::now();
            if now >= next {
                engine.tick();
                next += period;
                if next < now {
                    next = now + period;
                }
            } else {
                thread::sleep(step.min(next - now));
            }
        }
        info!("gravity thread stopped");
    })
}

fn run(term: &mut TerminalRenderer, engine: &SharedEngine, config: &DriverConfig) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame = config.frame_interval();

    loop {
        let frame_start = Instant::now();

        engine.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Drain input until the next frame is due.
        loop {
            let timeout = frame.saturating_sub(frame_start.elapsed());
            if !event::poll(timeout).context("failed to poll terminal input")? {
                break;
            }
            match event::read().context("failed to read terminal input")? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    engine.with(|engine| {
                        if let Some(command) = map_key(key, engine.status()) {
                            engine.apply(command);
                        }
                    });
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }
    }
}
