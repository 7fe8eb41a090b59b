//! Terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer for output. The
//! screen is only rebuilt when the app reports something dirty.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, LevelFilter, Log, Metadata, Record};

use grid_tetris::app::{App, Flow};
use grid_tetris::content::{Config, Content};
use grid_tetris::input::{handle_key_event, should_quit};
use grid_tetris::term::{Cell, FrameBuffer, TerminalRenderer};

const FRAME_MS: u64 = 16;

/// Appends log lines to a file; stdout belongs to the game screen.
struct FileLogger {
    file: Mutex<File>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    log::set_boxed_logger(Box::new(FileLogger {
        file: Mutex::new(file),
    }))
    .context("installing logger")?;
    log::set_max_level(LevelFilter::Debug);
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::from_env();
    if let Some(path) = &config.log_path {
        init_logging(path)?;
    }
    info!("starting with {config:?}");

    let content = Content::from_config(&config).context("loading content")?;
    let mut app = App::new(content, config.seed, config.debug)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);
    let result = run(&mut term, &mut fb, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    log::logger().flush();
    result
}

fn run(term: &mut TerminalRenderer, fb: &mut FrameBuffer, app: &mut App) -> Result<()> {
    let frame = Duration::from_millis(FRAME_MS);
    let mut last_tick = Instant::now();

    loop {
        if app.is_dirty() {
            fb.clear(Cell::default());
            fb.set_color_key(app.color_key());
            app.draw(fb);
            term.present(fb)?;
        }

        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        if app.handle(command)? == Flow::Quit {
                            return Ok(());
                        }
                    }
                }
                Event::Resize(w, h) => {
                    fb.resize(w, h);
                    term.invalidate();
                    app.invalidate();
                }
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            app.tick(elapsed.as_millis() as u32)?;
        }
    }
}
