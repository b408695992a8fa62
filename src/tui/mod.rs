//! Terminal UI for the trivia tower.

mod app;
mod input;
mod presentation;
mod ui;

pub use app::{App, TerminalGame};
pub use input::{GRID_COLUMNS, move_cursor};
pub use presentation::{CardCell, Dialog, TerminalPresentation};

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tracing::{error, info, instrument};
use trivia_tower_core::GameConfig;

/// How long to wait for a key before feeding time to the timers.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the game in the terminal until the player quits.
///
/// Logs go to `log_file` so they do not interfere with the screen.
pub fn run_tui(config: GameConfig, seed: Option<u64>, log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    play(config, seed)
}

#[instrument(skip(config), fields(levels = config.levels().len()))]
fn play(config: GameConfig, seed: Option<u64>) -> Result<()> {
    info!("Starting Trivia Tower TUI");

    // Build the app before touching the terminal so a bad level file is
    // reported on a normal screen.
    let app = App::new(config, seed)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draw, poll for a key, then hand the measured elapsed time to the game.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut last = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Skip key release events (crossterm fires both press and release).
                if key.kind != KeyEventKind::Release {
                    app.handle_key(key.code);
                }
            }
        }

        let now = Instant::now();
        app.tick(now - last);
        last = now;

        if app.should_quit() {
            info!(score = app.game().state().score(), "Leaving game");
            return Ok(());
        }
    }
}
