//! albumlist - Terminal Album List
//!
//! A terminal-based album list manager. Albums are entered through a form,
//! checked for duplicate IDs, persisted as JSON and listed in a table.

use std::io;
use std::time::{Duration, Instant};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use albumlist::application::{App, AppMode};
use albumlist::domain::{CollectionStore, KeyValueStorage};
use albumlist::infrastructure::{command, init_logging, FileStorage, Settings};
use albumlist::presentation::{render_ui, InputHandler};

/// How often the loop wakes without input so expired alerts disappear.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Entry point for the albumlist terminal application.
///
/// Resolves settings, starts file logging, opens the album store and runs
/// the main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if configuration or logging setup fails, or if there
/// are issues with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = command().get_matches();
    let settings = Settings::from_matches(&matches)?;
    let _logger = init_logging(settings.log_level, &settings.log_dir)?;

    let storage = FileStorage::new(&settings.data_dir);
    info!("album slot at {}", storage.slot_path(albumlist::domain::ALBUMS_KEY).display());
    let mut app = App::new(CollectionStore::new(storage));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("event loop failed: {}", err);
        println!("{err:?}");
    }
    info!("albumlist exiting");

    Ok(())
}

/// Main application event loop.
///
/// Redraws, waits up to `TICK_RATE` for a key, and expires alerts.
/// Continues running until the user presses 'q' in normal mode.
fn run_app<B: Backend, S: KeyValueStorage>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                        _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                    }
                }
            }
        }

        app.tick(Instant::now());
    }
}
