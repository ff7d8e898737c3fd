// ============================================================================
// TASKDESK - Single-screen task entry form for the terminal
// ============================================================================
//
// MODULE STRUCTURE:
// 1. model    - Task record, priority, client and category option sets
// 2. store    - Deadline-ordered task list and its display rows
// 3. form     - Uncommitted input, validation and commit
// 4. picker   - Date, time and fixed-option overlay state
// 5. app      - Whole application state and its update operations
// 6. input    - Keyboard and mouse dispatch
// 7. ui       - Rendering and click areas
// 8. config   - Environment settings
// 9. logging  - File-based tracing (the terminal belongs to the UI)
// 10. error   - Validation and ambient error types
// ============================================================================

mod app;
mod config;
mod error;
mod form;
mod input;
mod logging;
mod model;
mod picker;
mod store;
mod ui;

use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use crate::app::{App, AppData};
use crate::config::Config;
use crate::error::AppError;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::from_env();
    match logging::init(&config) {
        Ok(Some(path)) => info!(log = %path.display(), "taskdesk starting"),
        Ok(None) => {}
        // Logging is optional; the form works without it.
        Err(err) => eprintln!("warning: {err}"),
    }

    let mut terminal = setup_terminal()?;
    install_panic_hook();
    let res = run_app(&mut terminal, &config);
    restore_terminal(&mut terminal);

    res
}

fn setup_terminal() -> Result<Term, AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen, event::EnableMouseCapture) {
        disable_raw_mode().ok();
        return Err(err.into());
    }
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

// Helper: put the terminal back before the default hook prints the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = leave_screen(&mut io::stdout());
        original_hook(panic_info);
    }));
}

// Helper: undo the alternate screen and mouse capture on any writer.
fn leave_screen<W: io::Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, event::DisableMouseCapture)
}

fn restore_terminal(terminal: &mut Term) {
    disable_raw_mode().ok();
    leave_screen(terminal.backend_mut()).ok();
    terminal.show_cursor().ok();
}

fn run_app(terminal: &mut Term, config: &Config) -> Result<()> {
    let mut app = App::new();
    let tick_rate = config.tick_rate;
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(&mut app, key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(&mut app, mouse),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    info!(tasks = app.store.len(), "taskdesk exiting");
    debug!(state = ?AppData::from_app(&app), "final state");
    Ok(())
}
