// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Card Reveal TUI.
//!
//! A terminal-driven card-selection kiosk: a fixed deck of cards is shown
//! as a grid, the facilitator picks one, the card's video (or poster image)
//! plays in an MPV window, and the card is marked used once the session
//! returns to the grid. Session state survives restarts.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle and UI rendering.
//! * A **Playback Worker** owns the MPV context and answers play requests.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and the playback worker is handled via `std::sync::mpsc`
//! channels. All session mutations happen on the event thread, one event at
//! a time; the session persists itself before any mutation returns.

mod config;
mod events;
mod grid;
mod model;
mod player;
mod render;
mod storage;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    path::Path,
    sync::{Arc, Mutex, mpsc::{self, Receiver, Sender}},
    thread,
    time::Duration,
};

use crate::{
    config::AppConfig,
    events::{AppEvent, process_events},
    grid::{CardGrid, GRID_COLUMNS},
    model::{catalog::Catalog, session::Session},
    player::{
        PlaybackController,
        backend::MpvSurface,
        surface::{LabelState, SharedLabel},
    },
    storage::{JsonFileStore, STATE_FILE},
    theme::Theme,
    util::debounce::Debouncer,
};

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub catalog: Arc<Catalog>,
    pub session: Session,
    pub controller: PlaybackController,

    pub grid: CardGrid,
    pub label: Arc<Mutex<LabelState>>,
    pub select_debounce: Debouncer<String>,

    pub status_error: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    ///
    /// Hydrates the session from the persisted snapshot, spawns the MPV
    /// playback worker, and wires the debounced card-activation path.
    pub fn new(config: AppConfig) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let catalog = match &config.catalog_file {
            Some(path) => Arc::new(
                Catalog::from_file(Path::new(path)).context("Failed to load catalog file")?,
            ),
            None => Arc::new(Catalog::builtin()),
        };

        let state_file = config
            .state_file
            .clone()
            .unwrap_or_else(|| STATE_FILE.to_string());
        let session = Session::new(
            Arc::clone(&catalog),
            Box::new(JsonFileStore::new(&state_file)),
        );

        let surface = MpvSurface::new(event_tx.clone());
        let shared_label = SharedLabel::new();
        let label = shared_label.state();
        let controller = PlaybackController::new(
            Box::new(surface),
            Some(Box::new(shared_label)),
            &config.media_dir,
        );

        let debounce_tx = event_tx.clone();
        let select_debounce = Debouncer::new(
            Duration::from_millis(config.select_debounce_ms),
            move |card_id| {
                let _ = debounce_tx.send(AppEvent::CardActivated(card_id));
            },
        );

        let grid = CardGrid::new(catalog.len(), GRID_COLUMNS);

        Ok(Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            catalog,
            session,
            controller,
            grid,
            label,
            select_debounce,
            status_error: None,
        })
    }
}

/// The entry point of the application.
///
/// Sets up the communication channels, initializes the application state,
/// manages the terminal lifecycle, and returns an error if any part of the
/// execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    let mut app = App::new(config).context("Failed to initialise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    util::term::set_terminal_bg(&Theme::to_hex(app.theme.background_colour));
    util::term::set_terminal_title("kaartui");

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background
/// color. It also ensures the cursor is made visible again.
///
/// This function is designed to be "best-effort" and does not return a
/// result, as it is typically called during cleanup or panic handling.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background threads and enters the main event
/// loop.
///
/// This function spawns:
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning them, it hands control to [`process_events`] to manage
/// the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an
/// unrecoverable application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                tx_keys.send(AppEvent::Key(key)).ok();
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(250));
        }
    });

    // A selection that survived a restart is put back on the playback
    // surface so the screen matches the hydrated session.
    if let Some(card) = app
        .session
        .selected_card()
        .and_then(|id| app.catalog.card_by_id(id))
        .cloned()
    {
        if let Err(e) = app.controller.load_card(&card) {
            app.status_error = Some(e.to_string());
        }
    }

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
