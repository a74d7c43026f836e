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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging keyboard input, playback backend updates, and the UI rendering
//! pipeline.
//!
//! Every event flows the same way: the session is mutated first (and
//! persists itself), then the playback controller is told what the new
//! session state implies, then the UI is re-drawn. The controller never
//! drives the session.

use std::io::Stdout;

use anyhow::{Result, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{App, model::session::Phase, render::draw};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    /// A card activation that survived the debounce window.
    CardActivated(String),

    /// The playback backend reached the end of the current video.
    PlaybackFinished,

    Tick,

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,

            AppEvent::CardActivated(card_id) => activate_card(app, &card_id),

            AppEvent::PlaybackFinished => {
                app.session.return_to_grid();
                app.controller.unload();
            }

            AppEvent::Tick => {}

            AppEvent::Error(message) => app.status_error = Some(message),
            AppEvent::FatalError(message) => bail!(message),

            _ => {}
        }

        // Storage failures are recorded by the session rather than thrown;
        // show the most recent one in the status area.
        if let Some(message) = app.session.take_storage_error() {
            app.status_error = Some(message);
        }

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    // Quiet the playback window on the way out
    app.controller.pause();

    Ok(())
}

/// Completes a debounced card activation.
///
/// The session decides the legality: a used or unknown card fails silently
/// and nothing is loaded. On success the controller mirrors the new
/// selection onto the playback surface.
fn activate_card(app: &mut App, card_id: &str) {
    if !app.session.select_card(card_id) {
        return;
    }

    if let Some(card) = app.catalog.card_by_id(card_id).cloned() {
        if let Err(e) = app.controller.load_card(&card) {
            app.status_error = Some(e.to_string());
        }
    }
}

/// Maps keyboard input to session transitions and playback commands.
///
/// Movement keys only apply while the grid is the active phase; Enter is
/// activation on the grid and play confirmation while paused; Escape (or
/// Backspace) finishes the current card from any phase.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }

        // Reset wipes the used set, so require a deliberate chord
        (KeyCode::Char('r'), modifiers)
            if modifiers == (KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.session.reset();
            app.controller.unload();
            app.status_error = None;
        }

        (KeyCode::Esc, _) | (KeyCode::Backspace, _) => {
            app.session.return_to_grid();
            app.controller.unload();
        }

        (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => match app.session.phase() {
            Phase::Grid => {
                if let Some(card) = app.catalog.cards().get(app.grid.cursor()) {
                    app.select_debounce.call(card.id.clone());
                }
            }
            Phase::Paused => {
                if app.session.play_video() {
                    if let Err(e) = app.controller.play() {
                        app.status_error = Some(e.to_string());
                    }
                }
            }
            // Already playing; the phase gate swallows the repeat
            Phase::Playing => {}
        },

        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => {
            if app.session.phase() == Phase::Grid {
                app.grid.move_left();
            }
        }
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => {
            if app.session.phase() == Phase::Grid {
                app.grid.move_right();
            }
        }
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => {
            if app.session.phase() == Phase::Grid {
                app.grid.move_down();
            }
        }
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => {
            if app.session.phase() == Phase::Grid {
                app.grid.move_up();
            }
        }

        _ => {}
    }

    Ok(())
}
