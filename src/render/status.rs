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

//! Render the session status area.
//!
//! Shows the current phase, the card name overlay while it is visible,
//! session progress, and the most recent surfaced error.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    App,
    model::session::Phase,
    render::icons::{ICON_PAUSE, ICON_PLAY},
};

/// Renders the status block under the card grid.
pub(crate) fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    f.render_widget(Paragraph::new(phase_line(app)), chunks[0]);

    let progress = format!(
        "{} of {} cards shown",
        app.session.used_count(),
        app.catalog.len()
    );
    f.render_widget(
        Paragraph::new(progress).style(Style::default().fg(app.theme.status_fg)),
        chunks[1],
    );

    if let Some(message) = &app.status_error {
        f.render_widget(
            Paragraph::new(message.as_str()).style(Style::default().fg(app.theme.error_fg)),
            chunks[2],
        );
    }
}

fn phase_line(app: &App) -> Line<'static> {
    match app.session.phase() {
        Phase::Grid => Line::from(Span::styled(
            "Pick a card",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Phase::Paused => {
            // The overlay label carries the card name until playback starts
            let label = app.label.lock().unwrap();
            let name = if label.visible {
                label.text.clone()
            } else {
                String::new()
            };
            Line::from(vec![
                Span::styled(format!("{} ", ICON_PAUSE), Style::default().bold()),
                Span::styled(name, Style::default().bold().fg(app.theme.accent_colour)),
                Span::raw(" — enter plays, esc finishes"),
            ])
        }
        Phase::Playing => {
            let name = app
                .controller
                .current_card()
                .map(|card| card.name.clone())
                .unwrap_or_default();
            Line::from(vec![
                Span::styled(format!("{} ", ICON_PLAY), Style::default().bold()),
                Span::styled(name, Style::default().bold().fg(app.theme.accent_colour)),
                Span::raw(" playing — esc finishes the card"),
            ])
        }
    }
}

/// Renders the one-line key hints footer.
pub(crate) fn draw_hints(f: &mut Frame, area: Rect, app: &App) {
    let hints = "arrows/hjkl move \u{b7} enter select/play \u{b7} esc finish \u{b7} ctrl+alt+r reset \u{b7} q quit";
    f.render_widget(
        Paragraph::new(hints).style(Style::default().fg(app.theme.hint_fg)),
        area,
    );
}
