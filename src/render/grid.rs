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

//! Render the card grid.
//!
//! Each catalog card gets a cell. How a cell is painted comes from the pure
//! visual-state query: used cards are dimmed and ticked, the selected card
//! keeps an accent border until the session returns to the grid, and the
//! keyboard cursor highlights its cell background while the grid is active.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    App,
    model::{card_visuals, session::Phase},
    render::icons::{ICON_CARD_BACK, ICON_PLAY, ICON_USED},
};

/// Renders the card grid widget.
pub(crate) fn draw_grid(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" kaartui ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let columns = app.grid.columns();
    let count = app.catalog.len();
    if count == 0 {
        return;
    }
    let rows = count.div_ceil(columns);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(inner_area);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cell_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);

        for (column, cell_area) in cell_areas.iter().enumerate() {
            let index = row * columns + column;
            if let Some(card) = app.catalog.cards().get(index) {
                draw_card_cell(f, *cell_area, app, index, card);
            }
        }
    }
}

fn draw_card_cell(f: &mut Frame, area: Rect, app: &App, index: usize, card: &crate::model::Card) {
    let visuals = card_visuals(&card.id, &app.session);
    let under_cursor = app.session.phase() == Phase::Grid && app.grid.cursor() == index;

    let border_style = if visuals.selected {
        Style::default()
            .fg(app.theme.card_selected_border)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.border_colour)
    };

    let mut cell = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    if under_cursor {
        cell = cell.style(Style::default().bg(app.theme.card_cursor_bg));
    }

    let inner = cell.inner(area);
    f.render_widget(cell, area);

    let name_style = if visuals.used {
        Style::default()
            .fg(app.theme.card_used_fg)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
            .fg(app.theme.card_fg)
            .add_modifier(Modifier::BOLD)
    };

    let marker = if visuals.used {
        Span::styled(
            format!("{} ", ICON_USED),
            Style::default().fg(app.theme.card_used_fg),
        )
    } else {
        Span::styled(
            format!("{} ", ICON_CARD_BACK),
            Style::default().fg(app.theme.accent_colour),
        )
    };

    let mut name_line = vec![marker, Span::styled(&card.name, name_style)];
    if card.video.is_some() && !visuals.used {
        name_line.push(Span::styled(
            format!(" {}", ICON_PLAY),
            Style::default().fg(app.theme.status_fg),
        ));
    }

    let body = Paragraph::new(Line::from(name_line)).alignment(Alignment::Center);
    f.render_widget(body, centered_line(inner));
}

// Vertically centers a single text line within the cell.
fn centered_line(area: Rect) -> Rect {
    if area.height <= 1 {
        return area;
    }
    Rect {
        x: area.x,
        y: area.y + (area.height - 1) / 2,
        width: area.width,
        height: 1,
    }
}
