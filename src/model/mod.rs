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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application — the card
//! deck and the session state machine that governs which card may be shown
//! next.

pub(crate) mod catalog;
pub(crate) mod session;

use crate::model::session::{Phase, Session};

/// A single catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone)]
pub struct Card {
    /// Unique stable key, used in the session state and the snapshot.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Poster image file name, relative to the media directory.
    pub image: String,
    /// Video file name, relative to the media directory. `None` marks a
    /// poster-only card.
    pub video: Option<String>,
}

/// How a card cell should be painted on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CardVisuals {
    pub(crate) used: bool,
    pub(crate) selected: bool,
}

/// Pure visual-state query for one card, consumed by the render layer.
///
/// A card reads as selected from the moment it is chosen until the session
/// returns to the grid, so it stays highlighted while merely paused.
pub(crate) fn card_visuals(card_id: &str, session: &Session) -> CardVisuals {
    CardVisuals {
        used: session.is_used(card_id),
        selected: session.selected_card() == Some(card_id) && session.phase() != Phase::Grid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::Catalog;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn session() -> Session {
        Session::new(Arc::new(Catalog::builtin()), Box::new(MemoryStore::new()))
    }

    #[test]
    fn fresh_card_is_neither_used_nor_selected() {
        let session = session();

        let visuals = card_visuals("dapper", &session);
        assert!(!visuals.used);
        assert!(!visuals.selected);
    }

    #[test]
    fn selected_card_highlights_while_paused_and_playing() {
        let mut session = session();
        assert!(session.select_card("dapper"));

        assert!(card_visuals("dapper", &session).selected);
        assert!(!card_visuals("wreed", &session).selected);

        assert!(session.play_video());
        assert!(card_visuals("dapper", &session).selected);
    }

    #[test]
    fn returning_to_grid_swaps_selected_for_used() {
        let mut session = session();
        assert!(session.select_card("dapper"));
        session.return_to_grid();

        let visuals = card_visuals("dapper", &session);
        assert!(visuals.used);
        assert!(!visuals.selected);
    }
}
