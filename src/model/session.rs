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

//! Card session state machine.
//!
//! This module owns the one piece of state with real invariants: which card
//! is selected, which playback phase the session is in, and which cards have
//! already been shown. Every mutation persists a snapshot through the
//! injected storage port before it returns, so an external reader always
//! sees state consistent with the last completed operation.
//!
//! # Legal transitions
//!
//! `Grid → Paused → Playing → Grid → …`. The phase is the sole gate:
//! selecting is only possible from the grid state machine's point of view
//! for cards not yet used, and playback can only start from `Paused`, which
//! guards against double-triggered play requests. `return_to_grid` is legal
//! from any phase and acts as the universal abort/finish transition.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::catalog::Catalog;
use crate::storage::{SessionSnapshot, StateStore};

/// Playback phase of the session.
///
/// `Paused` and `Playing` are never entered without a selected card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Phase {
    #[default]
    Grid,
    Paused,
    Playing,
}

pub(crate) struct Session {
    catalog: Arc<Catalog>,
    store: Box<dyn StateStore>,

    selected_card: Option<String>,
    phase: Phase,
    used_cards: HashSet<String>,

    // Storage failures never propagate out of the session; the most recent
    // one is held here until the shell collects it.
    storage_error: Option<String>,
}

impl Session {
    /// Builds a session and immediately hydrates it from the store.
    ///
    /// A missing, unreadable, or malformed snapshot leaves the session at
    /// its defaults (grid phase, nothing selected, nothing used) — startup
    /// never fails on corrupted persisted state. The error text, if any, is
    /// retained for [`Session::take_storage_error`].
    pub(crate) fn new(catalog: Arc<Catalog>, store: Box<dyn StateStore>) -> Self {
        let mut session = Self {
            catalog,
            store,
            selected_card: None,
            phase: Phase::Grid,
            used_cards: HashSet::new(),
            storage_error: None,
        };

        match session.store.load() {
            Ok(Some(snapshot)) => {
                session.selected_card = snapshot.selected_card;
                session.phase = snapshot.phase;
                session.used_cards = snapshot.used_cards.into_iter().collect();
            }
            Ok(None) => {}
            Err(e) => session.storage_error = Some(e.to_string()),
        }

        session
    }

    /// Selects a card, entering the `Paused` phase.
    ///
    /// Returns `false` without any state change or persistence write when
    /// the id is unknown to the catalog or the card has already been used.
    pub(crate) fn select_card(&mut self, card_id: &str) -> bool {
        if !self.catalog.contains(card_id) || self.used_cards.contains(card_id) {
            return false;
        }

        self.selected_card = Some(card_id.to_string());
        self.phase = Phase::Paused;
        self.persist();

        true
    }

    /// Starts playback. Legal only from `Paused`; returns `false` with no
    /// side effects otherwise.
    pub(crate) fn play_video(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }

        self.phase = Phase::Playing;
        self.persist();

        true
    }

    /// Returns to the grid from any phase.
    ///
    /// The selected card, if any, is marked used. Calling this twice in a
    /// row is harmless.
    pub(crate) fn return_to_grid(&mut self) {
        if let Some(card_id) = self.selected_card.take() {
            self.used_cards.insert(card_id);
        }
        self.phase = Phase::Grid;
        self.persist();
    }

    /// Clears the whole session, including the used set. The only way a
    /// previously used card becomes selectable again.
    pub(crate) fn reset(&mut self) {
        self.selected_card = None;
        self.phase = Phase::Grid;
        self.used_cards.clear();
        self.persist();
    }

    pub(crate) fn is_used(&self, card_id: &str) -> bool {
        self.used_cards.contains(card_id)
    }

    pub(crate) fn selected_card(&self) -> Option<&str> {
        self.selected_card.as_deref()
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn used_count(&self) -> usize {
        self.used_cards.len()
    }

    /// Takes the most recent storage error, if one occurred since the last
    /// call. The shell surfaces it as a non-fatal application event.
    pub(crate) fn take_storage_error(&mut self) -> Option<String> {
        self.storage_error.take()
    }

    // Writes the snapshot as the final step of every mutating operation.
    // A write failure does not undo the transition; it is recorded for the
    // shell to surface.
    fn persist(&mut self) {
        let snapshot = SessionSnapshot {
            selected_card: self.selected_card.clone(),
            phase: self.phase,
            used_cards: self.used_cards.iter().cloned().collect(),
            timestamp: now_ms(),
        };

        if let Err(e) = self.store.save(&snapshot) {
            self.storage_error = Some(e.to_string());
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
