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

//! Session state persistence.
//!
//! This module defines the snapshot written after every session mutation and
//! the storage port it is written through. The production store keeps a
//! single JSON file under a fixed name; the session never talks to the file
//! system directly.
//!
//! The wire format is kept stable so snapshots survive upgrades:
//!
//! ```json
//! {
//!     "selectedCard": "dapper",
//!     "phase": "paused",
//!     "usedCards": ["sinister"],
//!     "timestamp": 1722945600000
//! }
//! ```
//!
//! Unknown or missing fields fall back to their defaults on read rather than
//! failing the load.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::session::Phase;

/// Default session state file, relative to the working directory.
pub(crate) const STATE_FILE: &str = "kaartui_state.json";

#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("failed to read session state: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write session state: {0}")]
    Write(#[source] std::io::Error),

    #[error("session state is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Serialized projection of the session, written on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct SessionSnapshot {
    pub(crate) selected_card: Option<String>,
    pub(crate) phase: Phase,
    pub(crate) used_cards: Vec<String>,
    /// Write time in milliseconds since the Unix epoch.
    pub(crate) timestamp: u64,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            selected_card: None,
            phase: Phase::Grid,
            used_cards: vec![],
            timestamp: 0,
        }
    }
}

/// Storage port for the session snapshot.
///
/// `load` returns `Ok(None)` when no snapshot has ever been written, which
/// is not an error.
pub(crate) trait StateStore {
    fn load(&self) -> Result<Option<SessionSnapshot>, StorageError>;
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError>;
}

/// File-backed store holding the snapshot as pretty-printed JSON.
pub(crate) struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<SessionSnapshot>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let body = fs::read_to_string(&self.path).map_err(StorageError::Read)?;
        let snapshot = serde_json::from_str(&body)?;

        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        let body = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, body).map_err(StorageError::Write)
    }
}

/// In-memory store used by tests to observe exactly what was persisted.
#[cfg(test)]
pub(crate) struct MemoryStore {
    slot: std::sync::Arc<std::sync::Mutex<Option<SessionSnapshot>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            slot: std::sync::Arc::new(std::sync::Mutex::new(None)),
        }
    }

    /// Builds a store over an existing slot, so a second session can
    /// rehydrate from what a first one persisted.
    pub(crate) fn with_slot(
        slot: std::sync::Arc<std::sync::Mutex<Option<SessionSnapshot>>>,
    ) -> Self {
        Self { slot }
    }

    /// Shared handle onto the stored snapshot, for inspection after the
    /// store itself has been moved into a session.
    pub(crate) fn shared(&self) -> std::sync::Arc<std::sync::Mutex<Option<SessionSnapshot>>> {
        std::sync::Arc::clone(&self.slot)
    }
}

#[cfg(test)]
impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<SessionSnapshot>, StorageError> {
        Ok(self.slot.lock().unwrap().clone())
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        *self.slot.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn file_roundtrip() {
        let file = unique_temp_file();
        let store = JsonFileStore::new(&file);

        let snapshot = SessionSnapshot {
            selected_card: Some("dapper".to_string()),
            phase: Phase::Paused,
            used_cards: vec!["sinister".to_string(), "wreed".to_string()],
            timestamp: 1_722_945_600_000,
        };

        store.save(&snapshot).expect("save");
        let loaded = store.load().expect("load").expect("snapshot present");

        assert_eq!(loaded, snapshot);
        let _ = fs::remove_file(file);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let store = JsonFileStore::new(unique_temp_file());
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn malformed_body_is_a_malformed_error() {
        let file = unique_temp_file();
        fs::write(&file, "{not json").expect("write");

        let store = JsonFileStore::new(&file);
        assert!(matches!(store.load(), Err(StorageError::Malformed(_))));

        let _ = fs::remove_file(file);
    }

    #[test]
    fn wire_format_uses_documented_names() {
        let snapshot = SessionSnapshot {
            selected_card: Some("dapper".to_string()),
            phase: Phase::Playing,
            used_cards: vec!["creatief".to_string()],
            timestamp: 7,
        };

        let body = serde_json::to_string(&snapshot).expect("serialize");
        assert!(body.contains("\"selectedCard\":\"dapper\""));
        assert!(body.contains("\"phase\":\"playing\""));
        assert!(body.contains("\"usedCards\":[\"creatief\"]"));
        assert!(body.contains("\"timestamp\":7"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let snapshot: SessionSnapshot = serde_json::from_str("{}").expect("parse");

        assert_eq!(snapshot.selected_card, None);
        assert_eq!(snapshot.phase, Phase::Grid);
        assert!(snapshot.used_cards.is_empty());
        assert_eq!(snapshot.timestamp, 0);
    }

    #[test]
    fn partial_snapshot_keeps_known_fields() {
        let body = r#"{"phase":"paused","selectedCard":"wreed"}"#;
        let snapshot: SessionSnapshot = serde_json::from_str(body).expect("parse");

        assert_eq!(snapshot.selected_card.as_deref(), Some("wreed"));
        assert_eq!(snapshot.phase, Phase::Paused);
        assert!(snapshot.used_cards.is_empty());
    }

    fn unique_temp_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "kaartui_storage_test_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }
}
