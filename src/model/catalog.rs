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

//! Card catalog management.
//!
//! The catalog is an ordered, read-only table of cards, loaded once at
//! startup and injected wherever card data is needed. The built-in table is
//! the standard eight-card deck; a custom deck can be loaded from a JSON
//! file instead.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::model::Card;

/// Fixed ordered sequence of cards. Never mutated after construction.
pub(crate) struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    /// The standard deck. Only `bedrieglijk` ships with a video; the other
    /// cards are poster-only.
    pub(crate) fn builtin() -> Self {
        let card = |id: &str, name: &str, video: bool| Card {
            id: id.to_string(),
            name: name.to_string(),
            image: format!("{id}.png"),
            video: video.then(|| format!("{id}.m4v")),
        };

        Self {
            cards: vec![
                card("bedrieglijk", "Bedrieglijk", true),
                card("beschermend", "Beschermend", false),
                card("creatief", "Creatief", false),
                card("dapper", "Dapper", false),
                card("doorzetter", "Doorzetter", false),
                card("sinister", "Sinister", false),
                card("vreugdevol", "Vreugdevol", false),
                card("wreed", "Wreed", false),
            ],
        }
    }

    /// Loads a custom deck from a JSON file.
    ///
    /// The file holds an array of `{id, name, image, video}` objects; the
    /// `video` field may be omitted for poster-only cards.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if the deck is
    /// empty, or if two cards share an id.
    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        #[derive(Deserialize)]
        struct CardFile {
            id: String,
            name: String,
            image: String,
            #[serde(default)]
            video: Option<String>,
        }

        let body = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let entries: Vec<CardFile> = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

        if entries.is_empty() {
            bail!("Catalog file contains no cards: {}", path.display());
        }

        let mut cards = Vec::with_capacity(entries.len());
        for entry in entries {
            if cards.iter().any(|c: &Card| c.id == entry.id) {
                bail!("Duplicate card id in catalog file: {}", entry.id);
            }
            cards.push(Card {
                id: entry.id,
                name: entry.name,
                image: entry.image,
                video: entry.video,
            });
        }

        Ok(Self { cards })
    }

    /// Exact-match lookup by card id.
    pub(crate) fn card_by_id(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.card_by_id(id).is_some()
    }

    pub(crate) fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn len(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn builtin_deck_holds_eight_cards_in_order() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.cards()[0].id, "bedrieglijk");
        assert_eq!(catalog.cards()[7].id, "wreed");
    }

    #[test]
    fn lookup_finds_exact_id_only() {
        let catalog = Catalog::builtin();

        let card = catalog.card_by_id("dapper").expect("dapper exists");
        assert_eq!(card.name, "Dapper");
        assert_eq!(card.image, "dapper.png");
        assert!(card.video.is_none());

        assert!(catalog.card_by_id("Dapper").is_none());
        assert!(catalog.card_by_id("unknown").is_none());
    }

    #[test]
    fn only_bedrieglijk_has_a_video() {
        let catalog = Catalog::builtin();

        for card in catalog.cards() {
            if card.id == "bedrieglijk" {
                assert_eq!(card.video.as_deref(), Some("bedrieglijk.m4v"));
            } else {
                assert!(card.video.is_none(), "unexpected video on {}", card.id);
            }
        }
    }

    #[test]
    fn file_deck_loads_and_preserves_order() {
        let file = unique_temp_file();
        let body = r#"
[
  {"id":"one","name":"One","image":"one.png","video":"one.m4v"},
  {"id":"two","name":"Two","image":"two.png"}
]
"#;
        fs::write(&file, body).expect("write");

        let catalog = Catalog::from_file(&file).expect("load");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.cards()[0].video.as_deref(), Some("one.m4v"));
        assert!(catalog.cards()[1].video.is_none());

        let _ = fs::remove_file(file);
    }

    #[test]
    fn file_deck_rejects_duplicate_ids() {
        let file = unique_temp_file();
        let body = r#"
[
  {"id":"one","name":"One","image":"one.png"},
  {"id":"one","name":"Other","image":"other.png"}
]
"#;
        fs::write(&file, body).expect("write");

        assert!(Catalog::from_file(&file).is_err());

        let _ = fs::remove_file(file);
    }

    fn unique_temp_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "kaartui_catalog_test_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }
}
