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

//! Application configuration.
//!
//! This module manages the application configuration file.

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "kaartui";

const DEFAULT_SELECT_DEBOUNCE_MS: u64 = 300;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub version: u32,
    /// Directory containing the card poster images and videos.
    pub media_dir: String,
    /// Overrides the default session state file location.
    pub state_file: Option<String>,
    /// Replaces the built-in card catalog with one loaded from a JSON file.
    pub catalog_file: Option<String>,
    /// Quiet period applied to card activation, in milliseconds.
    pub select_debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            media_dir: String::from("media"),
            state_file: None,
            catalog_file: None,
            select_debounce_ms: DEFAULT_SELECT_DEBOUNCE_MS,
        }
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}
