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

//! Playback capability seams.
//!
//! The controller never touches the playback backend directly; it drives
//! these two small traits. Production implements them with the mpv worker
//! and the shared label slot below, tests inject recording fakes.

use std::sync::{Arc, Mutex};

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum PlaybackError {
    #[error("playback did not start: {0}")]
    Start(String),

    #[error("playback backend is gone")]
    Disconnected,
}

/// Surface capable of rendering a video or holding an idle poster.
pub(crate) trait PlaybackSurface {
    /// Points the surface at a media source. An empty source unloads
    /// whatever is currently loaded.
    fn set_source(&mut self, source: &str) -> Result<(), PlaybackError>;

    /// Requests playback start and blocks until the surface reports that
    /// playback has begun, or that the platform rejected it.
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self) -> Result<(), PlaybackError>;

    fn seek_to_start(&mut self) -> Result<(), PlaybackError>;

    fn set_visible(&mut self, visible: bool);

    fn set_poster(&mut self, image: &str);
}

/// Text overlay showing the current card name.
pub(crate) trait LabelSurface {
    fn set_text(&mut self, text: &str);

    fn set_visible(&mut self, visible: bool);
}

#[derive(Debug, Clone, Default)]
pub(crate) struct LabelState {
    pub(crate) text: String,
    pub(crate) visible: bool,
}

/// Label implementation backed by a shared slot the render layer reads.
pub(crate) struct SharedLabel {
    state: Arc<Mutex<LabelState>>,
}

impl SharedLabel {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(LabelState::default())),
        }
    }

    pub(crate) fn state(&self) -> Arc<Mutex<LabelState>> {
        Arc::clone(&self.state)
    }
}

impl LabelSurface for SharedLabel {
    fn set_text(&mut self, text: &str) {
        self.state.lock().unwrap().text = text.to_string();
    }

    fn set_visible(&mut self, visible: bool) {
        self.state.lock().unwrap().visible = visible;
    }
}
