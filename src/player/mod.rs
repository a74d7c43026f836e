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

//! Media playback control.
//!
//! This module provides the [`PlaybackController`] that drives the playback
//! surface according to the card chosen by the session. It holds no
//! persistent state of its own and never mutates the session; the event
//! loop consults the session first and then tells the controller what to
//! load, play, or unload.
//!
//! The heavy lifting happens behind the [`surface::PlaybackSurface`] seam;
//! the production implementation lives in [`backend`] and runs libmpv on a
//! background worker thread.

pub(crate) mod backend;
pub(crate) mod surface;

use std::path::PathBuf;

use crate::model::Card;
use crate::player::surface::{LabelSurface, PlaybackError, PlaybackSurface};

pub(crate) struct PlaybackController {
    surface: Box<dyn PlaybackSurface>,
    label: Option<Box<dyn LabelSurface>>,
    media_dir: PathBuf,
    current_card: Option<Card>,
}

impl PlaybackController {
    /// Builds a controller over a playback surface and an optional name
    /// label. Media file names are resolved against `media_dir`.
    pub(crate) fn new(
        surface: Box<dyn PlaybackSurface>,
        label: Option<Box<dyn LabelSurface>>,
        media_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            surface,
            label,
            media_dir: media_dir.into(),
            current_card: None,
        }
    }

    /// Loads a card onto the surface, superseding whatever was loaded
    /// before without an explicit unload.
    ///
    /// A card with a video gets its media loaded, rewound, and made
    /// visible; a poster-only card hides the surface and shows its idle
    /// poster instead. The label, when present, shows the card name.
    pub(crate) fn load_card(&mut self, card: &Card) -> Result<(), PlaybackError> {
        self.current_card = Some(card.clone());

        if let Some(video) = &card.video {
            let source = self.resolve(video);
            self.surface.set_source(&source)?;
            self.surface.seek_to_start()?;
            self.surface.set_visible(true);
        } else {
            let poster = self.resolve(&card.image);
            self.surface.set_visible(false);
            self.surface.set_poster(&poster);
        }

        if let Some(label) = &mut self.label {
            label.set_text(&card.name);
            label.set_visible(true);
        }

        Ok(())
    }

    /// Starts playback of the loaded card, blocking until the surface
    /// reports that playback began or failed.
    ///
    /// "Playing" a poster-only card (or no card at all) is a presentation
    /// step, not a media operation: the label is hidden and the call
    /// succeeds immediately without touching the surface.
    pub(crate) fn play(&mut self) -> Result<(), PlaybackError> {
        match &self.current_card {
            Some(card) if card.video.is_some() => {
                self.surface.seek_to_start()?;
                if let Some(label) = &mut self.label {
                    label.set_visible(false);
                }
                self.surface.play()
            }
            _ => {
                if let Some(label) = &mut self.label {
                    label.set_visible(false);
                }
                Ok(())
            }
        }
    }

    /// Requests the surface to pause. Safe to call with nothing loaded.
    pub(crate) fn pause(&mut self) {
        let _ = self.surface.pause();
    }

    /// Pauses, rewinds, clears the media source and the label, and drops
    /// the current-card reference. Best-effort: surface failures cannot
    /// fail the return to the grid.
    pub(crate) fn unload(&mut self) {
        let _ = self.surface.pause();
        let _ = self.surface.seek_to_start();
        let _ = self.surface.set_source("");

        if let Some(label) = &mut self.label {
            label.set_text("");
            label.set_visible(false);
        }

        self.current_card = None;
    }

    pub(crate) fn current_card(&self) -> Option<&Card> {
        self.current_card.as_ref()
    }

    fn resolve(&self, file_name: &str) -> String {
        if self.media_dir.as_os_str().is_empty() {
            return file_name.to_string();
        }
        self.media_dir.join(file_name).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct SurfaceState {
        source: Option<String>,
        poster: Option<String>,
        visible: bool,
        rewinds: usize,
        play_calls: usize,
        pause_calls: usize,
        fail_play: bool,
    }

    struct FakeSurface {
        state: Arc<Mutex<SurfaceState>>,
    }

    impl FakeSurface {
        fn new() -> (Self, Arc<Mutex<SurfaceState>>) {
            let state = Arc::new(Mutex::new(SurfaceState::default()));
            (
                Self {
                    state: Arc::clone(&state),
                },
                state,
            )
        }
    }

    impl PlaybackSurface for FakeSurface {
        fn set_source(&mut self, source: &str) -> Result<(), PlaybackError> {
            self.state.lock().unwrap().source = Some(source.to_string());
            Ok(())
        }

        fn play(&mut self) -> Result<(), PlaybackError> {
            let mut state = self.state.lock().unwrap();
            state.play_calls += 1;
            if state.fail_play {
                Err(PlaybackError::Start("autoplay rejected".to_string()))
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) -> Result<(), PlaybackError> {
            self.state.lock().unwrap().pause_calls += 1;
            Ok(())
        }

        fn seek_to_start(&mut self) -> Result<(), PlaybackError> {
            self.state.lock().unwrap().rewinds += 1;
            Ok(())
        }

        fn set_visible(&mut self, visible: bool) {
            self.state.lock().unwrap().visible = visible;
        }

        fn set_poster(&mut self, image: &str) {
            self.state.lock().unwrap().poster = Some(image.to_string());
        }
    }

    struct FakeLabel {
        state: Arc<Mutex<(String, bool)>>,
    }

    impl FakeLabel {
        fn new() -> (Self, Arc<Mutex<(String, bool)>>) {
            let state = Arc::new(Mutex::new((String::new(), false)));
            (
                Self {
                    state: Arc::clone(&state),
                },
                state,
            )
        }
    }

    impl LabelSurface for FakeLabel {
        fn set_text(&mut self, text: &str) {
            self.state.lock().unwrap().0 = text.to_string();
        }

        fn set_visible(&mut self, visible: bool) {
            self.state.lock().unwrap().1 = visible;
        }
    }

    fn video_card() -> Card {
        Card {
            id: "bedrieglijk".to_string(),
            name: "Bedrieglijk".to_string(),
            image: "bedrieglijk.png".to_string(),
            video: Some("bedrieglijk.m4v".to_string()),
        }
    }

    fn poster_card() -> Card {
        Card {
            id: "dapper".to_string(),
            name: "Dapper".to_string(),
            image: "dapper.png".to_string(),
            video: None,
        }
    }

    fn controller() -> (PlaybackController, Arc<Mutex<SurfaceState>>, Arc<Mutex<(String, bool)>>) {
        let (surface, surface_state) = FakeSurface::new();
        let (label, label_state) = FakeLabel::new();
        let controller =
            PlaybackController::new(Box::new(surface), Some(Box::new(label)), "media");
        (controller, surface_state, label_state)
    }

    #[test]
    fn loading_a_video_card_points_the_surface_at_its_media() {
        let (mut controller, surface, label) = controller();

        controller.load_card(&video_card()).expect("load");

        let state = surface.lock().unwrap();
        assert_eq!(state.source.as_deref(), Some("media/bedrieglijk.m4v"));
        assert_eq!(state.rewinds, 1);
        assert!(state.visible);
        assert_eq!(state.play_calls, 0, "loading must not start playback");

        let label = label.lock().unwrap();
        assert_eq!(label.0, "Bedrieglijk");
        assert!(label.1);
    }

    #[test]
    fn loading_a_poster_card_hides_the_surface() {
        let (mut controller, surface, label) = controller();

        controller.load_card(&poster_card()).expect("load");

        let state = surface.lock().unwrap();
        assert!(state.source.is_none());
        assert_eq!(state.poster.as_deref(), Some("media/dapper.png"));
        assert!(!state.visible);

        assert_eq!(label.lock().unwrap().0, "Dapper");
    }

    #[test]
    fn loading_again_supersedes_the_previous_card() {
        let (mut controller, surface, label) = controller();

        controller.load_card(&video_card()).expect("load");
        controller.load_card(&poster_card()).expect("load");

        assert_eq!(controller.current_card().map(|c| c.id.as_str()), Some("dapper"));
        assert!(!surface.lock().unwrap().visible);
        assert_eq!(label.lock().unwrap().0, "Dapper");
    }

    #[test]
    fn playing_a_video_card_rewinds_hides_the_label_and_starts() {
        let (mut controller, surface, label) = controller();
        controller.load_card(&video_card()).expect("load");

        controller.play().expect("play");

        let state = surface.lock().unwrap();
        assert_eq!(state.play_calls, 1);
        assert_eq!(state.rewinds, 2, "load and play each rewind");
        assert!(!label.lock().unwrap().1);
    }

    #[test]
    fn playing_a_poster_card_succeeds_without_a_media_start() {
        let (mut controller, surface, label) = controller();
        controller.load_card(&poster_card()).expect("load");

        controller.play().expect("play");

        assert_eq!(surface.lock().unwrap().play_calls, 0);
        assert!(!label.lock().unwrap().1, "label hides on play");
    }

    #[test]
    fn playing_with_no_card_loaded_is_a_no_op_success() {
        let (mut controller, surface, _label) = controller();

        controller.play().expect("play");

        assert_eq!(surface.lock().unwrap().play_calls, 0);
    }

    #[test]
    fn a_rejected_start_is_reported_not_propagated() {
        let (mut controller, surface, _label) = controller();
        controller.load_card(&video_card()).expect("load");
        surface.lock().unwrap().fail_play = true;

        let outcome = controller.play();

        assert!(matches!(outcome, Err(PlaybackError::Start(_))));
        assert_eq!(
            controller.current_card().map(|c| c.id.as_str()),
            Some("bedrieglijk"),
            "a failed start does not unload the card"
        );
    }

    #[test]
    fn unload_clears_surface_label_and_card() {
        let (mut controller, surface, label) = controller();
        controller.load_card(&video_card()).expect("load");
        controller.play().expect("play");

        controller.unload();

        let state = surface.lock().unwrap();
        assert_eq!(state.source.as_deref(), Some(""), "source is cleared");
        assert!(state.pause_calls >= 1);

        let label = label.lock().unwrap();
        assert_eq!(label.0, "");
        assert!(!label.1);

        assert!(controller.current_card().is_none());
    }

    #[test]
    fn pause_is_safe_with_nothing_loaded() {
        let (mut controller, surface, _label) = controller();

        controller.pause();

        assert_eq!(surface.lock().unwrap().pause_calls, 1);
    }
}
