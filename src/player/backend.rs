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

//! MPV-backed playback surface.
//!
//! This module provides the production implementation of
//! [`PlaybackSurface`], leveraging `libmpv` for video decoding and display.
//! It manages a background worker thread that bridges the gap between the
//! surface's command-based interface and the low-level MPV event system.
//!
//! # Architecture
//!
//! The worker owns the MPV handler and runs a dual loop: drain pending
//! [`SurfaceCommand`]s, then poll MPV events. Two things flow back out of
//! the worker:
//!
//! 1. **Play acknowledgements**: a `play` command carries a reply channel
//!    that is answered once MPV reports playback started (or the load
//!    failed), which is what makes [`MpvSurface::play`] blocking.
//! 2. **Application events**: end-of-file and decode errors are broadcast
//!    as [`AppEvent`]s so the event loop can fold them into the session.

use anyhow::{Context, Result};
use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use crate::{
    events::AppEvent,
    player::surface::{PlaybackError, PlaybackSurface},
};

type PlayReply = Sender<Result<(), String>>;

#[derive(Debug)]
pub(crate) enum SurfaceCommand {
    Load(String),
    Play(PlayReply),
    Pause,
    SeekToStart,
    Unload,
    SetVideoEnabled(bool),
    ShowPoster(String),
}

/// Command proxy implementing [`PlaybackSurface`] over the worker thread.
pub(crate) struct MpvSurface {
    command_tx: Sender<SurfaceCommand>,
}

impl MpvSurface {
    /// Spawns the MPV worker thread and returns a surface handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send application-level events (end of
    ///   playback, backend errors) back to the main event loop.
    pub(crate) fn new(event_tx: Sender<AppEvent>) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<SurfaceCommand>();

        spawn_surface_worker(command_rx, event_tx);

        Self { command_tx }
    }

    fn send(&self, command: SurfaceCommand) -> Result<(), PlaybackError> {
        self.command_tx
            .send(command)
            .map_err(|_| PlaybackError::Disconnected)
    }
}

impl PlaybackSurface for MpvSurface {
    fn set_source(&mut self, source: &str) -> Result<(), PlaybackError> {
        if source.is_empty() {
            self.send(SurfaceCommand::Unload)
        } else {
            self.send(SurfaceCommand::Load(source.to_string()))
        }
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(SurfaceCommand::Play(reply_tx))?;

        match reply_rx.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(reason)) => Err(PlaybackError::Start(reason)),
            Err(_) => Err(PlaybackError::Disconnected),
        }
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.send(SurfaceCommand::Pause)
    }

    fn seek_to_start(&mut self) -> Result<(), PlaybackError> {
        self.send(SurfaceCommand::SeekToStart)
    }

    fn set_visible(&mut self, visible: bool) {
        let _ = self.send(SurfaceCommand::SetVideoEnabled(visible));
    }

    fn set_poster(&mut self, image: &str) {
        let _ = self.send(SurfaceCommand::ShowPoster(image.to_string()));
    }
}

/// Spawns the playback worker thread to process surface commands.
///
/// This function takes ownership of the command receiver and the event
/// sender, moving them into a dedicated background thread.
///
/// If the internal worker returns an error, it is caught here and broadcast
/// as a fatal application event.
pub(crate) fn spawn_surface_worker(
    command_rx: Receiver<SurfaceCommand>,
    event_tx: Sender<AppEvent>,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = surface_worker(command_rx, event_tx) {
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

/// The primary execution loop for the playback backend.
///
/// Initializes a local `libmpv` context configured as a kiosk video window
/// (window kept open across files, frames held at end of file) and enters a
/// multi-loop select pattern to handle incoming commands and outgoing
/// events simultaneously.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize or if the
/// internal command/event loops encounter an unrecoverable failure.
fn surface_worker(command_rx: Receiver<SurfaceCommand>, event_tx: Sender<AppEvent>) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("force-window", "yes")
            .context("Failed to set forced window")?;
        builder
            .set_option("keep-open", "yes")
            .context("Failed to set keep-open")?;
        builder
            .set_option("osc", "no")
            .context("Failed to disable the on-screen controller")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    // Reply channel of a play request still waiting for MPV to confirm
    let mut pending_play: Option<PlayReply> = None;

    loop {
        process_commands(&mut handler, &command_rx, &mut pending_play)?;
        process_mpv_events(&mut handler, &mut pending_play, &event_tx)?;
    }
}

/// Drains and executes all pending commands from the application channel.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &mpsc::Receiver<SurfaceCommand>,
    pending_play: &mut Option<PlayReply>,
) -> Result<()> {
    while let Ok(command) = command_rx.try_recv() {
        match command {
            SurfaceCommand::Load(source) => {
                handler
                    .command(&["loadfile", &source, "replace"])
                    .context(format!("Failed to load file: {}", &source))?;
                // Hold the first frame until play is requested
                handler.set_property("pause", true)?;
            }
            SurfaceCommand::Play(reply) => {
                if let Err(e) = handler.set_property("pause", false) {
                    let _ = reply.send(Err(format!("{:?}", e)));
                } else {
                    *pending_play = Some(reply);
                }
            }
            SurfaceCommand::Pause => {
                handler.set_property("pause", true)?;
            }
            SurfaceCommand::SeekToStart => {
                // No-op while nothing is loaded
                handler.command(&["seek", "0", "absolute"]).ok();
            }
            SurfaceCommand::Unload => {
                handler.command(&["stop"])?;
            }
            SurfaceCommand::SetVideoEnabled(enabled) => {
                handler.set_property("vid", if enabled { "auto" } else { "no" })?;
            }
            SurfaceCommand::ShowPoster(image) => {
                handler
                    .command(&["loadfile", &image, "replace"])
                    .context(format!("Failed to load poster: {}", &image))?;
                handler.set_property("pause", true)?;
            }
        }
    }

    Ok(())
}

/// Polls for MPV events and answers the application.
///
/// This function waits for up to 50ms for an event from the MPV context.
/// Playback-start confirmations settle the pending play request; reaching
/// the end of a file is broadcast so the session can return to the grid.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    pending_play: &mut Option<PlayReply>,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<()> {
    if let Some(mpv_event) = handler.wait_event(0.05) {
        match mpv_event {
            mpv::Event::Unpause | mpv::Event::PlaybackRestart => {
                if let Some(reply) = pending_play.take() {
                    let _ = reply.send(Ok(()));
                }
            }

            mpv::Event::EndFile(result) => match result {
                Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF) => {
                    event_tx
                        .send(AppEvent::PlaybackFinished)
                        .context("Failed to send end-of-playback event")?;
                }
                Ok(mpv::EndFileReason::MPV_END_FILE_REASON_ERROR) | Err(_) => {
                    if let Some(reply) = pending_play.take() {
                        let _ = reply.send(Err("Media failed to play".to_string()));
                    } else {
                        event_tx
                            .send(AppEvent::Error("Media failed to load".to_string()))
                            .context("Failed to send playback error event")?;
                    }
                }
                _ => {}
            },

            _ => {}
        }
    }

    Ok(())
}
