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

//! Terminal emulator utilities.
//!
//! OSC (Operating System Command) escape sequences for properties the TUI
//! framework does not cover. Requires a terminal emulator that understands
//! the relevant OSC codes, which most modern ones do.

use std::io::{self, Write};

/// Sets the terminal background color to a hex color string (`"#281432"`)
/// via OSC 11. Flushed immediately so the change applies before the first
/// frame is drawn.
pub(crate) fn set_terminal_bg(hex_color: &str) {
    print!("\x1b]11;{}\x07", hex_color);
    io::stdout().flush().unwrap();
}

/// Reverts the background to the user's configured color via OSC 111.
/// Called during cleanup.
pub(crate) fn reset_terminal_bg() {
    print!("\x1b]111\x07");
    io::stdout().flush().unwrap();
}

/// Sets the terminal window title via OSC 0.
pub(crate) fn set_terminal_title(title: &str) {
    print!("\x1b]0;{}\x07", title);
    io::stdout().flush().unwrap();
}
