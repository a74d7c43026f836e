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

//! Card grid cursor state.
//!
//! Tracks which card cell the keyboard cursor is on. Movement wraps at the
//! edges in both directions.

pub(crate) const GRID_COLUMNS: usize = 4;

pub(crate) struct CardGrid {
    count: usize,
    columns: usize,
    cursor: usize,
}

impl CardGrid {
    pub(crate) fn new(count: usize, columns: usize) -> Self {
        Self {
            count,
            columns: columns.max(1),
            cursor: 0,
        }
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn columns(&self) -> usize {
        self.columns
    }

    pub(crate) fn move_right(&mut self) {
        if self.count == 0 {
            return;
        }
        self.cursor = if self.cursor >= self.count - 1 { 0 } else { self.cursor + 1 };
    }

    pub(crate) fn move_left(&mut self) {
        if self.count == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { self.count - 1 } else { self.cursor - 1 };
    }

    pub(crate) fn move_down(&mut self) {
        if self.count == 0 {
            return;
        }
        let next = self.cursor + self.columns;
        self.cursor = if next < self.count {
            next
        } else {
            // Wrap to the top of the same column
            self.cursor % self.columns
        };
    }

    pub(crate) fn move_up(&mut self) {
        if self.count == 0 {
            return;
        }
        if self.cursor >= self.columns {
            self.cursor -= self.columns;
            return;
        }

        // Wrap to the bottom of the same column
        let column = self.cursor % self.columns;
        let rows = self.count.div_ceil(self.columns);
        let mut candidate = column + (rows - 1) * self.columns;
        if candidate >= self.count {
            candidate -= self.columns;
        }
        self.cursor = candidate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_movement_wraps_around() {
        let mut grid = CardGrid::new(8, 4);

        grid.move_left();
        assert_eq!(grid.cursor(), 7);

        grid.move_right();
        assert_eq!(grid.cursor(), 0);
    }

    #[test]
    fn vertical_movement_stays_in_the_column() {
        let mut grid = CardGrid::new(8, 4);

        grid.move_right();
        grid.move_down();
        assert_eq!(grid.cursor(), 5);

        grid.move_down();
        assert_eq!(grid.cursor(), 1, "wraps to the top of column 1");

        grid.move_up();
        assert_eq!(grid.cursor(), 5, "wraps to the bottom of column 1");
    }

    #[test]
    fn ragged_last_row_is_skipped_when_wrapping_up() {
        // 6 cards in 4 columns: the last row only has columns 0 and 1
        let mut grid = CardGrid::new(6, 4);

        grid.move_right();
        grid.move_right();
        assert_eq!(grid.cursor(), 2);

        grid.move_up();
        assert_eq!(grid.cursor(), 2, "column 2 has a single row");

        grid.move_down();
        assert_eq!(grid.cursor(), 2);
    }

    #[test]
    fn empty_grid_never_moves() {
        let mut grid = CardGrid::new(0, 4);

        grid.move_right();
        grid.move_down();
        assert_eq!(grid.cursor(), 0);
    }
}
