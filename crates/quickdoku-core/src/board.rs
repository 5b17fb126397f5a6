//! The puzzle board and cell addressing.

use crate::topology::CELL_COUNT;
use std::fmt;

/// A cell position on the board (0-indexed row and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a position. Both coordinates must be in 0..9.
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < 9 && col < 9);
        Self { row, col }
    }

    /// Row-major cell index (0..81).
    pub fn index(self) -> usize {
        self.row * 9 + self.col
    }
}

/// A 9×9 Sudoku board: 81 cells in row-major order, 0 meaning empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [u8; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// An all-empty board.
    pub fn empty() -> Self {
        Self {
            cells: [0; CELL_COUNT],
        }
    }

    /// Build a board from a layout string.
    ///
    /// Up to 81 characters are consumed: decimal digits become that cell's
    /// value ('0' meaning empty) and anything else (dots, dashes, spaces)
    /// becomes an empty cell. Shorter input leaves the remaining cells
    /// empty; anything past 81 characters is ignored. This never fails.
    pub fn from_layout(layout: &str) -> Self {
        let mut cells = [0u8; CELL_COUNT];
        for (cell, c) in cells.iter_mut().zip(layout.chars()) {
            *cell = c.to_digit(10).map_or(0, |d| d as u8);
        }
        Self { cells }
    }

    /// The digit at `pos`, 0 if empty.
    pub fn get(&self, pos: Position) -> u8 {
        self.cells[pos.index()]
    }

    /// Set the digit at `pos`. `digit` must be in 0..=9 (0 clears the cell).
    pub fn set(&mut self, pos: Position, digit: u8) {
        debug_assert!(digit <= 9);
        self.cells[pos.index()] = digit;
    }

    /// Clear the cell at `pos`.
    pub fn clear(&mut self, pos: Position) {
        self.cells[pos.index()] = 0;
    }

    /// All 81 cells in row-major order.
    pub fn cells(&self) -> &[u8; CELL_COUNT] {
        &self.cells
    }

    /// Number of filled cells.
    pub fn given_count(&self) -> usize {
        self.cells.iter().filter(|&&d| d > 0).count()
    }

    /// Whether every cell is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&d| d == 0)
    }

    /// Compact 81-character form: digits for filled cells, '.' for empty.
    pub fn to_line(&self) -> String {
        self.cells
            .iter()
            .map(|&d| {
                if d == 0 {
                    '.'
                } else {
                    char::from(b'0' + d)
                }
            })
            .collect()
    }
}

impl fmt::Display for Board {
    /// Render the board as a bordered 9×9 grid.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            if row % 3 == 0 {
                writeln!(f, "+---+---+---+")?;
            }
            for col in 0..9 {
                if col % 3 == 0 {
                    write!(f, "|")?;
                }
                let digit = self.cells[row * 9 + col];
                if digit == 0 {
                    write!(f, ".")?;
                } else {
                    write!(f, "{digit}")?;
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "+---+---+---+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_layout_digits_and_placeholders() {
        let board = Board::from_layout("53..7....6..195....98....6.");
        assert_eq!(board.get(Position::new(0, 0)), 5);
        assert_eq!(board.get(Position::new(0, 1)), 3);
        assert_eq!(board.get(Position::new(0, 2)), 0);
        assert_eq!(board.get(Position::new(1, 3)), 1);
        // Everything past the short input is empty.
        assert_eq!(board.get(Position::new(8, 8)), 0);
    }

    #[test]
    fn test_from_layout_zero_means_empty() {
        let board = Board::from_layout("050");
        assert_eq!(board.get(Position::new(0, 0)), 0);
        assert_eq!(board.get(Position::new(0, 1)), 5);
        assert_eq!(board.get(Position::new(0, 2)), 0);
    }

    #[test]
    fn test_from_layout_ignores_excess() {
        let layout = "9".repeat(100);
        let board = Board::from_layout(&layout);
        assert_eq!(board.given_count(), 81);
    }

    #[test]
    fn test_to_line_round_trip() {
        let layout = "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
        let board = Board::from_layout(layout);
        let line = board.to_line();
        assert_eq!(line.len(), 81);
        assert_eq!(Board::from_layout(&line), board);
    }

    #[test]
    fn test_display_grid_shape() {
        let rendered = Board::empty().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 13); // 9 cell rows + 4 border rows
        assert_eq!(lines[0], "+---+---+---+");
        assert_eq!(lines[1], "|...|...|...|");
    }

    proptest! {
        #[test]
        fn from_layout_never_panics_and_stays_in_range(layout in ".*") {
            let board = Board::from_layout(&layout);
            prop_assert!(board.cells().iter().all(|&d| d <= 9));
        }

        #[test]
        fn to_line_round_trips_any_board(cells in prop::collection::vec(0u8..=9, 81)) {
            let mut board = Board::empty();
            for (i, &d) in cells.iter().enumerate() {
                board.set(Position::new(i / 9, i % 9), d);
            }
            prop_assert_eq!(Board::from_layout(&board.to_line()), board);
        }
    }
}
