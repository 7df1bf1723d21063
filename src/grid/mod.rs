//! Symbol grids shown on the keypad.
//!
//! A grid is a 4×4 arrangement of the 16-symbol alphabet.  One fresh grid
//! is generated for every PIN step; the user picks the *row* that contains
//! the digit they want, never the digit itself.
//!
//! ```text
//! step 0        step 1        ...
//! 7 C 1 E       3 0 A 9
//! 0 5 B 2       F 1 6 D
//! ...           ...
//! ```

pub mod shuffle;


pub use shuffle::{fill_grid, DuplicatePolicy, GridShuffler, PermutationPool, Served, ShuffleOutcome, SymbolSource};

use crate::config::{GRID_CELLS, GRID_COLS, GRID_ROWS, PIN_LENGTH};
use crate::error::Error;

/// The fixed symbol alphabet: digits first, then six letters.
pub const ALPHABET: [u8; GRID_CELLS] = *b"0123456789ABCDEF";

/// A row index in `0..GRID_ROWS`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Row(u8);

impl Row {
    pub const FIRST: Row = Row(0);
    pub const LAST: Row = Row(GRID_ROWS as u8 - 1);

    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < GRID_ROWS {
            Some(Row(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// The row below this one, or `None` at the bottom edge.
    pub fn below(self) -> Option<Row> {
        Row::new(self.0 + 1)
    }

    /// The row above this one, or `None` at the top edge.
    pub fn above(self) -> Option<Row> {
        self.0.checked_sub(1).map(Row)
    }

    /// True if `other` is directly above or below this row.
    pub fn is_adjacent(self, other: Row) -> bool {
        self.0.abs_diff(other.0) == 1
    }

    pub fn all() -> impl Iterator<Item = Row> {
        (0..GRID_ROWS as u8).map(Row)
    }
}

impl TryFrom<u8> for Row {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Row::new(index).ok_or(Error::InvalidRow(index))
    }
}

/// A PIN position in `0..PIN_LENGTH`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step(u8);

impl Step {
    pub const FIRST: Step = Step(0);
    pub const LAST: Step = Step(PIN_LENGTH as u8 - 1);

    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < PIN_LENGTH {
            Some(Step(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// The following step, or `None` after the last PIN position.
    pub fn next(self) -> Option<Step> {
        Step::new(self.0 + 1)
    }

    pub fn all() -> impl Iterator<Item = Step> {
        (0..PIN_LENGTH as u8).map(Step)
    }
}

impl TryFrom<u8> for Step {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Step::new(index).ok_or(Error::InvalidStep(index))
    }
}

/// A 4×4 symbol grid.  Published grids never repeat a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Grid {
    cells: [[u8; GRID_COLS]; GRID_ROWS],
}

impl Grid {
    /// The alphabet laid out row-major: `0123 / 4567 / 89AB / CDEF`.
    pub const IDENTITY: Grid = {
        let mut cells = [[0u8; GRID_COLS]; GRID_ROWS];
        let mut i = 0;
        while i < GRID_CELLS {
            cells[i / GRID_COLS][i % GRID_COLS] = ALPHABET[i];
            i += 1;
        }
        Grid { cells }
    };

    pub const fn from_rows(cells: [[u8; GRID_COLS]; GRID_ROWS]) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> &[[u8; GRID_COLS]; GRID_ROWS] {
        &self.cells
    }

    pub fn row(&self, row: Row) -> &[u8; GRID_COLS] {
        &self.cells[row.index()]
    }

    /// Row-containment check: does `symbol` appear anywhere in `row`?
    pub fn row_contains(&self, row: Row, symbol: u8) -> bool {
        self.row(row).contains(&symbol)
    }

    /// The row holding `symbol`, if any.
    pub fn row_of(&self, symbol: u8) -> Option<Row> {
        Row::all().find(|&row| self.row_contains(row, symbol))
    }

    /// Iterate over all cells in row-major order.
    pub fn symbols(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    /// True if every cell holds a distinct alphabet symbol.
    pub fn is_valid(&self) -> bool {
        let mut seen = [false; GRID_CELLS];
        for symbol in self.symbols() {
            let Some(pos) = ALPHABET.iter().position(|&s| s == symbol) else {
                return false;
            };
            if seen[pos] {
                return false;
            }
            seen[pos] = true;
        }
        true
    }

    /// Render one row as `"A B C D"`.
    pub fn row_text(&self, row: Row) -> heapless::String<{ GRID_COLS * 2 }> {
        let mut line = heapless::String::new();
        for (col, &symbol) in self.row(row).iter().enumerate() {
            if col > 0 {
                let _ = line.push(' ');
            }
            let _ = line.push(symbol as char);
        }
        line
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::IDENTITY
    }
}

/// Asks the shuffler for a grid for one PIN step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridRequest {
    pub step: Step,
}

/// A freshly generated grid, already recorded in the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridResponse {
    pub step: Step,
    pub grid: Grid,
}
