//! Grid generation - Fisher–Yates over the alphabet, consumed row-major.
//!
//! A single permutation already guarantees uniqueness.  The fill loop still
//! checks each candidate against the symbols placed in *earlier* rows and,
//! on a hit, redraws up to `SHUFFLE_RETRY_BUDGET` times, refilling the pool
//! with a fresh permutation whenever it runs dry.  When the budget is spent
//! the [`DuplicatePolicy`] decides what lands in the cell.

use rand_core::RngCore;

use super::{Grid, GridRequest, GridResponse, ALPHABET};
use crate::config::{GRID_CELLS, GRID_COLS, GRID_ROWS, SHUFFLE_DUPLICATE_POLICY, SHUFFLE_RETRY_BUDGET};
use crate::history::GridHistory;

/// What to place in a cell once the retry budget is exhausted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DuplicatePolicy {
    /// Accept the last (duplicate) candidate and count it.
    FailOpen,
    /// Substitute the first alphabet symbol not yet placed in the grid.
    Strict,
}

/// Something that hands out candidate symbols one at a time.
pub trait SymbolSource {
    fn draw(&mut self) -> u8;
}

/// A shuffled copy of the alphabet, consumed front to back.
pub struct PermutationPool<R> {
    rng: R,
    symbols: [u8; GRID_CELLS],
    next: usize,
}

impl<R: RngCore> PermutationPool<R> {
    pub fn new(rng: R) -> Self {
        let mut pool = Self {
            rng,
            symbols: ALPHABET,
            next: 0,
        };
        pool.reset();
        pool
    }

    /// Start over from the alphabet with a fresh permutation.
    pub fn reset(&mut self) {
        self.symbols = ALPHABET;
        self.permute();
    }

    fn permute(&mut self) {
        for i in (1..GRID_CELLS).rev() {
            let j = uniform_below(&mut self.rng, i as u32 + 1) as usize;
            self.symbols.swap(i, j);
        }
        self.next = 0;
    }
}

impl<R: RngCore> SymbolSource for PermutationPool<R> {
    fn draw(&mut self) -> u8 {
        if self.next >= GRID_CELLS {
            self.permute();
        }
        let symbol = self.symbols[self.next];
        self.next += 1;
        symbol
    }
}

/// Uniform integer in `0..bound` without modulo bias.
fn uniform_below<R: RngCore>(rng: &mut R, bound: u32) -> u32 {
    // Values below 2^32 mod bound would over-represent small results.
    let threshold = bound.wrapping_neg() % bound;
    loop {
        let x = rng.next_u32();
        if x >= threshold {
            return x % bound;
        }
    }
}

/// A generated grid plus how often the duplicate policy had to step in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShuffleOutcome {
    pub grid: Grid,
    /// Cells where a duplicate was accepted (`FailOpen`).
    pub accepted_duplicates: u8,
    /// Cells where a substitute symbol was placed (`Strict`).
    pub substitutions: u8,
}

/// Fill a grid row-major from `source`.
///
/// `FailOpen` only compares a candidate against earlier rows.  `Strict`
/// also compares against the cells already placed in the current row.
pub fn fill_grid<S: SymbolSource>(source: &mut S, retry_budget: u8, policy: DuplicatePolicy) -> ShuffleOutcome {
    let mut cells = [[0u8; GRID_COLS]; GRID_ROWS];
    let mut accepted_duplicates = 0;
    let mut substitutions = 0;

    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let clashes = |cells: &[[u8; GRID_COLS]; GRID_ROWS], symbol: u8| match policy {
                DuplicatePolicy::FailOpen => in_earlier_rows(cells, row, symbol),
                DuplicatePolicy::Strict => placed_before(cells, row, col, symbol),
            };

            let mut candidate = source.draw();
            let mut tries = 0;
            while clashes(&cells, candidate) && tries < retry_budget {
                candidate = source.draw();
                tries += 1;
            }

            if clashes(&cells, candidate) {
                match policy {
                    DuplicatePolicy::FailOpen => accepted_duplicates += 1,
                    DuplicatePolicy::Strict => {
                        candidate = first_unplaced(&cells, row, col);
                        substitutions += 1;
                    }
                }
            }
            cells[row][col] = candidate;
        }
    }

    ShuffleOutcome {
        grid: Grid::from_rows(cells),
        accepted_duplicates,
        substitutions,
    }
}

fn in_earlier_rows(cells: &[[u8; GRID_COLS]; GRID_ROWS], row: usize, symbol: u8) -> bool {
    cells[..row].iter().any(|r| r.contains(&symbol))
}

fn placed_before(cells: &[[u8; GRID_COLS]; GRID_ROWS], row: usize, col: usize, symbol: u8) -> bool {
    in_earlier_rows(cells, row, symbol) || cells[row][..col].contains(&symbol)
}

/// First alphabet symbol absent from every cell placed before `(row, col)`.
fn first_unplaced(cells: &[[u8; GRID_COLS]; GRID_ROWS], row: usize, col: usize) -> u8 {
    // At most 15 cells precede this one, so some symbol is always free.
    ALPHABET
        .iter()
        .copied()
        .find(|&s| !placed_before(cells, row, col, s))
        .unwrap_or(ALPHABET[0])
}

/// Result of serving one grid request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Served {
    pub response: GridResponse,
    pub accepted_duplicates: u8,
    pub substitutions: u8,
}

/// Produces grids on request and records them in the shared history.
pub struct GridShuffler<R> {
    pool: PermutationPool<R>,
    retry_budget: u8,
    policy: DuplicatePolicy,
}

impl<R: RngCore> GridShuffler<R> {
    /// Shuffler with the configured retry budget and duplicate policy.
    pub fn new(rng: R) -> Self {
        Self::with_policy(rng, SHUFFLE_RETRY_BUDGET, SHUFFLE_DUPLICATE_POLICY)
    }

    pub fn with_policy(rng: R, retry_budget: u8, policy: DuplicatePolicy) -> Self {
        Self {
            pool: PermutationPool::new(rng),
            retry_budget,
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Generate a grid from a fresh permutation of the alphabet.
    pub fn shuffle(&mut self) -> ShuffleOutcome {
        self.pool.reset();
        fill_grid(&mut self.pool, self.retry_budget, self.policy)
    }

    /// Generate the grid for `request.step`, store it in `history`, and
    /// only then build the response.  A reader that sees the response can
    /// rely on the history slot already holding the same grid.
    pub fn serve(&mut self, request: GridRequest, history: &GridHistory) -> Served {
        let outcome = self.shuffle();
        history.record(request.step, &outcome.grid);
        Served {
            response: GridResponse {
                step: request.step,
                grid: outcome.grid,
            },
            accepted_duplicates: outcome.accepted_duplicates,
            substitutions: outcome.substitutions,
        }
    }
}
