//! Per-step record of the grids shown to the user.
//!
//! The shuffler writes a slot every time it publishes a grid; the auth
//! controller reads slots back when it validates a finished attempt.  All
//! access goes through a short critical section - a bulk copy in or out,
//! never any I/O while the lock is held.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::config::PIN_LENGTH;
use crate::grid::{Grid, Row, Step};

pub struct GridHistory {
    grids: Mutex<CriticalSectionRawMutex, RefCell<[Grid; PIN_LENGTH]>>,
}

impl GridHistory {
    /// Every slot starts out as the identity grid.
    pub const fn new() -> Self {
        Self {
            grids: Mutex::new(RefCell::new([Grid::IDENTITY; PIN_LENGTH])),
        }
    }

    /// Overwrite the grid recorded for `step`.
    pub fn record(&self, step: Step, grid: &Grid) {
        self.grids.lock(|grids| grids.borrow_mut()[step.index()] = *grid);
    }

    /// Copy of the grid recorded for `step`.
    pub fn get(&self, step: Step) -> Grid {
        self.grids.lock(|grids| grids.borrow()[step.index()])
    }

    /// Run the row-containment check for one step inside the lock.
    pub fn row_contains(&self, step: Step, row: Row, symbol: u8) -> bool {
        self.grids
            .lock(|grids| grids.borrow()[step.index()].row_contains(row, symbol))
    }

    /// Copy of every recorded grid.
    pub fn snapshot(&self) -> [Grid; PIN_LENGTH] {
        self.grids.lock(|grids| *grids.borrow())
    }
}

impl Default for GridHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_with_identity_grids() {
        let history = GridHistory::new();
        for grid in history.snapshot() {
            assert_eq!(grid, Grid::IDENTITY);
        }
        assert!(history.row_contains(Step::FIRST, Row::FIRST, b'3'));
        assert!(!history.row_contains(Step::FIRST, Row::FIRST, b'4'));
    }

    #[test]
    fn record_overwrites_only_its_slot() {
        let history = GridHistory::new();
        let grid = Grid::from_rows([*b"FEDC", *b"BA98", *b"7654", *b"3210"]);
        let step = Step::new(3).unwrap();

        history.record(step, &grid);

        assert_eq!(history.get(step), grid);
        assert_eq!(history.get(Step::FIRST), Grid::IDENTITY);
        assert_eq!(history.get(Step::LAST), Grid::IDENTITY);
    }

    #[test]
    fn concurrent_writers_and_readers_see_whole_grids() {
        let history = Arc::new(GridHistory::new());
        let reversed = Grid::from_rows([*b"FEDC", *b"BA98", *b"7654", *b"3210"]);

        let writer = {
            let history = Arc::clone(&history);
            thread::spawn(move || {
                for i in 0..1000 {
                    let grid = if i % 2 == 0 { reversed } else { Grid::IDENTITY };
                    for step in Step::all() {
                        history.record(step, &grid);
                    }
                }
            })
        };

        for _ in 0..1000 {
            for grid in history.snapshot() {
                assert!(grid == reversed || grid == Grid::IDENTITY);
            }
        }
        writer.join().unwrap();
    }
}
