use crate::config::PIN_LENGTH;
use crate::grid::{Row, Step};
use crate::history::GridHistory;

/// Check a finished attempt against the grids that were on screen.
///
/// Position `i` passes when `pin[i]` appears anywhere in row `rows[i]` of
/// the grid recorded for step `i`.  Each position takes the history lock
/// on its own; the first failing position ends the check.
pub fn validate_attempt(history: &GridHistory, pin: &[u8; PIN_LENGTH], rows: &[Row]) -> bool {
    if rows.len() != PIN_LENGTH {
        return false;
    }

    Step::all()
        .zip(rows.iter().zip(pin.iter()))
        .all(|(step, (&row, &digit))| history.row_contains(step, row, digit))
}
