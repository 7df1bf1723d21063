use crate::config::{AXIS_HIGH_THRESHOLD, AXIS_LOW_THRESHOLD, AXIS_MAX};
use crate::grid::Row;

/// Joystick position relative to the dead-band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tilt {
    /// Below the dead-band: cursor moves down the grid.
    Down,
    /// Above the dead-band: cursor moves up the grid.
    Up,
    Centered,
}

/// Classify a raw axis reading; readings above full scale are clamped.
pub fn classify_axis(raw: u16) -> Tilt {
    let value = raw.min(AXIS_MAX);
    if value < AXIS_LOW_THRESHOLD {
        Tilt::Down
    } else if value > AXIS_HIGH_THRESHOLD {
        Tilt::Up
    } else {
        Tilt::Centered
    }
}

/// Row the cursor would move to, or `None` at an edge or when centred.
pub fn move_cursor(cursor: Row, tilt: Tilt) -> Option<Row> {
    match tilt {
        Tilt::Down => cursor.below(),
        Tilt::Up => cursor.above(),
        Tilt::Centered => None,
    }
}
