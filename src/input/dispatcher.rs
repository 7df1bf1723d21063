//! Input debouncing and event dispatch.
//!
//! Navigation and selection keep independent debounce timers.  A
//! navigation event is accepted once `NAV_DEBOUNCE_MS` have passed since
//! the previous accepted one, no matter what the axis did in between.  A
//! button edge is always consumed from the handoff, but only produces a
//! `Select` when more than `SELECT_DEBOUNCE_MS` have passed since the
//! previous accepted selection.

use heapless::Vec;

use super::navigation::{classify_axis, move_cursor, Tilt};
use super::InputEvent;
use crate::config::{NAV_DEBOUNCE_MS, SELECT_DEBOUNCE_MS};
use crate::grid::Row;

/// Events produced by one poll cycle, navigation first.
pub type Events = Vec<InputEvent, 2>;

pub struct InputDispatcher {
    cursor: Row,
    last_navigation_ms: Option<u64>,
    last_selection_ms: Option<u64>,
}

impl InputDispatcher {
    pub const fn new() -> Self {
        Self {
            cursor: Row::FIRST,
            last_navigation_ms: None,
            last_selection_ms: None,
        }
    }

    /// Row the next navigation starts from and the next selection reports.
    pub fn cursor(&self) -> Row {
        self.cursor
    }

    /// Adopt the controller's highlighted row (after a new grid or session).
    pub fn resync(&mut self, row: Row) {
        self.cursor = row;
    }

    /// Run one sampling cycle.
    ///
    /// `axis` is the raw joystick reading, `button_edge` whether the button
    /// handoff was pending.  Returns at most one `Navigate` and at most one
    /// `Select`.
    pub fn poll(&mut self, now_ms: u64, axis: u16, button_edge: bool) -> Events {
        let mut events = Events::new();

        let tilt = classify_axis(axis);
        if tilt != Tilt::Centered && navigation_allowed(self.last_navigation_ms, now_ms) {
            if let Some(row) = move_cursor(self.cursor, tilt) {
                self.cursor = row;
                self.last_navigation_ms = Some(now_ms);
                let _ = events.push(InputEvent::Navigate(row));
            }
        }

        if button_edge && selection_allowed(self.last_selection_ms, now_ms) {
            self.last_selection_ms = Some(now_ms);
            let _ = events.push(InputEvent::Select(self.cursor));
        }

        events
    }
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn elapsed(last_ms: Option<u64>, now_ms: u64) -> Option<u64> {
    last_ms.map(|last| now_ms.saturating_sub(last))
}

fn navigation_allowed(last_ms: Option<u64>, now_ms: u64) -> bool {
    elapsed(last_ms, now_ms).map_or(true, |dt| dt >= NAV_DEBOUNCE_MS)
}

fn selection_allowed(last_ms: Option<u64>, now_ms: u64) -> bool {
    elapsed(last_ms, now_ms).map_or(true, |dt| dt > SELECT_DEBOUNCE_MS)
}
