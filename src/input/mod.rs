//! Joystick + button input.
//!
//! The dispatcher samples the joystick axis and the button handoff once
//! per poll cycle, debounces both, and turns them into `InputEvent`s for
//! the auth controller.
//!
//! ## Components
//!
//! - **Axis**: analog joystick, 12-bit, centred around 2048
//! - **Button**: active-low push button, falling edge signalled from GPIOTE

pub mod dispatcher;
pub mod navigation;

pub use dispatcher::{Events, InputDispatcher};
pub use navigation::{classify_axis, Tilt};

use crate::grid::Row;

/// Debounced input events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// The cursor moved to this row.
    Navigate(Row),
    /// The button was pressed while the cursor was on this row.
    Select(Row),
}
