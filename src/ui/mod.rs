//! Presentation protocol between the auth controller and the display.
//!
//! The controller only emits `PresentationCommand`s; the display task owns
//! a [`Screen`] model that tracks what is visible and decides which part
//! of the OLED must be redrawn.
//!
//! ## Layout (SSD1306 128×64)
//!
//! - **Cursor**: triangle marker at x=10, one per grid row
//! - **Grid**: four rows of `"A B C D"` at x=25, 15 px apart
//! - **Mask**: `"***"` at (80, 27)
//! - **Message**: full-screen text at (15, 30)

pub mod screen;

pub use screen::{Redraw, Screen};

use crate::config::{MESSAGE_CAPACITY, PIN_LENGTH};
use crate::grid::{Grid, Row};

/// Masked PIN progress, one mask character per accepted selection.
pub type Mask = heapless::String<PIN_LENGTH>;

/// Short full-screen message text.
pub type Message = heapless::String<MESSAGE_CAPACITY>;

/// Commands consumed by the presentation sink.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PresentationCommand {
    ShowGrid(Grid),
    ShowCursor(Row),
    ShowMask(Mask),
    ShowMessage(Message),
}
