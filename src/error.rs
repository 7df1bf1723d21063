//! Unified error type for gridpin.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (with the `defmt` feature) for on-target logging.

use core::fmt;

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A step index outside `0..PIN_LENGTH`.
    InvalidStep(u8),

    /// A row index outside the grid.
    InvalidRow(u8),

    /// A non-blocking send found the queue full; the message was dropped.
    QueueFull(Queue),

    /// No grid arrived within the response timeout.
    GridTimeout,

    /// I²C transaction to the display failed.
    Display,
}

/// Names the pipeline queue an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Queue {
    Input,
    GridRequest,
    GridResponse,
    Presentation,
    AuthResult,
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Queue::Input => "input",
            Queue::GridRequest => "grid request",
            Queue::GridResponse => "grid response",
            Queue::Presentation => "presentation",
            Queue::AuthResult => "auth result",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidStep(step) => write!(f, "step {} out of range", step),
            Error::InvalidRow(row) => write!(f, "row {} out of range", row),
            Error::QueueFull(queue) => write!(f, "{} queue full, message dropped", queue),
            Error::GridTimeout => f.write_str("timed out waiting for a grid"),
            Error::Display => f.write_str("display bus error"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
