//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, queue depths and the
//! secret PIN live here so they can be tuned in one place.

use crate::auth::TimeoutPolicy;
use crate::grid::DuplicatePolicy;

// Grid geometry

/// Number of rows shown on the keypad.
pub const GRID_ROWS: usize = 4;

/// Number of symbols in each row.
pub const GRID_COLS: usize = 4;

/// Total number of cells, equal to the alphabet size.
pub const GRID_CELLS: usize = GRID_ROWS * GRID_COLS;

// PIN

/// Number of symbols the user enters per attempt.
pub const PIN_LENGTH: usize = 6;

/// The secret PIN, one alphabet digit per step.
pub const SECRET_PIN: [u8; PIN_LENGTH] = *b"123456";

/// Character appended to the on-screen mask for each accepted selection.
pub const MASK_CHAR: char = '*';

/// Message shown after a successful attempt.
pub const MSG_SUCCESS: &str = "PIN CORRECT";

/// Message shown after a failed attempt.
pub const MSG_FAILURE: &str = "PIN INCORRECT";

/// Capacity of a presentation message string.
pub const MESSAGE_CAPACITY: usize = 30;

// Shuffler

/// Draws attempted for a cell before the duplicate policy kicks in.
pub const SHUFFLE_RETRY_BUDGET: u8 = 10;

/// What the shuffler does when the retry budget runs out.
pub const SHUFFLE_DUPLICATE_POLICY: DuplicatePolicy = DuplicatePolicy::FailOpen;

// Queue depths

pub const INPUT_QUEUE_DEPTH: usize = 10;
pub const GRID_REQUEST_QUEUE_DEPTH: usize = 5;
pub const GRID_RESPONSE_QUEUE_DEPTH: usize = 5;
pub const PRESENTATION_QUEUE_DEPTH: usize = 10;
pub const AUTH_RESULT_QUEUE_DEPTH: usize = 3;

// Timing

/// Delay between two input sampling cycles (ms).
pub const INPUT_POLL_MS: u64 = 30;

/// Minimum time between two accepted navigation events (ms).
pub const NAV_DEBOUNCE_MS: u64 = 200;

/// Minimum time between two accepted selection events (ms).
pub const SELECT_DEBOUNCE_MS: u64 = 200;

/// How long the controller waits for a grid before giving up (ms).
pub const GRID_RESPONSE_TIMEOUT_MS: u64 = 1000;

/// What the controller does after a grid response timeout.
pub const GRID_TIMEOUT_POLICY: TimeoutPolicy = TimeoutPolicy::Stall;

/// How long the result message stays on screen before a new session (ms).
pub const FEEDBACK_HOLD_MS: u64 = 2000;

// Joystick

/// Full-scale reading of the 12-bit joystick axis.
pub const AXIS_MAX: u16 = 4095;

/// Readings below this move the cursor down (towards higher row indices).
pub const AXIS_LOW_THRESHOLD: u16 = 1500;

/// Readings above this move the cursor up (towards row 0).
pub const AXIS_HIGH_THRESHOLD: u16 = 2500;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the actual `embassy_nrf::peripherals::*` are
// picked in `main.rs`.  Adjust for your custom PCB.
//
//   Joystick X     → P0.02 (AIN0)
//   Button SELECT  → P0.11
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27
//   Buzzer         → P0.28
//   LED green      → P0.13
//   LED red        → P0.14

// Feedback

/// PWM clock after the /16 prescaler (Hz).
pub const PWM_CLOCK_HZ: u32 = 1_000_000;

/// LED PWM period in PWM clock ticks.
pub const LED_PWM_PERIOD: u16 = 2000;

/// LED on-level in PWM clock ticks (5 % brightness).
pub const LED_PWM_LEVEL: u16 = 100;
