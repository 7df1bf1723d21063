//! Host-testable core of the gridpin keypad.
//!
//! The user enters a PIN by picking, for each position, the *row* of a
//! freshly shuffled 4×4 symbol grid that contains the wanted digit.  An
//! onlooker only ever sees a row index.
//!
//! Everything that does not touch hardware lives here: the grid shuffler,
//! the shared grid history, input debouncing, the auth state machine, the
//! presentation and feedback protocols and the queues tying them
//! together.
//!
//! Usage: `cargo test --lib` / `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and only compiles with `--features embedded`.

#![cfg_attr(not(test), no_std)]

pub mod auth;
pub mod config;
pub mod error;
pub mod feedback;
pub mod grid;
pub mod history;
pub mod input;
pub mod pipeline;
pub mod ui;

pub use auth::{Action, AuthController, AuthResult, AuthState};
pub use error::{Error, Result};
pub use grid::{Grid, GridRequest, GridResponse, GridShuffler, Row, Step};
pub use history::GridHistory;
pub use input::{InputDispatcher, InputEvent};
pub use pipeline::Pipeline;
pub use ui::PresentationCommand;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - cross-module behaviour
// ═══════════════════════════════════════════════════════════════════════════
