//! Queues and signals connecting the five tasks.
//!
//! ```text
//!  button edge ──(ButtonSignal)──▶ input ──InputQueue──▶ auth ──PresentationQueue──▶ display
//!                                   ▲                   │ ▲
//!                     (CursorSignal)└───────────────────┘ │ GridResponseQueue
//!                                        GridRequestQueue ▼ │
//!                                                       shuffler ──▶ GridHistory ◀── auth (validation)
//!                                   auth ──AuthResultQueue──▶ feedback
//! ```
//!
//! Every queue is FIFO with a single consumer.  Producers use the
//! non-blocking `offer_*`/`dispatch` helpers so a full queue drops the
//! message instead of stalling the sender.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use crate::auth::{Action, AuthResult};
use crate::config::{
    AUTH_RESULT_QUEUE_DEPTH, GRID_REQUEST_QUEUE_DEPTH, GRID_RESPONSE_QUEUE_DEPTH, INPUT_QUEUE_DEPTH,
    PRESENTATION_QUEUE_DEPTH,
};
use crate::error::{Error, Queue, Result};
use crate::grid::{GridRequest, GridResponse, Row};
use crate::history::GridHistory;
use crate::input::InputEvent;
use crate::ui::PresentationCommand;

pub type InputQueue = Channel<CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH>;
pub type GridRequestQueue = Channel<CriticalSectionRawMutex, GridRequest, GRID_REQUEST_QUEUE_DEPTH>;
pub type GridResponseQueue = Channel<CriticalSectionRawMutex, GridResponse, GRID_RESPONSE_QUEUE_DEPTH>;
pub type PresentationQueue = Channel<CriticalSectionRawMutex, PresentationCommand, PRESENTATION_QUEUE_DEPTH>;
pub type AuthResultQueue = Channel<CriticalSectionRawMutex, AuthResult, AUTH_RESULT_QUEUE_DEPTH>;

/// Single-slot button handoff.  Edges arriving while one is pending
/// coalesce into that one.
pub type ButtonSignal = Signal<CriticalSectionRawMutex, ()>;

/// Latest row the controller reset the cursor to.
pub type CursorSignal = Signal<CriticalSectionRawMutex, Row>;

pub struct Pipeline {
    pub input: InputQueue,
    pub grid_requests: GridRequestQueue,
    pub grid_responses: GridResponseQueue,
    pub presentation: PresentationQueue,
    pub results: AuthResultQueue,
    pub button: ButtonSignal,
    pub cursor: CursorSignal,
    pub history: GridHistory,
}

impl Pipeline {
    pub const fn new() -> Self {
        Self {
            input: Channel::new(),
            grid_requests: Channel::new(),
            grid_responses: Channel::new(),
            presentation: Channel::new(),
            results: Channel::new(),
            button: Signal::new(),
            cursor: Signal::new(),
            history: GridHistory::new(),
        }
    }

    /// Called from the button edge handler.
    pub fn button_pressed(&self) {
        self.button.signal(());
    }

    /// Non-blocking check of the button handoff; clears it.
    pub fn take_button_edge(&self) -> bool {
        self.button.try_take().is_some()
    }

    /// Non-blocking check for a cursor reset from the controller.
    pub fn take_cursor_sync(&self) -> Option<Row> {
        self.cursor.try_take()
    }

    pub fn offer_input(&self, event: InputEvent) -> Result<()> {
        offer(&self.input, event, Queue::Input)
    }

    pub fn offer_grid_request(&self, request: GridRequest) -> Result<()> {
        offer(&self.grid_requests, request, Queue::GridRequest)
    }

    pub fn offer_grid_response(&self, response: GridResponse) -> Result<()> {
        offer(&self.grid_responses, response, Queue::GridResponse)
    }

    pub fn offer_presentation(&self, command: PresentationCommand) -> Result<()> {
        offer(&self.presentation, command, Queue::Presentation)
    }

    pub fn offer_result(&self, result: AuthResult) -> Result<()> {
        offer(&self.results, result, Queue::AuthResult)
    }

    /// Carry out one controller action without blocking.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        match action {
            Action::RequestGrid(request) => self.offer_grid_request(request),
            Action::Present(command) => self.offer_presentation(command),
            Action::Publish(result) => self.offer_result(result),
            Action::SyncCursor(row) => {
                self.cursor.signal(row);
                Ok(())
            }
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn offer<T, const N: usize>(queue: &Channel<CriticalSectionRawMutex, T, N>, message: T, name: Queue) -> Result<()> {
    queue.try_send(message).map_err(|_| Error::QueueFull(name))
}
