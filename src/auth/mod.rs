//! Authentication controller - the state machine behind the keypad.
//!
//! ```text
//! AwaitingSession ──start──▶ AwaitingGrid(0) ──grid──▶ Ready(0, row)
//!        ▲                        ▲                     │  Navigate: move row
//!        │                        │                     │  Select:   record row
//!        │                        └──── step + 1 ◀──────┤
//!        │                                              ▼  (last step)
//!        └──── Feedback(result) ◀──────────────── Validating
//!              (hold, then new session)
//! ```
//!
//! The controller is I/O-free: every transition returns the `Action`s the
//! auth task must carry out (grid requests, presentation commands, the
//! attempt result, cursor resync).  Timing - the grid response timeout and
//! the feedback hold - is owned by the task.

mod validate;


pub use validate::validate_attempt;

use core::fmt::Write;

use heapless::{String, Vec};

use crate::config::{GRID_TIMEOUT_POLICY, MASK_CHAR, MSG_FAILURE, MSG_SUCCESS, PIN_LENGTH, SECRET_PIN};
use crate::grid::{GridRequest, GridResponse, Row, Step};
use crate::history::GridHistory;
use crate::input::InputEvent;
use crate::ui::{Mask, Message, PresentationCommand};

/// Outcome of one completed PIN attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AuthResult {
    pub success: bool,
}

/// Reaction to a grid response that did not arrive in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeoutPolicy {
    /// Keep waiting in `AwaitingGrid` without re-requesting.  A lost
    /// response stalls the keypad.
    Stall,
    /// Re-issue the request for the awaited step.
    Retry,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AuthState {
    AwaitingSession,
    AwaitingGrid(Step),
    Ready { step: Step, row: Row },
    Validating,
    Feedback(AuthResult),
}

/// Work the auth task must perform after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    RequestGrid(GridRequest),
    Present(PresentationCommand),
    Publish(AuthResult),
    /// Tell the input dispatcher which row the cursor is on now.
    SyncCursor(Row),
}

pub type Actions = Vec<Action, 4>;

/// Selections made so far in the current attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthSession {
    rows: Vec<Row, PIN_LENGTH>,
    mask: Mask,
}

impl AuthSession {
    pub fn steps_entered(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn mask(&self) -> &str {
        &self.mask
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.mask.clear();
    }

    fn commit(&mut self, row: Row) {
        // Bounded by the state machine: at most PIN_LENGTH selections.
        let _ = self.rows.push(row);
        let _ = self.mask.push(MASK_CHAR);
    }
}

pub struct AuthController<'h> {
    state: AuthState,
    session: AuthSession,
    history: &'h GridHistory,
    pin: [u8; PIN_LENGTH],
    timeout_policy: TimeoutPolicy,
}

impl<'h> AuthController<'h> {
    /// Controller for the configured PIN and timeout policy.
    pub fn new(history: &'h GridHistory) -> Self {
        Self::with_pin(history, SECRET_PIN, GRID_TIMEOUT_POLICY)
    }

    pub fn with_pin(history: &'h GridHistory, pin: [u8; PIN_LENGTH], timeout_policy: TimeoutPolicy) -> Self {
        Self {
            state: AuthState::AwaitingSession,
            session: AuthSession::default(),
            history,
            pin,
            timeout_policy,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// The step whose grid the controller is waiting for, if any.
    pub fn awaited_step(&self) -> Option<Step> {
        match self.state {
            AuthState::AwaitingGrid(step) => Some(step),
            _ => None,
        }
    }

    /// Open the first session.  Does nothing once a session is running.
    pub fn start(&mut self) -> Actions {
        match self.state {
            AuthState::AwaitingSession => self.begin_session(false),
            _ => Actions::new(),
        }
    }

    /// A grid arrived.  Responses for any step but the awaited one are
    /// stale and ignored.
    pub fn on_grid(&mut self, response: &GridResponse) -> Actions {
        let mut actions = Actions::new();
        if self.awaited_step() != Some(response.step) {
            return actions;
        }

        self.state = AuthState::Ready {
            step: response.step,
            row: Row::FIRST,
        };
        push(&mut actions, Action::Present(PresentationCommand::ShowGrid(response.grid)));
        push(&mut actions, Action::Present(PresentationCommand::ShowCursor(Row::FIRST)));
        push(&mut actions, Action::SyncCursor(Row::FIRST));
        actions
    }

    /// The grid response timeout expired while awaiting `step`.
    pub fn on_grid_timeout(&mut self) -> Actions {
        let mut actions = Actions::new();
        if let (Some(step), TimeoutPolicy::Retry) = (self.awaited_step(), self.timeout_policy) {
            push(&mut actions, Action::RequestGrid(GridRequest { step }));
        }
        actions
    }

    /// Handle a debounced input event.  Only a visible grid accepts input.
    pub fn on_input(&mut self, event: InputEvent) -> Actions {
        let mut actions = Actions::new();
        let AuthState::Ready { step, row } = self.state else {
            return actions;
        };

        match event {
            // The dispatcher may have moved from a cursor it had not yet
            // resynced; a jump of more than one row is such a move.
            InputEvent::Navigate(new_row) if !new_row.is_adjacent(row) => {
                push(&mut actions, Action::SyncCursor(row));
            }
            InputEvent::Navigate(new_row) => {
                self.state = AuthState::Ready { step, row: new_row };
                push(&mut actions, Action::Present(PresentationCommand::ShowCursor(new_row)));
                push(&mut actions, Action::SyncCursor(new_row));
            }
            InputEvent::Select(_) => {
                self.session.commit(row);
                push(
                    &mut actions,
                    Action::Present(PresentationCommand::ShowMask(self.session.mask.clone())),
                );

                match step.next() {
                    Some(next) => {
                        self.state = AuthState::AwaitingGrid(next);
                        push(&mut actions, Action::RequestGrid(GridRequest { step: next }));
                    }
                    None => {
                        self.state = AuthState::Validating;
                        let result = self.validate();
                        push(&mut actions, Action::Publish(result));
                        push(&mut actions, Action::Present(PresentationCommand::ShowMessage(message_for(result))));
                        self.state = AuthState::Feedback(result);
                    }
                }
            }
        }
        actions
    }

    /// Drop whatever attempt is in progress and open a new session.
    pub fn abandon(&mut self) -> Actions {
        self.begin_session(true)
    }

    /// The feedback hold elapsed: reset and open a new session.
    pub fn finish_feedback(&mut self) -> Actions {
        match self.state {
            AuthState::Feedback(_) => self.begin_session(true),
            _ => Actions::new(),
        }
    }

    fn validate(&self) -> AuthResult {
        AuthResult {
            success: validate_attempt(self.history, &self.pin, self.session.rows()),
        }
    }

    fn begin_session(&mut self, clear_mask: bool) -> Actions {
        let mut actions = Actions::new();
        self.session.clear();
        self.state = AuthState::AwaitingGrid(Step::FIRST);

        if clear_mask {
            push(&mut actions, Action::Present(PresentationCommand::ShowMask(Mask::new())));
        }
        push(&mut actions, Action::RequestGrid(GridRequest { step: Step::FIRST }));
        actions
    }
}

fn push(actions: &mut Actions, action: Action) {
    // No transition emits more than `Actions` can hold.
    let _ = actions.push(action);
}

fn message_for(result: AuthResult) -> Message {
    let mut message = String::new();
    let text = if result.success { MSG_SUCCESS } else { MSG_FAILURE };
    let _ = message.write_str(text);
    message
}
