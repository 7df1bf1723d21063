//! Integration tests for the gridpin pipeline.
//!
//! Drives the input dispatcher, controller and shuffler through the real
//! queues in a single thread, stepping each "task" until the pipeline is
//! idle.  Timing is simulated with an explicit millisecond clock.

use gridpin::auth::AuthState;
use gridpin::config::{AXIS_MAX, MSG_FAILURE, MSG_SUCCESS, NAV_DEBOUNCE_MS, SECRET_PIN};
use gridpin::feedback::{plan_for, Led};
use gridpin::ui::Screen;
use gridpin::{Action, AuthController, AuthResult, Grid, GridShuffler, InputDispatcher, Pipeline, Row};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

const CENTER: u16 = 2048;
const AXIS_DOWN: u16 = 0;
const AXIS_UP: u16 = AXIS_MAX;

struct Harness<'p> {
    pipeline: &'p Pipeline,
    dispatcher: InputDispatcher,
    controller: AuthController<'p>,
    shuffler: GridShuffler<ChaCha8Rng>,
    screen: Screen,
    results: Vec<AuthResult>,
    now_ms: u64,
}

impl<'p> Harness<'p> {
    fn new(pipeline: &'p Pipeline, seed: u64) -> Self {
        let mut harness = Self {
            pipeline,
            dispatcher: InputDispatcher::new(),
            controller: AuthController::new(&pipeline.history),
            shuffler: GridShuffler::new(ChaCha8Rng::seed_from_u64(seed)),
            screen: Screen::new(),
            results: Vec::new(),
            now_ms: 0,
        };
        let actions = harness.controller.start();
        harness.dispatch(actions);
        harness.settle();
        harness
    }

    fn dispatch(&self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.pipeline.dispatch(action).expect("queue has room");
        }
    }

    /// Run every consumer until no queue holds a message.
    fn settle(&mut self) {
        loop {
            let mut busy = false;

            while let Ok(request) = self.pipeline.grid_requests.try_receive() {
                let served = self.shuffler.serve(request, &self.pipeline.history);
                self.pipeline.offer_grid_response(served.response).unwrap();
                busy = true;
            }
            while let Ok(response) = self.pipeline.grid_responses.try_receive() {
                let actions = self.controller.on_grid(&response);
                self.dispatch(actions);
                busy = true;
            }
            while let Ok(event) = self.pipeline.input.try_receive() {
                let actions = self.controller.on_input(event);
                self.dispatch(actions);
                busy = true;
            }
            while let Ok(command) = self.pipeline.presentation.try_receive() {
                self.screen.apply(command);
                busy = true;
            }
            while let Ok(result) = self.pipeline.results.try_receive() {
                self.results.push(result);
                busy = true;
            }

            if !busy {
                break;
            }
        }
    }

    /// One input cycle: sample the axis, check the button, forward events.
    fn tick(&mut self, axis: u16, press: bool) {
        if press {
            self.pipeline.button_pressed();
        }
        if let Some(row) = self.pipeline.take_cursor_sync() {
            self.dispatcher.resync(row);
        }
        let edge = self.pipeline.take_button_edge();
        for event in self.dispatcher.poll(self.now_ms, axis, edge) {
            self.pipeline.offer_input(event).unwrap();
        }
        self.settle();
        self.now_ms += NAV_DEBOUNCE_MS + 1;
    }

    fn grid(&self) -> Grid {
        *self.screen.grid().expect("grid on screen")
    }

    /// Steer to the row holding `symbol` and press the button.
    fn choose(&mut self, symbol: u8) {
        let target = self.grid().row_of(symbol).unwrap();
        self.choose_row(target);
    }

    fn choose_row(&mut self, target: Row) {
        // Let the input side pick up any cursor reset first.
        self.tick(CENTER, false);
        while self.dispatcher.cursor() != target {
            let axis = if self.dispatcher.cursor() < target {
                AXIS_DOWN
            } else {
                AXIS_UP
            };
            self.tick(axis, false);
        }
        assert_eq!(self.screen.cursor(), target);
        self.tick(CENTER, true);
    }

    /// An input cycle that polls before picking up a pending cursor
    /// reset, as happens when a new grid lands between the two.
    fn tick_before_resync(&mut self, axis: u16) {
        for event in self.dispatcher.poll(self.now_ms, axis, false) {
            self.pipeline.offer_input(event).unwrap();
        }
        self.settle();
        self.now_ms += NAV_DEBOUNCE_MS + 1;
    }

    fn highlighted_row(&self) -> Row {
        match self.controller.state() {
            AuthState::Ready { row, .. } => row,
            state => panic!("no grid shown: {:?}", state),
        }
    }

    fn assert_cursor_agrees(&self, row: Row) {
        assert_eq!(self.highlighted_row(), row);
        assert_eq!(self.dispatcher.cursor(), row);
        assert_eq!(self.screen.cursor(), row);
    }

    fn finish_feedback(&mut self) {
        let actions = self.controller.finish_feedback();
        self.dispatch(actions);
        self.settle();
    }
}

#[test]
fn correct_pin_is_accepted() {
    let pipeline = Pipeline::new();
    let mut harness = Harness::new(&pipeline, 11);
    assert!(harness.screen.grid_visible());

    for &digit in SECRET_PIN.iter() {
        harness.choose(digit);
    }

    assert_eq!(harness.results, vec![AuthResult { success: true }]);
    assert_eq!(harness.screen.message(), Some(MSG_SUCCESS));
    assert_eq!(harness.screen.mask(), "******");
    assert_eq!(plan_for(harness.results[0]).led, Led::Green);
}

#[test]
fn wrong_row_at_fourth_position_is_rejected() {
    let pipeline = Pipeline::new();
    let mut harness = Harness::new(&pipeline, 12);

    for (position, &digit) in SECRET_PIN.iter().enumerate() {
        if position == 3 {
            let right = harness.grid().row_of(digit).unwrap();
            let wrong = right.below().unwrap_or(Row::FIRST);
            harness.choose_row(wrong);
        } else {
            harness.choose(digit);
        }
    }

    assert_eq!(harness.results, vec![AuthResult { success: false }]);
    assert_eq!(harness.screen.message(), Some(MSG_FAILURE));
    assert_eq!(plan_for(harness.results[0]).led, Led::Red);
}

#[test]
fn new_session_starts_after_feedback() {
    let pipeline = Pipeline::new();
    let mut harness = Harness::new(&pipeline, 13);
    for &digit in SECRET_PIN.iter() {
        harness.choose(digit);
    }

    // Presses while the message is up go nowhere.
    harness.tick(CENTER, true);
    harness.tick(AXIS_DOWN, false);
    assert_eq!(harness.results.len(), 1);
    assert!(!harness.screen.grid_visible());

    harness.finish_feedback();

    assert_eq!(harness.controller.session().steps_entered(), 0);
    assert!(harness.screen.grid_visible());
    assert_eq!(harness.screen.mask(), "");
    assert_eq!(harness.screen.cursor(), Row::FIRST);

    // The input side follows the controller back to the top row.
    harness.tick(CENTER, false);
    assert_eq!(harness.dispatcher.cursor(), Row::FIRST);

    for &digit in SECRET_PIN.iter() {
        harness.choose(digit);
    }
    assert_eq!(
        harness.results,
        vec![AuthResult { success: true }, AuthResult { success: true }]
    );
}

#[test]
fn each_step_gets_its_own_grid() {
    let pipeline = Pipeline::new();
    let mut harness = Harness::new(&pipeline, 14);

    let mut shown = Vec::new();
    for &digit in SECRET_PIN.iter() {
        shown.push(harness.grid());
        harness.choose(digit);
    }

    assert_eq!(pipeline.history.snapshot().to_vec(), shown);
    for grid in &shown {
        assert!(grid.is_valid());
    }
}

#[test]
fn cursor_resets_to_top_row_on_each_grid() {
    let pipeline = Pipeline::new();
    let mut harness = Harness::new(&pipeline, 15);

    harness.choose_row(Row::LAST);

    assert!(matches!(harness.controller.state(), AuthState::Ready { row, .. } if row == Row::FIRST));
    assert_eq!(harness.screen.cursor(), Row::FIRST);

    // First tick after the new grid picks up the reset before moving.
    harness.tick(AXIS_DOWN, false);
    assert_eq!(harness.dispatcher.cursor(), Row::new(1).unwrap());
    assert_eq!(harness.screen.cursor(), Row::new(1).unwrap());
}

#[test]
fn held_button_and_fast_presses_enter_one_digit() {
    let pipeline = Pipeline::new();
    let mut harness = Harness::new(&pipeline, 16);

    // Several edges inside one poll cycle coalesce into one selection.
    pipeline.button_pressed();
    pipeline.button_pressed();
    harness.tick(CENTER, true);

    assert_eq!(harness.controller.session().steps_entered(), 1);
    assert_eq!(harness.screen.mask(), "*");
}

#[test]
fn stale_cursor_jump_is_dropped_and_resynced() {
    let pipeline = Pipeline::new();
    let mut harness = Harness::new(&pipeline, 17);
    let row2 = Row::new(2).unwrap();

    // Select on row 2; the next grid resets the controller to row 0.
    harness.choose_row(row2);
    assert_eq!(harness.highlighted_row(), Row::FIRST);
    assert_eq!(harness.dispatcher.cursor(), row2);

    // The dispatcher moves from its stale row before it sees the reset.
    harness.tick_before_resync(AXIS_DOWN);
    assert_eq!(harness.highlighted_row(), Row::FIRST);
    assert_eq!(harness.screen.cursor(), Row::FIRST);

    harness.tick(CENTER, false);
    harness.assert_cursor_agrees(Row::FIRST);

    // The next push moves exactly one row.
    harness.tick(AXIS_DOWN, false);
    harness.assert_cursor_agrees(Row::new(1).unwrap());
}

#[test]
fn stale_move_onto_a_neighbour_row_leaves_both_sides_agreeing() {
    let pipeline = Pipeline::new();
    let mut harness = Harness::new(&pipeline, 18);
    let row1 = Row::new(1).unwrap();

    harness.choose_row(Row::new(2).unwrap());

    // Up from the stale row 2 lands on row 1, which neighbours row 0.
    harness.tick_before_resync(AXIS_UP);
    assert_eq!(harness.highlighted_row(), row1);

    harness.tick(CENTER, false);
    harness.assert_cursor_agrees(row1);

    harness.tick(AXIS_DOWN, false);
    harness.assert_cursor_agrees(Row::new(2).unwrap());
}
