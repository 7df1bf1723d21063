//! Authentication task - drives [`AuthController`] from the pipeline.
//!
//! The controller decides, this task waits: for grid responses (bounded by
//! `GRID_RESPONSE_TIMEOUT_MS`), for input while a grid is shown, and for
//! the feedback hold.  Input that arrives while no grid is shown is drained
//! and dropped so it cannot leak into the next step.

use defmt::{debug, error, info, warn};
use embassy_futures::select::{select, Either};
use embassy_time::{with_timeout, Duration};
use gridpin::auth::{Actions, AuthState};
use gridpin::config::{FEEDBACK_HOLD_MS, GRID_RESPONSE_TIMEOUT_MS};
use gridpin::{Action, AuthController, Error, GridResponse, InputEvent, Pipeline};

#[embassy_executor::task]
pub async fn auth_task(pipeline: &'static Pipeline) -> ! {
    let mut controller = AuthController::new(&pipeline.history);

    loop {
        let actions = match controller.state() {
            AuthState::AwaitingSession => {
                info!("Auth: session started");
                controller.start()
            }
            // Validating never outlives the `on_input` call that entered it.
            AuthState::Validating => {
                error!("Auth: attempt left mid-validation, starting over");
                controller.abandon()
            }
            AuthState::AwaitingGrid(step) => {
                let waiting = select(pipeline.grid_responses.receive(), discard_input(pipeline));
                match with_timeout(Duration::from_millis(GRID_RESPONSE_TIMEOUT_MS), waiting).await {
                    Ok(Either::First(response)) => on_grid(&mut controller, &response),
                    // `discard_input` only ends by being cancelled.
                    Ok(Either::Second(())) | Err(_) => {
                        warn!("Auth: {} (step {})", Error::GridTimeout, step.get());
                        controller.on_grid_timeout()
                    }
                }
            }
            AuthState::Ready { .. } => {
                let event = pipeline.input.receive().await;
                match event {
                    InputEvent::Navigate(_) => debug!("Auth: navigate"),
                    InputEvent::Select(_) => debug!("Auth: select"),
                }
                controller.on_input(event)
            }
            AuthState::Feedback(result) => {
                info!("Auth: attempt {}", if result.success { "accepted" } else { "rejected" });
                let hold = Duration::from_millis(FEEDBACK_HOLD_MS);
                let _ = with_timeout(hold, discard_input(pipeline)).await;
                info!("Auth: session started");
                controller.finish_feedback()
            }
        };

        dispatch(pipeline, actions);
    }
}

fn on_grid(controller: &mut AuthController<'_>, response: &GridResponse) -> Actions {
    if controller.awaited_step() != Some(response.step) {
        warn!("Auth: stale grid for step {} discarded", response.step.get());
    }
    controller.on_grid(response)
}

fn dispatch(pipeline: &Pipeline, actions: Actions) {
    for action in actions {
        if let Action::Publish(result) = &action {
            debug!("Auth: publishing {}", result);
        }
        if let Err(e) = pipeline.dispatch(action) {
            warn!("Auth: {}", e);
        }
    }
}

/// Swallow input events until cancelled.
async fn discard_input(pipeline: &Pipeline) {
    loop {
        let _ = pipeline.input.receive().await;
        debug!("Auth: input dropped while no grid is shown");
    }
}
