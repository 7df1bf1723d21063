//! Joystick sampling and event dispatch.

use defmt::{info, warn};
use embassy_nrf::saadc::Saadc;
use embassy_time::{Duration, Instant, Timer};
use gridpin::config::INPUT_POLL_MS;
use gridpin::{InputDispatcher, Pipeline};

/// Sample the joystick every `INPUT_POLL_MS`, pick up the button handoff,
/// and forward debounced events to the auth controller.
#[embassy_executor::task]
pub async fn input_task(mut joystick: Saadc<'static, 1>, pipeline: &'static Pipeline) -> ! {
    joystick.calibrate().await;
    info!("Input: joystick calibrated");

    let mut dispatcher = InputDispatcher::new();

    loop {
        let mut sample = [0i16; 1];
        joystick.sample(&mut sample).await;
        // Single-ended readings can dip slightly below zero.
        let axis = sample[0].max(0) as u16;

        // No await between the resync and `poll`.
        if let Some(row) = pipeline.take_cursor_sync() {
            dispatcher.resync(row);
        }
        let edge = pipeline.take_button_edge();
        for event in dispatcher.poll(Instant::now().as_millis(), axis, edge) {
            if let Err(e) = pipeline.offer_input(event) {
                warn!("Input: {}", e);
            }
        }

        Timer::after(Duration::from_millis(INPUT_POLL_MS)).await;
    }
}
