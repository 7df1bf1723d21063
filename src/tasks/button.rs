//! SELECT button edge handoff.
//!
//! The button is active-low with the internal pull-up.  Every falling edge
//! sets the single-slot button signal; the input task consumes it on its
//! next cycle and applies the selection debounce there.

use defmt::trace;
use embassy_nrf::gpio::Input;
use gridpin::Pipeline;

#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>, pipeline: &'static Pipeline) -> ! {
    loop {
        button.wait_for_falling_edge().await;
        trace!("Button: edge");
        pipeline.button_pressed();
    }
}
