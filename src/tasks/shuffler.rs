//! Grid generation task.

use defmt::{debug, info, warn};
use embassy_nrf::peripherals::RNG;
use embassy_nrf::rng::Rng;
use gridpin::{GridShuffler, Pipeline};

/// Serve grid requests in arrival order.
///
/// Each grid is recorded in the history before the response is queued.
/// The response send waits for room so a generated grid is never lost
/// once it has been recorded.
#[embassy_executor::task]
pub async fn shuffler_task(rng: Rng<'static, RNG>, pipeline: &'static Pipeline) -> ! {
    let mut shuffler = GridShuffler::new(rng);
    info!("Shuffler: ready, duplicate policy {}", shuffler.policy());

    loop {
        let request = pipeline.grid_requests.receive().await;
        let served = shuffler.serve(request, &pipeline.history);

        if served.accepted_duplicates > 0 {
            warn!(
                "Shuffler: step {} grid has {} duplicate cell(s)",
                request.step.get(),
                served.accepted_duplicates
            );
        }
        if served.substitutions > 0 {
            debug!(
                "Shuffler: step {} needed {} substitution(s)",
                request.step.get(),
                served.substitutions
            );
        }

        pipeline.grid_responses.send(served.response).await;
    }
}
