//! Sampling loop — the sole writer of the shared readings.
//!
//! Runs on a blocking worker thread: a one-wire conversion blocks for up
//! to ~750 ms per probe. Each
//! iteration reads room, water and light sequentially (failures already
//! degraded to the sentinel by the readers), publishes one composed
//! [`Reading`](crate::state::Reading) atomically, and keeps to a minimum
//! cadence so a fast iteration does not spin the bus.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ports::{LightBus, OneWireSource};
use crate::sensors::SensorRig;
use crate::state::SharedReadings;

pub fn spawn<S, B>(
    mut rig: SensorRig<S, B>,
    readings: Arc<SharedReadings>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: OneWireSource + Send + 'static,
    B: LightBus + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        info!("sampling loop started ({} ms cadence)", interval.as_millis());

        while !cancel.is_cancelled() {
            let iteration_start = Instant::now();

            let reading = rig.read_all();
            readings.publish(reading);
            debug!(
                "published room={:.2} water={:.2} light={:.2}",
                reading.room_temp, reading.water_temp, reading.light_level
            );

            // The sensor reads already cost time; only sleep the remainder.
            if let Some(rest) = interval.checked_sub(iteration_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }

        info!("sampling loop stopped");
    })
}
