//! Persistence loop — periodically snapshots the readings into the store.
//!
//! Best-effort logging: a failed write is reported and the record dropped;
//! the loop carries on with the next tick.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use log::{debug, error, info};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::state::SharedReadings;
use crate::storage::{MeasurementRecord, MeasurementStore};
use crate::tasks::await_ready;

/// Timestamp format stored with each record; sorts lexicographically.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn spawn(
    store: MeasurementStore,
    readings: Arc<SharedReadings>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if await_ready(&readings, &cancel).await {
            let mut tick = tokio::time::interval(interval);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = tick.tick() => {
                        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
                        let record = MeasurementRecord::stamped(stamp, readings.snapshot());
                        match store.append(&record) {
                            Ok(()) => debug!("measurement stored at {}", record.datetime),
                            Err(e) => error!("measurement write failed ({e}), record dropped"),
                        }
                    }
                }
            }
        }

        info!("persistence loop stopped");
    })
}
