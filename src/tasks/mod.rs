//! The node's long-running loops.
//!
//! Each loop is an independently-scheduled task: the sampling loop runs on
//! a blocking worker (device I/O), the others are timer-driven async
//! tasks. None of them coordinates with the others directly — they meet
//! only at [`SharedReadings`](crate::state::SharedReadings), the mode
//! cell and the store, and they all exit at the next iteration boundary
//! once the cancellation token fires.

pub mod display;
pub mod indicator;
pub mod persistence;
pub mod sampling;

use tokio_util::sync::CancellationToken;

use crate::state::SharedReadings;

/// Wait for the first published reading. Returns `false` if cancellation
/// (or state teardown) arrives first — the caller should exit instead of
/// ticking.
pub(crate) async fn await_ready(readings: &SharedReadings, cancel: &CancellationToken) -> bool {
    let mut ready = readings.ready();
    tokio::select! {
        () = cancel.cancelled() => false,
        res = ready.wait_for(|&r| r) => res.is_ok(),
    }
}
