//! Indicator loop — maps water temperature to the RGB indicator.
//!
//! One category is active at a time; the whole color is asserted in a
//! single batched port call, so the hardware never shows a mixed color
//! between channel writes.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::ports::{Color, RgbOutput};
use crate::state::SharedReadings;

/// Water-temperature category shown on the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempBand {
    Cold,
    Ideal,
    Hot,
}

impl TempBand {
    pub fn color(self) -> Color {
        match self {
            Self::Cold => Color::BLUE,
            Self::Ideal => Color::GREEN,
            Self::Hot => Color::RED,
        }
    }
}

/// Classify a water temperature. `cold_max` is exclusive for Cold and
/// inclusive for Ideal; `ideal_max` is exclusive for Ideal and inclusive
/// for Hot.
pub fn band(water_c: f32, cold_max: f32, ideal_max: f32) -> TempBand {
    if water_c < cold_max {
        TempBand::Cold
    } else if water_c < ideal_max {
        TempBand::Ideal
    } else {
        TempBand::Hot
    }
}

pub fn spawn<R>(
    mut rgb: R,
    readings: Arc<SharedReadings>,
    cold_max: f32,
    ideal_max: f32,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    R: RgbOutput + Send + 'static,
{
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = tick.tick() => {
                    let water = readings.snapshot().water_temp;
                    rgb.set(band(water, cold_max, ideal_max).color());
                }
            }
        }

        rgb.off();
        info!("indicator loop stopped");
    })
}
