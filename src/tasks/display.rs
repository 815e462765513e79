//! Display loop — renders the selected quantity on the 7-segment display.
//!
//! Waits for the first reading, then per tick: read the mode cell and the
//! latest reading, format the selected field to four glyphs (two integer
//! digits, two fractional digits, decimal point fixed after position 3)
//! and render.
//!
//! Values outside the displayable range are clamped to [0, 99.99] before
//! formatting: negatives render `00.00`, anything at or above 100 renders
//! `99.99` — which is also exactly how the sensor sentinel shows up.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::ports::{Glyph, GlyphDisplay};
use crate::state::{DisplayMode, ModeCell, Reading, SENTINEL, SharedReadings};
use crate::tasks::await_ready;

/// 1-based glyph position the decimal point sits after.
pub const DOT_POSITION: u8 = 3;

/// The reading field selected by a display mode.
pub fn select_field(mode: DisplayMode, reading: Reading) -> f32 {
    match mode {
        DisplayMode::WaterTemp => reading.water_temp,
        DisplayMode::RoomTemp => reading.room_temp,
        DisplayMode::LightLevel => reading.light_level,
    }
}

/// Format a value as four digit glyphs (`NN.NN` with the point implied
/// after [`DOT_POSITION`]). Total: clamps out-of-range and non-finite
/// input instead of failing.
pub fn format_glyphs(value: f32) -> [Glyph; 4] {
    let clamped = if value.is_finite() {
        // + 0.0 turns a negative zero positive; the formatter must never
        // see a sign.
        value.clamp(0.0, SENTINEL) + 0.0
    } else {
        SENTINEL
    };
    // Width 5 = two integer digits, the point, two fractional digits.
    let text = format!("{clamped:05.2}");
    let digit = |i: usize| Glyph::Digit(text.as_bytes()[i] - b'0');
    [digit(0), digit(1), digit(3), digit(4)]
}

pub fn spawn<D>(
    mut display: D,
    readings: Arc<SharedReadings>,
    mode: Arc<ModeCell>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    D: GlyphDisplay + Send + 'static,
{
    tokio::spawn(async move {
        if await_ready(&readings, &cancel).await {
            let mut tick = tokio::time::interval(interval);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = tick.tick() => {
                        let value = select_field(mode.get(), readings.snapshot());
                        display.show(format_glyphs(value), Some(DOT_POSITION));
                    }
                }
            }
        }

        display.blank();
        info!("display loop stopped");
    })
}
