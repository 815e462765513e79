//! Display-mode button — rising-edge interrupt that advances the mode
//! cell.
//!
//! The edge callback runs on rppal's interrupt thread, concurrently with
//! the display loop reading the mode. The advance is a single atomic
//! read-modify-write on [`ModeCell`], so the display loop can never see
//! an intermediate mode. Edges inside the debounce window are ignored.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::info;
use rppal::gpio::{Gpio, InputPin, Trigger};

use crate::error::Result;
use crate::hw::init_err;
use crate::state::ModeCell;

/// Holds the configured pin; dropping it unregisters the interrupt.
pub struct ModeButton {
    _pin: InputPin,
}

impl ModeButton {
    /// Register the rising-edge handler. Keep the returned value alive for
    /// as long as the button should work.
    pub fn watch(gpio: &Gpio, pin_no: u8, debounce: Duration, mode: Arc<ModeCell>) -> Result<Self> {
        let mut pin = gpio
            .get(pin_no)
            .map_err(|e| init_err("button GPIO unavailable", e))?
            .into_input();

        let mut last_edge: Option<Instant> = None;
        pin.set_async_interrupt(Trigger::RisingEdge, None, move |_level| {
            let now = Instant::now();
            if last_edge.is_some_and(|at| now.duration_since(at) < debounce) {
                return;
            }
            last_edge = Some(now);

            let new_mode = mode.advance();
            info!("button: display mode -> {new_mode:?}");
        })
        .map_err(|e| init_err("button interrupt registration failed", e))?;

        Ok(Self { _pin: pin })
    }
}
