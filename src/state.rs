//! Shared state between the loops.
//!
//! Two concurrency-safe containers plus the value types they hold:
//!
//! - [`SharedReadings`] — the latest sensor triple. Single writer (the
//!   sampling loop), any number of readers. Publishes are atomic: a
//!   snapshot is always one complete sampling iteration, never a mix of
//!   two iterations' fields.
//! - [`ModeCell`] — which quantity the display shows. Single writer (the
//!   button handler), read by the display loop, both possibly concurrent.
//!   Backed by one `AtomicU8` so readers can never observe an
//!   intermediate or invalid mode.

use std::sync::RwLock;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio::sync::watch;

/// Fixed out-of-range marker substituted for an unreadable sensor, so
/// downstream consumers always hold numeric fields.
pub const SENTINEL: f32 = 99.99;

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// One complete sampling iteration's output.
///
/// The zero value means "not yet sampled"; consumers that must not act on
/// it wait for the readiness signal instead of inspecting fields.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reading {
    /// Room temperature in °C.
    pub room_temp: f32,
    /// Water temperature in °C.
    pub water_temp: f32,
    /// Ambient light level in lux.
    pub light_level: f32,
}

// ---------------------------------------------------------------------------
// SharedReadings
// ---------------------------------------------------------------------------

/// Concurrency-safe holder of the latest [`Reading`].
///
/// `publish` replaces the whole value under a write guard and `snapshot`
/// copies it out under a read guard, so readers either see the previous
/// reading or the new one — never a torn combination. The first publish
/// also fires a one-shot readiness signal that consumers with a warm-up
/// requirement (display, persistence) await before their first tick.
pub struct SharedReadings {
    current: RwLock<Reading>,
    ready: watch::Sender<bool>,
}

impl SharedReadings {
    pub fn new() -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            current: RwLock::new(Reading::default()),
            ready,
        }
    }

    /// Atomically replace the latest reading. Sampling loop only.
    pub fn publish(&self, reading: Reading) {
        *self
            .current
            .write()
            .unwrap_or_else(|e| e.into_inner()) = reading;
        self.ready.send_replace(true);
    }

    /// Copy out the latest reading.
    pub fn snapshot(&self) -> Reading {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Subscribe to the readiness signal. The received value flips to
    /// `true` once the first reading has been published and never reverts.
    pub fn ready(&self) -> watch::Receiver<bool> {
        self.ready.subscribe()
    }
}

impl Default for SharedReadings {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Display mode
// ---------------------------------------------------------------------------

/// Which quantity the 7-segment display currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DisplayMode {
    WaterTemp = 0,
    RoomTemp = 1,
    LightLevel = 2,
}

impl DisplayMode {
    /// Decode a raw cell value. Anything outside the three valid modes
    /// resets to `WaterTemp`.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::RoomTemp,
            2 => Self::LightLevel,
            _ => Self::WaterTemp,
        }
    }

    /// The next mode in the fixed cycle.
    pub fn next(self) -> Self {
        match self {
            Self::WaterTemp => Self::RoomTemp,
            Self::RoomTemp => Self::LightLevel,
            Self::LightLevel => Self::WaterTemp,
        }
    }
}

/// Atomic holder of the current [`DisplayMode`].
pub struct ModeCell(AtomicU8);

impl ModeCell {
    pub fn new() -> Self {
        Self(AtomicU8::new(DisplayMode::WaterTemp as u8))
    }

    /// Current mode.
    pub fn get(&self) -> DisplayMode {
        DisplayMode::from_raw(self.0.load(Ordering::Acquire))
    }

    /// Advance one step in the cycle and return the new mode. A single
    /// atomic read-modify-write; concurrent readers observe either the old
    /// or the new mode.
    pub fn advance(&self) -> DisplayMode {
        let prev = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                Some(DisplayMode::from_raw(raw).next() as u8)
            })
            .unwrap_or(DisplayMode::WaterTemp as u8);
        DisplayMode::from_raw(prev).next()
    }
}

impl Default for ModeCell {
    fn default() -> Self {
        Self::new()
    }
}
