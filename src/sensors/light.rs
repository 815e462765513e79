//! BH1750 ambient-light sensor reader.
//!
//! The sensor is asked for a single one-shot measurement in its finest
//! resolution mode and powers itself down afterwards. The 2-byte
//! big-endian count divided by 1.2 gives lux.
//!
//! No retry here: a bus failure surfaces to the caller, which decides
//! whether to degrade (the sampling loop substitutes the sentinel).

use crate::error::Result;
use crate::ports::LightBus;

/// 7-bit bus address of the light sensor.
pub const LIGHT_SENSOR_ADDR: u16 = 0x23;

// Continuous measurement modes.
pub const CONT_LOW_RES_MODE: u8 = 0x13; // 4 lx resolution, typ. 16 ms
pub const CONT_HIGH_RES_MODE_1: u8 = 0x10; // 1 lx resolution, typ. 120 ms
pub const CONT_HIGH_RES_MODE_2: u8 = 0x11; // 0.5 lx resolution, typ. 120 ms

// One-time measurement modes. Device powers down after the measurement.
pub const ONE_TIME_LOW_RES_MODE: u8 = 0x23; // 4 lx resolution, typ. 16 ms
pub const ONE_TIME_HIGH_RES_MODE_1: u8 = 0x20; // 1 lx resolution, typ. 120 ms
pub const ONE_TIME_HIGH_RES_MODE_2: u8 = 0x21; // 0.5 lx resolution, typ. 120 ms

/// Convert the raw big-endian count to lux.
pub fn convert_to_lux(raw: [u8; 2]) -> f32 {
    (f32::from(raw[1]) + 256.0 * f32::from(raw[0])) / 1.2
}

/// Reads the light sensor through a [`LightBus`].
pub struct LightReader<B> {
    bus: B,
}

impl<B: LightBus> LightReader<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// One-shot high-resolution measurement in lux.
    pub fn read_lux(&mut self) -> Result<f32> {
        let raw = self.bus.one_shot(ONE_TIME_HIGH_RES_MODE_2)?;
        Ok(convert_to_lux(raw))
    }
}
