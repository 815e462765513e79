//! DS18B20 one-wire thermometer reader.
//!
//! The OS exposes each thermometer as a pseudo-file with two lines:
//!
//! ```text
//! 6e 01 4b 46 7f ff 02 10 71 : crc=71 YES
//! 6e 01 4b 46 7f ff 02 10 71 t=22875
//! ```
//!
//! Line 1 ends in the CRC status token; line 2 carries the conversion in
//! millidegrees Celsius. A failed CRC is a transient bus error — the read
//! is retried up to a configured budget, after which the reader degrades
//! to the sentinel rather than spinning on a persistently faulty probe.

use std::path::PathBuf;

use log::{debug, error};

use crate::error::{Error, Result, SensorError};
use crate::ports::OneWireSource;
use crate::state::SENTINEL;

/// Identifier of the room thermometer (TO-92 package).
pub const ROOM_SENSOR: &str = "room";
/// Identifier of the water thermometer (waterproof probe).
pub const WATER_SENSOR: &str = "water";

const CRC_OK_TOKEN: &str = "YES";

/// Reads the configured thermometers through a [`OneWireSource`].
pub struct ThermalReader<S> {
    source: S,
    sensors: Vec<(String, PathBuf)>,
    max_crc_retries: u32,
}

impl<S: OneWireSource> ThermalReader<S> {
    /// `sensors` maps each identifier to its device-file path.
    pub fn new(source: S, sensors: Vec<(String, PathBuf)>, max_crc_retries: u32) -> Self {
        Self {
            source,
            sensors,
            max_crc_retries,
        }
    }

    /// Read one thermometer, degrading any failure to the sentinel.
    ///
    /// This is the loop-facing entry point: it never fails, it only
    /// returns 99.99 and logs the condition.
    pub fn read_celsius(&self, sensor_id: &str) -> f32 {
        match self.try_read(sensor_id) {
            Ok(celsius) => celsius,
            Err(e) => {
                error!("thermometer '{sensor_id}': {e}");
                SENTINEL
            }
        }
    }

    /// Read one thermometer, surfacing the typed error.
    pub fn try_read(&self, sensor_id: &str) -> Result<f32> {
        let path = self
            .sensors
            .iter()
            .find(|(id, _)| id == sensor_id)
            .map(|(_, path)| path)
            .ok_or(Error::Config("unknown thermometer id"))?;

        let mut content = self.source.fetch(path)?;
        let mut attempts = 0;
        while !crc_ok(&content) {
            attempts += 1;
            if attempts > self.max_crc_retries {
                return Err(SensorError::CrcExhausted.into());
            }
            debug!(
                "thermometer '{sensor_id}' CRC failed, retrying ({attempts}/{})",
                self.max_crc_retries
            );
            content = self.source.fetch(path)?;
        }

        extract_celsius(&content)
    }
}

/// Whether the status line reports a CRC-valid conversion.
fn crc_ok(content: &str) -> bool {
    content
        .lines()
        .next()
        .is_some_and(|line| line.trim_end().ends_with(CRC_OK_TOKEN))
}

/// Pull the `t=<millidegrees>` field out of the data line.
fn extract_celsius(content: &str) -> Result<f32> {
    let data = content
        .lines()
        .nth(1)
        .ok_or(Error::Parse("data line missing"))?;
    let pos = data.find("t=").ok_or(Error::Parse("marker 't=' not found"))?;
    let millidegrees: i32 = data[pos + 2..]
        .trim()
        .parse()
        .map_err(|_| Error::Parse("millidegree field not numeric"))?;
    Ok(millidegrees as f32 / 1000.0)
}
