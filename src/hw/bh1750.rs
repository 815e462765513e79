//! BH1750 light-sensor bus adapter over rppal I2C.

use std::time::Duration;

use log::warn;
use rppal::i2c::I2c;

use crate::error::{Result, SensorError};
use crate::hw::init_err;
use crate::ports::LightBus;

/// Worst-case high-resolution conversion time per the datasheet.
const MEASUREMENT_DELAY: Duration = Duration::from_millis(180);

pub struct Bh1750Bus {
    i2c: I2c,
}

impl Bh1750Bus {
    pub fn open(bus: u8, addr: u16) -> Result<Self> {
        let mut i2c = I2c::with_bus(bus).map_err(|e| init_err("light sensor bus unavailable", e))?;
        i2c.set_slave_address(addr)
            .map_err(|e| init_err("light sensor address rejected", e))?;
        Ok(Self { i2c })
    }
}

impl LightBus for Bh1750Bus {
    fn one_shot(&mut self, command: u8) -> std::result::Result<[u8; 2], SensorError> {
        self.i2c.write(&[command]).map_err(|e| {
            warn!("light sensor command write: {e}");
            SensorError::BusIo
        })?;

        // The sensor needs the full conversion time before the count is valid.
        std::thread::sleep(MEASUREMENT_DELAY);

        let mut buf = [0u8; 2];
        let n = self.i2c.read(&mut buf).map_err(|e| {
            warn!("light sensor read: {e}");
            SensorError::BusIo
        })?;
        if n < buf.len() {
            warn!("light sensor returned {n} of {} bytes", buf.len());
            return Err(SensorError::BusIo);
        }
        Ok(buf)
    }
}
