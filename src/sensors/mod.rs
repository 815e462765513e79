//! Sensor subsystem — individual readers and the aggregating [`SensorRig`].
//!
//! The rig owns both readers and produces one complete [`Reading`] per
//! sampling iteration; that value is what the sampling loop publishes into
//! the shared state.

pub mod light;
pub mod thermal;

use log::error;

use crate::ports::{LightBus, OneWireSource};
use crate::state::{Reading, SENTINEL};
use light::LightReader;
use thermal::{ROOM_SENSOR, ThermalReader, WATER_SENSOR};

/// Aggregates the thermometers and the light sensor.
pub struct SensorRig<S, B> {
    pub thermal: ThermalReader<S>,
    pub light: LightReader<B>,
}

impl<S: OneWireSource, B: LightBus> SensorRig<S, B> {
    pub fn new(thermal: ThermalReader<S>, light: LightReader<B>) -> Self {
        Self { thermal, light }
    }

    /// Read every sensor sequentially and compose a [`Reading`].
    ///
    /// Individual failures degrade to the sentinel — a flaky sensor must
    /// not stop the sampling loop.
    pub fn read_all(&mut self) -> Reading {
        let room_temp = self.thermal.read_celsius(ROOM_SENSOR);
        let water_temp = self.thermal.read_celsius(WATER_SENSOR);
        let light_level = match self.light.read_lux() {
            Ok(lux) => lux,
            Err(e) => {
                error!("light sensor: {e}");
                SENTINEL
            }
        };

        Reading {
            room_temp,
            water_temp,
            light_level,
        }
    }
}
