//! Mock port implementations for integration tests.
//!
//! Output mocks record every call through a shared handle so tests can
//! assert on the full history after the loops exit.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use aquanode::SensorError;
use aquanode::ports::{Color, Glyph, GlyphDisplay, LightBus, OneWireSource, RgbOutput};
use aquanode::sensors::SensorRig;
use aquanode::sensors::light::LightReader;
use aquanode::sensors::thermal::{ROOM_SENSOR, ThermalReader, WATER_SENSOR};

// ── Sensor mocks ──────────────────────────────────────────────

/// Serves fixed device-file content per thermometer path.
pub struct MockW1 {
    pub room: &'static str,
    pub water: &'static str,
}

impl OneWireSource for MockW1 {
    fn fetch(&self, path: &Path) -> Result<String, SensorError> {
        if path.ends_with("room") {
            Ok(self.room.to_string())
        } else {
            Ok(self.water.to_string())
        }
    }
}

/// Always answers with the same raw count.
pub struct MockLightBus {
    pub raw: [u8; 2],
}

impl LightBus for MockLightBus {
    fn one_shot(&mut self, _command: u8) -> Result<[u8; 2], SensorError> {
        Ok(self.raw)
    }
}

/// A rig reading 21.5 °C room, 24.25 °C water and 100 lx.
pub fn standard_rig() -> SensorRig<MockW1, MockLightBus> {
    let thermal = ThermalReader::new(
        MockW1 {
            room: "aa : crc=aa YES\naa t=21500\n",
            water: "bb : crc=bb YES\nbb t=24250\n",
        },
        vec![
            (ROOM_SENSOR.to_string(), PathBuf::from("/mock/room")),
            (WATER_SENSOR.to_string(), PathBuf::from("/mock/water")),
        ],
        3,
    );
    let light = LightReader::new(MockLightBus { raw: [0, 120] });
    SensorRig::new(thermal, light)
}

// ── Output mocks ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Shown([Glyph; 4], Option<u8>),
    Blanked,
}

/// Records every display call; clone the handle to keep assertions after
/// the loop takes ownership.
#[derive(Clone, Default)]
pub struct RecordingDisplay {
    pub frames: Arc<Mutex<Vec<Frame>>>,
}

impl GlyphDisplay for RecordingDisplay {
    fn show(&mut self, glyphs: [Glyph; 4], dot: Option<u8>) {
        self.frames.lock().unwrap().push(Frame::Shown(glyphs, dot));
    }

    fn blank(&mut self) {
        self.frames.lock().unwrap().push(Frame::Blanked);
    }
}

/// Records every color the indicator loop asserts.
#[derive(Clone, Default)]
pub struct RecordingRgb {
    pub colors: Arc<Mutex<Vec<Color>>>,
}

impl RgbOutput for RecordingRgb {
    fn set(&mut self, color: Color) {
        self.colors.lock().unwrap().push(color);
    }

    fn off(&mut self) {
        self.set(Color::OFF);
    }
}
