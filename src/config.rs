//! Node configuration parameters.
//!
//! All tunable parameters for the telemetry node: sensor device paths, bus
//! addresses, GPIO pin numbers (BCM numbering), loop intervals, indicator
//! thresholds, storage path and HTTP bind address. Values can be overridden
//! via a JSON config file passed on the command line.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core node configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    // --- Thermometers (one-wire device files) ---
    /// Device file of the room thermometer (TO-92 package).
    pub room_sensor_path: String,
    /// Device file of the water thermometer (waterproof probe).
    pub water_sensor_path: String,
    /// CRC retry budget per read before degrading to the sentinel.
    pub max_crc_retries: u32,

    // --- Light sensor (I2C) ---
    /// I2C bus number the light sensor hangs off.
    pub light_i2c_bus: u8,
    /// 7-bit I2C address of the light sensor.
    pub light_i2c_addr: u16,

    // --- 7-segment display (shift-register chain) ---
    /// GPIO pin connected to DIO.
    pub display_data_gpio: u8,
    /// GPIO pin connected to SCLK.
    pub display_clock_gpio: u8,
    /// GPIO pin connected to RCLK.
    pub display_latch_gpio: u8,

    // --- Button ---
    /// GPIO pin of the display-mode button.
    pub button_gpio: u8,
    /// Edges closer together than this are ignored.
    pub button_debounce_ms: u64,

    // --- RGB indicator ---
    /// GPIO pin connected to R.
    pub led_red_gpio: u8,
    /// GPIO pin connected to G.
    pub led_green_gpio: u8,
    /// GPIO pin connected to B.
    pub led_blue_gpio: u8,

    // --- Indicator thresholds ---
    /// Water temperature below this is Cold (blue).
    pub water_cold_max_c: f32,
    /// Water temperature below this (and at/above cold max) is Ideal (green).
    pub water_ideal_max_c: f32,

    // --- Timing ---
    /// Minimum interval between sampling iterations (milliseconds).
    pub sample_interval_ms: u64,
    /// Indicator update interval (milliseconds).
    pub indicator_interval_ms: u64,
    /// Display refresh interval (milliseconds).
    pub display_interval_ms: u64,
    /// Measurement persistence interval (seconds).
    pub persist_interval_secs: u64,

    // --- Storage & query API ---
    /// SQLite database file path.
    pub db_path: String,
    /// Bind address for the HTTP query server.
    pub http_bind: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            // Thermometers
            room_sensor_path: "/sys/bus/w1/devices/28-00000c07d6c0/w1_slave".into(),
            water_sensor_path: "/sys/bus/w1/devices/28-3c01d607d003/w1_slave".into(),
            max_crc_retries: 5,

            // Light sensor
            light_i2c_bus: 1,
            light_i2c_addr: 0x23,

            // Display
            display_data_gpio: 18,
            display_clock_gpio: 23,
            display_latch_gpio: 24,

            // Button
            button_gpio: 26,
            button_debounce_ms: 200,

            // RGB indicator
            led_red_gpio: 21,
            led_green_gpio: 20,
            led_blue_gpio: 16,

            // Indicator thresholds
            water_cold_max_c: 20.0,
            water_ideal_max_c: 26.0,

            // Timing
            sample_interval_ms: 1000,
            indicator_interval_ms: 1000,
            display_interval_ms: 10,
            persist_interval_secs: 5,

            // Storage & query API
            db_path: "aquanode.db".into(),
            http_bind: "0.0.0.0:8080".into(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|_| Error::Config("config file unreadable"))?;
        serde_json::from_str(&raw).map_err(|_| Error::Config("config file malformed"))
    }

    /// Load from `path`, falling back to defaults with a warning.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("config load failed ({e}), using defaults");
                Self::default()
            }
        }
    }
}
