//! Unified error types for the telemetry node.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! loops' error handling uniform. Sensor-layer failures never propagate to
//! loop callers: the readers degrade them to the 99.99 sentinel so the
//! display, indicator and persistence loops always operate on numeric data.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level node error
// ---------------------------------------------------------------------------

/// Every fallible operation in the node funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A sensor read failed at the hardware boundary.
    Sensor(SensorError),
    /// Expected data marker absent from a device payload.
    Parse(&'static str),
    /// Invalid sensor identifier or unusable configuration.
    Config(&'static str),
    /// A storage write or query failed.
    Storage(String),
    /// A query-server request failed.
    Transport(String),
    /// Peripheral or store initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Parse(msg) => write!(f, "parse: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Storage(msg) => write!(f, "storage: {msg}"),
            Self::Transport(msg) => write!(f, "transport: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// One-wire device file could not be read.
    DeviceRead,
    /// I2C transaction to the light sensor failed.
    BusIo,
    /// CRC status stayed invalid for the whole retry budget.
    CrcExhausted,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceRead => write!(f, "device file read failed"),
            Self::BusIo => write!(f, "bus I/O failed"),
            Self::CrcExhausted => write!(f, "CRC retries exhausted"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Node-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
