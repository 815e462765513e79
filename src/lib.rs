//! Aquanode library.
//!
//! Exposes the node's logic modules for integration testing and external
//! inspection. Hardware access is confined to the `hw` module, which is
//! only compiled with the `rpi` feature; everything else talks to the
//! port traits in [`ports`].

#![deny(unused_must_use)]

pub mod config;
pub mod ports;
pub mod sensors;
pub mod server;
pub mod state;
pub mod storage;
pub mod tasks;

mod error;

pub use error::{Error, Result, SensorError};

#[cfg(feature = "rpi")]
pub mod hw;
