//! One-wire thermometer source backed by the kernel's sysfs device files.

use std::path::Path;

use log::warn;

use crate::error::SensorError;
use crate::ports::OneWireSource;

/// Reads `w1_slave` pseudo-files. The kernel driver performs the actual
/// bus transaction when the file is opened, so one fetch is one
/// conversion.
pub struct SysfsW1;

impl OneWireSource for SysfsW1 {
    fn fetch(&self, path: &Path) -> Result<String, SensorError> {
        std::fs::read_to_string(path).map_err(|e| {
            warn!("one-wire read {}: {e}", path.display());
            SensorError::DeviceRead
        })
    }
}
