//! Environmental Reading
//!
//! The bundle of current-hour scalars the hazard classifier consumes.
//! Supplied by the caller per query; any field may be absent when the
//! upstream payload had no usable value for it.

use serde::{Deserialize, Serialize};

/// A snapshot of current environmental conditions at one location.
///
/// All fields are optional: a missing field simply skips the checks
/// that depend on it. Values are never retained between calls.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    /// Air temperature (°C)
    pub temperature: Option<f64>,

    /// Precipitation over the last hour (mm)
    pub precipitation_last_hour: Option<f64>,

    /// PM2.5 concentration (µg/m³)
    pub pm25: Option<f64>,

    /// UV index (dimensionless, typically 0-11+)
    pub uv_index: Option<f64>,
}

impl EnvironmentalReading {
    /// True if no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.precipitation_last_hour.is_none()
            && self.pm25.is_none()
            && self.uv_index.is_none()
    }
}
