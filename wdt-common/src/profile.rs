//! Characteristic profile for radar-style display
//!
//! Each axis is scaled by a fixed reference value and clamped to [0, 1].

use crate::measurement::Measurement;
use serde::Serialize;

/// Weight mapped to 1.0 on the weight axis (grams)
pub const WEIGHT_REFERENCE_G: f64 = 1000.0;
/// Volume mapped to 1.0 on the volume axis (cm³)
pub const VOLUME_REFERENCE_CM3: f64 = 1000.0;
/// Moisture mapped to 1.0 on the moisture axis (percent)
pub const MOISTURE_REFERENCE_PCT: f64 = 100.0;
/// Temperature mapped to 1.0 on the temperature axis (°C)
pub const TEMPERATURE_REFERENCE_C: f64 = 50.0;

/// Normalized measurement axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureProfile {
    pub weight: f64,
    pub volume: f64,
    pub moisture: f64,
    pub temperature: f64,
}

impl FeatureProfile {
    /// Build a profile from a measurement
    pub fn from_measurement(m: &Measurement) -> Self {
        Self {
            weight: normalize(m.weight_g, WEIGHT_REFERENCE_G),
            volume: normalize(m.volume_cm3, VOLUME_REFERENCE_CM3),
            moisture: normalize(m.moisture_pct, MOISTURE_REFERENCE_PCT),
            temperature: normalize(m.temperature_c, TEMPERATURE_REFERENCE_C),
        }
    }

    /// Axis names and values in display order
    pub fn axes(&self) -> [(&'static str, f64); 4] {
        [
            ("Weight", self.weight),
            ("Volume", self.volume),
            ("Moisture", self.moisture),
            ("Temperature", self.temperature),
        ]
    }
}

fn normalize(value: f64, reference: f64) -> f64 {
    let scaled = value / reference;
    if scaled.is_nan() {
        0.0
    } else {
        scaled.clamp(0.0, 1.0)
    }
}
