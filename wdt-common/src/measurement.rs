//! Waste item measurement entity
//!
//! A `Measurement` is built per classification call and never stored. Values
//! arriving as text (CLI arguments, CSV cells) go through [`parse_value`] so
//! that non-numeric input is reported as [`Error::InvalidInput`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Lower bound for moisture content (percent)
pub const MOISTURE_MIN_PCT: f64 = 0.0;

/// Upper bound for moisture content (percent)
pub const MOISTURE_MAX_PCT: f64 = 100.0;

/// Physical characteristics of a single waste item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Weight in grams
    pub weight_g: f64,
    /// Volume in cubic centimetres
    pub volume_cm3: f64,
    /// Moisture content in percent (0-100)
    pub moisture_pct: f64,
    /// Temperature in degrees Celsius
    pub temperature_c: f64,
}

/// Input validation rules applied before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Reject weight or volume that is zero or negative
    pub require_positive_dimensions: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            require_positive_dimensions: true,
        }
    }
}

impl ValidationPolicy {
    /// Policy that only rejects non-finite values and out-of-range moisture
    pub fn lenient() -> Self {
        Self {
            require_positive_dimensions: false,
        }
    }
}

impl Measurement {
    /// Create a measurement without validating it
    pub const fn new(weight_g: f64, volume_cm3: f64, moisture_pct: f64, temperature_c: f64) -> Self {
        Self {
            weight_g,
            volume_cm3,
            moisture_pct,
            temperature_c,
        }
    }

    /// Parse a measurement from four raw text values
    ///
    /// Order matches the classifier contract: weight, volume, moisture, temperature.
    pub fn parse(weight: &str, volume: &str, moisture: &str, temperature: &str) -> Result<Self> {
        Ok(Self::new(
            parse_value("weight_g", weight)?,
            parse_value("volume_cm3", volume)?,
            parse_value("moisture_pct", moisture)?,
            parse_value("temperature_c", temperature)?,
        ))
    }

    /// Check the measurement against a validation policy
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` when any value is NaN or infinite, when
    /// moisture is outside [0, 100], or (if the policy requires it) when weight
    /// or volume is not strictly positive.
    pub fn validate(&self, policy: &ValidationPolicy) -> Result<()> {
        for (name, value) in self.fields() {
            if !value.is_finite() {
                return Err(Error::InvalidInput(format!("{} is not a finite number: {}", name, value)));
            }
        }

        if !(MOISTURE_MIN_PCT..=MOISTURE_MAX_PCT).contains(&self.moisture_pct) {
            return Err(Error::InvalidInput(format!(
                "moisture_pct out of range [0, 100]: {}",
                self.moisture_pct
            )));
        }

        if policy.require_positive_dimensions {
            if self.weight_g <= 0.0 {
                return Err(Error::InvalidInput(format!(
                    "weight_g must be greater than 0: {}",
                    self.weight_g
                )));
            }
            if self.volume_cm3 <= 0.0 {
                return Err(Error::InvalidInput(format!(
                    "volume_cm3 must be greater than 0: {}",
                    self.volume_cm3
                )));
            }
        }

        Ok(())
    }

    /// Named field values in classifier order
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("weight_g", self.weight_g),
            ("volume_cm3", self.volume_cm3),
            ("moisture_pct", self.moisture_pct),
            ("temperature_c", self.temperature_c),
        ]
    }
}

/// Parse a single numeric value, naming the field in the error
pub fn parse_value(name: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} is missing", name)));
    }

    trimmed
        .parse::<f64>()
        .map_err(|_| Error::InvalidInput(format!("{} is not numeric: '{}'", name, trimmed)))
}
