//! Organic / inorganic waste classifier
//!
//! Three rules evaluated in fixed priority order, first match wins:
//! 1. Warm and moist (moisture > 60% and temperature > 25°C) → ORGANIC, 0.85
//! 2. Small and light (weight < 50g and volume < 100cm³) → INORGANIC, 0.78
//! 3. Weighted score: `organic = (moisture * 0.4 + temperature * 0.3) / 100`,
//!    `inorganic = 1 - organic`, higher score wins (tie → INORGANIC)
//!
//! Rule 3 is unbounded for extreme temperatures. The label is decided on the
//! raw scores; only the reported confidence is clamped to [0, 1].

use crate::measurement::{Measurement, ValidationPolicy};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Moisture above which rule 1 may fire (percent)
pub const WARM_MOIST_MOISTURE_PCT: f64 = 60.0;
/// Temperature above which rule 1 may fire (°C)
pub const WARM_MOIST_TEMPERATURE_C: f64 = 25.0;
/// Confidence reported by rule 1
pub const WARM_MOIST_CONFIDENCE: f64 = 0.85;

/// Weight below which rule 2 may fire (grams)
pub const SMALL_LIGHT_WEIGHT_G: f64 = 50.0;
/// Volume below which rule 2 may fire (cm³)
pub const SMALL_LIGHT_VOLUME_CM3: f64 = 100.0;
/// Confidence reported by rule 2
pub const SMALL_LIGHT_CONFIDENCE: f64 = 0.78;

/// Moisture weight in the rule 3 organic score
pub const MOISTURE_WEIGHT: f64 = 0.4;
/// Temperature weight in the rule 3 organic score
pub const TEMPERATURE_WEIGHT: f64 = 0.3;

/// Waste category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WasteLabel {
    /// Biodegradable waste (food scraps, leaves, wood)
    Organic,
    /// Non-biodegradable waste (plastic, glass, metal)
    Inorganic,
}

impl WasteLabel {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteLabel::Organic => "ORGANIC",
            WasteLabel::Inorganic => "INORGANIC",
        }
    }
}

impl fmt::Display for WasteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule that decided a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// High moisture and high temperature
    WarmMoist,
    /// Low weight and small volume
    SmallLight,
    /// Weighted moisture/temperature score
    WeightedScore,
}

impl Rule {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::WarmMoist => "warm_moist",
            Rule::SmallLight => "small_light",
            Rule::WeightedScore => "weighted_score",
        }
    }
}

/// Classifier output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Assigned waste category
    pub label: WasteLabel,
    /// Heuristic confidence (0.0-1.0), not a calibrated probability
    pub confidence: f64,
    /// Rule that produced the label
    pub rule: Rule,
}

/// Stateless waste classifier
///
/// Holds only the validation policy applied to inputs before scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    policy: ValidationPolicy,
}

impl Classifier {
    /// Create a classifier with the given validation policy
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    /// Validation policy in effect
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Classify a waste item from its four measurements
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the measurement fails validation
    pub fn classify(
        &self,
        weight_g: f64,
        volume_cm3: f64,
        moisture_pct: f64,
        temperature_c: f64,
    ) -> Result<ClassificationResult> {
        self.classify_measurement(&Measurement::new(weight_g, volume_cm3, moisture_pct, temperature_c))
    }

    /// Classify a measurement
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the measurement fails validation
    pub fn classify_measurement(&self, measurement: &Measurement) -> Result<ClassificationResult> {
        measurement.validate(&self.policy)?;

        let result = score(measurement);
        debug!(
            rule = result.rule.as_str(),
            label = result.label.as_str(),
            confidence = result.confidence,
            "Classified measurement"
        );
        Ok(result)
    }
}

/// Classify with the default validation policy
///
/// # Errors
/// Returns `Error::InvalidInput` if any input is non-finite, moisture is
/// outside [0, 100], or weight/volume is not strictly positive.
pub fn classify(
    weight_g: f64,
    volume_cm3: f64,
    moisture_pct: f64,
    temperature_c: f64,
) -> Result<ClassificationResult> {
    Classifier::default().classify(weight_g, volume_cm3, moisture_pct, temperature_c)
}

/// Apply the decision rules to an already-validated measurement
fn score(m: &Measurement) -> ClassificationResult {
    if m.moisture_pct > WARM_MOIST_MOISTURE_PCT && m.temperature_c > WARM_MOIST_TEMPERATURE_C {
        return ClassificationResult {
            label: WasteLabel::Organic,
            confidence: WARM_MOIST_CONFIDENCE,
            rule: Rule::WarmMoist,
        };
    }

    if m.weight_g < SMALL_LIGHT_WEIGHT_G && m.volume_cm3 < SMALL_LIGHT_VOLUME_CM3 {
        return ClassificationResult {
            label: WasteLabel::Inorganic,
            confidence: SMALL_LIGHT_CONFIDENCE,
            rule: Rule::SmallLight,
        };
    }

    let organic_score = (m.moisture_pct * MOISTURE_WEIGHT + m.temperature_c * TEMPERATURE_WEIGHT) / 100.0;
    let inorganic_score = 1.0 - organic_score;

    let (label, confidence) = if organic_score > inorganic_score {
        (WasteLabel::Organic, organic_score)
    } else {
        (WasteLabel::Inorganic, inorganic_score)
    };

    ClassificationResult {
        label,
        confidence: confidence.clamp(0.0, 1.0),
        rule: Rule::WeightedScore,
    }
}
