//! Text and JSON rendering of classification results

use serde::Serialize;
use std::path::Path;
use wdt_common::batch::{BatchRowError, BatchSummary};
use wdt_common::profile::FeatureProfile;
use wdt_common::recommendation::{handling_recommendations, label_description, Recommendation};
use wdt_common::{ClassificationResult, Measurement, WasteLabel};

/// Width of profile bars in characters
const BAR_WIDTH: usize = 20;

/// Everything shown for a single classification
#[derive(Debug, Serialize)]
pub struct ClassificationReport {
    pub measurement: Measurement,
    pub result: ClassificationResult,
    pub description: &'static str,
    pub recommendations: &'static [Recommendation],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<FeatureProfile>,
}

impl ClassificationReport {
    pub fn new(measurement: Measurement, result: ClassificationResult, with_profile: bool) -> Self {
        Self {
            measurement,
            result,
            description: label_description(result.label),
            recommendations: handling_recommendations(result.label),
            profile: with_profile.then(|| FeatureProfile::from_measurement(&measurement)),
        }
    }
}

/// Batch outcome shown after a run
#[derive(Debug, Serialize)]
pub struct BatchOutcome<'a> {
    pub summary: BatchSummary,
    pub errors: Vec<&'a BatchRowError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<&'a Path>,
}

/// Format a confidence as a percentage with two decimals
pub fn format_percent(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

pub fn render_classification(report: &ClassificationReport) -> String {
    let heading = match report.result.label {
        WasteLabel::Organic => "ORGANIC WASTE",
        WasteLabel::Inorganic => "INORGANIC WASTE",
    };

    let mut out = format!(
        "Result: {}\nConfidence: {}\n{}\nRule: {}\n",
        heading,
        format_percent(report.result.confidence),
        report.description,
        report.result.rule.as_str()
    );

    if let Some(profile) = &report.profile {
        out.push('\n');
        out.push_str(&render_profile(profile));
    }

    out.push_str("\nHandling recommendations:\n");
    for rec in report.recommendations {
        out.push_str(&format!("  - {}: {}\n", rec.title, rec.description));
    }

    out
}

/// Render profile axes as horizontal bars
pub fn render_profile(profile: &FeatureProfile) -> String {
    let mut out = String::from("Characteristic profile:\n");
    for (name, value) in profile.axes() {
        let filled = (value * BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "  {:<12} {}{} {:.2}\n",
            name,
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            value
        ));
    }
    out
}

pub fn render_batch(outcome: &BatchOutcome<'_>) -> String {
    let summary = &outcome.summary;
    let average = summary
        .average_confidence
        .map(format_percent)
        .unwrap_or_else(|| "n/a".to_string());

    let mut out = format!(
        "Rows processed: {}\nOrganic waste: {}\nInorganic waste: {}\nInvalid rows: {}\nAverage confidence: {}\n",
        summary.total_rows, summary.organic_count, summary.inorganic_count, summary.invalid, average
    );

    if !outcome.errors.is_empty() {
        out.push_str("\nRows not classified:\n");
        for error in &outcome.errors {
            out.push_str(&format!("  {}\n", error));
        }
    }

    if let Some(path) = outcome.output {
        out.push_str(&format!("\nResults written to {}\n", path.display()));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wdt_common::classify;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.85), "85.00%");
        assert_eq!(format_percent(0.7412), "74.12%");
        assert_eq!(format_percent(1.0), "100.00%");
    }

    #[test]
    fn test_render_organic() {
        let m = Measurement::new(10.0, 10.0, 70.0, 30.0);
        let result = classify(10.0, 10.0, 70.0, 30.0).unwrap();
        let text = render_classification(&ClassificationReport::new(m, result, false));

        assert!(text.contains("Result: ORGANIC WASTE"));
        assert!(text.contains("Confidence: 85.00%"));
        assert!(text.contains("Compost"));
        assert!(!text.contains("Characteristic profile"));
    }

    #[test]
    fn test_render_profile_bars() {
        let profile = FeatureProfile::from_measurement(&Measurement::new(500.0, 1000.0, 0.0, 25.0));
        let text = render_profile(&profile);

        assert!(text.contains(&format!("Weight       {}{} 0.50", "#".repeat(10), ".".repeat(10))));
        assert!(text.contains(&format!("Volume       {} 1.00", "#".repeat(20))));
        assert!(text.contains(&format!("Moisture     {} 0.00", ".".repeat(20))));
    }

    #[test]
    fn test_render_batch_without_rows() {
        let outcome = BatchOutcome {
            summary: BatchSummary {
                total_rows: 0,
                classified: 0,
                invalid: 0,
                organic_count: 0,
                inorganic_count: 0,
                average_confidence: None,
            },
            errors: Vec::new(),
            output: None,
        };
        let text = render_batch(&outcome);
        assert!(text.contains("Average confidence: n/a"));
        assert!(!text.contains("Rows not classified"));
    }

    #[test]
    fn test_render_batch_full_layout() {
        let error = BatchRowError {
            row: 3,
            message: "weight_g is not numeric: 'abc'".to_string(),
        };
        let outcome = BatchOutcome {
            summary: BatchSummary {
                total_rows: 3,
                classified: 2,
                invalid: 1,
                organic_count: 1,
                inorganic_count: 1,
                average_confidence: Some(0.815),
            },
            errors: vec![&error],
            output: Some(Path::new("results.csv")),
        };

        let expected = "\
Rows processed: 3
Organic waste: 1
Inorganic waste: 1
Invalid rows: 1
Average confidence: 81.50%

Rows not classified:
  row 3: weight_g is not numeric: 'abc'

Results written to results.csv
";
        assert_eq!(render_batch(&outcome), expected);
    }

    #[test]
    fn test_render_classification_line_layout() {
        let m = Measurement::new(20.0, 50.0, 10.0, 15.0);
        let result = classify(20.0, 50.0, 10.0, 15.0).unwrap();
        let text = render_classification(&ClassificationReport::new(m, result, false));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Result: INORGANIC WASTE");
        assert_eq!(lines[1], "Confidence: 78.00%");
        assert_eq!(lines[3], "Rule: small_light");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Handling recommendations:");
        assert_eq!(lines.len(), 6 + handling_recommendations(WasteLabel::Inorganic).len());
    }
}
