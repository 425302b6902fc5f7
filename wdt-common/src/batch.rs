//! Batch classification of delimited tables
//!
//! Reads a table with a header row, classifies every data row independently
//! and writes the original columns back out with `label`, `confidence` and
//! `recommendation` appended. A malformed row is flagged as a
//! [`BatchRowError`] and never aborts the batch; only a missing required
//! column or an I/O failure does.

use crate::classifier::{ClassificationResult, Classifier, WasteLabel};
use crate::measurement::Measurement;
use crate::recommendation::batch_recommendation;
use crate::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Required input columns, in classifier order
pub const REQUIRED_COLUMNS: [&str; 4] = ["weight_g", "volume_cm3", "moisture_pct", "temperature_c"];

/// Appended output column holding the label
pub const LABEL_COLUMN: &str = "label";
/// Appended output column holding the confidence
pub const CONFIDENCE_COLUMN: &str = "confidence";
/// Appended output column holding the handling recommendation
pub const RECOMMENDATION_COLUMN: &str = "recommendation";

/// Default export file name
pub const DEFAULT_OUTPUT_FILE: &str = "waste_detection_results.csv";

/// A single data row that could not be classified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("row {row}: {message}")]
pub struct BatchRowError {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub message: String,
}

/// Reader/writer settings for batch tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Field delimiter (ASCII)
    pub delimiter: u8,
    /// Write flagged rows with empty result cells instead of dropping them
    pub include_invalid_rows: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_invalid_rows: true,
        }
    }
}

/// One input row and its outcome
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRecord {
    /// 1-based data row number
    pub row: usize,
    /// Original cell values
    pub cells: Vec<String>,
    pub outcome: std::result::Result<ClassificationResult, BatchRowError>,
}

/// Aggregate counts over a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_rows: usize,
    pub classified: usize,
    pub invalid: usize,
    pub organic_count: usize,
    pub inorganic_count: usize,
    /// Mean confidence over classified rows (None when nothing was classified)
    pub average_confidence: Option<f64>,
}

/// Result of classifying a whole table
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Input header row, as read
    pub headers: Vec<String>,
    pub records: Vec<BatchRecord>,
}

impl BatchReport {
    /// Compute label counts and average confidence
    pub fn summary(&self) -> BatchSummary {
        let mut organic_count = 0;
        let mut inorganic_count = 0;
        let mut confidence_sum = 0.0;

        for result in self.records.iter().filter_map(|r| r.outcome.as_ref().ok()) {
            match result.label {
                WasteLabel::Organic => organic_count += 1,
                WasteLabel::Inorganic => inorganic_count += 1,
            }
            confidence_sum += result.confidence;
        }

        let classified = organic_count + inorganic_count;
        BatchSummary {
            total_rows: self.records.len(),
            classified,
            invalid: self.records.len() - classified,
            organic_count,
            inorganic_count,
            average_confidence: (classified > 0).then(|| confidence_sum / classified as f64),
        }
    }

    /// Rows that could not be classified
    pub fn errors(&self) -> impl Iterator<Item = &BatchRowError> {
        self.records.iter().filter_map(|r| r.outcome.as_ref().err())
    }

    /// Write the result table
    ///
    /// Every row is padded or truncated to the header width before the
    /// result columns are appended.
    pub fn write_csv<W: Write>(&self, writer: W, options: &BatchOptions) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .from_writer(writer);

        let mut header = self.headers.clone();
        header.extend([LABEL_COLUMN, CONFIDENCE_COLUMN, RECOMMENDATION_COLUMN].map(String::from));
        wtr.write_record(&header)?;

        for record in &self.records {
            let mut cells = record.cells.clone();
            cells.resize(self.headers.len(), String::new());

            match &record.outcome {
                Ok(result) => {
                    cells.push(result.label.as_str().to_string());
                    cells.push(result.confidence.to_string());
                    cells.push(batch_recommendation(result.label).to_string());
                }
                Err(_) if !options.include_invalid_rows => continue,
                Err(_) => cells.extend([String::new(), String::new(), String::new()]),
            }

            wtr.write_record(&cells)?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Write the result table to a file, replacing any existing file
    pub fn write_csv_path(&self, path: &Path, options: &BatchOptions) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(file, options)?;
        info!("Wrote batch results to {}", path.display());
        Ok(())
    }
}

/// Applies a [`Classifier`] row by row over a table
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchClassifier {
    classifier: Classifier,
    options: BatchOptions,
}

impl BatchClassifier {
    pub fn new(classifier: Classifier, options: BatchOptions) -> Self {
        Self { classifier, options }
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Classify every data row of a table
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if a required column is missing from the
    /// header, and `Error::Csv`/`Error::Io` if the input cannot be read.
    /// Malformed rows are recorded as [`BatchRowError`] instead.
    pub fn classify_reader<R: Read>(&self, reader: R) -> Result<BatchReport> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let columns = locate_columns(&headers)?;

        let mut records = Vec::new();
        // Byte records so a row with bad encoding keeps its cells in the export
        for (index, record) in rdr.byte_records().enumerate() {
            let row = index + 1;
            let record = record?;

            let (cells, undecodable) = decode_cells(&record);
            let outcome = match undecodable {
                Some(field) => Err(BatchRowError {
                    row,
                    message: format!("field {} is not valid UTF-8", field + 1),
                }),
                None => self
                    .classify_cells(&cells, &columns)
                    .map_err(|e| BatchRowError { row, message: e.to_string() }),
            };

            if let Err(row_error) = &outcome {
                warn!("Skipping {}", row_error);
            }

            records.push(BatchRecord { row, cells, outcome });
        }

        let report = BatchReport { headers, records };
        let summary = report.summary();
        info!(
            total = summary.total_rows,
            organic = summary.organic_count,
            inorganic = summary.inorganic_count,
            invalid = summary.invalid,
            "Batch classification complete"
        );

        Ok(report)
    }

    /// Classify a table read from a file
    pub fn classify_path(&self, path: &Path) -> Result<BatchReport> {
        debug!("Reading batch input from {}", path.display());
        let file = File::open(path)?;
        self.classify_reader(file)
    }

    fn classify_cells(&self, cells: &[String], columns: &[usize; 4]) -> Result<ClassificationResult> {
        let value = |slot: usize| cells.get(columns[slot]).map(String::as_str).unwrap_or("");
        let measurement = Measurement::parse(value(0), value(1), value(2), value(3))?;
        self.classifier.classify_measurement(&measurement)
    }
}

/// Decode a raw record, replacing invalid UTF-8 sequences
///
/// Also returns the index of the first field that needed replacement.
fn decode_cells(record: &csv::ByteRecord) -> (Vec<String>, Option<usize>) {
    let mut undecodable = None;
    let cells = record
        .iter()
        .enumerate()
        .map(|(index, field)| match std::str::from_utf8(field) {
            Ok(text) => text.to_string(),
            Err(_) => {
                undecodable.get_or_insert(index);
                String::from_utf8_lossy(field).into_owned()
            }
        })
        .collect();
    (cells, undecodable)
}

/// Find the index of each required column, ignoring case and surrounding whitespace
fn locate_columns(headers: &[String]) -> Result<[usize; 4]> {
    let mut columns = [0usize; 4];
    for (slot, required) in REQUIRED_COLUMNS.iter().enumerate() {
        columns[slot] = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(required))
            .ok_or_else(|| Error::InvalidInput(format!("missing required column '{}'", required)))?;
    }
    Ok(columns)
}
