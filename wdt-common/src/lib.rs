//! # WDT Common Library
//!
//! Shared code for the Waste Detection Tool:
//! - Measurement entity and input validation
//! - Organic / inorganic classifier
//! - Batch scoring of CSV tables
//! - Handling recommendations and characteristic profiles
//! - Configuration loading

pub mod batch;
pub mod classifier;
pub mod config;
pub mod error;
pub mod measurement;
pub mod profile;
pub mod recommendation;

pub use classifier::{classify, ClassificationResult, Classifier, Rule, WasteLabel};
pub use error::{Error, Result};
pub use measurement::{Measurement, ValidationPolicy};
