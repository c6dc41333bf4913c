//! Report formatters for `mismatched_hashes` rows.
//!
//! This module provides different output formats for stored mismatches:
//! - Plain text table for reading in a terminal
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use vol_hash_comp::output::json::JsonOutput;
//! use vol_hash_comp::store::HashStore;
//! use std::path::Path;
//!
//! let store = HashStore::open(Path::new("hashes.db")).unwrap();
//! let rows = store.mismatch_records().unwrap();
//!
//! let output = JsonOutput::new(&rows);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod csv;
pub mod json;
pub mod text;

use std::io;

use thiserror::Error;

use crate::cli::ReportFormat;
use crate::store::MismatchRecord;

// Re-export main types
pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::text::TextOutput;

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// Error during JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `records` to `writer` in the requested format.
///
/// # Errors
///
/// Returns [`OutputError`] if serialization or writing fails.
pub fn write_report<W: io::Write>(
    format: ReportFormat,
    records: &[MismatchRecord],
    writer: W,
) -> Result<(), OutputError> {
    match format {
        ReportFormat::Text => TextOutput::new(records).write_to(writer)?,
        ReportFormat::Json => JsonOutput::new(records).write_to(writer)?,
        ReportFormat::Csv => CsvOutput::new(records).write_to(writer)?,
    }
    Ok(())
}
