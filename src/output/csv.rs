//! CSV output formatter for mismatch rows.
//!
//! One row per stored mismatch, with a header using the store's column
//! names. Absent digests are written as empty fields.
//!
//! # Columns
//!
//! - `file_path`
//! - `image_1_md5`, `image_1_sha1`
//! - `image_2_md5`, `image_2_sha1`

use std::io;

use super::OutputError;
use crate::store::MismatchRecord;

/// CSV output formatter.
pub struct CsvOutput<'a> {
    records: &'a [MismatchRecord],
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(records: &'a [MismatchRecord]) -> Self {
        Self { records }
    }

    /// Write the CSV output to the given writer.
    ///
    /// The header is written even when there are no rows.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), OutputError> {
        let mut csv_writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record([
            "file_path",
            "image_1_md5",
            "image_1_sha1",
            "image_2_md5",
            "image_2_sha1",
        ])?;
        for record in self.records {
            csv_writer.serialize(record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if serialization fails.
    pub fn to_string(&self) -> Result<String, OutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
