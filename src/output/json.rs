//! JSON output formatter for mismatch rows.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "count": 1,
//!   "mismatches": [
//!     {
//!       "file_path": "DCIM/0001.jpg",
//!       "image_1_md5": "…",
//!       "image_1_sha1": "…",
//!       "image_2_md5": null,
//!       "image_2_sha1": null
//!     }
//!   ]
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::store::MismatchRecord;

/// Complete JSON output structure.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    /// Number of rows in `mismatches`
    pub count: usize,
    /// Rows of `mismatched_hashes`, in insertion order
    pub mismatches: &'a [MismatchRecord],
}

impl<'a> JsonOutput<'a> {
    /// Create a new JSON output from stored rows.
    #[must_use]
    pub fn new(records: &'a [MismatchRecord]) -> Self {
        Self {
            count: records.len(),
            mismatches: records,
        }
    }

    /// Serialize to a compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to a pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), super::OutputError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}
