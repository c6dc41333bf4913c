//! Plain text table of mismatch rows.

use std::io::{self, Write};

use crate::store::MismatchRecord;

const ABSENT: &str = "-";

/// Aligned text table formatter.
pub struct TextOutput<'a> {
    records: &'a [MismatchRecord],
}

impl<'a> TextOutput<'a> {
    /// Create a new text formatter.
    #[must_use]
    pub fn new(records: &'a [MismatchRecord]) -> Self {
        Self { records }
    }

    /// Write one line per row, path column padded to the longest path.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if self.records.is_empty() {
            writeln!(writer, "No mismatches recorded.")?;
            return Ok(());
        }

        let width = self
            .records
            .iter()
            .map(|r| r.file_path.chars().count())
            .max()
            .unwrap_or(0)
            .max("file_path".len());

        writeln!(
            writer,
            "{:<width$}  {:<32}  {:<40}  {:<32}  {:<40}",
            "file_path", "image_1_md5", "image_1_sha1", "image_2_md5", "image_2_sha1"
        )?;
        for r in self.records {
            writeln!(
                writer,
                "{:<width$}  {:<32}  {:<40}  {:<32}  {:<40}",
                r.file_path,
                cell(&r.image_1_md5),
                cell(&r.image_1_sha1),
                cell(&r.image_2_md5),
                cell(&r.image_2_sha1),
            )?;
        }
        writeln!(writer, "{} mismatched files", self.records.len())?;
        Ok(())
    }
}

fn cell(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(ABSENT)
}
