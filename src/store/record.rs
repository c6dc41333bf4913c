//! Row definitions for the digest store.

use serde::{Deserialize, Serialize};

use crate::digest::DigestOutcome;

/// One comparison unit: a relative path and the digests seen in each tree.
///
/// A `None` digest means the file could not be read on that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to both tree roots
    pub file_path: String,
    /// MD5 of the file in the first tree
    pub image_1_md5: Option<String>,
    /// SHA-1 of the file in the first tree
    pub image_1_sha1: Option<String>,
    /// MD5 of the file in the second tree
    pub image_2_md5: Option<String>,
    /// SHA-1 of the file in the second tree
    pub image_2_sha1: Option<String>,
}

/// A row of `mismatched_hashes`, copied verbatim from `file_hashes`.
pub type MismatchRecord = FileRecord;

impl FileRecord {
    /// Build a record from the digest outcome of each tree.
    #[must_use]
    pub fn from_outcomes(
        file_path: impl Into<String>,
        image_1: DigestOutcome,
        image_2: DigestOutcome,
    ) -> Self {
        let (image_1_md5, image_1_sha1) = image_1.into_columns();
        let (image_2_md5, image_2_sha1) = image_2.into_columns();
        Self {
            file_path: file_path.into(),
            image_1_md5,
            image_1_sha1,
            image_2_md5,
            image_2_sha1,
        }
    }

    /// True when the first tree's digest pair differs from the second's.
    ///
    /// Absent digests take part in the comparison: two absent values are
    /// equal, absent versus present is unequal.
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        self.image_1_md5 != self.image_2_md5 || self.image_1_sha1 != self.image_2_sha1
    }

    /// True when either side failed to hash.
    #[must_use]
    pub fn has_read_failure(&self) -> bool {
        self.image_1_md5.is_none() || self.image_2_md5.is_none()
    }
}
