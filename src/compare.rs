//! Tree comparison pipeline.
//!
//! Given two roots and a list of paths relative to both, every path is hashed
//! once under each root, the resulting rows are appended to `file_hashes`,
//! and rows whose digests differ are copied into `mismatched_hashes`.
//!
//! Files are processed one after another on the calling thread. The list of
//! paths is supplied by the caller; no directory is walked here.
//!
//! # Example
//!
//! ```no_run
//! use vol_hash_comp::compare::{compare_trees, CompareOptions, TreePair};
//! use vol_hash_comp::store::HashStore;
//! use std::path::Path;
//!
//! let mut store = HashStore::open(Path::new("hashes.db")).unwrap();
//! let trees = TreePair::new("/mnt/copy_a", "/mnt/copy_b");
//! let files = vec!["DCIM/0001.jpg".to_string()];
//!
//! let summary = compare_trees(&mut store, &trees, &files, &CompareOptions::default()).unwrap();
//! println!("{} mismatches", summary.mismatches);
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::digest::compute_digests;
use crate::store::{FileRecord, HashStore, StoreError};

/// Errors that stop a comparison run.
///
/// Unreadable files are not errors here; they are stored with absent digests.
#[derive(Debug, Error)]
pub enum CompareError {
    /// The list of relative paths could not be read.
    #[error("Failed to read file list {path}: {source}")]
    FileList {
        /// Path of the list file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The digest store rejected a write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The two roots being compared. Image 1 is `left`, image 2 is `right`.
#[derive(Debug, Clone)]
pub struct TreePair {
    /// Root of the first copy
    pub left: PathBuf,
    /// Root of the second copy
    pub right: PathBuf,
}

impl TreePair {
    /// Create a pair from the two roots.
    #[must_use]
    pub fn new(left: impl Into<PathBuf>, right: impl Into<PathBuf>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Hash `relative` under both roots and build its row.
    #[must_use]
    pub fn hash_file(&self, relative: &str) -> FileRecord {
        let image_1 = compute_digests(&self.left.join(relative));
        let image_2 = compute_digests(&self.right.join(relative));
        FileRecord::from_outcomes(relative, image_1, image_2)
    }
}

/// Options for a comparison run.
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Empty `mismatched_hashes` before extracting, instead of appending.
    ///
    /// Extraction still scans all of `file_hashes`, so mismatching rows
    /// recorded by earlier runs are copied again.
    pub fresh: bool,
}

/// Counts from a finished comparison run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareSummary {
    /// Rows appended to `file_hashes`
    pub files: usize,
    /// Rows where at least one side could not be read
    pub read_failures: usize,
    /// Files in this run whose digest pairs differ between the trees
    pub mismatches: usize,
    /// Rows the extraction copied into `mismatched_hashes`, including
    /// mismatching rows left in `file_hashes` by earlier runs
    pub extracted: usize,
}

/// Read a list of relative paths, one per line.
///
/// Surrounding whitespace is trimmed; blank lines and lines starting with
/// `#` are skipped.
///
/// # Errors
///
/// Returns [`CompareError::FileList`] if the file cannot be read.
pub fn read_file_list(path: &Path) -> Result<Vec<String>, CompareError> {
    let content = fs::read_to_string(path).map_err(|source| CompareError::FileList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_file_list(&content))
}

fn parse_file_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Hash every file in both trees, record the rows, and extract mismatches.
///
/// # Errors
///
/// Returns [`CompareError::Store`] if any store write fails. Read failures
/// on individual files are logged and counted, not returned.
pub fn compare_trees(
    store: &mut HashStore,
    trees: &TreePair,
    files: &[String],
    options: &CompareOptions,
) -> Result<CompareSummary, CompareError> {
    log::info!(
        "Comparing {} files between {} and {}",
        files.len(),
        trees.left.display(),
        trees.right.display()
    );

    let records: Vec<FileRecord> = files.iter().map(|rel| trees.hash_file(rel)).collect();
    let read_failures = records.iter().filter(|r| r.has_read_failure()).count();
    let mismatches = records.iter().filter(|r| r.is_mismatch()).count();

    store.insert_records(&records)?;

    if options.fresh {
        store.clear_mismatches()?;
    }
    let extracted = store.extract_mismatches()?;

    if read_failures > 0 {
        log::warn!("{} files could not be read in one or both trees", read_failures);
    }
    log::info!(
        "Recorded {} files, {} mismatches ({} rows extracted)",
        records.len(),
        mismatches,
        extracted
    );

    Ok(CompareSummary {
        files: records.len(),
        read_failures,
        mismatches,
        extracted,
    })
}
