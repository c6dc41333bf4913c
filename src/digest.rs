//! MD5 + SHA-1 file digests computed in a single streaming pass.
//!
//! # Overview
//!
//! Every file is read sequentially in [`CHUNK_SIZE`] byte chunks and each
//! chunk is fed to both hash accumulators in read order, so the two digests
//! always describe the same bytes.
//!
//! Read failures never escape [`compute_digests`]: they are logged with the
//! offending path and folded into [`DigestOutcome::Failed`]. Callers that want
//! the error itself use [`try_compute_digests`].
//!
//! # Example
//!
//! ```no_run
//! use vol_hash_comp::digest::{compute_digests, DigestOutcome};
//! use std::path::Path;
//!
//! match compute_digests(Path::new("photo.jpg")) {
//!     DigestOutcome::Computed(pair) => println!("{} {}", pair.md5, pair.sha1),
//!     DigestOutcome::Failed(e) => eprintln!("skipped: {}", e),
//! }
//! ```

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};

use md5::Md5;
use sha1::{Digest, Sha1};

/// Size of each read from the underlying file.
pub const CHUNK_SIZE: usize = 8192;

/// A matched pair of lowercase hexadecimal digests over the same content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigestPair {
    /// MD5 digest (32 hex chars)
    pub md5: String,
    /// SHA-1 digest (40 hex chars)
    pub sha1: String,
}

/// Result of hashing one file.
///
/// Both digests are produced together or not at all.
#[derive(Debug)]
pub enum DigestOutcome {
    /// The file was read to the end and both digests are available.
    Computed(DigestPair),
    /// The file could not be opened or a read failed part way.
    Failed(HashError),
}

impl DigestOutcome {
    /// Whether hashing failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Borrow the digests if hashing succeeded.
    #[must_use]
    pub fn pair(&self) -> Option<&DigestPair> {
        match self {
            Self::Computed(pair) => Some(pair),
            Self::Failed(_) => None,
        }
    }

    /// Split into the `(md5, sha1)` column values stored for one tree.
    ///
    /// A failed outcome becomes `(None, None)`.
    #[must_use]
    pub fn into_columns(self) -> (Option<String>, Option<String>) {
        match self {
            Self::Computed(DigestPair { md5, sha1 }) => (Some(md5), Some(sha1)),
            Self::Failed(_) => (None, None),
        }
    }
}

/// Errors that can occur while reading a file for hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {path}")]
    NotFound {
        /// Path that was requested
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Permission was denied when reading the file.
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// Path that was requested
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            ErrorKind::NotFound => Self::NotFound { path, source },
            ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    /// The path that could not be read.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. }
            | Self::PermissionDenied { path, .. }
            | Self::Io { path, .. } => path,
        }
    }

    /// The operating system error behind the failure.
    #[must_use]
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::NotFound { source, .. }
            | Self::PermissionDenied { source, .. }
            | Self::Io { source, .. } => source,
        }
    }
}

/// Hash everything `reader` yields, reading [`CHUNK_SIZE`] bytes at a time.
///
/// # Errors
///
/// Returns the first non-`Interrupted` I/O error from the reader.
pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<DigestPair> {
    let mut md5 = Md5::new();
    let mut sha1 = Sha1::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let chunk = &buffer[..bytes_read];
        md5.update(chunk);
        sha1.update(chunk);
    }

    Ok(DigestPair {
        md5: hex::encode(md5.finalize()),
        sha1: hex::encode(sha1.finalize()),
    })
}

/// Compute both digests of the file at `path`.
///
/// The file handle is dropped when this returns, on success or error.
///
/// # Errors
///
/// Returns [`HashError`] if the file cannot be opened or read.
pub fn try_compute_digests(path: &Path) -> Result<DigestPair, HashError> {
    let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
    digest_reader(file).map_err(|e| HashError::from_io(path, e))
}

/// Compute both digests of the file at `path`, never failing.
///
/// On error a warning naming the path and cause is logged and
/// [`DigestOutcome::Failed`] is returned.
#[must_use]
pub fn compute_digests(path: &Path) -> DigestOutcome {
    match try_compute_digests(path) {
        Ok(pair) => {
            log::trace!("{}: md5={} sha1={}", path.display(), pair.md5, pair.sha1);
            DigestOutcome::Computed(pair)
        }
        Err(e) => {
            log::warn!("{}", read_failure_message(path, &e));
            DigestOutcome::Failed(e)
        }
    }
}

/// Diagnostic line for a file that could not be hashed.
fn read_failure_message(path: &Path, err: &HashError) -> String {
    format!("Error reading file: {}: {}", path.display(), err.io_error())
}
