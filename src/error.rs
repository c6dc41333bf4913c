//! Exit codes and structured error reports.

use serde::Serialize;

/// Process exit codes.
///
/// - 0: Success (no mismatches recorded)
/// - 1: General error (store failure, bad arguments, unreadable file list)
/// - 2: Mismatches were recorded
/// - 3: Completed, but some files could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: completed with nothing to review.
    Success = 0,
    /// General error: the run was aborted.
    GeneralError = 1,
    /// Mismatches: at least one row was added to `mismatched_hashes`.
    MismatchesFound = 2,
    /// Partial success: at least one file could not be read.
    ReadFailures = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "VH000",
            Self::GeneralError => "VH001",
            Self::MismatchesFound => "VH002",
            Self::ReadFailures => "VH003",
        }
    }
}

/// Structured error information for `--json-errors`.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "VH001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Messages of the underlying causes, outermost first
    pub causes: Vec<String>,
}

impl StructuredError {
    /// Create a structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
            causes: err.chain().skip(1).map(ToString::to_string).collect(),
        }
    }
}
