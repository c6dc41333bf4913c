//! Command-line interface definitions for vol-hash-comp.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Running without a subcommand only prints the two status lines.
//!
//! # Example
//!
//! ```bash
//! # Compare two copies of a photo volume using a list of relative paths
//! vol-hash-comp compare --left /mnt/a --right /mnt/b --file-list files.txt
//!
//! # Start from an empty mismatch table
//! vol-hash-comp compare --left /mnt/a --right /mnt/b --fresh DCIM/0001.jpg
//!
//! # Review stored mismatches
//! vol-hash-comp report --format csv
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Compare two copies of a file tree by MD5 and SHA-1 digests.
///
/// Digests of each file in both trees are stored in SQLite; files whose
/// digests differ are copied into a separate table for review.
#[derive(Debug, Parser)]
#[command(name = "vol-hash-comp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Hash files in two trees and record mismatches
    Compare(CompareArgs),
    /// Create the hash store and its tables if missing
    Init(StoreArgs),
    /// Print the rows of the mismatch table
    Report(ReportArgs),
}

/// Location of the hash store, shared by every subcommand.
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Path to the SQLite hash store
    ///
    /// Defaults to `database` from the config file, or a platform data path.
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,
}

/// Arguments for the compare subcommand.
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Root of the first copy (image 1)
    #[arg(long, value_name = "DIR")]
    pub left: PathBuf,

    /// Root of the second copy (image 2)
    #[arg(long, value_name = "DIR")]
    pub right: PathBuf,

    /// File containing relative paths to compare, one per line
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file_list: Option<PathBuf>,

    /// Clear the mismatch table before extraction
    ///
    /// Extraction re-scans every row ever recorded in file_hashes, so
    /// mismatches from earlier runs are copied again.
    #[arg(long)]
    pub fresh: bool,

    /// Relative paths to compare (in addition to --file-list)
    #[arg(value_name = "PATH", required_unless_present = "file_list")]
    pub paths: Vec<String>,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the report subcommand.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Output format for mismatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Aligned text table
    Text,
    /// JSON for scripting
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}
