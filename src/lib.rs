//! vol-hash-comp - compare two copies of a file tree by content digests.
//!
//! Each file is hashed with MD5 and SHA-1 in both trees, the digest pairs are
//! stored in a SQLite table, and rows whose digests differ are copied into a
//! second table for review.

pub mod cli;
pub mod compare;
pub mod config;
pub mod digest;
pub mod error;
pub mod logging;
pub mod output;
pub mod store;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::{Cli, Commands, CompareArgs, ReportArgs, StoreArgs};
use crate::compare::{compare_trees, read_file_list, CompareOptions, CompareSummary, TreePair};
use crate::config::Config;
use crate::error::ExitCode;
use crate::output::write_report;
use crate::store::HashStore;

const RUNNING: &str = "Running...";
const DONE: &str = "          done.";

/// Run the application, writing status lines and reports to stdout.
///
/// # Errors
///
/// Returns an error if the hash store cannot be opened or written, the
/// file list cannot be read, or writing to stdout fails.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_app_with_writer(cli, &mut out)
}

/// Run the application, writing status lines and reports to `out`.
///
/// The exit code of `compare` reflects only the files compared in this run.
///
/// # Errors
///
/// Returns an error if the hash store cannot be opened or written, the
/// file list cannot be read, or writing to `out` fails.
pub fn run_app_with_writer<W: Write>(cli: Cli, out: &mut W) -> Result<ExitCode> {
    let Some(command) = cli.command else {
        writeln!(out, "{RUNNING}")?;
        writeln!(out, "{DONE}")?;
        return Ok(ExitCode::Success);
    };

    let config = Config::load();
    match command {
        Commands::Compare(args) => run_compare(&config, args, out),
        Commands::Init(args) => {
            let store = open_store(&config, &args)?;
            log::info!(
                "Hash store ready at {}",
                store.path().map_or_else(String::new, |p| p.display().to_string())
            );
            Ok(ExitCode::Success)
        }
        Commands::Report(args) => run_report(&config, &args, out),
    }
}

fn open_store(config: &Config, args: &StoreArgs) -> Result<HashStore> {
    let path = config.resolve_database(args.db.as_deref())?;
    open_store_at(&path)
}

fn open_store_at(path: &Path) -> Result<HashStore> {
    HashStore::open(path).with_context(|| format!("Cannot use hash store {}", path.display()))
}

fn run_compare<W: Write>(config: &Config, args: CompareArgs, out: &mut W) -> Result<ExitCode> {
    let mut files = match &args.file_list {
        Some(list) => read_file_list(list)?,
        None => Vec::new(),
    };
    files.extend(args.paths);

    let options = CompareOptions {
        fresh: args.fresh || config.fresh,
    };
    let trees = TreePair::new(args.left, args.right);

    writeln!(out, "{RUNNING}")?;
    let mut store = open_store(config, &args.store)?;
    let summary = compare_trees(&mut store, &trees, &files, &options)?;
    writeln!(out, "{DONE}")?;

    Ok(exit_code_for(&summary))
}

fn run_report<W: Write>(config: &Config, args: &ReportArgs, out: &mut W) -> Result<ExitCode> {
    let store = open_store(config, &args.store)?;
    let records = store.mismatch_records()?;
    write_report(args.format, &records, &mut *out).context("Failed to write report")?;
    Ok(ExitCode::Success)
}

fn exit_code_for(summary: &CompareSummary) -> ExitCode {
    if summary.read_failures > 0 {
        ExitCode::ReadFailures
    } else if summary.mismatches > 0 {
        ExitCode::MismatchesFound
    } else {
        ExitCode::Success
    }
}
