use clap::Parser;
use std::fs;
use tempfile::tempdir;
use vol_hash_comp::cli::Cli;
use vol_hash_comp::error::ExitCode;
use vol_hash_comp::run_app_with_writer;
use vol_hash_comp::store::HashStore;

fn run(args: &[&str]) -> (ExitCode, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let code = run_app_with_writer(cli, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_bare_run_prints_status_lines() {
    let (code, out) = run(&["vol-hash-comp"]);
    assert_eq!(code, ExitCode::Success);
    assert_eq!(out, "Running...\n          done.\n");
}

#[test]
fn test_compare_then_report_csv() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();
    let work = tempdir().unwrap();
    fs::write(left.path().join("same.jpg"), b"img").unwrap();
    fs::write(right.path().join("same.jpg"), b"img").unwrap();
    fs::write(left.path().join("diff.jpg"), b"img-a").unwrap();
    fs::write(right.path().join("diff.jpg"), b"img-b").unwrap();
    let list = work.path().join("files.txt");
    fs::write(&list, "same.jpg\ndiff.jpg\n").unwrap();
    let db = work.path().join("hashes.db");

    let (code, out) = run(&[
        "vol-hash-comp",
        "compare",
        "--left",
        left.path().to_str().unwrap(),
        "--right",
        right.path().to_str().unwrap(),
        "--file-list",
        list.to_str().unwrap(),
        "--db",
        db.to_str().unwrap(),
    ]);
    assert_eq!(code, ExitCode::MismatchesFound);
    assert_eq!(out, "Running...\n          done.\n");

    let (code, csv) = run(&[
        "vol-hash-comp",
        "report",
        "--format",
        "csv",
        "--db",
        db.to_str().unwrap(),
    ]);
    assert_eq!(code, ExitCode::Success);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("diff.jpg,"));
}

#[test]
fn test_compare_identical_trees_is_success() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();
    let work = tempdir().unwrap();
    fs::write(left.path().join("a.jpg"), b"same").unwrap();
    fs::write(right.path().join("a.jpg"), b"same").unwrap();
    let db = work.path().join("hashes.db");

    let (code, _) = run(&[
        "vol-hash-comp",
        "compare",
        "--left",
        left.path().to_str().unwrap(),
        "--right",
        right.path().to_str().unwrap(),
        "--db",
        db.to_str().unwrap(),
        "a.jpg",
    ]);
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_repaired_copy_exits_success_despite_history() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();
    let work = tempdir().unwrap();
    fs::write(left.path().join("a.jpg"), b"original").unwrap();
    fs::write(right.path().join("a.jpg"), b"damaged").unwrap();
    let db = work.path().join("hashes.db");
    let compare = |extra: &[&str]| {
        let mut args = vec![
            "vol-hash-comp",
            "compare",
            "--left",
            left.path().to_str().unwrap(),
            "--right",
            right.path().to_str().unwrap(),
            "--db",
            db.to_str().unwrap(),
        ];
        args.extend_from_slice(extra);
        args.push("a.jpg");
        run(&args).0
    };

    assert_eq!(compare(&[]), ExitCode::MismatchesFound);

    fs::write(right.path().join("a.jpg"), b"original").unwrap();
    assert_eq!(compare(&["--fresh"]), ExitCode::Success);
    assert_eq!(compare(&[]), ExitCode::Success);

    // The damaged run is still in file_hashes, so it is still extracted.
    let store = HashStore::open(&db).unwrap();
    assert_eq!(store.file_records().unwrap().len(), 3);
    assert!(!store.mismatch_records().unwrap().is_empty());
}

#[test]
fn test_compare_with_unreadable_file_reports_partial() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();
    let work = tempdir().unwrap();
    fs::write(left.path().join("a.jpg"), b"only here").unwrap();
    let db = work.path().join("hashes.db");

    let (code, out) = run(&[
        "vol-hash-comp",
        "compare",
        "--left",
        left.path().to_str().unwrap(),
        "--right",
        right.path().to_str().unwrap(),
        "--db",
        db.to_str().unwrap(),
        "a.jpg",
    ]);
    assert_eq!(code, ExitCode::ReadFailures);
    assert!(out.ends_with("          done.\n"));

    let store = HashStore::open(&db).unwrap();
    let rows = store.mismatch_records().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].image_2_md5.is_none());
}

#[test]
fn test_init_creates_tables() {
    let work = tempdir().unwrap();
    let db = work.path().join("hashes.db");

    let (code, out) = run(&["vol-hash-comp", "init", "--db", db.to_str().unwrap()]);
    assert_eq!(code, ExitCode::Success);
    assert!(out.is_empty());
    assert!(db.exists());

    let (_, report) = run(&["vol-hash-comp", "report", "--db", db.to_str().unwrap()]);
    assert_eq!(report, "No mismatches recorded.\n");
}

#[test]
fn test_unwritable_store_location_is_fatal() {
    let work = tempdir().unwrap();
    let db = work.path().join("no-such-dir").join("hashes.db");

    let cli = Cli::try_parse_from(["vol-hash-comp", "init", "--db", db.to_str().unwrap()]).unwrap();
    let mut out = Vec::new();
    let err = run_app_with_writer(cli, &mut out).unwrap_err();
    assert!(err.to_string().contains("Cannot use hash store"));
}

#[test]
fn test_missing_file_list_is_fatal() {
    let work = tempdir().unwrap();
    let missing = work.path().join("nope.txt");
    let db = work.path().join("hashes.db");

    let cli = Cli::try_parse_from([
        "vol-hash-comp",
        "compare",
        "--left",
        "/a",
        "--right",
        "/b",
        "--file-list",
        missing.to_str().unwrap(),
        "--db",
        db.to_str().unwrap(),
    ])
    .unwrap();
    let mut out = Vec::new();
    assert!(run_app_with_writer(cli, &mut out).is_err());
    assert!(!db.exists());
}
