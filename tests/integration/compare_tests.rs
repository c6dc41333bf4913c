use std::fs;
use tempfile::tempdir;
use vol_hash_comp::compare::{compare_trees, read_file_list, CompareOptions, TreePair};
use vol_hash_comp::store::HashStore;

const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";
const EMPTY_SHA1: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";

#[test]
fn test_compare_nested_paths_and_empty_files() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();
    for root in [left.path(), right.path()] {
        fs::create_dir_all(root.join("DCIM/100")).unwrap();
        fs::write(root.join("DCIM/100/empty.jpg"), b"").unwrap();
    }
    fs::write(left.path().join("DCIM/100/a.jpg"), vec![1u8; 20_000]).unwrap();
    let mut corrupted = vec![1u8; 20_000];
    corrupted[12_345] = 0;
    fs::write(right.path().join("DCIM/100/a.jpg"), corrupted).unwrap();

    let mut store = HashStore::open(&left.path().join("hashes.db")).unwrap();
    let trees = TreePair::new(left.path(), right.path());
    let files = vec![
        "DCIM/100/empty.jpg".to_string(),
        "DCIM/100/a.jpg".to_string(),
    ];

    let summary = compare_trees(&mut store, &trees, &files, &CompareOptions::default()).unwrap();
    assert_eq!(summary.files, 2);
    assert_eq!(summary.read_failures, 0);
    assert_eq!(summary.mismatches, 1);
    assert_eq!(summary.extracted, 1);

    let rows = store.file_records().unwrap();
    assert_eq!(rows[0].image_1_md5.as_deref(), Some(EMPTY_MD5));
    assert_eq!(rows[0].image_2_sha1.as_deref(), Some(EMPTY_SHA1));

    let mismatches = store.mismatch_records().unwrap();
    assert_eq!(mismatches, vec![rows[1].clone()]);
    assert_ne!(mismatches[0].image_1_md5, mismatches[0].image_2_md5);
    assert_ne!(mismatches[0].image_1_sha1, mismatches[0].image_2_sha1);
}

#[test]
fn test_missing_on_both_sides_is_not_a_mismatch() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();

    let mut store = HashStore::open_in_memory().unwrap();
    let trees = TreePair::new(left.path(), right.path());
    let files = vec!["ghost.jpg".to_string()];

    let summary = compare_trees(&mut store, &trees, &files, &CompareOptions::default()).unwrap();
    assert_eq!(summary.read_failures, 1);
    assert_eq!(summary.mismatches, 0);

    let rows = store.file_records().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].image_1_md5.is_none());
    assert!(rows[0].image_2_sha1.is_none());
}

#[test]
fn test_repeated_runs_accumulate_without_fresh() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();
    fs::write(left.path().join("x.jpg"), b"one").unwrap();
    fs::write(right.path().join("x.jpg"), b"two").unwrap();

    let mut store = HashStore::open_in_memory().unwrap();
    let trees = TreePair::new(left.path(), right.path());
    let files = vec!["x.jpg".to_string()];

    compare_trees(&mut store, &trees, &files, &CompareOptions::default()).unwrap();
    let second = compare_trees(&mut store, &trees, &files, &CompareOptions::default()).unwrap();
    assert_eq!(second.mismatches, 1);
    assert_eq!(second.extracted, 2);

    // Run 1 copies one row; run 2 copies both file_hashes rows again.
    assert_eq!(store.mismatch_records().unwrap().len(), 3);
}

#[test]
fn test_read_file_list() {
    let dir = tempdir().unwrap();
    let list = dir.path().join("files.txt");
    fs::write(&list, "# volume A\nDCIM/1.jpg\n\nDCIM/2.jpg\n").unwrap();

    assert_eq!(
        read_file_list(&list).unwrap(),
        vec!["DCIM/1.jpg", "DCIM/2.jpg"]
    );
}
