//! The order relocations are issued is the order entries get created in the
//! replacement folder, so ordering is checked on the status stream.

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

use sort_fat_folder::{
    CancellationToken, MemorySink, OrderingPolicy, ReorgOptions, Reorganizer, RunState,
};

/// Names of the direct children of `root_name`, in relocation order.
fn top_level_order(statuses: &[PathBuf], root_name: &str) -> Vec<String> {
    statuses
        .iter()
        .filter(|p| {
            p.parent()
                .and_then(Path::file_name)
                .is_some_and(|n| n == root_name)
        })
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn sort_folder(root: &Path, order: OrderingPolicy, case_sensitive: bool) -> MemorySink {
    let opts = ReorgOptions::unthrottled(order, case_sensitive);
    let token = CancellationToken::new();
    let sink = MemorySink::new();
    Reorganizer::new(&opts, &token, &sink)
        .reorganize(root, &mut RunState::new())
        .expect("reorganize");
    sink
}

#[test]
fn subfolders_first_then_files_ignoring_case() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("d/b.txt").write_str("b").unwrap();
    td.child("d/A.txt").write_str("a").unwrap();
    td.child("d/sub/inner.txt").write_str("i").unwrap();

    let sink = sort_folder(&td.path().join("d"), OrderingPolicy::SubfoldersFirst, false);

    assert_eq!(top_level_order(&sink.statuses(), "d"), ["sub", "A.txt", "b.txt"]);
    td.child("d/sub/inner.txt").assert("i");
    td.child("d/A.txt").assert("a");
    td.child("d/b.txt").assert("b");
}

#[test]
fn case_insensitive_puts_apple_before_banana() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("d/Banana").write_str("").unwrap();
    td.child("d/apple").write_str("").unwrap();

    let sink = sort_folder(&td.path().join("d"), OrderingPolicy::SubfoldersFirst, false);
    assert_eq!(top_level_order(&sink.statuses(), "d"), ["apple", "Banana"]);
}

#[test]
fn case_sensitive_uses_codepoint_order() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("d/Banana").write_str("").unwrap();
    td.child("d/apple").write_str("").unwrap();

    let sink = sort_folder(&td.path().join("d"), OrderingPolicy::SubfoldersFirst, true);
    assert_eq!(top_level_order(&sink.statuses(), "d"), ["Banana", "apple"]);
}

#[test]
fn subfolders_last_puts_files_first() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("d/zeta.txt").write_str("").unwrap();
    td.child("d/alpha").create_dir_all().unwrap();
    td.child("d/beta.txt").write_str("").unwrap();

    let sink = sort_folder(&td.path().join("d"), OrderingPolicy::SubfoldersLast, false);
    assert_eq!(
        top_level_order(&sink.statuses(), "d"),
        ["beta.txt", "zeta.txt", "alpha"]
    );
}

#[test]
fn mixed_interleaves_by_name() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("d/c_dir").create_dir_all().unwrap();
    td.child("d/b.txt").write_str("").unwrap();
    td.child("d/a_dir").create_dir_all().unwrap();

    let sink = sort_folder(&td.path().join("d"), OrderingPolicy::Mixed, false);
    assert_eq!(top_level_order(&sink.statuses(), "d"), ["a_dir", "b.txt", "c_dir"]);
}

#[test]
fn subfolder_contents_are_sorted_too() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("d/sub/Zed.txt").write_str("").unwrap();
    td.child("d/sub/alpha.txt").write_str("").unwrap();
    td.child("d/sub/inner").create_dir_all().unwrap();

    let sink = sort_folder(&td.path().join("d"), OrderingPolicy::SubfoldersFirst, false);
    assert_eq!(
        top_level_order(&sink.statuses(), "sub"),
        ["inner", "alpha.txt", "Zed.txt"]
    );
    assert!(
        sink.lines()
            .iter()
            .any(|l| l.starts_with("Resorting subfolder: ") && l.ends_with("sub"))
    );
}

#[test]
fn sorting_twice_gives_the_same_order() {
    let td = assert_fs::TempDir::new().unwrap();
    for name in ["b", "README", "ReadMe", "readme", "a"] {
        td.child("d").child(name).write_str(name).unwrap();
    }
    td.child("d/Folder").create_dir_all().unwrap();

    let first = sort_folder(&td.path().join("d"), OrderingPolicy::SubfoldersFirst, false);
    let second = sort_folder(&td.path().join("d"), OrderingPolicy::SubfoldersFirst, false);

    let order = top_level_order(&first.statuses(), "d");
    assert_eq!(order, top_level_order(&second.statuses(), "d"));
    assert_eq!(order, ["Folder", "a", "b", "README", "ReadMe", "readme"]);
}
