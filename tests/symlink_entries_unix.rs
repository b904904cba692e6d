#![cfg(unix)]
//! Symbolic links are relocated as links and never followed.

use assert_fs::prelude::*;
use std::fs;
use std::os::unix::fs::symlink;

use sort_fat_folder::{
    CancellationToken, MemorySink, OrderingPolicy, ReorgOptions, Reorganizer, RunState,
};

#[test]
fn symlinked_folder_is_moved_not_recursed() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("outside/keep.txt").write_str("keep").unwrap();
    td.child("d/file.txt").write_str("f").unwrap();
    symlink(td.path().join("outside"), td.path().join("d/link")).unwrap();

    let opts = ReorgOptions::unthrottled(OrderingPolicy::SubfoldersFirst, false);
    let token = CancellationToken::new();
    let sink = MemorySink::new();
    let mut state = RunState::new();
    Reorganizer::new(&opts, &token, &sink)
        .reorganize(&td.path().join("d"), &mut state)
        .unwrap();

    let link = td.path().join("d/link");
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_link(&link).unwrap(), td.path().join("outside"));
    td.child("outside/keep.txt").assert("keep");
    assert_eq!(state.counters().entries_moved, 2);
    assert_eq!(state.counters().subfolders_resorted, 0);
}
