//! Directory reorganization engine.
//!
//! FAT directories keep entries in creation order, and there is no primitive
//! to reinsert a folder's entries in a chosen order. The engine works around
//! that with an explicit two-phase commit per user folder:
//!
//! 1. populate: create `Temp<millis>` beside the folder and rename every child
//!    into it in sorted order (subfolders are recreated and filled the same
//!    way, recursively);
//! 2. swap: delete the now-empty original and rename the temporary folder to
//!    the original name.
//!
//! The swap is not atomic. If the process dies between the delete and the
//! rename, the content sits under the temporary name reported in the log.
//!
//! At every point, the union of the original folder and the temporary folder
//! holds each listed entry exactly once; a cancellation or failure leaves
//! that split as-is and never rolls back.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use crate::cancel::CancellationToken;
use crate::errors::ReorgError;
use crate::fs_ops::{create_temp_sibling, rename_entry, restore_mtime};
use crate::progress::ProgressSink;
use crate::snapshot::{EntryKind, EntrySnapshot, list_children};
use crate::sort_key::{OrderingPolicy, sort_snapshots};
use crate::throttle::{OperationThrottle, ThrottleOp};

/// Settings fixed for the duration of one run.
#[derive(Debug, Clone)]
pub struct ReorgOptions {
    pub order: OrderingPolicy,
    pub case_sensitive: bool,
    /// Recreate subfolders recursively instead of moving them as-is
    pub recurse: bool,
    pub throttle: OperationThrottle,
    /// Report the order that would be produced without touching the filesystem
    pub dry_run: bool,
}

impl Default for ReorgOptions {
    fn default() -> Self {
        Self {
            order: OrderingPolicy::default(),
            case_sensitive: false,
            recurse: true,
            throttle: OperationThrottle::default(),
            dry_run: false,
        }
    }
}

impl ReorgOptions {
    /// Recursive, all delays off. Convenient for tests and fast local disks.
    pub fn unthrottled(order: OrderingPolicy, case_sensitive: bool) -> Self {
        Self {
            order,
            case_sensitive,
            recurse: true,
            throttle: OperationThrottle::disabled(),
            dry_run: false,
        }
    }
}

/// Totals for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReorganizationCounters {
    /// Files (and non-recursed subfolders) relocated by a single rename
    pub entries_moved: u64,
    /// Subfolders that went through the full create/move/delete cycle
    pub subfolders_resorted: u64,
}

impl ReorganizationCounters {
    pub fn total(&self) -> u64 {
        self.entries_moved + self.subfolders_resorted
    }
}

/// Mutable state threaded through the recursion; owned by the run.
#[derive(Debug, Default)]
pub struct RunState {
    counters: ReorganizationCounters,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> ReorganizationCounters {
        self.counters
    }
}

pub struct Reorganizer<'a> {
    options: &'a ReorgOptions,
    token: &'a CancellationToken,
    sink: &'a dyn ProgressSink,
}

impl<'a> Reorganizer<'a> {
    pub fn new(
        options: &'a ReorgOptions,
        token: &'a CancellationToken,
        sink: &'a dyn ProgressSink,
    ) -> Self {
        Self {
            options,
            token,
            sink,
        }
    }

    /// Reorganize the folder at `root` in place, adding to `state`'s counters.
    ///
    /// `root` must be an existing directory with a parent (volume roots are
    /// rejected: there is nowhere to put the temporary sibling).
    pub fn reorganize(&self, root: &Path, state: &mut RunState) -> Result<(), ReorgError> {
        self.check_cancel()?;

        let source = match dunce::canonicalize(root) {
            Ok(p) if p.is_dir() => p,
            _ => {
                return Err(self.report(
                    format!("Not a folder (directory): {}", root.display()),
                    ReorgError::InvalidTarget(root.to_path_buf()),
                ));
            }
        };
        let original_mtime = fs::metadata(&source).and_then(|m| m.modified()).ok();
        self.sink
            .line(&format!("Original folder is: {}", source.display()));

        let Some(parent) = source.parent() else {
            return Err(self.report(
                format!("Can't get parent folder for: {}", source.display()),
                ReorgError::NoParent(source.clone()),
            ));
        };
        self.sink.line(&format!("Parent folder is: {}", parent.display()));

        if self.options.dry_run {
            self.sink.line("Dry-run: no files or folders will be changed.");
            return self.plan_children(&source, state);
        }

        let temp = create_temp_sibling(parent).map_err(|source| {
            self.report(
                format!("Can't create temporary folder in: {}", parent.display()),
                ReorgError::CreateFailed {
                    path: parent.to_path_buf(),
                    source,
                },
            )
        })?;
        self.sink.line(&format!("Temporary folder is: {}", temp.display()));

        self.relocate_children(&source, &temp, state)?;

        self.options.throttle.pause(ThrottleOp::DeleteDir);
        fs::remove_dir(&source).map_err(|e| {
            self.report(
                format!("Can't delete original folder: {}", source.display()),
                ReorgError::DeleteFailed {
                    path: source.clone(),
                    source: e,
                },
            )
        })?;

        self.options.throttle.pause(ThrottleOp::Swap);
        rename_entry(&temp, &source).map_err(|e| {
            self.report(
                format!("Can't rename {} as {}", temp.display(), source.display()),
                ReorgError::RenameFailed {
                    from: temp.clone(),
                    to: source.clone(),
                    source: e,
                },
            )
        })?;

        if let Some(mtime) = original_mtime {
            self.restore_time(&source, mtime);
        }
        debug!(path = %source.display(), "folder sorted");
        Ok(())
    }

    /// Move every child of `source` into `target`, in sorted order.
    /// On return `source` is empty (unless an error or cancellation cut it short).
    fn relocate_children(
        &self,
        source: &Path,
        target: &Path,
        state: &mut RunState,
    ) -> Result<(), ReorgError> {
        self.check_cancel()?;

        for child in self.sorted_children(source) {
            self.check_cancel()?;

            let from = source.join(child.name());
            if let Err(e) = fs::symlink_metadata(&from)
                && e.kind() == io::ErrorKind::NotFound
            {
                debug!(path = %from.display(), "entry vanished since listing; skipping");
                continue;
            }
            self.sink.status(&from);
            let to = target.join(child.name());

            if child.is_dir() && self.options.recurse {
                self.sink
                    .line(&format!("Resorting subfolder: {}", from.display()));

                self.options.throttle.pause(ThrottleOp::CreateDir);
                fs::create_dir(&to).map_err(|source| {
                    self.report(
                        format!("Can't create subfolder: {}", to.display()),
                        ReorgError::CreateFailed {
                            path: to.clone(),
                            source,
                        },
                    )
                })?;

                self.relocate_children(&from, &to, state)?;

                self.options.throttle.pause(ThrottleOp::DeleteDir);
                fs::remove_dir(&from).map_err(|source| {
                    self.report(
                        format!("Can't delete subfolder: {}", from.display()),
                        ReorgError::DeleteFailed {
                            path: from.clone(),
                            source,
                        },
                    )
                })?;
                state.counters.subfolders_resorted += 1;
            } else {
                self.options.throttle.pause(ThrottleOp::Move);
                rename_entry(&from, &to).map_err(|source| {
                    self.report(
                        format!("Can't rename {} as {}", from.display(), to.display()),
                        ReorgError::MoveFailed {
                            from: from.clone(),
                            to: to.clone(),
                            source,
                        },
                    )
                })?;
                state.counters.entries_moved += 1;
                debug!(from = %from.display(), to = %to.display(), "moved");
            }

            // Symlink times would be set on their target; rename left the link's own times alone.
            if child.kind() != EntryKind::Other {
                self.restore_time(&to, child.mod_time());
            }
        }
        Ok(())
    }

    /// Dry-run walk: report the order each folder would get, counting as if moved.
    fn plan_children(&self, source: &Path, state: &mut RunState) -> Result<(), ReorgError> {
        for child in self.sorted_children(source) {
            self.check_cancel()?;
            let from = source.join(child.name());
            self.sink.status(&from);
            if child.is_dir() && self.options.recurse {
                self.sink
                    .line(&format!("Would resort subfolder: {}", from.display()));
                self.plan_children(&from, state)?;
                state.counters.subfolders_resorted += 1;
            } else {
                self.sink.line(&format!("Would move: {}", from.display()));
                state.counters.entries_moved += 1;
            }
        }
        Ok(())
    }

    fn sorted_children(&self, dir: &Path) -> Vec<EntrySnapshot> {
        let mut children = list_children(dir);
        sort_snapshots(&mut children, self.options.order, self.options.case_sensitive);
        children
    }

    #[inline]
    fn check_cancel(&self) -> Result<(), ReorgError> {
        if self.token.is_cancelled() {
            Err(ReorgError::Cancelled)
        } else {
            Ok(())
        }
    }

    fn restore_time(&self, path: &Path, mtime: std::time::SystemTime) {
        if let Err(e) = restore_mtime(path, mtime) {
            warn!(path = %path.display(), error = %e, "failed to restore modification time");
        }
    }

    /// Emit the report line for a fatal error and hand the error back.
    fn report(&self, line: String, err: ReorgError) -> ReorgError {
        self.sink.line(&line);
        err
    }
}
