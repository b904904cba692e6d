//! Multi-root runs on a dedicated worker thread.
//!
//! Roots are processed one after another; the first fatal error or a
//! cancellation stops the whole run. Counters accumulate across roots and the
//! summary is produced whatever the outcome.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{error, info, warn};

use crate::cancel::CancellationToken;
use crate::errors::ReorgError;
use crate::progress::ProgressSink;
use crate::reorganize::{ReorgOptions, ReorganizationCounters, Reorganizer, RunState};

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    Success,
    Cancelled,
    Failed(ReorgError),
}

/// Process-level completion signal for scripted use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Entries were moved or folders sorted
    Worked,
    /// Nothing was found to move
    NothingFound,
    /// Fatal error or cancellation
    Failed,
}

impl Completion {
    pub fn exit_code(self) -> i32 {
        match self {
            Completion::Worked => 0,
            Completion::Failed => 1,
            Completion::NothingFound => 2,
        }
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub counters: ReorganizationCounters,
    pub outcome: Outcome,
    /// Roots fully reorganized
    pub roots_done: usize,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success)
    }

    pub fn completion(&self) -> Completion {
        match self.outcome {
            Outcome::Success if self.counters.total() > 0 => Completion::Worked,
            Outcome::Success => Completion::NothingFound,
            Outcome::Cancelled | Outcome::Failed(_) => Completion::Failed,
        }
    }

    /// Closing report lines: a warning about split content after a stop, then the totals.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);
        if !self.is_success() {
            lines.push(
                "After an error, files may be in their original folder or a temporary folder."
                    .to_string(),
            );
        }
        let moved = self.counters.entries_moved;
        let sorted = self.counters.subfolders_resorted;
        lines.push(format!(
            "Moved {} {} and sorted {} {}.",
            group_digits(moved),
            if moved == 1 {
                "file (or subfolder)"
            } else {
                "files (or subfolders)"
            },
            group_digits(sorted),
            if sorted == 1 { "subfolder" } else { "subfolders" },
        ));
        lines
    }
}

/// Format with comma thousands separators: 1234567 -> "1,234,567".
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Reorganize each root in turn on the calling thread.
pub fn run_roots(
    roots: &[PathBuf],
    options: &ReorgOptions,
    token: &CancellationToken,
    sink: &dyn ProgressSink,
) -> RunReport {
    let reorganizer = Reorganizer::new(options, token, sink);
    let mut state = RunState::new();
    let mut roots_done = 0;
    let mut outcome = Outcome::Success;

    for root in roots {
        match reorganizer.reorganize(root, &mut state) {
            Ok(()) => {
                roots_done += 1;
                info!(root = %root.display(), "root reorganized");
            }
            Err(e) if e.is_cancellation() => {
                warn!(root = %root.display(), "run cancelled");
                outcome = Outcome::Cancelled;
                break;
            }
            Err(e) => {
                error!(code = e.code(), kind = e.kind(), root = %root.display(), error = %e, "run failed");
                outcome = Outcome::Failed(e);
                break;
            }
        }
    }

    let report = RunReport {
        counters: state.counters(),
        outcome,
        roots_done,
    };
    for line in report.summary_lines() {
        sink.line(&line);
    }
    report
}

/// Start a run on its own worker thread so the caller stays free to cancel.
pub fn spawn_run(
    roots: Vec<PathBuf>,
    options: ReorgOptions,
    token: CancellationToken,
    sink: Arc<dyn ProgressSink>,
) -> io::Result<JoinHandle<RunReport>> {
    thread::Builder::new()
        .name("reorganizer".into())
        .spawn(move || run_roots(&roots, &options, &token, sink.as_ref()))
}
