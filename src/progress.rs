//! Progress reporting seam.
//!
//! The reorganizer never prints. It hands human-readable report lines and a
//! "currently processing" status to a [`ProgressSink`]; the caller decides
//! whether those end up on stdout, in a log, or in memory.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, trace};

use crate::output as out;

pub trait ProgressSink: Send + Sync {
    /// One complete report line (no trailing newline).
    fn line(&self, text: &str);

    /// Path about to be relocated. Called often; implementations should be cheap.
    fn status(&self, _path: &Path) {}
}

/// Plain report lines on stdout, suitable for redirection.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn line(&self, text: &str) {
        out::print_user(text);
    }

    fn status(&self, path: &Path) {
        trace!(path = %path.display(), "processing");
    }
}

/// Report lines as `tracing` events only.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn line(&self, text: &str) {
        info!("{text}");
    }

    fn status(&self, path: &Path) {
        trace!(path = %path.display(), "processing");
    }
}

/// Keeps everything in memory; the latest status is kept alongside the full history.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
    statuses: Mutex<Vec<PathBuf>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Every status update in the order it was issued.
    pub fn statuses(&self) -> Vec<PathBuf> {
        self.statuses.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn current_status(&self) -> Option<PathBuf> {
        self.statuses.lock().ok().and_then(|g| g.last().cloned())
    }
}

impl ProgressSink for MemorySink {
    fn line(&self, text: &str) {
        if let Ok(mut g) = self.lines.lock() {
            g.push(text.to_string());
        }
    }

    fn status(&self, path: &Path) {
        if let Ok(mut g) = self.statuses.lock() {
            g.push(path.to_path_buf());
        }
    }
}
