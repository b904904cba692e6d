//! Timestamp restoration.
//! Relocating an entry (and recreating a folder) changes modification times;
//! these helpers put the captured value back. Access time is left untouched.

use filetime::{FileTime, set_file_mtime};
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tracing::trace;

/// Set the modification time of `path` to `mtime`.
/// Callers treat failure as non-fatal.
pub fn restore_mtime(path: &Path, mtime: SystemTime) -> io::Result<()> {
    set_file_mtime(path, FileTime::from_system_time(mtime))?;
    trace!(path = %path.display(), "restored mtime");
    Ok(())
}
