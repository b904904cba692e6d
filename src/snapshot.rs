//! Immutable capture of directory entries at listing time.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, warn};

/// What a directory entry is, as seen without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Symlinks and special files; relocated like files, never recursed into.
    Other,
}

/// Name, kind and modification time of one entry, read once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySnapshot {
    name: OsString,
    kind: EntryKind,
    mod_time: SystemTime,
}

impl EntrySnapshot {
    pub fn new(name: impl Into<OsString>, kind: EntryKind, mod_time: SystemTime) -> Self {
        Self {
            name: name.into(),
            kind,
            mod_time,
        }
    }

    /// Stat `path` (without following symlinks) and capture it.
    pub fn capture(path: &Path) -> io::Result<Self> {
        let meta = fs::symlink_metadata(path)?;
        let ftype = meta.file_type();
        let kind = if ftype.is_dir() {
            EntryKind::Directory
        } else if ftype.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        let name = path
            .file_name()
            .map(OsStr::to_os_string)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
        let mod_time = meta.modified()?;
        Ok(Self::new(name, kind, mod_time))
    }

    pub fn name(&self) -> &OsStr {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn mod_time(&self) -> SystemTime {
        self.mod_time
    }
}

/// Snapshot the immediate children of `dir`, unsorted.
///
/// A folder that cannot be listed (e.g. a protected system folder) yields an
/// empty list: the caller must still be able to delete or rename it.
/// An entry that is listed but cannot be stat'ed is kept as [`EntryKind::Other`],
/// so it is still relocated (or its rename fails with the real cause).
pub fn list_children(dir: &Path) -> Vec<EntrySnapshot> {
    let rd = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "cannot list folder; treating as empty");
            return Vec::new();
        }
    };

    rd.filter_map(|ent| match ent {
        Ok(ent) => Some(capture_or_placeholder(&ent.path(), ent.file_name())),
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "skipping unreadable directory entry");
            None
        }
    })
    .collect()
}

fn capture_or_placeholder(path: &Path, name: OsString) -> EntrySnapshot {
    EntrySnapshot::capture(path).unwrap_or_else(|e| {
        debug!(path = %path.display(), error = %e, "cannot stat entry; relocating it untyped");
        EntrySnapshot::new(name, EntryKind::Other, SystemTime::UNIX_EPOCH)
    })
}
