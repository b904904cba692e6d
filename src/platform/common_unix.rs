//! Staged, no-clobber config publishing for Unix targets.

use anyhow::{Context, Result, bail};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use super::temp::staging_sibling;

/// Write `contents` to a new file at `path` with mode 0600.
///
/// The bytes are staged in a hidden sibling, fsynced, then published with a
/// hard link, which fails instead of replacing an existing `path`. The staging
/// file is always removed; the parent directory is fsynced on success.
pub fn publish_new_0600(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "config path has no parent"))?;
    fs::create_dir_all(parent).with_context(|| format!("create parent '{}'", parent.display()))?;

    let staged = staging_sibling(path);
    let mut f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .custom_flags(libc::O_NOFOLLOW)
        .open(&staged)
        .with_context(|| format!("create staging file '{}'", staged.display()))?;

    let written = f.write_all(contents).and_then(|()| f.sync_all());
    drop(f);
    let linked = written.and_then(|()| fs::hard_link(&staged, path));
    let _ = fs::remove_file(&staged);

    match linked {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            bail!("Config file already exists: {}", path.display())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("publish config '{}'", path.display()));
        }
    }

    File::open(parent)
        .and_then(|d| d.sync_all())
        .with_context(|| format!("fsync dir '{}'", parent.display()))?;
    Ok(())
}
