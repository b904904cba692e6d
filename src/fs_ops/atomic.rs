//! Rename helper.
//! - Never replaces an existing destination (Unix `rename` would silently clobber it).
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;

/// Rename `src` to `dst`; both must be on the same volume.
pub fn rename_entry(src: &Path, dst: &Path) -> io::Result<()> {
    if fs::symlink_metadata(dst).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("destination already exists: {}", dst.display()),
        ));
    }

    fs::rename(src, dst)?;

    // Ignore fsync errors to avoid turning a successful rename into a failure.
    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}
