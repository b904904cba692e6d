//! Temporary sibling folder creation.
//! The replacement folder lives next to the original so the final swap is a
//! same-volume rename. Pattern: Temp<epoch-millis>[-<seq>].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

const MAX_ATTEMPTS: u32 = 16;

/// Candidate name for the temporary folder. `attempt` 0 is the bare timestamp.
fn temp_dir_name(attempt: u32) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    if attempt == 0 {
        format!("Temp{millis}")
    } else {
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("Temp{millis}-{seq}")
    }
}

/// Create a fresh, uniquely named folder inside `parent`.
/// Retries with a sequence suffix while the name is taken.
pub fn create_temp_sibling(parent: &Path) -> io::Result<PathBuf> {
    let mut last_err = None;
    for attempt in 0..MAX_ATTEMPTS {
        let candidate = parent.join(temp_dir_name(attempt));
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => last_err = Some(e),
            Err(e) => return Err(e),
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::from(io::ErrorKind::AlreadyExists)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_start_with_temp() {
        assert!(temp_dir_name(0).starts_with("Temp"));
        assert!(temp_dir_name(3).contains('-'));
    }

    #[test]
    fn repeated_creation_never_collides() {
        let td = tempfile::tempdir().unwrap();
        let mut seen = HashSet::new();
        for _ in 0..8 {
            let p = create_temp_sibling(td.path()).unwrap();
            assert!(p.is_dir());
            assert_eq!(p.parent(), Some(td.path()));
            assert!(seen.insert(p));
        }
    }

    #[test]
    fn missing_parent_is_an_error() {
        let td = tempfile::tempdir().unwrap();
        let err = create_temp_sibling(&td.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
