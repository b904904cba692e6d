//! Unique sibling names for staged config writes.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Hidden sibling of `target` used to stage a write before publishing it.
/// Pattern: .sort_fat_folder.config.tmp.<pid>.<nanos>.<seq>
pub(super) fn staging_sibling(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = format!(".sort_fat_folder.config.tmp.{pid}.{nanos}.{seq}");
    target.parent().unwrap_or_else(|| Path::new(".")).join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn unique_across_threads() {
        let handles: Vec<_> = (0..16)
            .map(|_| thread::spawn(|| staging_sibling(Path::new("cfg/config.xml"))))
            .collect();
        let set: HashSet<PathBuf> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(set.len(), 16);
        assert!(set.iter().all(|p| p.parent() == Some(Path::new("cfg"))));
    }
}
