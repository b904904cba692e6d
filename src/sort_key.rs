//! Sort key derivation.
//!
//! A key is the triple (kind rank, folded name, literal name). Comparing keys
//! field by field gives a total order without any locale-specific collation:
//! - the kind rank puts subfolders before or after files (or neither),
//! - the folded (lowercased) name groups names that differ only by case,
//! - the literal name breaks ties between case variants.
//!
//! With case sensitivity turned on the folded name is left out, so names are
//! compared by raw codepoint: "Banana" sorts before "apple" because 'B' < 'a'.

use std::cmp::Ordering;
use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;

use crate::snapshot::EntrySnapshot;

/// Placement of subfolders relative to files within one folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingPolicy {
    /// All subfolders before files (default)
    #[default]
    SubfoldersFirst,
    /// All subfolders after files
    SubfoldersLast,
    /// Files and subfolders interleaved by name only
    Mixed,
}

impl OrderingPolicy {
    /// Rank prefix for an entry kind; lower sorts first.
    fn rank(self, is_dir: bool) -> u8 {
        match (self, is_dir) {
            (OrderingPolicy::SubfoldersFirst, true) => 1,
            (OrderingPolicy::SubfoldersFirst, false) => 2,
            (OrderingPolicy::SubfoldersLast, true) => 2,
            (OrderingPolicy::SubfoldersLast, false) => 1,
            (OrderingPolicy::Mixed, _) => 0,
        }
    }

    /// Parse user-facing names (case-insensitive). Accepts the short `f0`/`f1`/`f2`
    /// spellings of the original command line as well.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "subfolders-first" | "subfolders_first" | "f0" => {
                Some(OrderingPolicy::SubfoldersFirst)
            }
            "last" | "subfolders-last" | "subfolders_last" | "f1" => {
                Some(OrderingPolicy::SubfoldersLast)
            }
            "mixed" | "f2" => Some(OrderingPolicy::Mixed),
            _ => None,
        }
    }
}

impl fmt::Display for OrderingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderingPolicy::SubfoldersFirst => "first",
            OrderingPolicy::SubfoldersLast => "last",
            OrderingPolicy::Mixed => "mixed",
        };
        f.write_str(s)
    }
}

impl FromStr for OrderingPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid order: '{s}' (expected first, last or mixed)"))
    }
}

/// Opaque, totally ordered key for one directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    rank: u8,
    folded: Option<String>,
    literal: String,
    // Tie-break for names that are not valid Unicode and collapse under lossy conversion.
    raw: OsString,
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.folded.cmp(&other.folded))
            .then_with(|| self.literal.cmp(&other.literal))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the sort key for `entry` under `policy` and the case setting.
pub fn build_key(entry: &EntrySnapshot, policy: OrderingPolicy, case_sensitive: bool) -> SortKey {
    let literal = entry.name().to_string_lossy().into_owned();
    let folded = (!case_sensitive).then(|| literal.to_lowercase());
    SortKey {
        rank: policy.rank(entry.is_dir()),
        folded,
        literal,
        raw: entry.name().to_os_string(),
    }
}

/// Sort snapshots in place into their final creation order.
pub fn sort_snapshots(entries: &mut [EntrySnapshot], policy: OrderingPolicy, case_sensitive: bool) {
    entries.sort_by_cached_key(|e| build_key(e, policy, case_sensitive));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::EntryKind;
    use std::time::SystemTime;

    fn file(name: &str) -> EntrySnapshot {
        EntrySnapshot::new(name, EntryKind::File, SystemTime::UNIX_EPOCH)
    }

    fn dir(name: &str) -> EntrySnapshot {
        EntrySnapshot::new(name, EntryKind::Directory, SystemTime::UNIX_EPOCH)
    }

    fn names(entries: &[EntrySnapshot]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn subfolders_first_puts_dirs_before_files() {
        let mut v = vec![file("b.txt"), dir("sub"), file("A.txt")];
        sort_snapshots(&mut v, OrderingPolicy::SubfoldersFirst, false);
        assert_eq!(names(&v), ["sub", "A.txt", "b.txt"]);
    }

    #[test]
    fn subfolders_last_puts_dirs_after_files() {
        let mut v = vec![dir("a_dir"), file("z.txt"), file("m.txt")];
        sort_snapshots(&mut v, OrderingPolicy::SubfoldersLast, false);
        assert_eq!(names(&v), ["m.txt", "z.txt", "a_dir"]);
    }

    #[test]
    fn mixed_interleaves_by_name() {
        let mut v = vec![file("c"), dir("b"), file("a"), dir("d")];
        sort_snapshots(&mut v, OrderingPolicy::Mixed, false);
        assert_eq!(names(&v), ["a", "b", "c", "d"]);
    }

    #[test]
    fn case_insensitive_vs_strict() {
        let mut v = vec![file("Banana"), file("apple")];
        sort_snapshots(&mut v, OrderingPolicy::SubfoldersFirst, false);
        assert_eq!(names(&v), ["apple", "Banana"]);

        sort_snapshots(&mut v, OrderingPolicy::SubfoldersFirst, true);
        assert_eq!(names(&v), ["Banana", "apple"]);
    }

    #[test]
    fn case_variants_group_together_with_stable_tiebreak() {
        let mut v = vec![file("readme"), file("b"), file("README"), file("ReadMe")];
        sort_snapshots(&mut v, OrderingPolicy::Mixed, false);
        // Uppercase codepoints win the literal tiebreak; all three stay adjacent.
        assert_eq!(names(&v), ["b", "README", "ReadMe", "readme"]);
    }

    #[test]
    fn keys_are_deterministic() {
        let a = build_key(&file("Hello.TXT"), OrderingPolicy::SubfoldersLast, false);
        let b = build_key(&file("Hello.TXT"), OrderingPolicy::SubfoldersLast, false);
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn every_dir_key_precedes_every_file_key_when_first() {
        let d = build_key(&dir("zzz"), OrderingPolicy::SubfoldersFirst, true);
        let f = build_key(&file("AAA"), OrderingPolicy::SubfoldersFirst, true);
        assert!(d < f);
        let d = build_key(&dir("AAA"), OrderingPolicy::SubfoldersLast, true);
        let f = build_key(&file("zzz"), OrderingPolicy::SubfoldersLast, true);
        assert!(f < d);
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(OrderingPolicy::parse("FIRST"), Some(OrderingPolicy::SubfoldersFirst));
        assert_eq!(OrderingPolicy::parse("f1"), Some(OrderingPolicy::SubfoldersLast));
        assert_eq!(OrderingPolicy::parse("subfolders-last"), Some(OrderingPolicy::SubfoldersLast));
        assert_eq!(OrderingPolicy::parse(" mixed "), Some(OrderingPolicy::Mixed));
        assert!(OrderingPolicy::from_str("sideways").is_err());
        for p in [OrderingPolicy::SubfoldersFirst, OrderingPolicy::SubfoldersLast, OrderingPolicy::Mixed] {
            assert_eq!(p.to_string().parse::<OrderingPolicy>(), Ok(p));
        }
    }
}
