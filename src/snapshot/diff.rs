use crate::fingerprint::FileFingerprint;
use crate::scanner::Entries;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Classification of a single path between two scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Present only in the newer scan
    Added,
    /// Present only in the older scan
    Removed,
    /// Present in both with a different timestamp or digest
    Changed,
}

/// Added, removed and changed paths between two scans.
///
/// Each list is sorted and no path appears in more than one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    /// Paths present only in the newer scan.
    pub added: Vec<PathBuf>,
    /// Paths present only in the older scan.
    pub removed: Vec<PathBuf>,
    /// Paths whose timestamp or digest differs.
    pub changed: Vec<PathBuf>,
}

impl ChangeReport {
    /// `true` when nothing was added, removed or changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of reported paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }
}

/// Compute the difference between two fingerprint sets
///
/// Every path is paired with its old and new fingerprint, then classified
/// by which side is present and whether the two differ. A fingerprint with
/// identical path, timestamp and digest on both sides is not reported.
#[must_use]
pub fn diff(old: &Entries, new: &Entries) -> ChangeReport {
    let mut paired: BTreeMap<&Path, (Option<&FileFingerprint>, Option<&FileFingerprint>)> =
        BTreeMap::new();

    for (path, fp) in old {
        paired.entry(path.as_path()).or_default().0 = Some(fp);
    }
    for (path, fp) in new {
        paired.entry(path.as_path()).or_default().1 = Some(fp);
    }

    let mut report = ChangeReport::default();
    for (path, sides) in paired {
        let change = match sides {
            (None, Some(_)) => Change::Added,
            (Some(_), None) => Change::Removed,
            (Some(before), Some(after)) if before != after => Change::Changed,
            _ => continue,
        };

        let list = match change {
            Change::Added => &mut report.added,
            Change::Removed => &mut report.removed,
            Change::Changed => &mut report.changed,
        };
        list.push(path.to_path_buf());
    }

    report
}
