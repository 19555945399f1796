//! Directory snapshots: scan, rescan, compare.
//!
//! A [`DirectorySnapshot`] is the full set of fingerprints for a tree at
//! one point in time. [`DirectorySnapshot::rescan`] walks the same root
//! again, reports what changed, and replaces the captured state with the
//! fresh one.

/// Persisted snapshot format
pub mod codec;
/// Three-way classification of two fingerprint sets
pub mod diff;

pub use diff::{Change, ChangeReport};

use crate::error::Result;
use crate::fingerprint::FileFingerprint;
use crate::scanner::{DirectoryScanner, Entries};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

/// Fingerprints of every regular file below a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySnapshot {
    root_directory: PathBuf,
    captured_at: DateTime<Utc>,
    entries: Entries,
}

impl DirectorySnapshot {
    /// Scan `root` with the default scanner settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DirectoryAccess`] if `root` is missing, not a
    /// directory, or unreadable.
    pub fn scan(root: &Path) -> Result<Self> {
        Self::scan_with(root, &DirectoryScanner::default())
    }

    /// Scan `root` with an explicitly configured scanner.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DirectoryAccess`] if `root` is missing, not a
    /// directory, or unreadable.
    pub fn scan_with(root: &Path, scanner: &DirectoryScanner) -> Result<Self> {
        let (root_directory, entries) = scanner.scan(root)?;
        let captured_at = Utc::now();
        info!(
            root = %root_directory.display(),
            files = entries.len(),
            "captured snapshot"
        );

        Ok(Self {
            root_directory,
            captured_at,
            entries,
        })
    }

    /// Build a snapshot from already collected fingerprints.
    ///
    /// Later fingerprints replace earlier ones with the same path.
    pub fn from_parts(
        root_directory: PathBuf,
        captured_at: DateTime<Utc>,
        entries: impl IntoIterator<Item = FileFingerprint>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|fp| (fp.path().to_path_buf(), fp))
            .collect();

        Self {
            root_directory,
            captured_at,
            entries,
        }
    }

    /// Re-walk the root with default scanner settings.
    ///
    /// # Errors
    ///
    /// See [`DirectorySnapshot::rescan_with`].
    pub fn rescan(&mut self) -> Result<ChangeReport> {
        self.rescan_with(&DirectoryScanner::default())
    }

    /// Re-walk the root directory, report the differences against the
    /// captured state, and replace that state with the new scan.
    ///
    /// On error the snapshot is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DirectoryAccess`] if the root can no longer
    /// be read.
    pub fn rescan_with(&mut self, scanner: &DirectoryScanner) -> Result<ChangeReport> {
        let fresh = Self::scan_with(&self.root_directory, scanner)?;
        let report = diff::diff(&self.entries, &fresh.entries);
        info!(
            root = %self.root_directory.display(),
            added = report.added.len(),
            removed = report.removed.len(),
            changed = report.changed.len(),
            "rescanned"
        );

        self.entries = fresh.entries;
        self.captured_at = fresh.captured_at;
        Ok(report)
    }

    /// Report the differences from `self` (older) to `newer` without
    /// modifying either snapshot.
    #[must_use]
    pub fn compare(&self, newer: &Self) -> ChangeReport {
        diff::diff(&self.entries, &newer.entries)
    }

    #[must_use]
    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    #[must_use]
    pub const fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Fingerprints ordered by path.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &FileFingerprint> {
        self.entries.values()
    }

    /// Fingerprint recorded for `path`, if any.
    #[must_use]
    pub fn entry(&self, path: &Path) -> Option<&FileFingerprint> {
        self.entries.get(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose content could not be read.
    #[must_use]
    pub fn unreadable_count(&self) -> usize {
        self.entries.values().filter(|fp| !fp.is_readable()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_populates_metadata() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("a.txt"), "hello")?;

        let before = Utc::now();
        let snapshot = DirectorySnapshot::scan(temp_dir.path())?;

        assert_eq!(snapshot.root_directory(), fs::canonicalize(temp_dir.path())?);
        assert!(snapshot.captured_at() >= before);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.unreadable_count(), 0);

        Ok(())
    }

    #[test]
    fn test_rescan_replaces_state() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("a.txt"), "hello")?;

        let mut snapshot = DirectorySnapshot::scan(temp_dir.path())?;
        let first_capture = snapshot.captured_at();
        fs::write(temp_dir.path().join("b.txt"), "world")?;

        let report = snapshot.rescan()?;
        assert_eq!(report.added.len(), 1);
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.captured_at() >= first_capture);

        // The new state is now the baseline
        assert!(snapshot.rescan()?.is_empty());

        Ok(())
    }

    #[test]
    fn test_rescan_failure_keeps_state() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("watched");
        fs::create_dir(&root)?;
        fs::write(root.join("a.txt"), "hello")?;

        let mut snapshot = DirectorySnapshot::scan(&root)?;
        let captured = snapshot.clone();
        fs::remove_dir_all(&root)?;

        assert!(matches!(
            snapshot.rescan(),
            Err(crate::Error::DirectoryAccess { .. })
        ));
        assert_eq!(snapshot, captured);

        Ok(())
    }

    #[test]
    fn test_compare_does_not_mutate() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("a.txt"), "hello")?;
        let old = DirectorySnapshot::scan(temp_dir.path())?;

        fs::remove_file(temp_dir.path().join("a.txt"))?;
        let new = DirectorySnapshot::scan(temp_dir.path())?;

        let report = old.compare(&new);
        assert_eq!(report.removed.len(), 1);
        assert_eq!(old.len(), 1);
        assert!(new.is_empty());

        Ok(())
    }
}
