//! Directory holding persisted snapshots.
//!
//! The store replaces a fixed scratch location: callers pass the directory
//! explicitly (usually from [`crate::config::Config`]). Snapshot files are
//! named `<basename>_<YYYYmmdd_HHMMSS>.snap` after the scanned directory and
//! the UTC capture time, so a plain lexical sort is chronological.

use crate::config::Config;
use crate::error::{Error, PersistenceKind, Result};
use crate::snapshot::DirectorySnapshot;
use crate::snapshot::codec::DEFAULT_COMPRESSION_LEVEL;
use std::path::{Path, PathBuf};
use chrono::NaiveDateTime;
use tracing::{debug, warn};

/// File extension of persisted snapshots.
pub const SNAPSHOT_EXTENSION: &str = "snap";

/// Timestamp layout used in default file names.
const NAME_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Length of a rendered [`NAME_TIME_FORMAT`] stamp.
const NAME_STAMP_LEN: usize = 15;

/// Location and settings for persisted snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    compression_level: i32,
}

impl SnapshotStore {
    /// Store in `dir`, compressing at `compression_level`.
    #[must_use]
    pub const fn new(dir: PathBuf, compression_level: i32) -> Self {
        Self {
            dir,
            compression_level,
        }
    }

    /// Store with the default compression level.
    #[must_use]
    pub const fn at(dir: PathBuf) -> Self {
        Self::new(dir, DEFAULT_COMPRESSION_LEVEL)
    }

    /// Store described by the `[store]` section of `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.store.snapshot_dir.clone(),
            config.store.compression_level,
        )
    }

    /// Directory holding the snapshot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Default file name for `snapshot`: base name of the root directory
    /// and its capture time.
    #[must_use]
    pub fn default_file_name(snapshot: &DirectorySnapshot) -> String {
        format!(
            "{}_{}.{SNAPSHOT_EXTENSION}",
            base_name(snapshot.root_directory()),
            snapshot.captured_at().format(NAME_TIME_FORMAT)
        )
    }

    /// Persist `snapshot` to `destination`, or to its default name inside
    /// the store when no destination is given. Returns the written path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the store directory cannot be
    /// created or the file cannot be written.
    pub fn persist(
        &self,
        snapshot: &DirectorySnapshot,
        destination: Option<&Path>,
    ) -> Result<PathBuf> {
        let target = match destination {
            Some(path) => path.to_path_buf(),
            None => {
                std::fs::create_dir_all(&self.dir).map_err(|e| {
                    Error::save_failed(&self.dir, PersistenceKind::Io, e)
                })?;
                self.dir.join(Self::default_file_name(snapshot))
            }
        };

        snapshot.persist(&target, self.compression_level)?;
        Ok(target)
    }

    /// Restore a snapshot from `source`.
    ///
    /// # Errors
    ///
    /// See [`DirectorySnapshot::restore`].
    pub fn restore(&self, source: &Path) -> Result<DirectorySnapshot> {
        DirectorySnapshot::restore(source)
    }

    /// Snapshot files in the store, newest first.
    ///
    /// A store directory that does not exist yet is simply empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the store directory exists but
    /// cannot be listed.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let read_dir = match std::fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::load_failed(&self.dir, PersistenceKind::Io, e)),
        };

        let mut snapshots: Vec<PathBuf> = read_dir
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext == SNAPSHOT_EXTENSION)
            })
            .collect();

        // Sort by file name (which includes the timestamp), newest first
        snapshots.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(snapshots)
    }

    /// Newest stored snapshot taken of `root`.
    ///
    /// Only files named exactly `<basename>_<YYYYmmdd_HHMMSS>.snap` are
    /// considered. A candidate that fails to restore is skipped with a
    /// warning, since it may belong to another directory with the same base
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] with kind `NotFound` when `root` was
    /// never scanned into this store. If no candidate restores for `root`
    /// but some failed to restore, the first of those errors is returned.
    pub fn latest_for(&self, root: &Path) -> Result<(PathBuf, DirectorySnapshot)> {
        let base = base_name(root);
        let mut first_failure = None;

        for path in self.list()? {
            let matches_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| is_snapshot_name_for(n, &base));
            if !matches_name {
                continue;
            }

            match DirectorySnapshot::restore(&path) {
                Ok(snapshot) if snapshot.root_directory() == root => {
                    debug!(root = %root.display(), snapshot = %path.display(), "found latest snapshot");
                    return Ok((path, snapshot));
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(snapshot = %path.display(), error = %e, "skipping unreadable snapshot");
                    first_failure.get_or_insert(e);
                }
            }
        }

        Err(first_failure.unwrap_or_else(|| Error::not_found(root)))
    }
}

/// Whether `file_name` is a default snapshot name for base name `base`.
fn is_snapshot_name_for(file_name: &str, base: &str) -> bool {
    file_name
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|rest| rest.strip_suffix(SNAPSHOT_EXTENSION))
        .and_then(|rest| rest.strip_suffix('.'))
        .is_some_and(|stamp| {
            stamp.len() == NAME_STAMP_LEN
                && NaiveDateTime::parse_from_str(stamp, NAME_TIME_FORMAT).is_ok()
        })
}

/// Last component of `path`, or `root` for the filesystem root.
fn base_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || "root".to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
