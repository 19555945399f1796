//! Directory walker producing fingerprints for every regular file.
//!
//! The `DirectoryScanner` validates the root, lists the regular files below
//! it with `walkdir` (symlinks are never followed and never listed), and
//! fingerprints them in parallel on the configured thread pool.

use crate::error::{Error, Result};
use crate::fingerprint::{FileFingerprint, absolute_path};
use crate::utils::hash::DEFAULT_CHUNK_SIZE;
use crate::utils::thread_pool;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Fingerprints keyed by their absolute path.
pub type Entries = BTreeMap<PathBuf, FileFingerprint>;

/// Scanner for enumerating and fingerprinting files under a root directory
#[derive(Debug, Clone, Copy)]
pub struct DirectoryScanner {
    /// Read size used when streaming file content through the hasher
    chunk_size: usize,
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl DirectoryScanner {
    /// Scanner hashing file content in reads of `chunk_size` bytes.
    #[must_use]
    pub const fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Check that `root` is a readable directory and return its absolute form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryAccess`] if the path does not exist, is not
    /// a directory, or cannot be listed.
    pub fn resolve_root(root: &Path) -> Result<PathBuf> {
        let metadata = std::fs::metadata(root).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::directory_access(root, "does not exist")
            } else {
                Error::directory_access(root, e)
            }
        })?;

        if !metadata.is_dir() {
            return Err(Error::directory_access(root, "not a directory"));
        }

        std::fs::read_dir(root).map_err(|e| Error::directory_access(root, e))?;

        absolute_path(root).map_err(|e| Error::directory_access(root, e))
    }

    /// Walk `root` and fingerprint every regular file below it.
    ///
    /// Returns the absolute root together with the fingerprints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryAccess`] if the root cannot be read.
    /// Individual unreadable files never fail the scan.
    pub fn scan(&self, root: &Path) -> Result<(PathBuf, Entries)> {
        let root = Self::resolve_root(root)?;
        let files = Self::list_files(&root)?;
        debug!(root = %root.display(), files = files.len(), "listed regular files");

        let entries = self.fingerprint_all(&files);
        Ok((root, entries))
    }

    /// List every regular file below `root`, recursively.
    ///
    /// Subdirectories that cannot be read are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryAccess`] if the root itself cannot be read.
    pub fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(false) {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        files.push(entry.into_path());
                    }
                }
                Err(err) if err.depth() == 0 => {
                    return Err(Error::directory_access(root, err));
                }
                Err(err) => {
                    warn!(
                        path = %err.path().unwrap_or(root).display(),
                        error = %err,
                        "skipping unreadable subtree"
                    );
                }
            }
        }

        Ok(files)
    }

    /// Fingerprint `files` in parallel.
    ///
    /// Files that disappear before their metadata can be read are dropped.
    #[must_use]
    pub fn fingerprint_all(&self, files: &[PathBuf]) -> Entries {
        let chunk_size = self.chunk_size;
        let fingerprints: Vec<FileFingerprint> = thread_pool::run_in_pool(|| {
            files
                .par_iter()
                .filter_map(|path| match FileFingerprint::from_path(path, chunk_size) {
                    Ok(fp) => Some(fp),
                    Err(e) => {
                        debug!(path = %path.display(), error = %e, "file vanished during scan");
                        None
                    }
                })
                .collect()
        });

        fingerprints
            .into_iter()
            .map(|fp| (fp.path().to_path_buf(), fp))
            .collect()
    }
}
