//! Identity record for a single file.
//!
//! A [`FileFingerprint`] captures the absolute path, the modification time
//! and a BLAKE3 digest of the content. Two fingerprints are equal only when
//! all three match; hashing uses the path alone, so a set of fingerprints
//! holds at most one record per path.

use crate::error::Result;
use crate::utils::hash;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Fingerprint of one regular file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFingerprint {
    /// Absolute, canonicalized path
    #[serde(with = "crate::utils::serialization::os_path")]
    path: PathBuf,
    /// Filesystem modification time
    modified_at: DateTime<Utc>,
    /// Hex BLAKE3 digest, `None` when the content could not be read
    digest: Option<String>,
}

impl FileFingerprint {
    /// Fingerprint the file at `path`, streaming its content in `chunk_size` reads.
    ///
    /// A relative `path` is resolved against the current directory. If the
    /// content cannot be read the fingerprint is still produced, with no
    /// digest.
    ///
    /// # Errors
    ///
    /// Returns an error if the file's metadata cannot be read (for example,
    /// the file no longer exists).
    pub fn from_path(path: &Path, chunk_size: usize) -> Result<Self> {
        let path = absolute_path(path)?;
        let metadata = std::fs::metadata(&path)?;
        let modified_at = DateTime::<Utc>::from(metadata.modified()?);
        let digest = hash::try_hash_file(&path, chunk_size);

        Ok(Self {
            path,
            modified_at,
            digest,
        })
    }

    /// Assemble a fingerprint from parts that are already known.
    #[must_use]
    pub const fn from_parts(
        path: PathBuf,
        modified_at: DateTime<Utc>,
        digest: Option<String>,
    ) -> Self {
        Self {
            path,
            modified_at,
            digest,
        }
    }

    /// Absolute path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Modification time recorded at scan time.
    #[must_use]
    pub const fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Hex BLAKE3 digest, `None` if the content was unreadable.
    #[must_use]
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Whether the content digest could be computed.
    #[must_use]
    pub const fn is_readable(&self) -> bool {
        self.digest.is_some()
    }
}

impl PartialEq for FileFingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.modified_at == other.modified_at
            && self.digest == other.digest
    }
}

impl Eq for FileFingerprint {}

// Equal fingerprints share a path, so this stays consistent with `Eq`.
impl Hash for FileFingerprint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// Resolve `path` to its canonical absolute form.
///
/// Falls back to joining with the current directory when the path cannot
/// be canonicalized.
pub(crate) fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(canonical) => Ok(canonical),
        Err(_) if path.is_absolute() => Ok(path.to_path_buf()),
        Err(_) => Ok(std::env::current_dir()?.join(path)),
    }
}
