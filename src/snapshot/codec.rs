//! On-disk snapshot format.
//!
//! A persisted snapshot is a zstd frame wrapping two bincode values back to
//! back: a small [`Header`] (magic + format version) followed by the
//! snapshot record. The header is decoded first so an unknown version is
//! reported as such instead of as garbage.

use super::DirectorySnapshot;
use crate::error::{Error, PersistenceKind, Result};
use crate::fingerprint::FileFingerprint;
use crate::utils::{compress, serialization};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Magic bytes at the start of every decoded snapshot.
pub const MAGIC: [u8; 4] = *b"DSNP";

/// Current format version.
pub const FORMAT_VERSION: u32 = 1;

/// Default zstd level for persisted snapshots.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u32,
}

/// Wire form of a snapshot: the three persisted fields.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    #[serde(with = "serialization::os_path")]
    root_directory: PathBuf,
    captured_at: DateTime<Utc>,
    entries: Vec<FileFingerprint>,
}

/// Encode `snapshot` into the compressed on-disk representation.
///
/// # Errors
///
/// Returns [`Error::Persistence`] (kind `Io`) if encoding or compression
/// fails; `target` names the intended destination.
pub fn encode(snapshot: &DirectorySnapshot, level: i32, target: &Path) -> Result<Vec<u8>> {
    let header = Header {
        magic: MAGIC,
        version: FORMAT_VERSION,
    };
    let record = SnapshotRecord {
        root_directory: snapshot.root_directory.clone(),
        captured_at: snapshot.captured_at,
        entries: snapshot.entries.values().cloned().collect(),
    };

    let mut raw = serialization::serialize(&header)
        .map_err(|e| Error::save_failed(target, PersistenceKind::Io, e))?;
    raw.extend(
        serialization::serialize(&record)
            .map_err(|e| Error::save_failed(target, PersistenceKind::Io, e))?,
    );

    compress::compress_bytes(&raw, level)
        .map_err(|e| Error::save_failed(target, PersistenceKind::Io, e))
}

/// Decode bytes produced by [`encode`]. `source` is used for error context.
///
/// # Errors
///
/// Returns [`Error::Persistence`] with kind `Corrupt` for undecodable data
/// and `UnsupportedVersion` for a foreign format version.
pub fn decode(bytes: &[u8], source: &Path) -> Result<DirectorySnapshot> {
    let corrupt = |e: Box<dyn std::error::Error + Send + Sync>| {
        Error::load_failed(source, PersistenceKind::Corrupt, e)
    };

    let raw = compress::decompress_bytes(bytes).map_err(|e| corrupt(e.into()))?;
    let (header, used): (Header, usize) =
        serialization::deserialize_prefix(&raw).map_err(|e| corrupt(e.into()))?;

    if header.magic != MAGIC {
        return Err(corrupt("not a dirsnap snapshot".into()));
    }
    if header.version != FORMAT_VERSION {
        return Err(Error::load_failed(
            source,
            PersistenceKind::UnsupportedVersion,
            format!("format version {} (expected {FORMAT_VERSION})", header.version),
        ));
    }

    let (record, consumed): (SnapshotRecord, usize) =
        serialization::deserialize_prefix(&raw[used..]).map_err(|e| corrupt(e.into()))?;
    if used + consumed != raw.len() {
        return Err(corrupt("trailing data after snapshot".into()));
    }

    let expected = record.entries.len();
    let snapshot =
        DirectorySnapshot::from_parts(record.root_directory, record.captured_at, record.entries);
    if snapshot.len() != expected {
        return Err(corrupt("duplicate paths in snapshot entries".into()));
    }

    Ok(snapshot)
}

impl DirectorySnapshot {
    /// Write the full snapshot state to `destination`.
    ///
    /// The data goes to a temporary file next to `destination` first and is
    /// renamed into place, so readers never see a half-written snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if `destination` cannot be written.
    pub fn persist(&self, destination: &Path, compression_level: i32) -> Result<()> {
        let data = encode(self, compression_level, destination)?;
        let io_err = |e: std::io::Error| Error::save_failed(destination, PersistenceKind::Io, e);

        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(io_err)?;
        tmp.write_all(&data).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(destination).map_err(|e| io_err(e.error))?;

        info!(
            destination = %destination.display(),
            files = self.len(),
            bytes = data.len(),
            "persisted snapshot"
        );
        Ok(())
    }

    /// Read a snapshot previously written by [`DirectorySnapshot::persist`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if `source` is missing (kind
    /// `NotFound`), unreadable (`Io`), or does not hold a valid snapshot
    /// (`Corrupt`, `UnsupportedVersion`).
    pub fn restore(source: &Path) -> Result<Self> {
        let bytes = std::fs::read(source).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::load_failed(source, PersistenceKind::NotFound, e)
            } else {
                Error::load_failed(source, PersistenceKind::Io, e)
            }
        })?;

        let snapshot = decode(&bytes, source)?;
        debug!(source = %source.display(), files = snapshot.len(), "restored snapshot");
        Ok(snapshot)
    }
}
