//! Typed errors for the snapshot library.
//!
//! Callers match on [`Error`] to tell "the directory is not there" apart
//! from "the snapshot is not there" and "the snapshot is broken".

use std::fmt;
use std::path::PathBuf;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a persistence operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceKind {
    /// The source does not exist (for example, the directory was never scanned).
    NotFound,
    /// The destination could not be written or the source could not be read.
    Io,
    /// The content could not be decoded into a snapshot.
    Corrupt,
    /// The envelope carries a format version this build does not understand.
    UnsupportedVersion,
}

impl fmt::Display for PersistenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotFound => "not found",
            Self::Io => "I/O failure",
            Self::Corrupt => "corrupt snapshot data",
            Self::UnsupportedVersion => "unsupported snapshot version",
        };
        f.write_str(text)
    }
}

/// Direction of a failed persistence operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Writing a snapshot.
    Save,
    /// Reading a snapshot.
    Load,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Save => "save",
            Self::Load => "load",
        })
    }
}

/// Errors produced by scanning, persisting and restoring snapshots.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The root directory is missing, not a directory, or unreadable.
    #[error("Unable to access directory {}: {reason}", .path.display())]
    DirectoryAccess {
        /// Offending path as given by the caller.
        path: PathBuf,
        /// Human-readable cause.
        reason: String,
    },

    /// Writing or reading a persisted snapshot failed.
    #[error("Unable to {operation} snapshot {}: {kind}", .target.display())]
    Persistence {
        /// Destination or source of the operation.
        target: PathBuf,
        /// Classified cause.
        kind: PersistenceKind,
        /// Whether the failing operation was a save or a load.
        operation: Operation,
        /// Underlying error, when there is one.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file could not be loaded or holds invalid values.
    #[error("Configuration error in {}: {message}", .path.display())]
    Config {
        /// Configuration file path.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },

    /// Any other I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds a [`Error::DirectoryAccess`].
    pub fn directory_access(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::DirectoryAccess {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Builds a write-side [`Error::Persistence`].
    pub fn save_failed<E>(target: impl Into<PathBuf>, kind: PersistenceKind, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Persistence {
            target: target.into(),
            kind,
            operation: Operation::Save,
            source: Some(source.into()),
        }
    }

    /// Builds a read-side [`Error::Persistence`].
    pub fn load_failed<E>(target: impl Into<PathBuf>, kind: PersistenceKind, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Persistence {
            target: target.into(),
            kind,
            operation: Operation::Load,
            source: Some(source.into()),
        }
    }

    /// A read-side [`Error::Persistence`] with kind `NotFound` and no cause.
    pub fn not_found(target: impl Into<PathBuf>) -> Self {
        Self::Persistence {
            target: target.into(),
            kind: PersistenceKind::NotFound,
            operation: Operation::Load,
            source: None,
        }
    }

    /// The persistence kind, if this is a persistence error.
    #[must_use]
    pub const fn persistence_kind(&self) -> Option<PersistenceKind> {
        match self {
            Self::Persistence { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether this error means the requested snapshot does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.persistence_kind(), Some(PersistenceKind::NotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_access_message() {
        let err = Error::directory_access("/no/such/path", "does not exist");
        let msg = err.to_string();
        assert!(msg.contains("/no/such/path"));
        assert!(msg.contains("does not exist"));
        assert!(err.persistence_kind().is_none());
    }

    #[test]
    fn test_persistence_messages_name_direction() {
        let io = std::io::Error::other("disk full");
        let save = Error::save_failed("/tmp/out.snap", PersistenceKind::Io, io);
        assert!(save.to_string().starts_with("Unable to save snapshot /tmp/out.snap"));

        let load = Error::not_found("/tmp/missing.snap");
        assert!(load.to_string().starts_with("Unable to load snapshot"));
        assert!(load.is_not_found());
    }

    #[test]
    fn test_persistence_source_is_chained() {
        use std::error::Error as _;

        let io = std::io::Error::other("boom");
        let err = Error::load_failed("x.snap", PersistenceKind::Io, io);
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("boom"));
    }
}
