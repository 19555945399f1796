#![warn(missing_docs)]

//! # dirsnap - directory snapshots and change detection
//!
//! dirsnap fingerprints every regular file below a directory (absolute
//! path, modification time, BLAKE3 digest), persists the resulting
//! snapshot, and later reports which files were added, removed or changed
//! since then.
//!
//! ## Architecture
//!
//! - [`fingerprint`]: identity record for a single file
//! - [`scanner`]: directory walk and parallel fingerprinting
//! - [`snapshot`]: scan, rescan and compare; the on-disk codec
//! - [`store`]: the directory holding persisted snapshots
//! - [`config`]: configuration parsing and validation
//! - [`output`]: colored CLI output and report rendering
//! - [`utils`]: hashing, serialization, compression helpers
//!
//! ## Example Usage
//!
//! ```no_run
//! use dirsnap::{DirectorySnapshot, SnapshotStore};
//! use std::path::Path;
//!
//! # fn main() -> dirsnap::Result<()> {
//! let store = SnapshotStore::at("/var/tmp/dirsnap".into());
//!
//! let snapshot = DirectorySnapshot::scan(Path::new("/home/user/photos"))?;
//! let saved = store.persist(&snapshot, None)?;
//!
//! // ... later
//! let mut snapshot = store.restore(&saved)?;
//! let report = snapshot.rescan()?;
//! for path in &report.changed {
//!     println!("changed: {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Command implementations behind the CLI.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// Typed library errors.
pub mod error;

/// Per-file identity records.
pub mod fingerprint;

/// Tracing subscriber setup.
pub mod logging;

/// Output formatting and report rendering.
pub mod output;

/// Directory walking and fingerprinting.
pub mod scanner;

/// Directory snapshots and change reports.
pub mod snapshot;

/// Persisted snapshot location.
pub mod store;

/// Utility functions and helpers.
pub mod utils;

pub use error::{Error, PersistenceKind, Result};
pub use fingerprint::FileFingerprint;
pub use scanner::DirectoryScanner;
pub use snapshot::{ChangeReport, DirectorySnapshot};
pub use store::SnapshotStore;

use std::path::{Path, PathBuf};

/// Current version of the dirsnap binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/dirsnap/config.toml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "DIRSNAP_CONFIG_PATH";

/// Environment variable overriding the snapshot directory.
pub const SNAPSHOT_DIR_ENV: &str = "DIRSNAP_SNAPSHOT_DIR";

/// Loaded configuration plus the handles every command needs.
#[derive(Debug, Clone)]
pub struct DirsnapContext {
    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl DirsnapContext {
    /// Creates a context from the default configuration path.
    ///
    /// `DIRSNAP_CONFIG_PATH` overrides the path and `DIRSNAP_SNAPSHOT_DIR`
    /// overrides the configured snapshot directory.
    ///
    /// # Errors
    /// Returns an error if no home directory can be determined or the
    /// configuration cannot be loaded.
    pub fn new() -> Result<Self> {
        let config_path = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => dirs::home_dir()
                .ok_or_else(|| Error::Config {
                    path: PathBuf::from(DEFAULT_CONFIG_PATH),
                    message: "could not find home directory".to_string(),
                })?
                .join(DEFAULT_CONFIG_PATH),
        };

        Self::with_config_path(config_path)
    }

    /// Creates a context from an explicit configuration file.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or created.
    pub fn with_config_path(config_path: PathBuf) -> Result<Self> {
        let mut config = config::Config::load(&config_path)?;

        if let Some(dir) = std::env::var_os(SNAPSHOT_DIR_ENV) {
            config.store.snapshot_dir = utils::paths::expand_tilde(Path::new(&dir));
        }

        if let Err(e) = utils::thread_pool::configure_from_config(&config) {
            tracing::debug!(error = %e, "thread pool left unchanged");
        }

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Snapshot store configured for this context.
    #[must_use]
    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::from_config(&self.config)
    }

    /// Scanner configured for this context.
    #[must_use]
    pub const fn scanner(&self) -> DirectoryScanner {
        DirectoryScanner::new(self.config.performance.chunk_size)
    }
}
