/// TOML parsing and value validation
pub mod parser;

use crate::error::{Error, Result};
use crate::snapshot::codec::DEFAULT_COMPRESSION_LEVEL;
use crate::utils::hash::DEFAULT_CHUNK_SIZE;
use crate::utils::thread_pool;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Settings loaded from `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// `[store]` section
    #[serde(default)]
    pub store: StoreConfig,

    /// `[performance]` section
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Where and how snapshots are persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory receiving snapshots saved under their default name
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
    /// zstd level, 1 to 22
    #[serde(default = "default_compression_level")]
    pub compression_level: i32,
}

/// Parallelism and I/O sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Worker threads used for fingerprinting
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,
    /// Read size in bytes when streaming file content through the hasher
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_threads: thread_pool::default_threads(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// A missing file is created with default values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if:
    /// - The file cannot be read or created
    /// - The file contains invalid TOML
    /// - A value is out of range
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        parser::parse_config_file(path)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_err = |message: String| Error::Config {
            path: path.to_path_buf(),
            message,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| config_err(e.to_string()))?;
        }

        let toml_str = toml::to_string_pretty(self).map_err(|e| config_err(e.to_string()))?;
        let mut file = std::fs::File::create(path).map_err(|e| config_err(e.to_string()))?;
        file.write_all(toml_str.as_bytes())
            .map_err(|e| config_err(e.to_string()))?;
        Ok(())
    }
}

// Default functions for serde
fn default_snapshot_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("dirsnap")
}

const fn default_compression_level() -> i32 {
    DEFAULT_COMPRESSION_LEVEL
}

fn default_parallel_threads() -> usize {
    thread_pool::default_threads()
}

const fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}
