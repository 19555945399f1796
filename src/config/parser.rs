use super::Config;
use crate::error::{Error, Result};
use crate::utils::paths::expand_tilde;
use std::path::Path;

/// Smallest accepted hashing chunk.
const MIN_CHUNK_SIZE: usize = 4096;

/// Read, parse and validate the configuration file at `path`.
///
/// # Errors
///
/// Returns [`Error::Config`] if the file cannot be read, is not valid TOML,
/// or holds out-of-range values.
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: format!("failed to read: {e}"),
    })?;
    parse_config_str(&content).map_err(|message| Error::Config {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config_str(content: &str) -> std::result::Result<Config, String> {
    let mut config: Config =
        toml::from_str(content).map_err(|e| format!("failed to parse TOML: {e}"))?;

    config.store.snapshot_dir = expand_tilde(&config.store.snapshot_dir);
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> std::result::Result<(), String> {
    if !(1..=22).contains(&config.store.compression_level) {
        return Err("Compression level must be between 1 and 22".to_string());
    }

    if config.performance.parallel_threads == 0 {
        return Err("Parallel threads must be at least 1".to_string());
    }

    if config.performance.chunk_size < MIN_CHUNK_SIZE {
        return Err(format!("Chunk size must be at least {MIN_CHUNK_SIZE} bytes"));
    }

    Ok(())
}
