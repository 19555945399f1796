//! Utility functions and helpers.
//!
//! # Submodules
//!
//! - [`compress`]: Zstandard helpers for snapshot files
//! - [`hash`]: Streaming BLAKE3 digests
//! - [`paths`]: Path manipulation
//! - [`serialization`]: Binary serialization
//! - [`thread_pool`]: Thread pool configuration

/// Compression utilities (Zstandard)
pub mod compress;
/// Content digests
pub mod hash;
/// Path manipulation and resolution utilities
pub mod paths;
/// Binary serialization utilities
pub mod serialization;
/// Thread pool configuration for parallel operations
pub mod thread_pool;

use chrono::{DateTime, Local, Utc};

/// Formats a UTC timestamp in local time for display.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%d %b %Y %H:%M:%S")
        .to_string()
}
