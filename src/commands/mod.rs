//! Command implementations behind the `dirsnap` binary.
//!
//! Each submodule exposes an `execute` function taking already parsed
//! arguments. Commands return `anyhow::Result` and attach context to the
//! typed library errors.

/// `dirsnap diff`
pub mod diff;
/// `dirsnap list`
pub mod list;
/// `dirsnap rescan`
pub mod rescan;
/// `dirsnap scan`
pub mod scan;
/// `dirsnap show`
pub mod show;

use crate::snapshot::{ChangeReport, DirectorySnapshot};
use crate::utils::format_timestamp;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Machine-readable form of a change report.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Directory the report is about.
    pub root_directory: &'a Path,
    /// Capture time of the newer state.
    pub captured_at: DateTime<Utc>,
    /// `added`, `removed` and `changed` path lists.
    #[serde(flatten)]
    pub report: &'a ChangeReport,
}

/// Print `report` for `snapshot`, either grouped text or JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_report(snapshot: &DirectorySnapshot, report: &ChangeReport, json: bool) -> Result<()> {
    if json {
        let doc = JsonReport {
            root_directory: snapshot.root_directory(),
            captured_at: snapshot.captured_at(),
            report,
        };
        let text = serde_json::to_string_pretty(&doc).context("Failed to encode report as JSON")?;
        println!("{text}");
    } else {
        crate::output::print_report(report, snapshot.root_directory());
    }
    Ok(())
}

/// Print the metadata block shared by `scan` and `show`.
pub fn print_summary(location: &Path, snapshot: &DirectorySnapshot) {
    println!("Snapshot:  {}", location.display());
    println!("Directory: {}", snapshot.root_directory().display());
    println!(
        "Files:     {} ({} unreadable)",
        snapshot.len(),
        snapshot.unreadable_count()
    );
    println!("Captured:  {}", format_timestamp(snapshot.captured_at()));
}
