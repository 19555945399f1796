use crate::snapshot::DirectorySnapshot;
use crate::utils::format_timestamp;
use crate::utils::paths::display_relative;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Print metadata of a snapshot file, and every fingerprint when `entries`
/// is set.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be restored.
pub fn execute(snapshot_path: &Path, entries: bool) -> Result<()> {
    let snapshot = DirectorySnapshot::restore(snapshot_path)?;
    super::print_summary(snapshot_path, &snapshot);

    if !entries {
        return Ok(());
    }

    println!();
    for fp in snapshot.entries() {
        let digest = fp.digest().map_or_else(
            || "unreadable".red().to_string(),
            |d| d.get(..16).unwrap_or(d).dimmed().to_string(),
        );
        println!(
            "{digest}  {}  {}",
            format_timestamp(fp.modified_at()),
            display_relative(fp.path(), snapshot.root_directory())
        );
    }
    Ok(())
}
