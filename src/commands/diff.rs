use crate::output;
use crate::snapshot::DirectorySnapshot;
use anyhow::Result;
use std::path::Path;

/// Compare two persisted snapshots without touching the filesystem tree.
///
/// # Errors
///
/// Returns an error if either snapshot cannot be restored.
pub fn execute(old: &Path, new: &Path, json: bool) -> Result<()> {
    let older = DirectorySnapshot::restore(old)?;
    let newer = DirectorySnapshot::restore(new)?;

    if older.root_directory() != newer.root_directory() {
        output::warning(&format!(
            "Snapshots cover different directories: {} and {}",
            older.root_directory().display(),
            newer.root_directory().display()
        ));
    }

    if older.captured_at() > newer.captured_at() {
        output::warning("The first snapshot is newer than the second");
    }

    let report = older.compare(&newer);
    super::render_report(&newer, &report, json)
}
