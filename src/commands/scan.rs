use crate::DirsnapContext;
use crate::output;
use crate::snapshot::DirectorySnapshot;
use anyhow::{Context, Result};
use std::path::Path;

/// Scan `dir` and persist the snapshot, to `output_path` or into the store.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or the snapshot cannot
/// be written.
pub fn execute(ctx: &DirsnapContext, dir: &Path, output_path: Option<&Path>) -> Result<()> {
    let snapshot = DirectorySnapshot::scan_with(dir, &ctx.scanner())
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    let saved = ctx
        .store()
        .persist(&snapshot, output_path)
        .context("Failed to save snapshot")?;

    super::print_summary(&saved, &snapshot);

    let unreadable = snapshot.unreadable_count();
    if unreadable > 0 {
        output::warning(&format!(
            "{unreadable} file(s) could not be read and have no digest"
        ));
    }
    output::success("Snapshot saved");
    Ok(())
}
