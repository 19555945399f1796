use crate::DirsnapContext;
use crate::output;
use crate::scanner::DirectoryScanner;
use anyhow::{Context, Result, bail};
use std::path::Path;

/// Restore the previous snapshot of a directory, rescan it and report
/// what changed.
///
/// Without `from`, the newest stored snapshot of `dir` is used. With
/// `from`, that snapshot's own root is rescanned; a `dir` given alongside
/// must name the same directory. The refreshed snapshot is stored unless
/// `no_save` is set.
///
/// # Errors
///
/// Returns an error if the directory was never scanned, the previous
/// snapshot cannot be restored, or the directory cannot be read.
pub fn execute(
    ctx: &DirsnapContext,
    dir: Option<&Path>,
    from: Option<&Path>,
    json: bool,
    no_save: bool,
) -> Result<()> {
    let store = ctx.store();

    let (source, mut snapshot) = if let Some(path) = from {
        let snapshot = store.restore(path)?;
        if let Some(dir) = dir {
            let root = DirectoryScanner::resolve_root(dir)?;
            if root != snapshot.root_directory() {
                bail!(
                    "{} is a snapshot of {}, not {}",
                    path.display(),
                    snapshot.root_directory().display(),
                    root.display()
                );
            }
        }
        (path.to_path_buf(), snapshot)
    } else {
        let root = DirectoryScanner::resolve_root(dir.unwrap_or(Path::new(".")))?;
        store.latest_for(&root)?
    };

    tracing::debug!(snapshot = %source.display(), "rescanning from snapshot");

    let report = snapshot
        .rescan_with(&ctx.scanner())
        .with_context(|| format!("Failed to rescan {}", snapshot.root_directory().display()))?;

    super::render_report(&snapshot, &report, json)?;

    if no_save {
        return Ok(());
    }

    let saved = store
        .persist(&snapshot, None)
        .context("Failed to save refreshed snapshot")?;
    output::info(&format!("Snapshot saved to {}", saved.display()));
    Ok(())
}
