use crate::DirsnapContext;
use crate::output;
use crate::utils::format_timestamp;
use anyhow::Result;
use colored::Colorize;

/// List the snapshots in the store, newest first.
///
/// Files that fail to restore are still listed, marked with the failure.
///
/// # Errors
///
/// Returns an error if the store directory cannot be read.
pub fn execute(ctx: &DirsnapContext) -> Result<()> {
    let store = ctx.store();
    let snapshots = store.list()?;

    if snapshots.is_empty() {
        output::info(&format!("No snapshots in {}", store.dir().display()));
        return Ok(());
    }

    for path in snapshots {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        match store.restore(&path) {
            Ok(snapshot) => println!(
                "{}  {}  {} files  {}",
                name.bold(),
                format_timestamp(snapshot.captured_at()),
                snapshot.len(),
                snapshot.root_directory().display()
            ),
            Err(e) => {
                let kind = e
                    .persistence_kind()
                    .map_or_else(|| e.to_string(), |k| k.to_string());
                println!("{}  {}", name.bold(), format!("({kind})").yellow());
            }
        }
    }
    Ok(())
}
