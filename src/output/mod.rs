//! Output formatting and styling for the dirsnap CLI.
//!
//! - Dimmed colors for routine messages
//! - Bold colors for warnings and errors
//! - Grouped, colored change reports
//! - Verbosity control (quiet, normal, verbose)

use crate::snapshot::{Change, ChangeReport};
use crate::utils::paths::display_relative;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};

/// Verbosity level for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Suppress informational messages, show only warnings and errors.
    Quiet = 0,
    /// Default verbosity level, show all standard messages.
    Normal = 1,
    /// Show verbose debug messages in addition to standard output.
    Verbose = 2,
}

impl Verbosity {
    /// Pick a level from the `--quiet` / `--verbose` flags; quiet wins.
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }
}

/// Global verbosity setting (default: Normal).
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Sets the global verbosity level for all output functions.
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Gets the current global verbosity level.
pub fn get_verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Verbose,
        _ => Verbosity::Normal,
    }
}

/// Prints a success message in green (respects quiet mode).
pub fn success(message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    eprintln!("{}", message.green());
}

/// Prints an error message in bold red (always shown).
pub fn error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Prints a warning message in bold yellow (always shown).
pub fn warning(message: &str) {
    eprintln!("{}", message.yellow().bold());
}

/// Prints an informational message in dimmed color (respects quiet mode).
pub fn info(message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    eprintln!("{}", message.dimmed());
}

/// Header line and verb used for each change group.
const fn group_labels(change: Change) -> (&'static str, &'static str) {
    match change {
        Change::Added => ("Added files", "added"),
        Change::Removed => ("Removed files", "removed"),
        Change::Changed => ("Changed files", "changed"),
    }
}

/// Render `report` as grouped text lines, paths shown relative to `root`.
///
/// Returns no lines for an empty report.
#[must_use]
pub fn report_lines(report: &ChangeReport, root: &Path) -> Vec<String> {
    let groups: [(Change, &[PathBuf]); 3] = [
        (Change::Added, &report.added),
        (Change::Removed, &report.removed),
        (Change::Changed, &report.changed),
    ];

    let mut lines = Vec::new();
    for (change, paths) in groups {
        if paths.is_empty() {
            continue;
        }

        let (header, label) = group_labels(change);
        let color_label = match change {
            Change::Added => label.green(),
            Change::Removed => label.red(),
            Change::Changed => label.yellow(),
        };

        lines.push(format!("{}:", header.bold()));
        for path in paths {
            lines.push(format!("  {color_label}: {}", display_relative(path, root)));
        }
    }
    lines
}

/// Print `report` to stdout, or a "clean" line when nothing changed.
pub fn print_report(report: &ChangeReport, root: &Path) {
    if report.is_empty() {
        println!("No changes since last scan");
        return;
    }
    for line in report_lines(report, root) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_round_trip() {
        let levels = [Verbosity::Quiet, Verbosity::Normal, Verbosity::Verbose];
        for level in &levels {
            set_verbosity(*level);
            assert_eq!(get_verbosity(), *level);
        }
        set_verbosity(Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn test_report_lines_groups_in_order() {
        colored::control::set_override(false);
        let report = ChangeReport {
            added: vec!["/r/c.txt".into()],
            removed: vec!["/r/a.txt".into()],
            changed: vec!["/r/sub/b.txt".into()],
        };

        let lines = report_lines(&report, Path::new("/r"));
        assert_eq!(
            lines,
            vec![
                "Added files:",
                "  added: c.txt",
                "Removed files:",
                "  removed: a.txt",
                "Changed files:",
                "  changed: sub/b.txt",
            ]
        );
    }

    #[test]
    fn test_empty_groups_are_omitted() {
        colored::control::set_override(false);
        let report = ChangeReport {
            changed: vec!["/r/b".into()],
            ..ChangeReport::default()
        };
        let lines = report_lines(&report, Path::new("/r"));
        assert_eq!(lines, vec!["Changed files:", "  changed: b"]);
        assert!(report_lines(&ChangeReport::default(), Path::new("/r")).is_empty());
    }
}
