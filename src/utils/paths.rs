use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory
///
/// Paths without a tilde, or when no home directory is known, come back
/// unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Some(path_str) = path.to_str() else {
        return path.to_path_buf();
    };

    if path_str != "~" && !path_str.starts_with("~/") {
        return path.to_path_buf();
    }

    match dirs::home_dir() {
        Some(home) if path_str == "~" => home,
        Some(home) => home.join(&path_str[2..]),
        None => path.to_path_buf(),
    }
}

/// Render `path` relative to `base` when it lies below it.
#[must_use]
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
