#![allow(dead_code)]

use anyhow::Result;
use dirsnap::SnapshotStore;
use filetime::FileTime;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch tree plus a snapshot store next to it
pub struct TestTree {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestTree {
    /// Create an empty tree under a fresh temporary directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("tree");
        fs::create_dir_all(&root)?;
        // Canonical form so it matches the paths recorded in fingerprints
        let root = fs::canonicalize(&root)?;
        Ok(Self { temp_dir, root })
    }

    /// Absolute path of `rel` inside the tree
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Write `contents` to `rel`, creating parent directories
    pub fn write(&self, rel: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn remove(&self, rel: &str) -> Result<()> {
        fs::remove_file(self.path(rel))?;
        Ok(())
    }

    /// Pin the modification time of `rel` to `secs` after the epoch
    pub fn set_mtime(&self, rel: &str, secs: i64) -> Result<()> {
        filetime::set_file_mtime(self.path(rel), FileTime::from_unix_time(secs, 0))?;
        Ok(())
    }

    /// Directory used as the snapshot store
    pub fn store_dir(&self) -> PathBuf {
        self.temp_dir.path().join("store")
    }

    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::at(self.store_dir())
    }

    /// Config file pointing the store into the temporary directory
    pub fn write_config(&self) -> Result<PathBuf> {
        let path = self.temp_dir.path().join("config.toml");
        fs::write(
            &path,
            format!(
                "[store]\nsnapshot_dir = {:?}\n",
                self.store_dir().display().to_string()
            ),
        )?;
        Ok(path)
    }
}

/// Paths of `paths` relative to `root`, for readable assertions
pub fn relative(paths: &[PathBuf], root: &Path) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap_or(p).display().to_string())
        .collect()
}
