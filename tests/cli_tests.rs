mod common;

use anyhow::Result;
use assert_cmd::Command;
use common::TestTree;
use dirsnap::DirsnapContext;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;

fn dirsnap(tree: &TestTree) -> Result<Command> {
    let config = tree.write_config()?;
    let mut cmd = Command::cargo_bin("dirsnap")?;
    cmd.env("HOME", tree.temp_dir.path())
        .env("NO_COLOR", "1")
        .env_remove("DIRSNAP_SNAPSHOT_DIR")
        .env_remove("DIRSNAP_LOG")
        .arg("--config")
        .arg(config);
    Ok(cmd)
}

#[test]
fn test_scan_writes_snapshot_into_store() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write("a.txt", "a")?;
    tree.write("b/c.txt", "c")?;

    dirsnap(&tree)?
        .arg("scan")
        .arg(&tree.root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Files:     2 (0 unreadable)"))
        .stdout(predicate::str::contains(tree.store_dir().display().to_string()));

    assert_eq!(tree.store().list()?.len(), 1);
    Ok(())
}

#[test]
fn test_rescan_reports_changes() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write("a.txt", "a")?;
    tree.write("b.txt", "b")?;

    dirsnap(&tree)?.arg("scan").arg(&tree.root).assert().success();

    tree.remove("a.txt")?;
    tree.write("b.txt", "b changed")?;
    tree.write("c.txt", "c")?;

    dirsnap(&tree)?
        .arg("rescan")
        .arg(&tree.root)
        .assert()
        .success()
        .stdout(predicate::str::contains("added: c.txt"))
        .stdout(predicate::str::contains("removed: a.txt"))
        .stdout(predicate::str::contains("changed: b.txt"));

    // The refreshed state was stored, so nothing is left to report
    dirsnap(&tree)?
        .arg("rescan")
        .arg(&tree.root)
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes since last scan"));
    Ok(())
}

#[test]
fn test_rescan_json_no_save() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write("keep", "k")?;
    dirsnap(&tree)?.arg("scan").arg(&tree.root).assert().success();
    tree.write("new", "n")?;

    let output = dirsnap(&tree)?
        .args(["rescan", "--json", "--no-save"])
        .arg(&tree.root)
        .output()?;
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(doc["added"][0], tree.path("new").display().to_string());
    assert_eq!(doc["removed"], serde_json::json!([]));
    assert_eq!(doc["root_directory"], tree.root.display().to_string());

    // Not saved: the addition is still pending
    dirsnap(&tree)?
        .arg("rescan")
        .arg(&tree.root)
        .assert()
        .success()
        .stdout(predicate::str::contains("added: new"));
    Ok(())
}

#[test]
fn test_rescan_defaults_to_working_directory() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write("a.txt", "a")?;
    dirsnap(&tree)?.arg("scan").arg(&tree.root).assert().success();
    tree.write("b.txt", "b")?;

    dirsnap(&tree)?
        .current_dir(&tree.root)
        .arg("rescan")
        .assert()
        .success()
        .stdout(predicate::str::contains("added: b.txt"));
    Ok(())
}

#[test]
fn test_rescan_unscanned_directory() -> Result<()> {
    let tree = TestTree::new()?;

    dirsnap(&tree)?
        .arg("rescan")
        .arg(&tree.root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("has not been scanned yet"));
    Ok(())
}

#[test]
fn test_scan_missing_directory() -> Result<()> {
    let tree = TestTree::new()?;

    dirsnap(&tree)?
        .arg("scan")
        .arg(tree.path("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory not found or not readable"));
    Ok(())
}

#[test]
fn test_show_corrupt_snapshot() -> Result<()> {
    let tree = TestTree::new()?;
    let bad = tree.temp_dir.path().join("bad.snap");
    fs::write(&bad, "garbage")?;

    dirsnap(&tree)?
        .arg("show")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("snapshot is corrupt"));
    Ok(())
}

#[test]
fn test_diff_two_snapshot_files() -> Result<()> {
    let tree = TestTree::new()?;
    let old = tree.temp_dir.path().join("old.snap");
    let new = tree.temp_dir.path().join("new.snap");

    tree.write("x", "1")?;
    dirsnap(&tree)?.arg("scan").arg(&tree.root).arg("-o").arg(&old).assert().success();
    tree.write("y", "2")?;
    dirsnap(&tree)?.arg("scan").arg(&tree.root).arg("-o").arg(&new).assert().success();

    dirsnap(&tree)?
        .arg("diff")
        .arg(&old)
        .arg(&new)
        .assert()
        .success()
        .stdout(predicate::str::contains("added: y"))
        .stdout(predicate::str::contains("x").not());

    // Explicit outputs never touch the store
    assert!(tree.store().list()?.is_empty());
    Ok(())
}

#[test]
fn test_show_entries_and_list() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write("sub/file.txt", "hello")?;
    dirsnap(&tree)?.arg("scan").arg(&tree.root).assert().success();
    let saved = tree.store().list()?.remove(0);

    dirsnap(&tree)?
        .args(["show", "--entries"])
        .arg(&saved)
        .assert()
        .success()
        .stdout(predicate::str::contains("sub/file.txt"));

    dirsnap(&tree)?
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 files"));
    Ok(())
}

#[test]
fn test_completion_needs_no_config() -> Result<()> {
    Command::cargo_bin("dirsnap")?
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dirsnap"));
    Ok(())
}

#[test]
#[serial]
fn test_snapshot_dir_env_overrides_config() -> Result<()> {
    let tree = TestTree::new()?;
    let config = tree.write_config()?;
    let override_dir = tree.temp_dir.path().join("override");

    unsafe {
        std::env::set_var("DIRSNAP_SNAPSHOT_DIR", &override_dir);
    }
    let ctx = DirsnapContext::with_config_path(config);
    unsafe {
        std::env::remove_var("DIRSNAP_SNAPSHOT_DIR");
    }

    assert_eq!(ctx?.store().dir(), override_dir.as_path());
    Ok(())
}

#[test]
#[serial]
fn test_snapshot_dir_env_expands_tilde() -> Result<()> {
    let tree = TestTree::new()?;
    let config = tree.write_config()?;

    unsafe {
        std::env::set_var("DIRSNAP_SNAPSHOT_DIR", "~/dirsnap-snaps");
    }
    let ctx = DirsnapContext::with_config_path(config);
    unsafe {
        std::env::remove_var("DIRSNAP_SNAPSHOT_DIR");
    }

    let home = dirs::home_dir().expect("home directory");
    assert_eq!(ctx?.store().dir(), home.join("dirsnap-snaps").as_path());
    Ok(())
}

#[test]
#[serial]
fn test_missing_config_is_created_with_defaults() -> Result<()> {
    let tree = TestTree::new()?;
    let config_path = tree.temp_dir.path().join("nested/config.toml");

    let ctx = DirsnapContext::with_config_path(config_path.clone())?;
    assert!(config_path.exists());
    assert_eq!(ctx.config_path, config_path);
    Ok(())
}
