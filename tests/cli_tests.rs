//! Integration tests for the notecluster CLI

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use tempfile::tempdir;

fn notecluster() -> Command {
    cargo_bin_cmd!("notecluster")
}

fn file_entry(path: &str) -> serde_json::Value {
    let (folder, name) = path.rsplit_once('/').unwrap_or(("", path));
    serde_json::json!({
        "path": path,
        "basename": name.trim_end_matches(".md"),
        "folder": folder,
        "createdAt": 1_700_000_000_000i64,
        "modifiedAt": 1_700_000_000_000i64,
    })
}

fn write_snapshot(dir: &Path, paths: &[&str], links: serde_json::Value) -> PathBuf {
    let snapshot = serde_json::json!({
        "files": paths.iter().map(|p| file_entry(p)).collect::<Vec<_>>(),
        "metadata": {},
        "resolvedLinks": links,
    });
    let path = dir.join("snapshot.json");
    fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();
    path
}

// ============================================================================
// Help and usage
// ============================================================================

#[test]
fn test_help_flag() {
    notecluster()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cluster"))
        .stdout(predicate::str::contains("folders"));
}

#[test]
fn test_no_command_is_usage_error() {
    notecluster()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_unknown_flag_json_envelope() {
    notecluster()
        .args(["--format", "json", "cluster", "--bogus"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"usage_error\""));
}

// ============================================================================
// cluster
// ============================================================================

#[test]
fn test_cluster_human_output() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(
        dir.path(),
        &["react/A.md", "react/B.md", "golf/C.md", "golf/D.md"],
        serde_json::json!({}),
    );

    notecluster()
        .arg("cluster")
        .arg("--snapshot")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("[2] React"))
        .stdout(predicate::str::contains("[2] Golf"))
        .stdout(predicate::str::contains("2 clusters, 4 notes"));
}

#[test]
fn test_cluster_quiet_omits_summary() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), &["golf/C.md"], serde_json::json!({}));

    notecluster()
        .args(["--quiet", "cluster", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] Golf"))
        .stdout(predicate::str::contains("clusters,").not());
}

#[test]
fn test_cluster_json_output() {
    let dir = tempdir().unwrap();
    let paths: Vec<String> = (0..6).map(|i| format!("inbox/{i}.md")).collect();
    let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
    let snapshot = write_snapshot(
        dir.path(),
        &refs,
        serde_json::json!({ "inbox/0.md": { "inbox/1.md": 2 } }),
    );

    let output = notecluster()
        .args(["--format", "json", "cluster", "--max-size", "3", "--min-size", "1"])
        .arg("--snapshot")
        .arg(&snapshot)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let clusters = json["clusters"].as_array().unwrap();
    assert_eq!(clusters.len(), 2);
    for cluster in clusters {
        assert!(cluster["noteIds"].as_array().unwrap().len() <= 3);
        assert!(cluster["id"].as_str().unwrap().starts_with("cl-"));
    }
    assert_eq!(json["stats"]["totalNotes"], 6);
    assert_eq!(json["stats"]["splitClusters"], 1);
}

#[test]
fn test_cluster_config_file() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(
        dir.path(),
        &["a/1.md", "a/2.md", "a/3.md", "a/4.md"],
        serde_json::json!({}),
    );
    let config = dir.path().join("clustering.toml");
    fs::write(&config, "min_cluster_size = 1\nmax_cluster_size = 2\n").unwrap();

    let output = notecluster()
        .args(["--format", "json", "cluster"])
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["clusters"].as_array().unwrap().len(), 2);
}

#[test]
fn test_cluster_invalid_bounds_exit_usage() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), &["a/1.md"], serde_json::json!({}));

    notecluster()
        .args(["cluster", "--min-size", "10", "--max-size", "3", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("min_cluster_size (10)"));
}

#[test]
fn test_cluster_missing_snapshot_exit_data() {
    let dir = tempdir().unwrap();

    notecluster()
        .args(["--format", "json", "cluster", "--snapshot"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"snapshot_not_found\""));
}

#[test]
fn test_cluster_malformed_snapshot_exit_data() {
    let dir = tempdir().unwrap();
    let snapshot = dir.path().join("snapshot.json");
    fs::write(&snapshot, "{ not json").unwrap();

    notecluster()
        .args(["cluster", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid snapshot"));
}

// ============================================================================
// folders
// ============================================================================

#[test]
fn test_folders_deepest_first() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(
        dir.path(),
        &["x.md", "a/1.md", "a/b/2.md", "c/3.md"],
        serde_json::json!({}),
    );

    notecluster()
        .args(["folders", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout("a/b\na\nc\n");
}

#[test]
fn test_folders_json() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), &["a/b/2.md"], serde_json::json!({}));

    let output = notecluster()
        .args(["--format", "json", "folders", "--snapshot"])
        .arg(&snapshot)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["path"], "a/b");
    assert_eq!(json[0]["depth"], 2);
}
