#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated data directory for one test
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.dir.path().join("backups")
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join("config.toml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Seed the data file with tasks of known ids, bypassing the CLI
    pub fn seed_tasks(&self, tasks: &[(&str, &str)]) -> std::io::Result<()> {
        let entries: Vec<serde_json::Value> = tasks
            .iter()
            .map(|(id, title)| {
                serde_json::json!({
                    "id": id,
                    "title": title,
                    "status": "todo",
                    "priority": 2,
                    "actual_hours": 0.0,
                    "created_at": "2026-08-01T00:00:00Z",
                    "updated_at": "2026-08-01T00:00:00Z",
                })
            })
            .collect();
        let snapshot = serde_json::json!({
            "schema_version": "taskmaster.v1",
            "generated_at": "2026-08-01T00:00:00Z",
            "tasks": entries,
        });
        fs::write(self.data_file(), snapshot.to_string())
    }
}

pub fn taskmaster_cmd(home: &TestHome) -> Command {
    let mut cmd = Command::cargo_bin("taskmaster").expect("binary");
    cmd.env("TASKMASTER_DATA_DIR", home.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Create a task through the CLI and return its assigned id
pub fn create_task(home: &TestHome, args: &[&str]) -> String {
    let output = taskmaster_cmd(home)
        .arg("create")
        .args(args)
        .arg("--json")
        .output()
        .expect("run create");
    assert!(
        output.status.success(),
        "create failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json envelope");
    value["data"]["id"].as_str().expect("task id").to_string()
}
