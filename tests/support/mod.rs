#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub struct Workdir {
    dir: TempDir,
}

impl Workdir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel_path);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        self.write_file(".rollup.toml", contents)
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = rollup_cmd();
        cmd.current_dir(self.path());
        cmd
    }
}

pub fn rollup_cmd() -> Command {
    let mut cmd = Command::cargo_bin("rollup").expect("binary");
    cmd.env_remove("RUST_LOG").env_remove("ROLLUP_CONFIG");
    cmd
}

pub const SAMPLE_TASKS: &str = r#"[
  ["task_001", "open", null],
  ["task_002", "open", "task_001"],
  ["task_003", "closed", "task_002"],
  ["task_004", "closed", "task_001"],
  ["task_005", "closed", "task_004"]
]"#;

pub const CYCLIC_TASKS: &str = r#"[
  ["task_001", "open", null],
  ["task_002", "open", "task_003"],
  ["task_003", "closed", "task_002"]
]"#;
