//! Common test utilities for gsd-install integration tests

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// An isolated home + project directory pair for one test
#[allow(dead_code)]
pub struct TestEnv {
    /// Temporary directory backing the whole environment
    pub temp: TempDir,
    /// Fake home directory the installer sees
    pub home: PathBuf,
    /// Project directory used as the working directory
    pub project: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let home = temp.path().join("home");
        let project = temp.path().join("project");
        std::fs::create_dir_all(&home).expect("Failed to create home directory");
        std::fs::create_dir_all(&project).expect("Failed to create project directory");
        Self {
            temp,
            home,
            project,
        }
    }

    /// Command for the real gsd-install binary, isolated to this environment
    pub fn cmd(&self) -> assert_cmd::Command {
        // Temporary fix for deprecated cargo_bin - will be updated when
        // build-dir issues are resolved
        #[allow(deprecated)]
        let mut cmd = assert_cmd::Command::cargo_bin("gsd-install").expect("binary builds");
        cmd.env("HOME", &self.home)
            .env_remove("CLAUDE_CONFIG_DIR")
            .env_remove("GSD_INSTALL_PAYLOAD")
            .current_dir(&self.project);
        cmd
    }

    pub fn claude_root(&self) -> PathBuf {
        self.home.join(".claude")
    }

    pub fn opencode_root(&self) -> PathBuf {
        self.home.join(".config").join("opencode")
    }

    /// Write a file under the fake home directory
    pub fn write_home_file(&self, relative: &str, content: &str) {
        let path = self.home.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    /// Read a file under the fake home directory
    pub fn read_home_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.home.join(relative)).expect("Failed to read file")
    }

    /// Check if a file exists under the fake home directory
    pub fn home_file_exists(&self, relative: &str) -> bool {
        self.home.join(relative).exists()
    }
}

/// Snapshot a directory tree as relative path -> file bytes
#[allow(dead_code)]
pub fn snapshot_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut snapshot = BTreeMap::new();
    if !root.exists() {
        return snapshot;
    }
    for entry in walk(root) {
        let relative = entry
            .strip_prefix(root)
            .expect("entry under root")
            .to_path_buf();
        let bytes = std::fs::read(&entry).expect("Failed to read file");
        snapshot.insert(relative, bytes);
    }
    snapshot
}

fn walk(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let entries = std::fs::read_dir(root).expect("Failed to read directory");
    for entry in entries {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            files.extend(walk(&path));
        } else {
            files.push(path);
        }
    }
    files
}
