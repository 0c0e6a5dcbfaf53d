#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{TempDir, tempdir};

pub const BIN: &str = "transform-user-extract";
pub const FIXED_TIMESTAMP: &str = "2018-06-01T12:00:00";

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn fixture_text(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("read fixture")
}

/// A fresh invocation of the binary under test.
pub fn command() -> Command {
    Command::cargo_bin(BIN).expect("binary exists")
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `name` inside the workspace, without creating it.
    pub fn join(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Names of every entry currently in the workspace, sorted.
    pub fn entries(&self) -> Vec<String> {
        let mut names = fs::read_dir(self.path())
            .expect("read workspace")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect::<Vec<_>>();
        names.sort();
        names
    }
}

/// Builds an extract with a header line followed by one `email<TAB>status` row per pair.
pub fn extract(rows: &[(&str, &str)]) -> String {
    let mut text = String::from("email\tstatus\n");
    for (email, status) in rows {
        text.push_str(email);
        text.push('\t');
        text.push_str(status);
        text.push('\n');
    }
    text
}

pub fn statement_count(sql: &str) -> usize {
    sql.matches("INSERT IGNORE INTO users (").count()
}
