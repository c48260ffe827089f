#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};

/// A scratch repository the CLI binary runs against. The temp directory is
/// removed on drop.
pub struct GitletRepo {
    dir: TempDir,
}

impl GitletRepo {
    /// A fresh, uninitialized working directory.
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// A fresh working directory with `gitlet init` already run.
    pub fn initialized() -> Self {
        let repo = Self::empty();
        repo.run(&["init"]).assert().success();
        repo
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// A command invocation of the binary with this repo as working
    /// directory.
    pub fn run(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
        cmd.current_dir(self.dir.path()).args(args);
        cmd
    }

    pub fn write_file(&self, name: &str, content: &str) {
        self.dir
            .child(name)
            .write_str(content)
            .expect("Failed to write file");
    }

    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    pub fn delete_file(&self, name: &str) {
        std::fs::remove_file(self.dir.path().join(name)).expect("Failed to delete file");
    }

    /// Stages and commits one file in a single step.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) {
        self.write_file(name, content);
        self.run(&["add", name]).assert().success();
        self.run(&["commit", message]).assert().success();
    }

    /// The 40-hex digest the current branch points at, read straight from
    /// the refs layout.
    pub fn head_oid(&self) -> String {
        let head = self.read_file(".gitlet/HEAD");
        let branch = head
            .trim()
            .strip_prefix("ref: refs/heads/")
            .expect("HEAD is not a symref")
            .to_string();
        self.read_file(&format!(".gitlet/refs/heads/{branch}"))
            .trim()
            .to_string()
    }
}
