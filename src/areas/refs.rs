use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use file_guard::Lock;
use std::io::Write;
use std::path::Path;

const SYMREF_PREFIX: &str = "ref: refs/heads/";

/// Branch pointers under `refs/heads/` plus the single HEAD symref selecting
/// the current branch. Pointer rewrites take an exclusive file lock, which is
/// also the repository-level lock for the one mutating invocation.
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        Refs { path }
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.path.join("refs").join("heads").into_boxed_path()
    }

    /// The branch HEAD points at. Exactly one HEAD exists per repository.
    pub fn current_branch(&self) -> anyhow::Result<String> {
        let head = std::fs::read_to_string(self.head_path())
            .context("Unable to read HEAD")?;
        let head = head.trim();

        head.strip_prefix(SYMREF_PREFIX)
            .map(str::to_string)
            .context(format!("HEAD is not a symbolic reference: {head}"))
    }

    pub fn set_head(&self, branch_name: &str) -> anyhow::Result<()> {
        self.write_locked(&self.head_path(), format!("{SYMREF_PREFIX}{branch_name}"))
    }

    pub fn branch_exists(&self, branch_name: &str) -> bool {
        self.heads_path().join(branch_name).exists()
    }

    pub fn read_branch(&self, branch_name: &str) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.heads_path().join(branch_name);
        if !branch_path.exists() {
            return Ok(None);
        }

        let oid = std::fs::read_to_string(&branch_path)
            .context(format!("Unable to read branch {branch_name}"))?;

        Ok(Some(ObjectId::try_parse(oid.trim().to_string())?))
    }

    pub fn update_branch(&self, branch_name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        self.write_locked(&self.heads_path().join(branch_name), oid.to_string())
    }

    pub fn delete_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        std::fs::remove_file(self.heads_path().join(branch_name))
            .context(format!("Unable to delete branch {branch_name}"))
    }

    /// All branch names, sorted.
    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        let mut branches = std::fs::read_dir(self.heads_path())
            .context("Unable to list branches")?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn write_locked(&self, path: &Path, content: String) -> anyhow::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .context(format!("Unable to open reference file {}", path.display()))?;
        let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)
            .context(format!("Unable to lock reference file {}", path.display()))?;
        lock.write_all(content.as_bytes())
            .context(format!("Unable to write reference file {}", path.display()))?;

        Ok(())
    }
}
