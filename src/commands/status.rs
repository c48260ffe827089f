use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    /// The five status sections, each sorted lexicographically.
    pub fn status(&mut self) -> anyhow::Result<()> {
        let current_branch = self.refs().current_branch()?;
        let branches = self.refs().list_branches()?;
        let modifications = self.modifications_not_staged()?;
        let untracked = self.untracked_files()?;

        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in branches {
            if branch == current_branch {
                writeln!(writer, "*{branch}")?;
            } else {
                writeln!(writer, "{branch}")?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for path in self.staging().additions().keys() {
            writeln!(writer, "{path}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for path in self.staging().removals() {
            writeln!(writer, "{path}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (path, state) in modifications {
            writeln!(writer, "{path} ({state})")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for path in untracked {
            writeln!(writer, "{path}")?;
        }
        writeln!(writer)?;

        Ok(())
    }

    /// Tracked or staged files whose working copy drifted without being
    /// (re)staged: edited -> "modified", gone -> "deleted".
    fn modifications_not_staged(&self) -> anyhow::Result<BTreeMap<String, &'static str>> {
        let head = self.head_commit()?;
        let mut modifications = BTreeMap::new();

        for (path, tracked_oid) in head.snapshot() {
            if self.staging().is_marked_for_removal(path)
                || self.staging().staged_digest(path).is_some()
            {
                continue;
            }
            if !self.workspace().exists(path) {
                modifications.insert(path.clone(), "deleted");
            } else if &self.working_copy_digest(path)? != tracked_oid {
                modifications.insert(path.clone(), "modified");
            }
        }

        for (path, staged_oid) in self.staging().additions() {
            if !self.workspace().exists(path) {
                modifications.insert(path.clone(), "deleted");
            } else if &self.working_copy_digest(path)? != staged_oid {
                modifications.insert(path.clone(), "modified");
            }
        }

        Ok(modifications)
    }

    fn working_copy_digest(&self, path: &str) -> anyhow::Result<ObjectId> {
        let content = self.workspace().read_file(path)?;
        Blob::new(content).object_id()
    }
}
