use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, Snapshot};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use anyhow::Context;
use std::collections::BTreeSet;

impl Repository {
    /// Switches the working tree and HEAD to another branch.
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(branch_name) {
            return Err(GitletError::NoSuchBranchToCheckout.into());
        }
        if branch_name == self.refs().current_branch()? {
            return Err(GitletError::NoNeedToCheckout.into());
        }

        let target_oid = self
            .refs()
            .read_branch(branch_name)?
            .context(format!("Branch {branch_name} has no commit"))?;
        let target = self.commit_at(&target_oid)?;
        let current = self.head_commit()?;

        // checked before any mutation
        self.ensure_no_untracked_overwrite(target.snapshot())?;

        self.replace_working_tree(current.snapshot(), target.snapshot(), &BTreeSet::new())?;
        self.staging_mut().clear();
        self.staging().write_updates()?;
        self.refs().set_head(branch_name)?;

        tracing::debug!(%branch_name, %target_oid, "checked out branch");

        Ok(())
    }

    /// Restores a single file's blob from a commit (the current one unless
    /// a digest, possibly abbreviated, is given) into the working tree.
    pub fn checkout_file(&mut self, commit_id: Option<&str>, path: &str) -> anyhow::Result<()> {
        let commit = match commit_id {
            Some(prefix) => self.resolve_commit(prefix)?.1,
            None => self.head_commit()?,
        };

        let blob_id = commit
            .tracks(path)
            .ok_or(GitletError::FileNotInCommit)?
            .clone();

        self.materialize_blob(path, &blob_id)
    }

    /// Dispatches `checkout`'s operand forms on their literal shape: a lone
    /// operand is always a branch name, `-- <file>` is always a file of the
    /// current commit, `<commitId> -- <file>` a file of that commit. The
    /// caller must hand over the raw operand list with any `--` intact.
    pub fn checkout(&mut self, args: &[String]) -> anyhow::Result<()> {
        match args {
            [separator, file] if separator == "--" => self.checkout_file(None, file),
            [commit_id, separator, file] if separator == "--" => {
                self.checkout_file(Some(commit_id), file)
            }
            [branch] if branch != "--" => self.checkout_branch(branch),
            _ => Err(anyhow::anyhow!("Incorrect operands.")),
        }
    }

    /// Refuses to overwrite an untracked working-tree file with a snapshot
    /// entry. Shared by checkout and reset.
    pub(crate) fn ensure_no_untracked_overwrite(&self, target: &Snapshot) -> anyhow::Result<()> {
        for path in self.untracked_files()? {
            if target.contains_key(&path) {
                return Err(GitletError::UntrackedFileConflict.into());
            }
        }

        Ok(())
    }

    /// Resolves a (possibly abbreviated) commit digest to the stored
    /// commit, or `NoSuchCommit`.
    pub(crate) fn resolve_commit(
        &self,
        commit_id: &str,
    ) -> anyhow::Result<(ObjectId, Commit)> {
        let oid = self
            .database()
            .resolve_commit_prefix(commit_id)?
            .ok_or(GitletError::NoSuchCommit)?;
        let commit = self.commit_at(&oid)?;

        Ok((oid, commit))
    }
}
