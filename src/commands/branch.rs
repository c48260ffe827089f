use crate::areas::repository::Repository;
use crate::errors::GitletError;

impl Repository {
    /// Creates a new branch pointing at the current commit. HEAD stays put.
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if self.refs().branch_exists(branch_name) {
            return Err(GitletError::BranchExists.into());
        }

        let head_oid = self.head_oid()?;
        self.refs().update_branch(branch_name, &head_oid)
    }

    /// Deletes a branch pointer. The commits it pointed at stay in the
    /// store.
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if branch_name == self.refs().current_branch()? {
            return Err(GitletError::CannotRemoveCurrent.into());
        }
        if !self.refs().branch_exists(branch_name) {
            return Err(GitletError::NoSuchBranch.into());
        }

        self.refs().delete_branch(branch_name)
    }
}
