use crate::areas::repository::Repository;

impl Repository {
    /// Moves the current branch pointer to an arbitrary existing commit and
    /// makes the working tree match its snapshot. HEAD keeps naming the
    /// same branch.
    pub fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let (target_oid, target) = self.resolve_commit(commit_id)?;

        // checked before any mutation
        self.ensure_no_untracked_overwrite(target.snapshot())?;

        let current = self.head_commit()?;
        let staged_paths = self.staging().additions().keys().cloned().collect();

        self.replace_working_tree(current.snapshot(), target.snapshot(), &staged_paths)?;
        self.staging_mut().clear();
        self.staging().write_updates()?;

        let branch = self.refs().current_branch()?;
        self.refs().update_branch(&branch, &target_oid)?;

        tracing::debug!(%branch, %target_oid, "reset branch");

        Ok(())
    }
}
