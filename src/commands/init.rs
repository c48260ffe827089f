use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::GitletError;
use anyhow::Context;
use std::fs;

pub const DEFAULT_BRANCH: &str = "master";

impl Repository {
    /// Creates the repository layout, writes the one-and-only initial
    /// commit, and points a fresh `master` branch (and HEAD) at it.
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.gitlet_path().exists() {
            return Err(GitletError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .gitlet/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .gitlet/refs/heads directory")?;

        let initial_commit = Commit::initial();
        let commit_id = self.database().store(&initial_commit)?;

        self.refs().update_branch(DEFAULT_BRANCH, &commit_id)?;
        self.refs().set_head(DEFAULT_BRANCH)?;
        self.staging().write_updates()?;

        tracing::debug!(%commit_id, "initialized repository");

        Ok(())
    }
}
