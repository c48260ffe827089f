use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, Snapshot};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use chrono::Utc;

impl Repository {
    /// Records the staged changes as a new commit on the current branch.
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let message = message.trim();
        if message.is_empty() {
            return Err(GitletError::EmptyMessage.into());
        }
        if self.staging().is_empty() {
            return Err(GitletError::NothingToCommit.into());
        }

        let head_oid = self.head_oid()?;
        self.create_commit(message.to_string(), vec![head_oid])?;

        Ok(())
    }

    /// Shared commit machinery: builds the snapshot from the first parent's
    /// snapshot minus staged removals plus staged additions, stores the
    /// record, advances the current branch and consumes the staging area.
    /// Merge commits come through here with two parents and skip the
    /// empty-staging check above.
    pub(crate) fn create_commit(
        &mut self,
        message: String,
        parents: Vec<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let mut snapshot = match parents.first() {
            Some(parent_oid) => self.commit_at(parent_oid)?.snapshot().clone(),
            None => Snapshot::new(),
        };

        for path in self.staging().removals() {
            snapshot.remove(path);
        }
        for (path, blob_id) in self.staging().additions() {
            snapshot.insert(path.clone(), blob_id.clone());
        }

        let commit = Commit::new(message, Utc::now(), parents, snapshot);
        let commit_id = self.database().store(&commit)?;

        let branch = self.refs().current_branch()?;
        self.refs().update_branch(&branch, &commit_id)?;

        self.staging_mut().clear();
        self.staging().write_updates()?;

        tracing::debug!(%commit_id, %branch, "created commit");

        Ok(commit_id)
    }
}
