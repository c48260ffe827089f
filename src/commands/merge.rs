use crate::areas::repository::Repository;
use crate::artifacts::merge::split_point::{SlimCommit, SplitPointFinder};
use crate::artifacts::merge::{MergeAction, classify, conflict_content};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Write;
use tracing::debug;

impl Repository {
    /// Three-way merge of another branch into the current one: finds the
    /// split point, classifies every path across the three snapshots, and
    /// either commits the merged snapshot (two parents) or leaves staged
    /// resolutions plus conflict markers behind.
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        // preconditions, first failure wins
        if !self.untracked_files()?.is_empty() {
            return Err(GitletError::UntrackedFileConflict.into());
        }
        if !self.staging().is_empty() {
            return Err(GitletError::UncommittedChanges.into());
        }
        if !self.refs().branch_exists(branch_name) {
            return Err(GitletError::NoSuchBranch.into());
        }
        let current_branch = self.refs().current_branch()?;
        if branch_name == current_branch {
            return Err(GitletError::SelfMerge.into());
        }

        let head_oid = self.head_oid()?;
        let given_oid = self
            .refs()
            .read_branch(branch_name)?
            .context(format!("Branch {branch_name} has no commit"))?;

        let split_oid = {
            let finder = SplitPointFinder::new(|oid: &ObjectId| self.slim_commit(oid));
            finder
                .find_split_point(&head_oid, &given_oid)?
                .context("The two branches share no common ancestor")?
        };

        debug!(%split_oid, %head_oid, %given_oid, "found split point");

        if split_oid == given_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        if split_oid == head_oid {
            self.fast_forward(&current_branch, &given_oid)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split = self.commit_at(&split_oid)?;
        let current = self.commit_at(&head_oid)?;
        let given = self.commit_at(&given_oid)?;

        let paths = split
            .snapshot()
            .keys()
            .chain(current.snapshot().keys())
            .chain(given.snapshot().keys())
            .cloned()
            .collect::<BTreeSet<_>>();

        let mut conflicted = false;
        for path in &paths {
            let action = classify(split.tracks(path), current.tracks(path), given.tracks(path));
            debug!(%path, ?action, "classified path");

            match action {
                MergeAction::Keep => {}
                MergeAction::TakeGiven(blob_id) => {
                    self.materialize_blob(path, &blob_id)?;
                    self.staging_mut().stage_addition(path.clone(), blob_id);
                }
                MergeAction::Delete => {
                    self.workspace().delete_file(path)?;
                    self.staging_mut().stage_removal(path.clone());
                }
                MergeAction::Conflict => {
                    conflicted = true;
                    self.write_conflict(path, current.tracks(path), given.tracks(path))?;
                }
            }
        }

        if conflicted {
            self.staging().write_updates()?;
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        } else {
            let message = format!("Merged {branch_name} into {current_branch}.");
            self.create_commit(message, vec![head_oid, given_oid])?;
        }

        Ok(())
    }

    /// Moves the current branch pointer onto the given tip and materializes
    /// its snapshot; no merge commit.
    fn fast_forward(&mut self, current_branch: &str, given_oid: &ObjectId) -> anyhow::Result<()> {
        let current = self.head_commit()?;
        let given = self.commit_at(given_oid)?;

        self.replace_working_tree(current.snapshot(), given.snapshot(), &BTreeSet::new())?;
        self.refs().update_branch(current_branch, given_oid)?;

        Ok(())
    }

    /// Rewrites the path with both versions between conflict markers and
    /// stages that content as the path's blob.
    fn write_conflict(
        &mut self,
        path: &str,
        current_oid: Option<&ObjectId>,
        given_oid: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        let current_content = self.blob_content(current_oid)?;
        let given_content = self.blob_content(given_oid)?;

        let content = conflict_content(
            current_content.as_deref(),
            given_content.as_deref(),
        );
        self.workspace().write_file(path, &content)?;

        let blob = Blob::new(content);
        let blob_id = self.database().store(&blob)?;
        self.staging_mut().stage_addition(path.to_string(), blob_id);

        Ok(())
    }

    fn blob_content(&self, oid: Option<&ObjectId>) -> anyhow::Result<Option<Bytes>> {
        let Some(oid) = oid else {
            return Ok(None);
        };

        let blob = self
            .database()
            .parse_object_as_blob(oid)?
            .context(format!("Object {oid} is not a blob"))?;

        Ok(Some(blob.content().clone()))
    }

    /// Ancestry view of a stored commit for the split-point finder.
    fn slim_commit(&self, oid: &ObjectId) -> anyhow::Result<SlimCommit> {
        let commit = self.commit_at(oid)?;

        Ok(SlimCommit {
            oid: oid.clone(),
            parents: commit.parents().to_vec(),
            timestamp: commit.timestamp(),
        })
    }
}
