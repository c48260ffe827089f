use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// On-disk shape of the staging area. A path never appears on both sides at
/// once; the mutators below keep that invariant.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct StagingState {
    additions: BTreeMap<String, ObjectId>,
    removals: BTreeSet<String>,
}

/// The pending-change set accumulated between commits, persisted as JSON at
/// `.gitlet/index`. Loaded once per invocation and written back after every
/// mutating command.
pub struct Staging {
    path: Box<Path>,
    state: StagingState,
}

impl Staging {
    pub fn new(path: Box<Path>) -> Self {
        Staging {
            path,
            state: StagingState::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the staging file from disk; an absent or empty file means an
    /// empty staging area.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        if !self.path.exists() {
            self.state = StagingState::default();
            return Ok(());
        }

        let content = std::fs::read(&self.path)
            .context(format!("Unable to read staging file {}", self.path.display()))?;
        self.state = if content.is_empty() {
            StagingState::default()
        } else {
            serde_json::from_slice(&content).context("Staging file is corrupted")?
        };

        Ok(())
    }

    pub fn write_updates(&self) -> anyhow::Result<()> {
        let content = serde_json::to_vec_pretty(&self.state)
            .context("Unable to serialize the staging area")?;

        std::fs::write(&self.path, content).context(format!(
            "Unable to write staging file {}",
            self.path.display()
        ))
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.state.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.state.removals
    }

    pub fn is_empty(&self) -> bool {
        self.state.additions.is_empty() && self.state.removals.is_empty()
    }

    pub fn staged_digest(&self, path: &str) -> Option<&ObjectId> {
        self.state.additions.get(path)
    }

    pub fn is_marked_for_removal(&self, path: &str) -> bool {
        self.state.removals.contains(path)
    }

    pub fn stage_addition(&mut self, path: String, object_id: ObjectId) {
        self.state.removals.remove(&path);
        self.state.additions.insert(path, object_id);
    }

    pub fn stage_removal(&mut self, path: String) {
        self.state.additions.remove(&path);
        self.state.removals.insert(path);
    }

    pub fn unstage_addition(&mut self, path: &str) -> bool {
        self.state.additions.remove(path).is_some()
    }

    pub fn unmark_removal(&mut self, path: &str) -> bool {
        self.state.removals.remove(path)
    }

    /// Consumed atomically by a successful commit.
    pub fn clear(&mut self) {
        self.state = StagingState::default();
    }
}
