//! Split-point search for three-way merges.
//!
//! Finds a best common ancestor (BCA) of two branch tips over the full
//! commit DAG: a common ancestor that is not an ancestor of any other common
//! ancestor. Merge commits carry two parents here, so a plain first-parent
//! scan would pick non-optimal split points once merges enter history.
//!
//! Two phases:
//! 1. a two-sided traversal in reverse chronological order marks each commit
//!    with the side(s) it was reached from; commits reached from both sides
//!    are common ancestors, and their own ancestors are marked stale;
//! 2. common ancestors that are ancestors of another common ancestor are
//!    filtered out, leaving only best ones.

use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use chrono::{DateTime, Utc};
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::debug;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
        const STALE = 0b100;
        const RESULT = 0b1000;
    }
}

/// Just enough of a commit to walk ancestry: id, parent ids, timestamp.
#[derive(Debug, Clone)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
    pub timestamp: DateTime<Utc>,
}

/// Finds the split point between two commits, loading ancestry through the
/// given function so the algorithm works against any commit source (the
/// object store in production, an in-memory graph in tests).
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// A best common ancestor of the two commits, or `None` when their
    /// histories share no commit at all. When several best common ancestors
    /// exist (criss-cross merges) the newest one is returned, which keeps
    /// the choice deterministic.
    pub fn find_split_point(
        &self,
        source_oid: &ObjectId,
        target_oid: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let common_ancestors = self
            .find_common_ancestors(source_oid, HashSet::from([target_oid]))?
            .into_keys()
            .collect::<HashSet<_>>();

        if common_ancestors.is_empty() {
            return Ok(None);
        }

        debug!(count = common_ancestors.len(), "found common ancestors");

        let mut redundant_ancestors = HashSet::<ObjectId>::new();
        for commit in &common_ancestors {
            if redundant_ancestors.contains(commit) {
                continue;
            }

            let others = common_ancestors
                .iter()
                .filter(|other| *other != commit && !redundant_ancestors.contains(*other))
                .collect::<HashSet<_>>();
            if others.is_empty() {
                continue;
            }
            let common_states = self.find_common_ancestors(commit, others.clone())?;

            if common_states
                .get(commit)
                .copied()
                .unwrap_or(VisitState::NONE)
                .contains(VisitState::VISITED_FROM_TARGET)
            {
                redundant_ancestors.insert(commit.clone());
            }

            for other in others {
                if common_states
                    .get(other)
                    .copied()
                    .unwrap_or(VisitState::NONE)
                    .contains(VisitState::VISITED_FROM_SOURCE)
                {
                    redundant_ancestors.insert(other.clone());
                }
            }
        }

        let mut best_common_ancestors = common_ancestors
            .into_iter()
            .filter(|commit| !redundant_ancestors.contains(commit))
            .map(|oid| {
                let commit = (self.commit_loader)(&oid)?;
                Ok((commit.timestamp, oid))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        best_common_ancestors.sort();

        debug!(count = best_common_ancestors.len(), "best common ancestors");

        Ok(best_common_ancestors.pop().map(|(_, oid)| oid))
    }

    /// Two-sided traversal marking every reachable commit with the side(s)
    /// it was visited from. Returns the commits that ended up visited from
    /// both sides without being stale.
    fn find_common_ancestors(
        &self,
        source_oid: &ObjectId,
        target_oids: HashSet<&ObjectId>,
    ) -> anyhow::Result<HashMap<ObjectId, VisitState>> {
        if target_oids.contains(source_oid) {
            // the source commit is itself a target, hence the ancestor
            return Ok(HashMap::from([(source_oid.clone(), VisitState::RESULT)]));
        }

        let mut ancestors_states = HashMap::<ObjectId, VisitState>::new();
        let mut priority_queue = BinaryHeap::new();

        let source_commit = (self.commit_loader)(source_oid)?;
        ancestors_states.insert(source_commit.oid.clone(), VisitState::VISITED_FROM_SOURCE);
        priority_queue.push((source_commit.timestamp, source_commit.oid));

        for &target_oid in &target_oids {
            ancestors_states.insert(target_oid.clone(), VisitState::VISITED_FROM_TARGET);

            let target_commit = (self.commit_loader)(target_oid)?;
            priority_queue.push((target_commit.timestamp, target_commit.oid));
        }

        // newest first, so a commit is processed after everything that can
        // reach it
        while let Some((_, oid)) = priority_queue.pop() {
            let current_state = ancestors_states
                .get(&oid)
                .copied()
                .unwrap_or(VisitState::NONE);

            debug!(%oid, ?current_state, "processing commit");

            if current_state.contains(VisitState::STALE) {
                continue;
            }

            let is_common_ancestor = if current_state.contains(VisitState::VISITED_FROM_BOTH) {
                ancestors_states
                    .entry(oid.clone())
                    .and_modify(|state| *state |= VisitState::RESULT);
                true
            } else {
                false
            };

            let current_commit = (self.commit_loader)(&oid)?;

            for parent_oid in &current_commit.parents {
                let parent_commit = (self.commit_loader)(parent_oid)?;
                let parent_state = ancestors_states
                    .get(parent_oid)
                    .copied()
                    .unwrap_or(VisitState::NONE);

                let mut new_state = parent_state | current_state;
                if is_common_ancestor {
                    new_state |= VisitState::STALE;
                }

                if !parent_state.contains(current_state) {
                    ancestors_states.insert(parent_oid.clone(), new_state);
                    priority_queue.push((parent_commit.timestamp, parent_oid.clone()));
                }
            }
        }

        Ok(ancestors_states
            .into_iter()
            .filter(|(_, state)| {
                !state.contains(VisitState::STALE) && state.contains(VisitState::RESULT)
            })
            .collect())
    }
}
