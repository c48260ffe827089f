use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::Staging;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::{Commit, Snapshot};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::collections::BTreeSet;
use std::path::Path;

pub const GITLET_DIR: &str = ".gitlet";

/// The explicit repository handle every operation goes through: no ambient
/// global state. Owns the object store, the working tree, the staging area
/// and the reference table, plus the writer all contract output is sent to.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    staging: Staging,
}

impl Repository {
    /// Builds a handle without requiring an initialized repository; only
    /// `init` goes through here.
    pub fn init_at(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;

        Ok(Self::assemble(path.into_boxed_path(), writer))
    }

    /// Opens an existing repository; every command except `init` starts
    /// here. Loads the staging area from disk as part of opening.
    pub fn open(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        if !path.join(GITLET_DIR).is_dir() {
            return Err(GitletError::NotARepository.into());
        }

        let mut repository = Self::assemble(path.into_boxed_path(), writer);
        repository.staging.rehydrate()?;

        Ok(repository)
    }

    fn assemble(path: Box<Path>, writer: Box<dyn std::io::Write>) -> Self {
        let gitlet_path = path.join(GITLET_DIR);

        let database = Database::new(gitlet_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone());
        let refs = Refs::new(gitlet_path.clone().into_boxed_path());
        let staging = Staging::new(gitlet_path.join("index").into_boxed_path());

        Repository {
            path,
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
            staging,
        }
    }

    pub fn gitlet_path(&self) -> Box<Path> {
        self.path.join(GITLET_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn staging(&self) -> &Staging {
        &self.staging
    }

    pub fn staging_mut(&mut self) -> &mut Staging {
        &mut self.staging
    }

    /// The commit digest the current branch points at. Always present after
    /// `init` writes the initial commit.
    pub fn head_oid(&self) -> anyhow::Result<ObjectId> {
        let branch = self.refs.current_branch()?;
        self.refs
            .read_branch(&branch)?
            .context(format!("Branch {branch} has no commit"))
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let oid = self.head_oid()?;
        self.commit_at(&oid)
    }

    pub fn commit_at(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database
            .parse_object_as_commit(oid)?
            .context(format!("Object {oid} is not a commit"))
    }

    /// Working-tree files that are neither tracked by the current commit nor
    /// staged for addition. These are the files checkout, reset and merge
    /// must refuse to clobber.
    pub fn untracked_files(&self) -> anyhow::Result<Vec<String>> {
        let tracked = self.head_commit()?;

        Ok(self
            .workspace
            .list_files()?
            .into_iter()
            .filter(|path| {
                tracked.tracks(path).is_none() && self.staging.staged_digest(path).is_none()
            })
            .collect())
    }

    /// Swaps the working tree from one snapshot to another: materializes
    /// every file of `to`, then deletes every path of `from` absent from
    /// `to`. Extra paths in `also_remove` (staged additions, typically) are
    /// cleared as well.
    pub fn replace_working_tree(
        &self,
        from: &Snapshot,
        to: &Snapshot,
        also_remove: &BTreeSet<String>,
    ) -> anyhow::Result<()> {
        for (path, oid) in to {
            self.materialize_blob(path, oid)?;
        }

        for path in from.keys().chain(also_remove.iter()) {
            if !to.contains_key(path) {
                self.workspace.delete_file(path)?;
            }
        }

        Ok(())
    }

    /// Writes one blob's bytes to its working-tree path.
    pub fn materialize_blob(&self, path: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let blob = self
            .database
            .parse_object_as_blob(oid)?
            .context(format!("Object {oid} is not a blob"))?;

        self.workspace.write_file(path, blob.content())
    }
}
