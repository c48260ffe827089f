use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use std::io::Write;

const DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

impl Repository {
    /// Walks first-parent links from the current branch tip to the root,
    /// newest first.
    pub fn log(&mut self) -> anyhow::Result<()> {
        let mut cursor = Some(self.head_oid()?);

        while let Some(oid) = cursor {
            let commit = self.commit_at(&oid)?;
            self.print_commit(&oid, &commit)?;
            cursor = commit.first_parent().cloned();
        }

        Ok(())
    }

    /// Every commit in the object store, in unspecified order.
    pub fn global_log(&mut self) -> anyhow::Result<()> {
        for (oid, commit) in self.database().all_commits()? {
            self.print_commit(&oid, &commit)?;
        }

        Ok(())
    }

    /// Prints the digest of every commit whose message equals the query
    /// exactly.
    pub fn find(&mut self, message: &str) -> anyhow::Result<()> {
        let matches = self
            .database()
            .all_commits()?
            .into_iter()
            .filter(|(_, commit)| commit.message() == message)
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(GitletError::NotFound.into());
        }

        for (oid, _) in matches {
            writeln!(self.writer(), "{oid}")?;
        }

        Ok(())
    }

    fn print_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {oid}")?;
        if let [first, second] = commit.parents() {
            writeln!(writer, "Merge: {} {}", first.short(), second.short())?;
        }
        writeln!(writer, "Date: {}", commit.timestamp().format(DATE_FORMAT))?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
