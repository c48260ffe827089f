use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::errors::GitletError;

impl Repository {
    /// Stages one working-tree file for the next commit.
    pub fn add(&mut self, path: &str) -> anyhow::Result<()> {
        if !self.workspace().exists(path) {
            return Err(GitletError::FileNotExist.into());
        }

        // a pending removal is cancelled, nothing gets staged
        if self.staging().is_marked_for_removal(path) {
            self.staging_mut().unmark_removal(path);
            self.staging().write_updates()?;
            return Ok(());
        }

        let content = self.workspace().read_file(path)?;
        let blob = Blob::new(content);
        let blob_id = blob.object_id()?;

        // adding a file that matches the current commit exactly is a no-op;
        // a stale staged entry for it is dropped
        if self.head_commit()?.tracks(path) == Some(&blob_id) {
            if self.staging_mut().unstage_addition(path) {
                self.staging().write_updates()?;
            }
            return Ok(());
        }

        self.database().store(&blob)?;
        self.staging_mut().stage_addition(path.to_string(), blob_id);
        self.staging().write_updates()?;

        Ok(())
    }
}
