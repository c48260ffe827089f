use crate::areas::repository::Repository;
use crate::errors::GitletError;

impl Repository {
    /// Unstages a file, or marks a tracked file for removal and deletes its
    /// working copy.
    pub fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let tracked = self.head_commit()?.tracks(path).is_some();
        let staged = self.staging().staged_digest(path).is_some();

        if tracked {
            self.staging_mut().stage_removal(path.to_string());
            self.workspace().delete_file(path)?;
            self.staging().write_updates()?;
        } else if staged {
            // staged only: unstage it, the working copy stays untouched
            self.staging_mut().unstage_addition(path);
            self.staging().write_updates()?;
        } else {
            return Err(GitletError::NoReasonToRemove.into());
        }

        Ok(())
    }
}
