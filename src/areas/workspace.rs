use anyhow::Context;
use bytes::Bytes;
use std::path::Path;
use walkdir::WalkDir;

const METADATA_DIR: &str = ".gitlet";

/// The working tree: every file physically present outside `.gitlet`.
/// Paths are handed out and accepted relative to the repository root, with
/// `/` separators.
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every file under the repository root, sorted, `.gitlet` excluded.
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(self.path.as_ref())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| self.check_if_not_ignored_file_path(entry.path()))
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    pub fn exists(&self, file_path: &str) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(&file_path)
            .context(format!("Unable to read file {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn write_file(&self, file_path: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(file_path);

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).context(format!(
                "Unable to create directory {}",
                parent.display()
            ))?;
        }

        std::fs::write(&file_path, content)
            .context(format!("Unable to write file {}", file_path.display()))
    }

    pub fn delete_file(&self, file_path: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(file_path);

        if file_path.exists() {
            std::fs::remove_file(&file_path)
                .context(format!("Unable to delete file {}", file_path.display()))?;
        }

        Ok(())
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                name.to_string_lossy() == METADATA_DIR
            } else {
                false
            }
        })
    }

    fn check_if_not_ignored_file_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.path.as_ref()).ok()?;
        if path.is_file() && !Self::is_ignored(relative) {
            Some(Self::normalize(relative))
        } else {
            None
        }
    }

    fn normalize(path: &Path) -> String {
        path.components()
            .filter_map(|component| match component {
                std::path::Component::Normal(name) => Some(name.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

}
