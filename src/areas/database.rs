use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// The content-addressable object store. Objects are zlib-compressed and
/// written once under `objects/xx/yyyy...`; storing identical content again
/// is a no-op.
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        self.read_object(object_path)
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        // write-once: an existing entry already holds identical bytes
        if !object_path.exists() {
            let object_content = object.serialize()?;

            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object_content)?;
        }

        Ok(object_id)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(Some(Blob::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(Commit::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    /// Every commit object in the store, in unspecified order.
    pub fn all_commits(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let mut commits = Vec::new();

        for object_id in self.all_object_ids()? {
            if let Some(commit) = self.parse_object_as_commit(&object_id)? {
                commits.push((object_id, commit));
            }
        }

        Ok(commits)
    }

    /// Resolves an abbreviated commit digest. Returns the full digest only
    /// when the prefix matches exactly one stored commit; ambiguous or
    /// unknown prefixes yield `None`.
    pub fn resolve_commit_prefix(&self, prefix: &str) -> anyhow::Result<Option<ObjectId>> {
        if prefix.is_empty()
            || prefix.len() > 40
            || !prefix.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Ok(None);
        }
        let prefix = prefix.to_ascii_lowercase();

        let mut matched = None;
        for object_id in self.all_object_ids()? {
            if !object_id.as_ref().starts_with(&prefix) {
                continue;
            }
            if self.parse_object_as_commit(&object_id)?.is_none() {
                continue;
            }
            if matched.is_some() {
                // ambiguous abbreviation
                return Ok(None);
            }
            matched = Some(object_id);
        }

        Ok(matched)
    }

    fn all_object_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut object_ids = Vec::new();

        if !self.path.exists() {
            return Ok(object_ids);
        }

        for fan_out in std::fs::read_dir(&self.path)? {
            let fan_out = fan_out?;
            if !fan_out.file_type()?.is_dir() {
                continue;
            }
            let prefix = fan_out.file_name().to_string_lossy().to_string();

            for entry in std::fs::read_dir(fan_out.path())? {
                let entry = entry?;
                let rest = entry.file_name().to_string_lossy().to_string();
                if let Ok(object_id) = ObjectId::try_parse(format!("{prefix}{rest}")) {
                    object_ids.push(object_id);
                }
            }
        }

        Ok(object_ids)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
