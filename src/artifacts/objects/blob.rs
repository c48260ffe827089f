use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::BufRead;

/// An immutable byte sequence; carries no metadata beyond its content.
#[derive(Debug, Clone)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn new(content: impl Into<Bytes>) -> Self {
        Blob {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Reads the body that follows an already-consumed `blob <len>\0` header.
    pub fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .context("Unable to read blob content")?;

        Ok(Blob::new(content))
    }
}

impl Object for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut serialized = format!("{} {}\0", self.object_type().as_str(), self.content.len())
            .into_bytes();
        serialized.extend_from_slice(&self.content);

        Ok(Bytes::from(serialized))
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
