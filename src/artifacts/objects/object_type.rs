use anyhow::Context;
use std::io::BufRead;

pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Consumes the `<type> <len>\0` header from a serialized object.
    pub fn parse_object_type(reader: &mut impl BufRead) -> anyhow::Result<Self> {
        let mut header = Vec::new();
        reader
            .read_until(b'\0', &mut header)
            .context("Unable to read object header")?;
        header.pop();

        let header = String::from_utf8(header).context("Object header is not valid UTF-8")?;
        let object_type = header
            .split_whitespace()
            .next()
            .context("Missing object type in header")?;

        object_type.try_into()
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(anyhow::anyhow!("Invalid object type: {value}")),
        }
    }
}
