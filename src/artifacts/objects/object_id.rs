use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;

/// A 40-character lowercase hex SHA-1 digest. The single identifier type for
/// blobs and commits alike; content-derived, so equal bytes always produce
/// the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != 40 {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Digest arbitrary bytes into an id.
    pub fn hash(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Abbreviated form used in log output.
    pub fn short(&self) -> &str {
        &self.0[..7]
    }

    /// Fan-out location inside the object store: `xx/yyyy...`.
    pub fn to_path(&self) -> String {
        format!("{}/{}", &self.0[..2], &self.0[2..])
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
