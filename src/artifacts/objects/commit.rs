use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;

pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// A path -> blob digest mapping: every tracked file's content at one point
/// in history. BTreeMap keeps serialization order deterministic.
pub type Snapshot = BTreeMap<String, ObjectId>;

/// An immutable commit record. Identity is the digest of the serialized
/// form, so message, timestamp, parents and snapshot all feed the id and
/// identical inputs reproduce identical digests.
///
/// The body is a line-oriented text format:
///
/// ```text
/// timestamp <unix-seconds>
/// parent <oid>            (one per parent, in order)
/// entry <oid> <path>      (one per snapshot entry, path-sorted)
///
/// <message>
/// ```
#[derive(Debug, Clone)]
pub struct Commit {
    message: String,
    timestamp: DateTime<Utc>,
    parents: Vec<ObjectId>,
    snapshot: Snapshot,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<Utc>,
        parents: Vec<ObjectId>,
        snapshot: Snapshot,
    ) -> Self {
        Commit {
            message,
            timestamp,
            parents,
            snapshot,
        }
    }

    /// The root commit every repository starts from: no parents, nothing
    /// tracked, and a fixed epoch timestamp so its digest is the same in
    /// every repository.
    pub fn initial() -> Self {
        Commit {
            message: INITIAL_COMMIT_MESSAGE.to_string(),
            timestamp: Utc.timestamp_opt(0, 0).single().unwrap_or_default(),
            parents: Vec::new(),
            snapshot: Snapshot::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// The parent `log` follows; `None` only for the initial commit.
    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// The blob digest tracked for `path`, if any.
    pub fn tracks(&self, path: &str) -> Option<&ObjectId> {
        self.snapshot.get(path)
    }

    /// Reads the body that follows an already-consumed `commit <len>\0`
    /// header.
    pub fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut body = String::new();
        reader
            .read_to_string(&mut body)
            .context("Commit body is not valid UTF-8")?;

        let (fields, message) = body
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut timestamp = None;
        let mut parents = Vec::new();
        let mut snapshot = Snapshot::new();

        for line in fields.lines() {
            let (key, value) = line
                .split_once(' ')
                .context("Invalid commit object: malformed field line")?;
            match key {
                "timestamp" => {
                    let seconds: i64 = value
                        .parse()
                        .context("Invalid commit object: bad timestamp")?;
                    timestamp = Utc.timestamp_opt(seconds, 0).single();
                }
                "parent" => parents.push(ObjectId::try_parse(value.to_string())?),
                "entry" => {
                    let (oid, path) = value
                        .split_once(' ')
                        .context("Invalid commit object: malformed snapshot entry")?;
                    snapshot.insert(path.to_string(), ObjectId::try_parse(oid.to_string())?);
                }
                _ => return Err(anyhow::anyhow!("Invalid commit object: unknown field {key}")),
            }
        }

        Ok(Commit {
            message: message.to_string(),
            timestamp: timestamp.context("Invalid commit object: missing timestamp")?,
            parents,
            snapshot,
        })
    }

    fn body(&self) -> String {
        let mut lines = vec![format!("timestamp {}", self.timestamp.timestamp())];

        for parent in &self.parents {
            lines.push(format!("parent {parent}"));
        }
        for (path, oid) in &self.snapshot {
            lines.push(format!("entry {oid} {path}"));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        lines.join("\n")
    }
}

impl Object for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let body = self.body();
        let serialized = format!("{} {}\0{}", self.object_type().as_str(), body.len(), body);

        Ok(Bytes::from(serialized))
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn oid(seed: &str) -> ObjectId {
        ObjectId::hash(seed.as_bytes())
    }

    fn sample_commit() -> Commit {
        let snapshot = Snapshot::from([
            ("b.txt".to_string(), oid("b")),
            ("a.txt".to_string(), oid("a")),
        ]);
        Commit::new(
            "add a and b".to_string(),
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            vec![oid("parent")],
            snapshot,
        )
    }

    #[test]
    fn identical_inputs_reproduce_identical_digests() {
        assert_eq!(
            sample_commit().object_id().unwrap(),
            sample_commit().object_id().unwrap()
        );
    }

    #[test]
    fn digest_depends_on_snapshot_contents() {
        let base = sample_commit();
        let mut changed = sample_commit();
        changed.snapshot.insert("a.txt".to_string(), oid("a2"));

        assert_ne!(base.object_id().unwrap(), changed.object_id().unwrap());
    }

    #[test]
    fn serialize_then_deserialize_round_trips() {
        let commit = sample_commit();
        let serialized = commit.serialize().unwrap();

        let mut reader = Cursor::new(serialized);
        ObjectType::parse_object_type(&mut reader).unwrap();
        let restored = Commit::deserialize(reader).unwrap();

        assert_eq!(restored.message(), commit.message());
        assert_eq!(restored.timestamp(), commit.timestamp());
        assert_eq!(restored.parents(), commit.parents());
        assert_eq!(restored.snapshot(), commit.snapshot());
        assert_eq!(restored.object_id().unwrap(), commit.object_id().unwrap());
    }

    #[test]
    fn multiline_message_survives_round_trip() {
        let commit = Commit::new(
            "first line\n\nbody paragraph".to_string(),
            Utc.timestamp_opt(42, 0).unwrap(),
            vec![],
            Snapshot::new(),
        );
        let serialized = commit.serialize().unwrap();

        let mut reader = Cursor::new(serialized);
        ObjectType::parse_object_type(&mut reader).unwrap();
        let restored = Commit::deserialize(reader).unwrap();

        assert_eq!(restored.message(), commit.message());
    }

    #[test]
    fn initial_commit_is_parentless_and_empty() {
        let initial = Commit::initial();
        assert!(initial.parents().is_empty());
        assert!(initial.snapshot().is_empty());
        assert_eq!(initial.message(), INITIAL_COMMIT_MESSAGE);
        assert_eq!(initial.timestamp().timestamp(), 0);
        // every repository produces the very same root commit
        assert_eq!(
            initial.object_id().unwrap(),
            Commit::initial().object_id().unwrap()
        );
    }
}
