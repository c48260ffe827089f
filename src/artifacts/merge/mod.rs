pub mod split_point;

use crate::artifacts::objects::object_id::ObjectId;

pub const CONFLICT_HEAD_MARKER: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_SEPARATOR: &str = "=======\n";
pub const CONFLICT_TAIL_MARKER: &str = ">>>>>>>\n";

/// What the merge does for one path, decided from the path's blob digest in
/// the split, current and given snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Leave the current side as it is (also covers "keep deleted").
    Keep,
    /// Check out and stage the given side's blob.
    TakeGiven(ObjectId),
    /// Delete the file from the working tree and stop tracking it.
    Delete,
    /// Both sides changed the path since the split point, differently.
    Conflict,
}

/// Per-file three-way classification. `None` means the path is absent from
/// that snapshot; a digest difference against the split point is a
/// modification. Three comparisons cover the whole decision table:
/// identical sides need nothing, an unmodified given side keeps current, an
/// unmodified current side follows given, and everything else conflicts.
pub fn classify(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> MergeAction {
    if current == given {
        return MergeAction::Keep;
    }
    if split == given {
        return MergeAction::Keep;
    }
    if split == current {
        return match given {
            Some(oid) => MergeAction::TakeGiven(oid.clone()),
            None => MergeAction::Delete,
        };
    }

    MergeAction::Conflict
}

/// The conflict-marker file body: both versions delimited by HEAD markers.
/// A side deleted since the split point contributes empty content.
pub fn conflict_content(current: Option<&[u8]>, given: Option<&[u8]>) -> Vec<u8> {
    let mut content = Vec::new();
    content.extend_from_slice(CONFLICT_HEAD_MARKER.as_bytes());
    content.extend_from_slice(current.unwrap_or_default());
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    content.extend_from_slice(given.unwrap_or_default());
    content.extend_from_slice(CONFLICT_TAIL_MARKER.as_bytes());

    content
}
