use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;

/// Anything that can live in the object store. Serialization prepends a
/// `<type> <len>\0` header and the id is the SHA-1 of the full serialized
/// form, so storing identical content twice yields the same id.
pub trait Object {
    fn serialize(&self) -> Result<Bytes>;

    fn object_type(&self) -> ObjectType;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        Ok(ObjectId::hash(&content))
    }
}
