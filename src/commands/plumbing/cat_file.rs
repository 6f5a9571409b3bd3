use crate::areas::repository::Repository;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::TwigError;
use std::io::Write;

impl Repository {
    /// Print the raw content of an object given its full or abbreviated
    /// fingerprint
    pub async fn cat_file(&mut self, object_id: &str) -> anyhow::Result<()> {
        let object_id = self.resolve_object_id(object_id)?;
        let content = self.database().get(&object_id)?;

        self.writer().write_all(&content)?;

        Ok(())
    }

    fn resolve_object_id(&self, object_id: &str) -> anyhow::Result<ObjectId> {
        if object_id.len() == OBJECT_ID_LENGTH {
            return ObjectId::try_parse(object_id.to_string());
        }

        let candidates = self.database().find_objects_by_prefix(object_id)?;
        match candidates.as_slice() {
            [] => Err(TwigError::UnknownRevision(object_id.to_string()).into()),
            [oid] => Ok(oid.clone()),
            _ => Err(TwigError::AmbiguousRevision(object_id.to_string()).into()),
        }
    }
}
