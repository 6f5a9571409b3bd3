use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub async fn hash_object(&mut self, object_path: &str, write: bool) -> anyhow::Result<()> {
        let relative = self.workspace().normalize(Path::new(object_path))?;
        let object = Blob::new(self.workspace().read_file(&relative)?);

        let object_id = if write {
            self.database().store(&object)?
        } else {
            object.object_id()?
        };

        writeln!(self.writer(), "{}", object_id)?;

        Ok(())
    }
}
