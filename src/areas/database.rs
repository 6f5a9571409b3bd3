use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::error::TwigError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// Content-addressed, append-only object store
///
/// Every object lives in its own file named after its fingerprint. Files are
/// written once and never rewritten or deleted.
#[derive(Debug)]
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

    /// Store raw content under its fingerprint
    ///
    /// Writing content that is already present is a no-op.
    pub fn put(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        let object_id = ObjectId::hash_bytes(&content);
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            std::fs::create_dir_all(&self.path).context(format!(
                "Unable to create object directory {}",
                self.path.display()
            ))?;

            self.write_object(object_path, content)?;
        }

        Ok(object_id)
    }

    /// Serialize and store an object, returning its fingerprint
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        self.put(object.serialize()?)
    }

    /// Raw content of an object
    ///
    /// Fails with `TwigError::ObjectNotFound` when no object has this fingerprint.
    pub fn get(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.is_file() {
            return Err(TwigError::ObjectNotFound(object_id.clone()).into());
        }

        self.read_object(object_path)
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.get(object_id)?))
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        // the empty tree is never required to be on disk
        if object_id.is_empty_tree() {
            return Ok(Tree::default());
        }

        let content = self.get(object_id)?;
        Tree::deserialize(Cursor::new(content)).map_err(|err| {
            TwigError::MalformedObject {
                oid: object_id.clone(),
                reason: err.to_string(),
            }
            .into()
        })
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let content = self.get(object_id)?;
        Commit::deserialize(Cursor::new(content)).map_err(|err| {
            TwigError::MalformedObject {
                oid: object_id.clone(),
                reason: err.to_string(),
            }
            .into()
        })
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let temp_object_path = self.path.join(Self::generate_temp_name());

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

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all objects whose fingerprint starts with the given prefix.
    ///
    /// Used to resolve abbreviated fingerprints; more than one match means the
    /// prefix is ambiguous.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let mut matches = Vec::new();

        if !self.path.is_dir() {
            return Ok(matches);
        }

        for entry in std::fs::read_dir(&self.path)? {
            let file_name = entry?.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(&prefix)
                && let Ok(oid) = ObjectId::try_parse(file_name.to_string())
            {
                matches.push(oid);
            }
        }

        matches.sort();
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use proptest::prelude::*;

    fn database(dir: &TempDir) -> Database {
        Database::new(dir.path().join("objects").into_boxed_path())
    }

    #[test]
    fn missing_object_is_an_integrity_error() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let database = database(&dir);

        let err = database
            .get(&ObjectId::hash_bytes(b"never stored"))
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TwigError>(),
            Some(TwigError::ObjectNotFound(_))
        ));

        Ok(())
    }

    #[test]
    fn storing_twice_keeps_one_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let database = database(&dir);

        let first = database.put(Bytes::from_static(b"hello"))?;
        let second = database.put(Bytes::from_static(b"hello"))?;

        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(database.objects_path())?.count(), 1);

        Ok(())
    }

    #[test]
    fn prefix_lookup_ignores_foreign_files() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let database = database(&dir);
        let oid = database.put(Bytes::from_static(b"content"))?;
        std::fs::write(database.objects_path().join("tmp-obj-1"), "junk")?;

        let found = database.find_objects_by_prefix(&oid.as_ref()[..6])?;

        assert_eq!(found, vec![oid]);
        assert!(database.find_objects_by_prefix("tmp")?.is_empty());

        Ok(())
    }

    proptest! {
        #[test]
        fn get_returns_what_put_stored(content in proptest::collection::vec(any::<u8>(), 0..512)) {
            let dir = TempDir::new().unwrap();
            let database = database(&dir);

            let oid = database.put(Bytes::from(content.clone())).unwrap();

            prop_assert_eq!(database.get(&oid).unwrap().to_vec(), content);
        }
    }
}
