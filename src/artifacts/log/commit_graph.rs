use crate::areas::database::Database;
use crate::artifacts::log::walk_ancestors;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// Commits stored in the object database, viewed as a graph
#[derive(Debug, new)]
pub struct CommitGraph<'d> {
    database: &'d Database,
}

impl CommitGraph<'_> {
    /// Store a commit record and return its fingerprint
    pub fn create_commit(
        &self,
        message: &str,
        tree_oid: ObjectId,
        parent: Option<ObjectId>,
        author: Author,
    ) -> anyhow::Result<ObjectId> {
        let commit = Commit::new(parent, tree_oid, author, message.to_string());

        self.database.store(&commit)
    }

    pub fn load(&self, commit_oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database.parse_object_as_commit(commit_oid)
    }

    pub fn parent_of(&self, commit_oid: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        Ok(self.load(commit_oid)?.parent().cloned())
    }

    pub fn tree_of(&self, commit_oid: &ObjectId) -> anyhow::Result<ObjectId> {
        Ok(self.load(commit_oid)?.tree_oid().clone())
    }

    /// The commit itself followed by every parent up to the root
    pub fn ancestors_of(&self, commit_oid: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        walk_ancestors(commit_oid, |oid| self.parent_of(oid))
    }

    /// Whether `candidate` appears in the history of `descendant` (a commit
    /// counts as its own ancestor)
    pub fn is_ancestor(
        &self,
        candidate: &ObjectId,
        descendant: &ObjectId,
    ) -> anyhow::Result<bool> {
        Ok(self.ancestors_of(descendant)?.contains(candidate))
    }
}
