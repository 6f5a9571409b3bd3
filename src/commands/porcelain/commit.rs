use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::tree::builder::TreeBuilder;
use crate::error::TwigError;
use std::io::Write;

/// Appended to the message of the commit that concludes a conflicted merge
pub const RESOLVED_MERGE_NOTE: &str = "Resolved merge conflict.";

impl Repository {
    /// Record the pending changes on top of the current commit
    ///
    /// While a merge is in progress the new commit descends from the merged
    /// giver, completes the merge and notes the resolution in its message.
    /// The message is recorded as given.
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let conflicts = index.entries_in_conflict();
        if !conflicts.is_empty() {
            return Err(TwigError::UnresolvedConflicts(conflicts).into());
        }

        let head_oid = self.head_oid()?;
        let (parent, message) = match self.refs().read_merge_head()? {
            Some(giver_oid) => (giver_oid, format!("{message}\n{RESOLVED_MERGE_NOTE}")),
            None => (head_oid.clone(), message.to_string()),
        };

        let base_tree = self.commit_graph().tree_of(&head_oid)?;
        let tree_oid = TreeBuilder::new(self.database()).build(
            &base_tree,
            index.pending_additions(),
            index.pending_removals(),
        )?;

        let author = Author::load(&self.config()?.user)?;
        let commit_oid =
            self.commit_graph()
                .create_commit(&message, tree_oid, Some(parent), author)?;
        self.refs().update_head(commit_oid.clone())?;
        self.refs().clear_merge_head()?;

        index.clear_pending();
        index.write_updates()?;

        let location = match self.refs().head()? {
            Head::Branch(name) => name.to_string(),
            Head::Detached(_) => "detached HEAD".to_string(),
        };
        writeln!(
            self.writer(),
            "[{} {}] {}",
            location,
            commit_oid.to_short_oid(),
            message.lines().next().unwrap_or_default()
        )?;

        Ok(commit_oid)
    }
}
