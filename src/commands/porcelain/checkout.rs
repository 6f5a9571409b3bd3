use crate::areas::index::Index;
use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::diff::diff_source::DiffSource;
use crate::artifacts::diff::three_way::DiffEngine;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub async fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        self.ensure_no_merge_in_progress()?;

        let revision = Revision::resolve(target, self.refs(), self.database())?;

        if let Revision::Branch(name, _) = &revision
            && self.refs().is_current_branch(name)?
        {
            writeln!(self.writer(), "Already on '{}'", name)?;
            return Ok(());
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let current_oid = self.head_oid()?;
        self.switch_snapshot(&mut index, &current_oid, revision.commit_oid(), target)?;
        index.write_updates()?;

        match revision {
            Revision::Branch(name, _) => {
                self.refs().set_head(&Head::Branch(name.clone()))?;
                writeln!(self.writer(), "Switched to branch '{}'", name)?;
            }
            Revision::Commit(oid) => {
                let commit = self.commit_graph().load(&oid)?;
                self.refs().set_head(&Head::Detached(oid.clone()))?;
                writeln!(
                    self.writer(),
                    "HEAD is now at {} {}",
                    oid.to_short_oid(),
                    commit.short_message()
                )?;
            }
        }

        Ok(())
    }

    /// Move the working tree and the index from the snapshot of `from` to
    /// the snapshot of `to`
    ///
    /// Pending changes are discarded.
    pub(crate) fn switch_snapshot(
        &self,
        index: &mut Index,
        from: &ObjectId,
        to: &ObjectId,
        label: &str,
    ) -> anyhow::Result<()> {
        let engine = DiffEngine::new(self.database(), self.workspace(), index);
        let target = DiffSource::Commit(to.clone());

        let statuses = engine.diff(&target, Some(&DiffSource::Commit(from.clone())), None)?;
        let target_files = engine.resolve(&target)?;

        self.materialize(&statuses, label)?;
        index.replace_entries(&target_files);
        index.clear_pending();

        Ok(())
    }
}
