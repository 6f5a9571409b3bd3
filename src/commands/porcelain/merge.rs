use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::diff::diff_source::DiffSource;
use crate::artifacts::diff::file_status::Status;
use crate::artifacts::diff::three_way::{DiffEngine, StatusMap};
use crate::artifacts::merge::conflict::conflict_block;
use crate::artifacts::merge::lca::LcaFinder;
use crate::artifacts::merge::merge_outcome::MergeOutcome;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::tree::PathMap;
use crate::artifacts::tree::builder::TreeBuilder;
use crate::error::TwigError;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    /// Merge the branch `giver` into the current branch
    ///
    /// Every rule violation is rejected before anything is written. A merge
    /// that hits conflicts leaves the merge marker, the conflict blocks and
    /// the conflict stages in place for the user to resolve.
    pub async fn merge(&mut self, giver: &str) -> anyhow::Result<MergeOutcome> {
        self.ensure_no_merge_in_progress()?;

        let current_branch = self
            .refs()
            .current_branch()?
            .ok_or(TwigError::DetachedHead)?;
        let giver_branch = BranchName::try_parse(giver.to_string())
            .map_err(|_| TwigError::NoSuchBranch(giver.to_string()))?;
        let giver_oid = self
            .refs()
            .read_branch(&giver_branch)?
            .ok_or_else(|| TwigError::NoSuchBranch(giver.to_string()))?;
        let receiver_oid = self.head_oid()?;

        if giver_branch == current_branch || giver_oid == receiver_oid {
            return Err(TwigError::SelfMerge.into());
        }

        let graph = self.commit_graph();

        if graph.is_ancestor(&giver_oid, &receiver_oid)? {
            debug_log!("merge: {} already reachable", giver_oid.to_short_oid());
            writeln!(self.writer(), "Already up to date.")?;
            return Ok(MergeOutcome::AlreadyUpToDate);
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if graph.is_ancestor(&receiver_oid, &giver_oid)? {
            debug_log!("merge: fast-forward to {}", giver_oid.to_short_oid());
            self.switch_snapshot(&mut index, &receiver_oid, &giver_oid, giver_branch.as_ref())?;
            index.write_updates()?;
            self.refs().update_head(giver_oid.clone())?;

            writeln!(
                self.writer(),
                "Updating {}..{}\nFast-forward",
                receiver_oid.to_short_oid(),
                giver_oid.to_short_oid()
            )?;
            return Ok(MergeOutcome::FastForward(giver_oid));
        }

        self.refs().write_merge_head(&giver_oid)?;

        let base_oid = LcaFinder::new(|oid: &ObjectId| graph.parent_of(oid))
            .find(&giver_oid, &receiver_oid)?;
        debug_log!(
            "merge: giver={} receiver={} base={:?}",
            giver_oid.to_short_oid(),
            receiver_oid.to_short_oid(),
            base_oid.as_ref().map(ObjectId::to_short_oid)
        );

        let statuses = DiffEngine::new(self.database(), self.workspace(), &index).diff(
            &DiffSource::Commit(giver_oid.clone()),
            Some(&DiffSource::Commit(receiver_oid.clone())),
            base_oid.map(DiffSource::Commit).as_ref(),
        )?;

        self.materialize(&statuses, giver_branch.as_ref())?;
        index.rebuild_from_diff(&statuses);

        let conflicts = statuses
            .iter()
            .filter(|(_, file_status)| file_status.status == Status::Conflict)
            .map(|(path, _)| path.clone())
            .collect::<BTreeSet<_>>();

        if conflicts.is_empty() {
            let merge_oid =
                self.commit_merge(&mut index, &giver_branch, &current_branch, giver_oid)?;
            writeln!(
                self.writer(),
                "Merge made by the three-way strategy: {}",
                merge_oid.to_short_oid()
            )?;
            return Ok(MergeOutcome::Merged(merge_oid));
        }

        Self::stage_merge_changes(&mut index, &statuses);
        index.write_updates()?;

        for path in &conflicts {
            writeln!(
                self.writer(),
                "CONFLICT (content): Merge conflict in {}",
                path
            )?;
        }
        writeln!(
            self.writer(),
            "Automatic merge failed; fix conflicts and then commit the result."
        )?;

        Ok(MergeOutcome::Conflicted(conflicts))
    }

    /// Write the outcome of a diff into the working tree
    ///
    /// Conflicting paths receive a marker block with the receiver version
    /// first and the giver version labelled `giver_label`.
    pub(crate) fn materialize(&self, statuses: &StatusMap, giver_label: &str) -> anyhow::Result<()> {
        for (path, file_status) in statuses {
            match file_status.status {
                Status::Same => {}
                Status::Added | Status::Modified => {
                    if let Some(oid) = file_status.resolved() {
                        let blob = self.database().parse_object_as_blob(oid)?;
                        self.workspace().write_file(path, blob.content())?;
                    }
                }
                Status::Removed => self.workspace().remove_file(path)?,
                Status::Conflict => {
                    let receiver = self.blob_content(file_status.receiver.as_ref())?;
                    let giver = self.blob_content(file_status.giver.as_ref())?;
                    self.workspace()
                        .write_file(path, &conflict_block(&receiver, &giver, giver_label))?;
                }
            }
        }

        Ok(())
    }

    fn blob_content(&self, oid: Option<&ObjectId>) -> anyhow::Result<Vec<u8>> {
        match oid {
            Some(oid) => Ok(self.database().parse_object_as_blob(oid)?.content().to_vec()),
            None => Ok(Vec::new()),
        }
    }

    /// Commit the merged working tree on top of the giver
    fn commit_merge(
        &self,
        index: &mut Index,
        giver_branch: &BranchName,
        current_branch: &BranchName,
        giver_oid: ObjectId,
    ) -> anyhow::Result<ObjectId> {
        let mut snapshot = PathMap::new();
        for file in self.workspace().list_files(None)? {
            let oid = self.database().put(self.workspace().read_file(&file)?)?;
            snapshot.insert(file, oid);
        }

        let tree_oid = TreeBuilder::new(self.database()).build(
            &ObjectId::empty_tree(),
            &snapshot,
            &BTreeSet::new(),
        )?;

        let message = format!("Merged {} into {}.", giver_branch, current_branch);
        let author = Author::load(&self.config()?.user)?;
        let merge_oid =
            self.commit_graph()
                .create_commit(&message, tree_oid, Some(giver_oid), author)?;

        index.clear_pending();
        index.write_updates()?;
        self.refs().update_head(merge_oid.clone())?;
        self.refs().clear_merge_head()?;

        Ok(merge_oid)
    }

    /// Queue every non-conflicting change of the merge for the resolving
    /// commit, which builds on the receiver tree
    fn stage_merge_changes(index: &mut Index, statuses: &StatusMap) {
        for (path, file_status) in statuses {
            match file_status.status {
                Status::Added | Status::Modified => {
                    if let Some(oid) = file_status.resolved()
                        && file_status.receiver.as_ref() != Some(oid)
                    {
                        index.stage_addition(path, oid.clone());
                    }
                }
                Status::Removed => {
                    if file_status.receiver.is_some() {
                        index.stage_removal(path);
                    }
                }
                Status::Same | Status::Conflict => {}
            }
        }
    }
}
