use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::artifacts::diff::diff_source::DiffSource;
use crate::artifacts::diff::file_status::{FileStatus, Status};
use crate::artifacts::log::commit_graph::CommitGraph;
use crate::artifacts::tree::PathMap;
use crate::artifacts::tree::flatten::flatten;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

/// Per-path classification, keyed by every path present in any input
pub type StatusMap = BTreeMap<String, FileStatus>;

/// Classify every path of `giver`, `receiver` and `base`
///
/// Without a base the receiver stands in for it, so paths where both sides
/// agree are `Same` and a one-sided difference is never a conflict.
pub fn three_way_diff(giver: &PathMap, receiver: &PathMap, base: Option<&PathMap>) -> StatusMap {
    let base = base.unwrap_or(receiver);

    let paths = giver
        .keys()
        .chain(receiver.keys())
        .chain(base.keys())
        .collect::<BTreeSet<_>>();

    paths
        .into_iter()
        .map(|path| {
            let file_status = FileStatus::classify(
                receiver.get(path).cloned(),
                giver.get(path).cloned(),
                base.get(path).cloned(),
            );
            if file_status.status != Status::Same {
                debug_log!("{} -> {}", path, file_status.status);
            }

            (path.clone(), file_status)
        })
        .collect()
}

/// Resolves diff endpoints against a repository's areas
#[derive(new)]
pub struct DiffEngine<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
    index: &'r Index,
}

impl DiffEngine<'_> {
    pub fn resolve(&self, source: &DiffSource) -> anyhow::Result<PathMap> {
        match source {
            DiffSource::WorkingTree => self.workspace.snapshot(),
            DiffSource::Index => Ok(self.index.source_map()),
            DiffSource::Commit(commit_oid) => {
                let tree_oid = CommitGraph::new(self.database).tree_of(commit_oid)?;
                flatten(self.database, &tree_oid)
            }
        }
    }

    /// Diff `giver` against `receiver` (the working tree when absent) with an
    /// optional common `base`
    pub fn diff(
        &self,
        giver: &DiffSource,
        receiver: Option<&DiffSource>,
        base: Option<&DiffSource>,
    ) -> anyhow::Result<StatusMap> {
        let receiver = receiver.unwrap_or(&DiffSource::WorkingTree);
        debug_log!(
            "diff giver={} receiver={} base={:?}",
            giver,
            receiver,
            base.map(|b| b.to_string())
        );

        let giver_map = self.resolve(giver)?;
        let receiver_map = self.resolve(receiver)?;
        let base_map = base.map(|source| self.resolve(source)).transpose()?;

        Ok(three_way_diff(&giver_map, &receiver_map, base_map.as_ref()))
    }
}
