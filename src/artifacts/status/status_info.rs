use crate::artifacts::diff::file_status::Status;
use crate::artifacts::diff::three_way::StatusMap;
use crate::artifacts::status::file_change::{FileChangeType, IndexChangeType, WorkspaceChangeType};
use std::collections::{BTreeMap, BTreeSet};

pub type ChangeSet = BTreeMap<String, FileChangeType>;
pub type FileSet = BTreeSet<String>;

/// Everything `status` reports about the working tree and index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub index_changeset: ChangeSet,
    pub workspace_changeset: ChangeSet,
    pub untracked_files: FileSet,
    pub conflicted_files: FileSet,
}

impl StatusInfo {
    /// Combine the HEAD → index and index → working tree diffs
    ///
    /// `staged` must diff the index (giver) against the HEAD commit
    /// (receiver), `unstaged` the working tree (giver) against the index
    /// (receiver). Conflicted paths are reported only as conflicts.
    pub fn from_diffs(staged: &StatusMap, unstaged: &StatusMap, conflicted_files: FileSet) -> Self {
        let index_changeset = staged
            .iter()
            .filter(|(path, _)| !conflicted_files.contains(*path))
            .filter_map(|(path, file_status)| {
                let change = match file_status.status {
                    Status::Added => IndexChangeType::Added,
                    Status::Modified => IndexChangeType::Modified,
                    Status::Removed => IndexChangeType::Deleted,
                    Status::Same | Status::Conflict => return None,
                };
                Some((path.clone(), FileChangeType::Index(change)))
            })
            .collect();

        let mut untracked_files = FileSet::new();
        let workspace_changeset = unstaged
            .iter()
            .filter(|(path, _)| !conflicted_files.contains(*path))
            .filter_map(|(path, file_status)| {
                let change = match file_status.status {
                    Status::Modified => WorkspaceChangeType::Modified,
                    Status::Removed => WorkspaceChangeType::Deleted,
                    Status::Added => {
                        untracked_files.insert(path.clone());
                        return None;
                    }
                    Status::Same | Status::Conflict => return None,
                };
                Some((path.clone(), FileChangeType::Workspace(change)))
            })
            .collect();

        StatusInfo {
            index_changeset,
            workspace_changeset,
            untracked_files,
            conflicted_files,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.index_changeset.is_empty()
            && self.workspace_changeset.is_empty()
            && self.untracked_files.is_empty()
            && self.conflicted_files.is_empty()
    }
}
