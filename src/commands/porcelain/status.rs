use crate::areas::repository::Repository;
use crate::artifacts::diff::diff_source::DiffSource;
use crate::artifacts::diff::three_way::DiffEngine;
use crate::artifacts::status::status_info::{ChangeSet, FileSet, StatusInfo};
use colored::Colorize;
use std::io::Write;

// Terminology:
// - staged changes: the index differs from the HEAD commit
// - unstaged changes: a tracked file differs between the index and the disk
// - untracked files: files on disk the index does not know
// - conflicted files: paths still holding merge conflict stages
impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<StatusInfo> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let head_oid = self.head_oid()?;
        let engine = DiffEngine::new(self.database(), self.workspace(), &index);

        let staged = engine.diff(
            &DiffSource::Index,
            Some(&DiffSource::Commit(head_oid)),
            None,
        )?;
        let unstaged = engine.diff(&DiffSource::WorkingTree, Some(&DiffSource::Index), None)?;
        let status = StatusInfo::from_diffs(&staged, &unstaged, index.entries_in_conflict());

        self.show_branches()?;
        self.show_file_set("Untracked files", &status.untracked_files)?;
        self.show_changeset("Changes to be committed", &status.index_changeset)?;
        self.show_changeset("Changes not staged for commit", &status.workspace_changeset)?;
        self.show_file_set("Unmerged paths", &status.conflicted_files)?;

        if status.is_clean() {
            writeln!(self.writer(), "nothing to commit, working tree clean")?;
        }

        Ok(status)
    }

    fn show_branches(&self) -> anyhow::Result<()> {
        let current = self.refs().current_branch()?;

        writeln!(self.writer(), "=== Branches ===")?;
        for branch_name in self.refs().list_branches()? {
            if current.as_ref() == Some(&branch_name) {
                writeln!(self.writer(), "*{}", branch_name)?;
            } else {
                writeln!(self.writer(), " {}", branch_name)?;
            }
        }
        if current.is_none() {
            writeln!(self.writer(), "*(HEAD detached)")?;
        }
        writeln!(self.writer())?;

        Ok(())
    }

    fn show_changeset(&self, title: &str, changeset: &ChangeSet) -> anyhow::Result<()> {
        if changeset.is_empty() {
            return Ok(());
        }

        writeln!(self.writer(), "{}:", title)?;
        for (path, change) in changeset {
            writeln!(self.writer(), "{}{}", change, path)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }

    fn show_file_set(&self, title: &str, files: &FileSet) -> anyhow::Result<()> {
        if files.is_empty() {
            return Ok(());
        }

        writeln!(self.writer(), "{}:", title)?;
        for path in files {
            writeln!(self.writer(), "{:>8}{}", "", path.red())?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
