use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::error::TwigError;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Create `branch_name` at the current commit
    pub async fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_no_merge_in_progress()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let source_oid = self.head_oid()?;

        self.refs().create_branch(&branch_name, source_oid)?;

        Ok(())
    }

    pub async fn delete_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(TwigError::DeleteCurrentBranch(branch_name.to_string()).into());
        }

        let oid = self.refs().delete_branch(&branch_name)?;
        writeln!(
            self.writer(),
            "Deleted branch {} (was {}).",
            branch_name,
            oid.to_short_oid()
        )?;

        Ok(())
    }

    pub async fn list_branches(&mut self) -> anyhow::Result<()> {
        let current = self.refs().current_branch()?;

        for branch_name in self.refs().list_branches()? {
            if current.as_ref() == Some(&branch_name) {
                writeln!(self.writer(), "* {}", branch_name.to_string().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch_name)?;
            }
        }

        Ok(())
    }
}
