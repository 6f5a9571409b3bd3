use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Show every commit from HEAD back to the root commit
    pub async fn log(&mut self) -> anyhow::Result<()> {
        let head_oid = self.head_oid()?;
        let graph = self.commit_graph();

        for (position, commit_oid) in graph.ancestors_of(&head_oid)?.iter().enumerate() {
            if position > 0 {
                writeln!(self.writer())?;
            }

            let commit = graph.load(commit_oid)?;
            self.show_commit(commit_oid, &commit)?;
        }

        Ok(())
    }

    fn show_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}",
            format!("commit {}", commit_oid).yellow()
        )?;
        writeln!(
            self.writer(),
            "Author: {} <{}>",
            commit.author().name(),
            commit.author().email()
        )?;
        writeln!(
            self.writer(),
            "Date:   {}",
            commit.author().readable_timestamp()
        )?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }
}
