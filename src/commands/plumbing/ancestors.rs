use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the fingerprints of HEAD and all its ancestors, newest first
    pub async fn ancestors(&mut self) -> anyhow::Result<()> {
        let head_oid = self.head_oid()?;

        for commit_oid in self.commit_graph().ancestors_of(&head_oid)? {
            writeln!(self.writer(), "{}", commit_oid)?;
        }

        Ok(())
    }
}
