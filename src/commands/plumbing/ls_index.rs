use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Dump every index entry as `<stage> <fingerprint>\t<path>`
    pub async fn ls_index(&mut self) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        for entry in index.entries() {
            writeln!(self.writer(), "{} {}\t{}", entry.stage, entry.oid, entry.path)?;
        }

        Ok(())
    }
}
