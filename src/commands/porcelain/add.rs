use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::index::index_entry::Stage;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        // Expand directories; report and skip paths that do not exist
        let mut files = Vec::new();
        for path in paths {
            let relative = self.workspace().normalize(Path::new(path))?;

            if !self.workspace().exists(&relative) || Workspace::is_hidden(Path::new(&relative)) {
                writeln!(
                    self.writer(),
                    "warning: pathspec '{}' did not match any files",
                    path
                )?;
                continue;
            }

            if self.workspace().is_dir(&relative) {
                let root = (!relative.is_empty()).then(|| Path::new(&relative));
                files.extend(self.workspace().list_files(root)?);
            } else {
                files.push(relative);
            }
        }

        for file in files {
            self.add_file(&mut index, &file)?;
        }

        index.write_updates()?;

        Ok(())
    }

    /// Stage the current content of `file`
    ///
    /// Conflict stages of the path are replaced by a single stage-0 entry.
    fn add_file(&self, index: &mut Index, file: &str) -> anyhow::Result<()> {
        let data = self.workspace().read_file(file)?;
        let oid = self.database().put(data)?;

        if index.is_conflicted(file) || index.lookup(file, Stage::Normal) != Some(&oid) {
            index.set_entry(file, Stage::Normal, oid.clone());
        }
        index.stage_addition(file, oid);

        Ok(())
    }
}
