use crate::areas::repository::Repository;
use crate::error::TwigError;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Stop tracking `paths` and delete them from the working tree
    ///
    /// A directory selects every tracked file below it. Nothing changes
    /// unless every path matches a tracked file.
    pub async fn rm(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let tracked = index
            .entries()
            .map(|entry| entry.path)
            .collect::<std::collections::BTreeSet<_>>();

        let mut selected = Vec::new();
        for path in paths {
            let relative = self.workspace().normalize(Path::new(path))?;
            let prefix = format!("{relative}/");

            let matches = tracked
                .iter()
                .filter(|file| {
                    **file == relative || relative.is_empty() || file.starts_with(&prefix)
                })
                .cloned()
                .collect::<Vec<_>>();
            if matches.is_empty() {
                return Err(TwigError::PathNotTracked(path.clone()).into());
            }

            selected.extend(matches);
        }

        for file in selected {
            index.clear_path(&file);
            index.stage_removal(&file);
            self.workspace().remove_file(&file)?;
            writeln!(self.writer(), "rm '{}'", file)?;
        }

        index.write_updates()?;

        Ok(())
    }
}
