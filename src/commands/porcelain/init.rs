use crate::areas::config::Config;
use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::TwigError;
use anyhow::Context;
use bytes::Bytes;
use std::fs;
use std::io::Write;

const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(TwigError::AlreadyInitialized(self.path().display().to_string()).into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .twig/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .twig/refs/heads directory")?;

        let config = Config::default();
        config
            .save(&self.config_path())
            .context("Failed to write .twig/config")?;

        let empty_tree = self.database().put(Bytes::new())?;
        debug_assert_eq!(empty_tree, ObjectId::empty_tree());

        let author = Author::load(&config.user)?;
        let root = self
            .commit_graph()
            .create_commit(INITIAL_COMMIT_MESSAGE, empty_tree, None, author)?;

        let master = BranchName::default_branch();
        self.refs().create_branch(&master, root)?;
        self.refs()
            .set_head(&Head::Branch(master))
            .context("Failed to create initial HEAD reference")?;

        {
            let index = self.index();
            let mut index = index.lock().await;
            index.rehydrate()?;
            index.write_updates()?;
        }

        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            self.metadata_path().display()
        )?;

        Ok(())
    }
}
