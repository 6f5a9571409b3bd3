use crate::areas::config::Config;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::log::commit_graph::CommitGraph;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::TwigError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the metadata directory at the repository root
pub const METADATA_DIR: &str = ".twig";

/// One command session against a repository
///
/// Owns every area of the repository. The index is loaded from disk at the
/// start of a command and written back at its end.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: impl AsRef<Path>, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory {}", path.display()))?;
        }
        let path = path.canonicalize()?;
        let metadata_path = path.join(METADATA_DIR);

        let index = Index::new(metadata_path.join("index").into_boxed_path());
        let database = Database::new(metadata_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(metadata_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
        })
    }

    /// Open the repository containing `start`, searching parent directories
    pub fn discover(
        start: impl AsRef<Path>,
        writer: Box<dyn std::io::Write>,
    ) -> anyhow::Result<Self> {
        let start = start.as_ref().canonicalize()?;

        let root = start
            .ancestors()
            .find(|dir| dir.join(METADATA_DIR).is_dir())
            .map(PathBuf::from)
            .ok_or(TwigError::NotARepository)?;

        Self::new(root, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.path.join(METADATA_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.metadata_path().is_dir()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn commit_graph(&self) -> CommitGraph<'_> {
        CommitGraph::new(&self.database)
    }

    pub fn config(&self) -> anyhow::Result<Config> {
        Config::load(&self.config_path())
    }

    pub fn config_path(&self) -> PathBuf {
        self.metadata_path().join("config")
    }

    /// Commit HEAD designates; every initialized repository has one
    pub fn head_oid(&self) -> anyhow::Result<ObjectId> {
        self.refs()
            .read_head()?
            .context("HEAD does not point at a commit")
    }

    /// Reject commands that must not run while a merge awaits resolution
    pub fn ensure_no_merge_in_progress(&self) -> anyhow::Result<()> {
        if self.refs().is_merge_in_progress() {
            return Err(TwigError::MergeInProgress.into());
        }

        Ok(())
    }
}
