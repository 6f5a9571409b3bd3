//! References (branches, HEAD, merge marker)
//!
//! References are human-readable names pointing to commits:
//! - Branches: `refs/heads/*` holding the raw fingerprint of the branch tip
//! - HEAD: either `ref: refs/heads/<branch>` or a raw fingerprint (detached)
//! - MERGE_HEAD: present only while a merge is waiting for its conflicts to be
//!   resolved; holds the giver commit fingerprint

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::TwigError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Reference manager rooted at the metadata directory
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

pub const HEAD_REF_NAME: &str = "HEAD";
pub const MERGE_HEAD_REF_NAME: &str = "MERGE_HEAD";

/// What HEAD currently designates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// HEAD follows a branch
    Branch(BranchName),
    /// HEAD holds a commit fingerprint directly
    Detached(ObjectId),
}

impl Head {
    fn read(path: &Path) -> anyhow::Result<Option<Head>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(Head::Branch(BranchName::try_parse(
                symref_match[1].to_string(),
            )?)))
        } else {
            Ok(Some(Head::Detached(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }

    fn raw(&self) -> String {
        match self {
            Head::Branch(name) => format!("ref: {}", name.as_ref_path()),
            Head::Detached(oid) => oid.to_string(),
        }
    }
}

impl Refs {
    pub fn head(&self) -> anyhow::Result<Head> {
        Head::read(&self.head_path())?
            .with_context(|| format!("HEAD is missing at {:?}", self.head_path()))
    }

    /// Branch HEAD follows, or `None` when detached
    pub fn current_branch(&self) -> anyhow::Result<Option<BranchName>> {
        match self.head()? {
            Head::Branch(name) => Ok(Some(name)),
            Head::Detached(_) => Ok(None),
        }
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(self.current_branch()?.as_ref() == Some(branch_name))
    }

    /// Commit HEAD designates, following the branch when attached
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        match self.head()? {
            Head::Branch(name) => self.read_branch(&name),
            Head::Detached(oid) => Ok(Some(oid)),
        }
    }

    /// Advance whatever HEAD designates to `oid`
    ///
    /// With an attached HEAD the branch file is rewritten, otherwise HEAD
    /// itself.
    pub fn update_head(&self, oid: ObjectId) -> anyhow::Result<()> {
        match self.head()? {
            Head::Branch(name) => {
                self.update_ref_file(self.branch_path(&name), oid.to_string())
            }
            Head::Detached(_) => self.set_head(&Head::Detached(oid)),
        }
    }

    pub fn set_head(&self, head: &Head) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), head.raw())
    }

    pub fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        match Head::read(&self.branch_path(branch_name))? {
            Some(Head::Detached(oid)) => Ok(Some(oid)),
            Some(Head::Branch(_)) | None => Ok(None),
        }
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            return Err(TwigError::BranchExists(name.to_string()).into());
        }

        self.update_ref_file(self.branch_path(name), source_oid.to_string())
    }

    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let branch_path = self.branch_path(name);

        match self.read_branch(name)? {
            Some(oid) => {
                std::fs::remove_file(branch_path.as_ref()).with_context(|| {
                    format!("failed to delete branch file at {:?}", branch_path)
                })?;
                self.prune_branch_empty_parent_dirs(branch_path.as_ref())?;

                Ok(oid)
            }
            None => Err(TwigError::NoSuchBranch(name.to_string()).into()),
        }
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                BranchName::try_parse(relative_path.to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    /// Giver commit of the merge waiting for conflict resolution, if any
    pub fn read_merge_head(&self) -> anyhow::Result<Option<ObjectId>> {
        match Head::read(&self.merge_head_path())? {
            Some(Head::Detached(oid)) => Ok(Some(oid)),
            Some(Head::Branch(_)) | None => Ok(None),
        }
    }

    pub fn is_merge_in_progress(&self) -> bool {
        self.merge_head_path().exists()
    }

    pub fn write_merge_head(&self, giver: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.merge_head_path(), giver.to_string())
    }

    pub fn clear_merge_head(&self) -> anyhow::Result<()> {
        let path = self.merge_head_path();
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("failed to remove merge marker at {:?}", path))?;
        }

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn merge_head_path(&self) -> Box<Path> {
        self.path.join(MERGE_HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.heads_path()
            .join(branch_name.as_ref())
            .into_boxed_path()
    }
}
