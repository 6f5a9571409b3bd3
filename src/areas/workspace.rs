//! Working tree access
//!
//! The workspace enumerates and fingerprints the user's files and writes
//! checked-out or merged content back. Any path with a component starting
//! with `.` (the metadata directory included) is invisible to it.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::tree::PathMap;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every visible regular file below `root` (the whole tree by default),
    /// as sorted `/`-separated paths relative to the workspace
    pub fn list_files(&self, root: Option<&Path>) -> anyhow::Result<Vec<String>> {
        let root = match root {
            Some(p) => self.path.join(p),
            None => self.path.to_path_buf(),
        };

        if !root.exists() {
            anyhow::bail!("The specified path does not exist: {:?}", root);
        }

        let mut files = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|entry| {
                let relative = entry.path().strip_prefix(&self.path).unwrap_or(entry.path());
                !Self::is_hidden(relative)
            })
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| self.relative_path(entry.path()))
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    /// Path → fingerprint mapping of every visible file
    pub fn snapshot(&self) -> anyhow::Result<PathMap> {
        self.list_files(None)?
            .into_iter()
            .map(|file| {
                let content = self.read_file(&file)?;
                Ok((file, ObjectId::hash_bytes(&content)))
            })
            .collect()
    }

    pub fn is_hidden(path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(name) => name.to_string_lossy().starts_with('.'),
            _ => false,
        })
    }

    pub fn exists(&self, file_path: &str) -> bool {
        self.path.join(file_path).exists()
    }

    pub fn is_dir(&self, file_path: &str) -> bool {
        self.path.join(file_path).is_dir()
    }

    /// Normalize a user-supplied path to a workspace-relative `/` path
    ///
    /// Relative paths are taken from the current directory when it lies
    /// inside the workspace, from the workspace root otherwise.
    pub fn normalize(&self, file_path: &Path) -> anyhow::Result<String> {
        let absolute = if file_path.is_absolute() {
            file_path.to_path_buf()
        } else {
            let cwd = std::env::current_dir()?;
            match cwd.canonicalize() {
                Ok(cwd) if cwd.starts_with(&self.path) => cwd.join(file_path),
                _ => self.path.join(file_path),
            }
        };

        let mut normalized = PathBuf::new();
        for component in absolute.components() {
            match component {
                Component::ParentDir => {
                    normalized.pop();
                }
                Component::CurDir => {}
                other => normalized.push(other),
            }
        }

        self.relative_path(&normalized)
            .with_context(|| format!("{:?} is outside the repository", file_path))
    }

    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Bytes> {
        let path = self.path.join(file_path);

        let content =
            std::fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path))?;

        Ok(content.into())
    }

    /// Replace whatever is at `file_path` with a regular file holding `data`
    pub fn write_file(&self, file_path: &str, data: &[u8]) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if path.is_dir() {
            std::fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove existing directory: {:?}", file_path))?;
        }
        if let Some(parent) = path.parent() {
            self.make_directory(parent)?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete a file and any parent directories it leaves empty
    pub fn remove_file(&self, file_path: &str) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        let mut parent = path.parent();
        while let Some(dir) = parent {
            if dir == self.path.as_ref() || !dir.is_dir() || dir.read_dir()?.next().is_some() {
                break;
            }
            std::fs::remove_dir(dir)
                .with_context(|| format!("Failed to remove empty directory: {:?}", dir))?;
            parent = dir.parent();
        }

        Ok(())
    }

    fn make_directory(&self, dir_path: &Path) -> anyhow::Result<()> {
        // a file standing where a directory is needed gets replaced
        let mut current = self.path.to_path_buf();
        if let Ok(relative) = dir_path.strip_prefix(&self.path) {
            for component in relative.components() {
                current.push(component);
                if current.is_file() {
                    std::fs::remove_file(&current)
                        .with_context(|| format!("Failed to remove file: {:?}", current))?;
                }
            }
        }

        std::fs::create_dir_all(dir_path)
            .with_context(|| format!("Failed to create directory: {:?}", dir_path))
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.path.as_ref()).ok()?;

        let parts = relative
            .components()
            .map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().to_string()),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;

        Some(parts.join("/"))
    }
}
