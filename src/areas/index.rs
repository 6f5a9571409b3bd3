//! Staging index
//!
//! The index tracks what the next commit will contain:
//!
//! - `entries`: per path, either one stage-0 fingerprint or the base, giver
//!   and receiver fingerprints of an unresolved merge conflict
//! - `pending_additions` / `pending_removals`: changes staged since the last
//!   commit, folded into the next tree by `TreeBuilder`
//!
//! The whole index is read at the start of a command and rewritten in full
//! at its end; see `artifacts::index` for the file format.

use crate::artifacts::diff::file_status::Status;
use crate::artifacts::diff::three_way::StatusMap;
use crate::artifacts::index::checksum::{Checksum, verify};
use crate::artifacts::index::index_entry::{IndexEntry, Stage};
use crate::artifacts::index::{SIGNATURE, VERSION};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::tree::PathMap;
use crate::error::TwigError;
use anyhow::Context;
use fake::rand;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufWriter, Read};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.twig/index`)
    path: Box<Path>,
    entries: BTreeMap<String, BTreeMap<Stage, ObjectId>>,
    pending_additions: PathMap,
    pending_removals: BTreeSet<String>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            pending_additions: PathMap::new(),
            pending_removals: BTreeSet::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.pending_additions.clear();
        self.pending_removals.clear();
    }

    /// Load the index from disk
    ///
    /// A missing or empty file leaves the index empty. The checksum is
    /// verified before any record is parsed.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&self.path)
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut()
            .read_to_string(&mut content)
            .map_err(|err| TwigError::MalformedIndex(err.to_string()))?;

        if content.is_empty() {
            return Ok(());
        }

        let body = verify(&content)?;
        self.parse_records(body)
    }

    fn parse_records(&mut self, body: &str) -> anyhow::Result<()> {
        let mut lines = body.lines();

        let header = lines
            .next()
            .ok_or_else(|| TwigError::MalformedIndex("missing header".to_string()))?;
        match header.split_once(' ') {
            Some((SIGNATURE, version)) if version == VERSION.to_string() => {}
            Some((SIGNATURE, version)) => {
                return Err(TwigError::MalformedIndex(format!(
                    "unsupported index file version: {version}"
                ))
                .into());
            }
            _ => {
                return Err(
                    TwigError::MalformedIndex("invalid index file signature".to_string()).into(),
                );
            }
        }

        for line in lines {
            let malformed = || TwigError::MalformedIndex(format!("invalid record: {line}"));

            match line.split_once(' ') {
                Some(("E", rest)) => {
                    let mut parts = rest.splitn(3, ' ');
                    let stage = parts.next().ok_or_else(malformed)?;
                    let oid = parts.next().ok_or_else(malformed)?;
                    let path = parts.next().ok_or_else(malformed)?;

                    let stage = Stage::from_u8(stage.parse().map_err(|_| malformed())?)?;
                    let oid = ObjectId::try_parse(oid.to_string()).map_err(|_| malformed())?;
                    self.entries
                        .entry(path.to_string())
                        .or_default()
                        .insert(stage, oid);
                }
                Some(("A", rest)) => {
                    let (oid, path) = rest.split_once(' ').ok_or_else(malformed)?;
                    let oid = ObjectId::try_parse(oid.to_string()).map_err(|_| malformed())?;
                    self.pending_additions.insert(path.to_string(), oid);
                }
                Some(("R", path)) => {
                    self.pending_removals.insert(path.to_string());
                }
                _ => return Err(malformed().into()),
            }
        }

        Ok(())
    }

    /// Rewrite the whole index file
    ///
    /// The new content goes to a temporary file that replaces the index in a
    /// single rename.
    ///
    /// # Locking
    ///
    /// Holds an exclusive lock on the temporary file while it is written.
    pub fn write_updates(&self) -> anyhow::Result<()> {
        let index_dir = self
            .path
            .parent()
            .with_context(|| format!("Invalid index path {}", self.path.display()))?;
        let temp_path = index_dir.join(format!("index-{}.tmp", rand::random::<u32>()));

        let mut file = std::fs::File::create(&temp_path)
            .with_context(|| format!("Unable to create index file {}", temp_path.display()))?;
        let mut lock = file_guard::lock(&mut file, file_guard::Lock::Exclusive, 0, 1)?;
        let mut writer = Checksum::new(BufWriter::new(lock.deref_mut()));

        writer.write(format!("{SIGNATURE} {VERSION}\n").as_bytes())?;
        for entry in self.entries() {
            writer.write(
                format!("E {} {} {}\n", entry.stage, entry.oid, entry.path).as_bytes(),
            )?;
        }
        for (path, oid) in &self.pending_additions {
            writer.write(format!("A {} {}\n", oid, path).as_bytes())?;
        }
        for path in &self.pending_removals {
            writer.write(format!("R {}\n", path).as_bytes())?;
        }
        writer
            .write_checksum()?
            .into_inner()
            .map_err(|err| err.into_error())
            .with_context(|| format!("Unable to write index file {}", temp_path.display()))?;
        drop(lock);

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Unable to rename index file to {}", self.path.display()))?;

        Ok(())
    }

    /// Record `oid` for `path` at `stage`
    ///
    /// A stage-0 entry replaces any conflict stages of the path and a
    /// conflict-stage entry replaces its stage-0 entry.
    pub fn set_entry(&mut self, path: &str, stage: Stage, oid: ObjectId) {
        let stages = self.entries.entry(path.to_string()).or_default();

        if stage.is_conflict() {
            stages.remove(&Stage::Normal);
        } else {
            stages.retain(|existing, _| !existing.is_conflict());
        }
        stages.insert(stage, oid);
    }

    pub fn clear_entry(&mut self, path: &str, stage: Stage) {
        if let Some(stages) = self.entries.get_mut(path) {
            stages.remove(&stage);
            if stages.is_empty() {
                self.entries.remove(path);
            }
        }
    }

    /// Drop every stage of `path`; returns whether anything was tracked
    pub fn clear_path(&mut self, path: &str) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn lookup(&self, path: &str, stage: Stage) -> Option<&ObjectId> {
        self.entries.get(path)?.get(&stage)
    }

    pub fn is_tracked(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn is_conflicted(&self, path: &str) -> bool {
        self.entries
            .get(path)
            .is_some_and(|stages| stages.keys().any(Stage::is_conflict))
    }

    /// Every path holding an entry at a non-zero stage
    pub fn entries_in_conflict(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|(_, stages)| stages.keys().any(Stage::is_conflict))
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Replace all entries with the outcome of a diff
    ///
    /// Conflicts keep their base, giver and receiver versions at stages 1 to
    /// 3, removed paths leave the index, everything else is staged at stage
    /// 0 with its resolved fingerprint.
    pub fn rebuild_from_diff(&mut self, statuses: &StatusMap) {
        self.entries.clear();

        for (path, file_status) in statuses {
            match file_status.status {
                Status::Conflict => {
                    let versions = [
                        (Stage::Base, &file_status.base),
                        (Stage::Giver, &file_status.giver),
                        (Stage::Receiver, &file_status.receiver),
                    ];
                    for (stage, oid) in versions {
                        if let Some(oid) = oid {
                            self.set_entry(path, stage, oid.clone());
                        }
                    }
                }
                Status::Same | Status::Added | Status::Modified => {
                    if let Some(oid) = file_status.resolved() {
                        self.set_entry(path, Stage::Normal, oid.clone());
                    }
                }
                Status::Removed => {}
            }
        }
    }

    /// Track exactly the files of `files`, all unconflicted
    pub fn replace_entries(&mut self, files: &PathMap) {
        self.entries.clear();
        for (path, oid) in files {
            self.set_entry(path, Stage::Normal, oid.clone());
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        self.entries.iter().flat_map(|(path, stages)| {
            stages
                .iter()
                .map(|(stage, oid)| IndexEntry::new(path.clone(), *stage, oid.clone()))
        })
    }

    /// Flat view used as a diff endpoint: the stage-0 entry of each path,
    /// else its receiver version
    pub fn source_map(&self) -> PathMap {
        self.entries
            .iter()
            .filter_map(|(path, stages)| {
                stages
                    .get(&Stage::Normal)
                    .or_else(|| stages.get(&Stage::Receiver))
                    .map(|oid| (path.clone(), oid.clone()))
            })
            .collect()
    }

    pub fn stage_addition(&mut self, path: &str, oid: ObjectId) {
        self.pending_removals.remove(path);
        self.pending_additions.insert(path.to_string(), oid);
    }

    pub fn stage_removal(&mut self, path: &str) {
        self.pending_additions.remove(path);
        self.pending_removals.insert(path.to_string());
    }

    pub fn pending_additions(&self) -> &PathMap {
        &self.pending_additions
    }

    pub fn pending_removals(&self) -> &BTreeSet<String> {
        &self.pending_removals
    }

    pub fn clear_pending(&mut self) {
        self.pending_additions.clear();
        self.pending_removals.clear();
    }
}
