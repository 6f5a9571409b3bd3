//! Tree object
//!
//! Trees represent one directory level. They list named entries for files
//! (blobs) and subdirectories (other trees).
//!
//! ## Format
//!
//! One line per entry, each terminated by `\n`:
//! `<blob|tree> <fingerprint> <name>`
//!
//! Lines are kept sorted by name, so two trees with the same entries always
//! serialize to the same bytes. The empty tree is the empty byte string.

use crate::artifacts::objects::entry_kind::EntryKind;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::BufRead;

/// A single `<kind> <fingerprint> <name>` line of a tree
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub kind: EntryKind,
    pub oid: ObjectId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Insert an entry, replacing any entry of either kind with the same name
    pub fn insert(&mut self, name: impl Into<String>, entry: TreeEntry) {
        self.entries.insert(name.into(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, TreeEntry)> {
        self.entries.into_iter()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = self
            .entries
            .iter()
            .map(|(name, entry)| format!("{} {} {}\n", entry.kind, entry.oid, name))
            .collect::<String>();

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut tree = Tree::default();

        for line in reader.lines() {
            let line = line.context("tree content is not valid UTF-8")?;
            if line.is_empty() {
                continue;
            }

            let mut parts = line.splitn(3, ' ');
            let kind = parts
                .next()
                .context("unexpected end of tree line: missing entry type")?;
            let oid = parts
                .next()
                .context("unexpected end of tree line: missing fingerprint")?;
            let name = parts
                .next()
                .filter(|name| !name.is_empty())
                .context("unexpected end of tree line: missing name")?;

            let entry = TreeEntry::new(
                EntryKind::try_from(kind)?,
                ObjectId::try_parse(oid.to_string())?,
            );
            tree.insert(name, entry);
        }

        Ok(tree)
    }
}

impl Object for Tree {
    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(name, entry)| format!("{} {}\t{}", entry.kind, entry.oid, name))
            .collect::<Vec<String>>()
            .join("\n")
    }
}
