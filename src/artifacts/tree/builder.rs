//! Tree reconstruction from a sparse change set
//!
//! Given a base tree, a set of path → fingerprint additions and a set of
//! paths to remove, `TreeBuilder` produces a tree whose flattened content is
//! `flatten(base) - removals + additions`.
//!
//! One directory level is handled per call:
//!
//! 1. Existing blobs are replaced by a matching addition, dropped by a
//!    matching removal, or kept as they are (an addition wins over a removal
//!    of the same path).
//! 2. Existing subtrees are rebuilt recursively when a change lies below
//!    them; otherwise the old entry line and fingerprint are kept, so
//!    unchanged subtrees are shared with the base.
//! 3. Remaining additions become new blobs at this level, or new subtrees
//!    grown from the empty tree.
//!
//! Every rebuilt level is stored. Directories left without entries keep an
//! empty-tree entry; they are not pruned.

use crate::areas::database::Database;
use crate::artifacts::objects::entry_kind::EntryKind;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::artifacts::tree::PathMap;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, new)]
pub struct TreeBuilder<'d> {
    database: &'d Database,
}

impl TreeBuilder<'_> {
    pub fn build(
        &self,
        base: &ObjectId,
        additions: &PathMap,
        removals: &BTreeSet<String>,
    ) -> anyhow::Result<ObjectId> {
        self.build_level(base, additions.clone(), removals.clone())
    }

    fn build_level(
        &self,
        base: &ObjectId,
        mut additions: PathMap,
        mut removals: BTreeSet<String>,
    ) -> anyhow::Result<ObjectId> {
        let base_tree = self.database.parse_object_as_tree(base)?;
        let mut tree = Tree::default();

        for (name, entry) in base_tree.into_entries() {
            match entry.kind {
                EntryKind::Blob => {
                    if let Some(oid) = additions.remove(&name) {
                        tree.insert(name, TreeEntry::new(EntryKind::Blob, oid));
                    } else if !removals.remove(&name) {
                        tree.insert(name, entry);
                    }
                }
                EntryKind::Tree => {
                    let (nested_additions, rest) = partition_additions(additions, &name);
                    additions = rest;
                    let (nested_removals, rest) = partition_removals(removals, &name);
                    removals = rest;

                    if nested_additions.is_empty() && nested_removals.is_empty() {
                        tree.insert(name, entry);
                    } else {
                        debug_log!("rebuilding subtree {} from {}", name, entry.oid);
                        let oid = self.build_level(&entry.oid, nested_additions, nested_removals)?;
                        tree.insert(name, TreeEntry::new(EntryKind::Tree, oid));
                    }
                }
            }
        }

        let (direct, nested) = group_by_first_segment(additions);
        for (name, oid) in direct {
            tree.insert(name, TreeEntry::new(EntryKind::Blob, oid));
        }
        for (dir, nested_additions) in nested {
            let oid = self.build_level(&ObjectId::empty_tree(), nested_additions, BTreeSet::new())?;
            tree.insert(dir, TreeEntry::new(EntryKind::Tree, oid));
        }

        self.database.store(&tree)
    }
}

fn strip_dir<'p>(path: &'p str, dir: &str) -> Option<&'p str> {
    path.strip_prefix(dir)?.strip_prefix('/')
}

/// Split additions into those below `dir` (prefix stripped) and the rest
pub fn partition_additions(additions: PathMap, dir: &str) -> (PathMap, PathMap) {
    let mut inside = PathMap::new();
    let mut outside = PathMap::new();

    for (path, oid) in additions {
        match strip_dir(&path, dir) {
            Some(nested) => {
                inside.insert(nested.to_string(), oid);
            }
            None => {
                outside.insert(path, oid);
            }
        }
    }

    (inside, outside)
}

/// Split removals into those below `dir` (prefix stripped) and the rest
pub fn partition_removals(
    removals: BTreeSet<String>,
    dir: &str,
) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut inside = BTreeSet::new();
    let mut outside = BTreeSet::new();

    for path in removals {
        match strip_dir(&path, dir) {
            Some(nested) => {
                inside.insert(nested.to_string());
            }
            None => {
                outside.insert(path);
            }
        }
    }

    (inside, outside)
}

/// Separate plain names from nested paths, grouping the latter by their first
/// directory with that directory stripped
pub fn group_by_first_segment(additions: PathMap) -> (PathMap, BTreeMap<String, PathMap>) {
    let mut direct = PathMap::new();
    let mut nested = BTreeMap::<String, PathMap>::new();

    for (path, oid) in additions {
        match path.split_once('/') {
            Some((dir, rest)) => {
                nested
                    .entry(dir.to_string())
                    .or_default()
                    .insert(rest.to_string(), oid);
            }
            None => {
                direct.insert(path, oid);
            }
        }
    }

    (direct, nested)
}
