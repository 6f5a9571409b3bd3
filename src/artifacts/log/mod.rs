//! Commit history
//!
//! Each commit records at most one parent, so a history is a chain walked
//! from a commit back to the root.

pub mod commit_graph;

use crate::artifacts::objects::object_id::ObjectId;
use crate::error::TwigError;
use std::collections::HashSet;

/// Walk parent pointers from `start` to the root, inclusive, newest first
///
/// `parent_of` returns `None` for the root commit. A repeated commit means
/// the stored history is corrupt.
pub fn walk_ancestors<ParentLoaderFn>(
    start: &ObjectId,
    parent_of: ParentLoaderFn,
) -> anyhow::Result<Vec<ObjectId>>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<ObjectId>>,
{
    let mut ancestors = vec![start.clone()];
    let mut seen = HashSet::from([start.clone()]);
    let mut current = start.clone();

    while let Some(parent) = parent_of(&current)? {
        if !seen.insert(parent.clone()) {
            return Err(TwigError::MalformedObject {
                oid: current,
                reason: format!("history loops back to {parent}"),
            }
            .into());
        }

        ancestors.push(parent.clone());
        current = parent;
    }

    debug_log!("ancestors of {}: {} commits", start, ancestors.len());

    Ok(ancestors)
}
