//! Lowest common ancestor finder
//!
//! Histories here are single-parent chains, so the ancestors of any commit
//! form one list ending at the root commit. Two such lists share a common
//! tail once the histories converge. Aligning both lists at the root and
//! scanning forward, the last position at which they still agree is the
//! lowest common ancestor.
//!
//! ```text
//! c0 ── c1 ── c2 ── c3
//!        \
//!         c4
//!
//! root-first A = [c0, c1, c2, c3]
//! root-first B = [c0, c1, c4]
//!                      ^ last agreement: c1
//! ```
//!
//! Both the ancestor walks and the scan are linear in history depth.

use crate::artifacts::log::walk_ancestors;
use crate::artifacts::objects::object_id::ObjectId;

/// Finds the merge base of two commits
///
/// # Type Parameters
///
/// * `ParentLoaderFn` - returns the parent of a commit, `None` for the root.
///   Any commit store works, which keeps the finder testable in memory.
#[derive(Debug, Clone)]
pub struct LcaFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<ObjectId>>,
{
    parent_loader: ParentLoaderFn,
}

impl<ParentLoaderFn> LcaFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<ObjectId>>,
{
    pub fn new(parent_loader: ParentLoaderFn) -> Self {
        Self { parent_loader }
    }

    /// Lowest commit present in both histories, `None` when they never meet
    pub fn find(&self, first: &ObjectId, second: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        let first_ancestors = walk_ancestors(first, &self.parent_loader)?;
        let second_ancestors = walk_ancestors(second, &self.parent_loader)?;

        let lca = first_ancestors
            .iter()
            .rev()
            .zip(second_ancestors.iter().rev())
            .take_while(|(a, b)| a == b)
            .last()
            .map(|(common, _)| common.clone());

        debug_log!(
            "lca({}, {}) = {:?}",
            first.to_short_oid(),
            second.to_short_oid(),
            lca.as_ref().map(ObjectId::to_short_oid)
        );

        Ok(lca)
    }
}
