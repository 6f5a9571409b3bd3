//! Typed failures raised by repository operations
//!
//! Commands return `anyhow::Result`, but every rule violation and integrity
//! failure is raised as a `TwigError` so callers can tell them apart with
//! `downcast_ref::<TwigError>()`. Plain I/O failures stay `anyhow` errors with
//! the offending path attached as context.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;

#[derive(Debug, thiserror::Error)]
pub enum TwigError {
    // integrity
    #[error("object {0} not found in the object database")]
    ObjectNotFound(ObjectId),

    #[error("object {oid} is malformed: {reason}")]
    MalformedObject { oid: ObjectId, reason: String },

    #[error("index file is malformed: {0}")]
    MalformedIndex(String),

    // preconditions
    #[error("not a twig repository (or any of the parent directories)")]
    NotARepository,

    #[error("a twig repository already exists in {0}")]
    AlreadyInitialized(String),

    #[error("merges are unsupported in detached HEAD state")]
    DetachedHead,

    #[error("branch {0} does not exist")]
    NoSuchBranch(String),

    #[error("a branch named {0} already exists")]
    BranchExists(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("cannot delete branch {0} while it is checked out")]
    DeleteCurrentBranch(String),

    #[error("cannot merge a branch with itself")]
    SelfMerge,

    #[error("cannot perform this command until the merge in progress is resolved")]
    MergeInProgress,

    #[error("unresolved conflicts in: {}", join_paths(.0))]
    UnresolvedConflicts(BTreeSet<String>),

    #[error("not a branch name or a commit id: {0}")]
    UnknownRevision(String),

    #[error("short object id {0} is ambiguous")]
    AmbiguousRevision(String),

    #[error("pathspec {0} did not match any tracked file")]
    PathNotTracked(String),
}

impl TwigError {
    /// Integrity failures abort the command; everything else is a rejected
    /// precondition that left the repository untouched.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            TwigError::ObjectNotFound(_)
                | TwigError::MalformedObject { .. }
                | TwigError::MalformedIndex(_)
        )
    }
}

fn join_paths(paths: &BTreeSet<String>) -> String {
    paths.iter().cloned().collect::<Vec<_>>().join(", ")
}
