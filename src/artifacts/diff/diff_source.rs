use crate::artifacts::objects::object_id::ObjectId;

/// One side of a diff, resolved to a flat path → fingerprint mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSource {
    /// Live files on disk
    WorkingTree,
    /// Staged content: each path's stage-0 entry, else its receiver stage
    Index,
    /// Flattened tree of a commit
    Commit(ObjectId),
}

impl std::fmt::Display for DiffSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffSource::WorkingTree => write!(f, "working tree"),
            DiffSource::Index => write!(f, "index"),
            DiffSource::Commit(oid) => write!(f, "commit {}", oid.to_short_oid()),
        }
    }
}
