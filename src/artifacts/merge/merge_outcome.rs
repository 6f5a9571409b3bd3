use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;

/// How a merge ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The giver is already part of the receiver's history
    AlreadyUpToDate,
    /// The branch moved to the giver commit without a new commit
    FastForward(ObjectId),
    /// A merge commit was created
    Merged(ObjectId),
    /// The merge stopped with these paths in conflict
    Conflicted(BTreeSet<String>),
}

impl MergeOutcome {
    pub fn is_conflicted(&self) -> bool {
        matches!(self, MergeOutcome::Conflicted(_))
    }
}
