use crate::artifacts::objects::object_id::ObjectId;

/// Relationship between the receiver, giver and base versions of one path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    Same,
    Added,
    Removed,
    Modified,
    Conflict,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Same => "same",
            Status::Added => "added",
            Status::Removed => "removed",
            Status::Modified => "modified",
            Status::Conflict => "conflict",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classified versions of one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub status: Status,
    pub receiver: Option<ObjectId>,
    pub giver: Option<ObjectId>,
    pub base: Option<ObjectId>,
}

impl FileStatus {
    pub fn classify(
        receiver: Option<ObjectId>,
        giver: Option<ObjectId>,
        base: Option<ObjectId>,
    ) -> Self {
        let status = match (&receiver, &giver) {
            (Some(r), Some(g)) if r == g => Status::Same,
            (Some(r), Some(g)) => {
                if base.as_ref() != Some(r) && base.as_ref() != Some(g) {
                    Status::Conflict
                } else {
                    Status::Modified
                }
            }
            (Some(_), None) | (None, Some(_)) => match base {
                None => Status::Added,
                Some(_) => Status::Removed,
            },
            (None, None) => match base {
                None => Status::Same,
                Some(_) => Status::Removed,
            },
        };

        FileStatus {
            status,
            receiver,
            giver,
            base,
        }
    }

    /// Content the path ends up with once the diff is applied
    ///
    /// The giver's version wins whenever it exists, otherwise the receiver's
    /// is kept. `Removed` and `Conflict` have no single resolved version.
    pub fn resolved(&self) -> Option<&ObjectId> {
        match self.status {
            Status::Same | Status::Modified | Status::Added => {
                self.giver.as_ref().or(self.receiver.as_ref())
            }
            Status::Removed | Status::Conflict => None,
        }
    }
}
