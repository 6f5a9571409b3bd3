//! Index entry keys
//!
//! An entry is keyed by `(path, stage)`. Stage 0 holds the resolved version;
//! stages 1 to 3 hold the base, giver and receiver versions of a path whose
//! merge conflict has not been resolved yet. A path never has both.

use crate::artifacts::objects::object_id::ObjectId;
use crate::error::TwigError;
use derive_new::new;

/// Merge stage of an index entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Unconflicted entry (stage 0)
    Normal,
    /// Common ancestor version during a conflict (stage 1)
    Base,
    /// Version from the branch being merged in (stage 2)
    Giver,
    /// Version from the checked-out branch (stage 3)
    Receiver,
}

impl Stage {
    pub const CONFLICT_STAGES: [Stage; 3] = [Stage::Base, Stage::Giver, Stage::Receiver];

    pub fn as_u8(&self) -> u8 {
        match self {
            Stage::Normal => 0,
            Stage::Base => 1,
            Stage::Giver => 2,
            Stage::Receiver => 3,
        }
    }

    pub fn from_u8(n: u8) -> anyhow::Result<Self> {
        match n {
            0 => Ok(Stage::Normal),
            1 => Ok(Stage::Base),
            2 => Ok(Stage::Giver),
            3 => Ok(Stage::Receiver),
            _ => Err(TwigError::MalformedIndex(format!("invalid stage: {}", n)).into()),
        }
    }

    pub fn is_conflict(&self) -> bool {
        *self != Stage::Normal
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// A single `(path, stage) → fingerprint` record
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub path: String,
    pub stage: Stage,
    pub oid: ObjectId,
}
