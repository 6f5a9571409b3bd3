use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::branch::MIN_SHORT_OID_LENGTH;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::TwigError;

/// A checkout target
///
/// Branch names win over fingerprints: `abcd` names the branch `abcd` if it
/// exists and is only tried as an abbreviated fingerprint otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Branch(BranchName, ObjectId),
    Commit(ObjectId),
}

impl Revision {
    pub fn resolve(target: &str, refs: &Refs, database: &Database) -> anyhow::Result<Self> {
        if let Ok(branch_name) = BranchName::try_parse(target.to_string())
            && let Some(oid) = refs.read_branch(&branch_name)?
        {
            return Ok(Revision::Branch(branch_name, oid));
        }

        if !Self::looks_like_oid(target) {
            return Err(TwigError::UnknownRevision(target.to_string()).into());
        }

        let candidates = database.find_objects_by_prefix(target)?;
        let commits = candidates
            .into_iter()
            .filter(|oid| database.parse_object_as_commit(oid).is_ok())
            .collect::<Vec<_>>();

        match commits.as_slice() {
            [] => Err(TwigError::UnknownRevision(target.to_string()).into()),
            [oid] => Ok(Revision::Commit(oid.clone())),
            _ => Err(TwigError::AmbiguousRevision(target.to_string()).into()),
        }
    }

    pub fn commit_oid(&self) -> &ObjectId {
        match self {
            Revision::Branch(_, oid) | Revision::Commit(oid) => oid,
        }
    }

    fn looks_like_oid(target: &str) -> bool {
        (MIN_SHORT_OID_LENGTH..=OBJECT_ID_LENGTH).contains(&target.len())
            && target.chars().all(|c| c.is_ascii_hexdigit())
    }
}
