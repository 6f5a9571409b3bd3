//! Branch names and revision lookup

pub mod branch_name;
pub mod revision;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

/// Shortest abbreviated fingerprint accepted as a revision
pub const MIN_SHORT_OID_LENGTH: usize = 4;
