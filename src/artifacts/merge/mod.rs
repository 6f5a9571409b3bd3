//! Merge support
//!
//! - `lca`: Lowest common ancestor of two commits, used as the merge base
//! - `conflict`: Conflict marker blocks written into the working tree
//! - `merge_outcome`: Terminal results of a merge

pub mod conflict;
pub mod lca;
pub mod merge_outcome;
