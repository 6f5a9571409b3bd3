//! Command implementations
//!
//! Commands are `Repository` methods in two groups:
//!
//! - `plumbing`: Direct access to objects, history and the index
//!   (cat-file, hash-object, ancestors, ls-index)
//! - `porcelain`: User-facing workflows (init, add, rm, commit, branch,
//!   checkout, merge, log, status)

pub mod plumbing;
pub mod porcelain;
