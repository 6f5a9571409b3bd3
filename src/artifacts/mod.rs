//! Data structures and algorithms
//!
//! - `branch`: Branch names and revision lookup
//! - `diff`: Diff endpoints and three-way file status classification
//! - `index`: Index stages and on-disk checksum
//! - `log`: Commit graph traversal
//! - `merge`: Lowest common ancestor, conflict blocks and merge outcomes
//! - `objects`: Object types (blob, tree, commit)
//! - `status`: Working tree status report
//! - `tree`: Tree building from sparse change sets and tree flattening

pub mod branch;
pub mod diff;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
pub mod tree;
