//! Index file format
//!
//! The index (staging area) records, per path, the fingerprint staged for the
//! next commit, or up to three fingerprints while a merge conflict on that
//! path is unresolved. It also carries the pending additions and removals
//! that the next commit folds into its tree.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! TWIX 1
//! E <stage> <fingerprint> <path>    one per (path, stage), sorted
//! A <fingerprint> <path>            pending additions, sorted
//! R <path>                          pending removals, sorted
//! checksum <sha1 of all preceding bytes>
//! ```
//!
//! A missing or empty file is an empty index.

pub mod checksum;
pub mod index_entry;

/// Magic signature identifying index files
pub const SIGNATURE: &str = "TWIX";

/// Index file format version
pub const VERSION: u32 = 1;

/// Prefix of the trailing checksum line
pub const CHECKSUM_PREFIX: &str = "checksum ";
