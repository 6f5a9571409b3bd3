//! Three-way diffing
//!
//! - `diff_source`: Diff endpoints (working tree, index, commit)
//! - `file_status`: Per-path status classification
//! - `three_way`: Status maps over two or three flat path mappings
//!
//! Diffing works on whole-file fingerprints only; there is no line-level
//! comparison.

pub mod diff_source;
pub mod file_status;
pub mod three_way;
