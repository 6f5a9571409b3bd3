//! Plumbing commands
//!
//! - `ancestors`: List the history of HEAD, newest first
//! - `cat_file`: Print a stored object
//! - `hash_object`: Fingerprint a file and optionally store it
//! - `ls_index`: Dump the raw index entries

pub mod ancestors;
pub mod cat_file;
pub mod hash_object;
pub mod ls_index;
