//! Working tree status
//!
//! - `file_change`: Change categories and their labels
//! - `status_info`: Status report assembled from the HEAD → index and
//!   index → working tree diffs

pub mod file_change;
pub mod status_info;
