//! Tree reconstruction and flattening
//!
//! - `builder`: rebuilds a tree from a base tree plus sparse additions and
//!   removals, touching only the directory levels the changes reach
//! - `flatten`: projects a tree into a flat path → fingerprint mapping

pub mod builder;
pub mod flatten;

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

/// Flat mapping from `/`-separated file path to blob fingerprint
pub type PathMap = BTreeMap<String, ObjectId>;
