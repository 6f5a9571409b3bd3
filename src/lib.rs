//! twig: a minimal content-addressed version-control engine
//!
//! The crate is organised the same way as the repository it manages:
//!
//! - `areas`: the persistent parts of a repository (object database, staging
//!   index, refs, working tree, configuration) and the `Repository` session
//!   object that ties them together
//! - `artifacts`: objects, tree building, diffing, merging and the other
//!   algorithms operating on those areas
//! - `commands`: the porcelain and plumbing operations exposed on `Repository`

/// Trace ancestor walks, diff classification and merge transitions
///
/// Compiled in only with the `debug_merge` feature flag
/// (`cargo build --features debug_merge`).
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(any(feature = "debug_merge"))]
        {
            eprintln!($($arg)*);
        }
    };
}

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod error;
