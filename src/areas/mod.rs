//! Persistent repository areas
//!
//! - `config`: Commit identity read from `.twig/config`
//! - `database`: Content-addressed object store
//! - `index`: Staging area with conflict stages and pending changes
//! - `refs`: HEAD, branches and the merge-in-progress marker
//! - `repository`: Session object tying the areas together
//! - `workspace`: Working tree enumeration and materialization

pub mod config;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
