//! Porcelain commands
//!
//! - `init`: Create a repository with its root commit
//! - `add`: Stage files, resolving conflicts on them
//! - `rm`: Unstage and delete files
//! - `commit`: Record the staged changes
//! - `branch`: Create, delete or list branches
//! - `checkout`: Switch to a branch or a detached commit
//! - `merge`: Merge a branch into the current one
//! - `log`: Show history from HEAD
//! - `status`: Show staged, unstaged, untracked and conflicted files

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod rm;
pub mod status;
