//! Object types and operations
//!
//! Every piece of stored content is an object identified by the SHA-1 of its
//! raw bytes. There are three kinds:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (`<kind> <fingerprint> <name>` lines)
//! - **Commit**: Snapshot record (tree, parent, author, committer, message)
//!
//! Objects are stored verbatim; unlike git there is no `<type> <size>\0`
//! header, so the fingerprint of a blob is the digest of the file itself.

pub mod blob;
pub mod commit;
pub mod entry_kind;
pub mod object;
pub mod object_id;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
