//! Conflict marker blocks
//!
//! A path in conflict is replaced in the working tree by both versions,
//! receiver first:
//!
//! ```text
//! <<<<<<< HEAD
//! <receiver content>
//! =======
//! <giver content>
//! >>>>>>> <giver branch>
//! ```
//!
//! Each version is copied verbatim; a newline is only inserted when a
//! version does not end with one, so both can be recovered exactly.

pub const RECEIVER_MARKER: &str = "<<<<<<< HEAD";
pub const SEPARATOR_MARKER: &str = "=======";
pub const GIVER_MARKER: &str = ">>>>>>>";

pub fn conflict_block(receiver: &[u8], giver: &[u8], giver_branch: &str) -> Vec<u8> {
    let mut block = Vec::with_capacity(receiver.len() + giver.len() + 64);

    block.extend_from_slice(RECEIVER_MARKER.as_bytes());
    block.push(b'\n');
    push_version(&mut block, receiver);
    block.extend_from_slice(SEPARATOR_MARKER.as_bytes());
    block.push(b'\n');
    push_version(&mut block, giver);
    block.extend_from_slice(format!("{GIVER_MARKER} {giver_branch}\n").as_bytes());

    block
}

fn push_version(block: &mut Vec<u8>, content: &[u8]) {
    block.extend_from_slice(content);
    if !content.is_empty() && !content.ends_with(b"\n") {
        block.push(b'\n');
    }
}
