#![allow(dead_code)]

pub mod command;
pub mod file;

/// Raw content of a file in the working tree
pub fn read_file(dir: &std::path::Path, path: &str) -> String {
    std::fs::read_to_string(dir.join(path))
        .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
}

/// Fingerprint the branch ref or detached HEAD currently points at
pub fn head_oid(dir: &std::path::Path) -> String {
    let head = read_file(dir, ".twig/HEAD");

    match head.trim().strip_prefix("ref: ") {
        Some(ref_path) => read_file(dir, &format!(".twig/{}", ref_path))
            .trim()
            .to_string(),
        None => head.trim().to_string(),
    }
}

pub fn branch_oid(dir: &std::path::Path, branch: &str) -> String {
    read_file(dir, &format!(".twig/refs/heads/{}", branch))
        .trim()
        .to_string()
}

/// Number of stored objects
pub fn object_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir.join(".twig/objects"))
        .map(|entries| entries.count())
        .unwrap_or_default()
}
