use crate::areas::database::Database;
use crate::artifacts::objects::entry_kind::EntryKind;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::tree::PathMap;

/// Every blob reachable from `tree_oid`, keyed by its full path
pub fn flatten(database: &Database, tree_oid: &ObjectId) -> anyhow::Result<PathMap> {
    let mut files = PathMap::new();
    flatten_into(database, tree_oid, "", &mut files)?;

    Ok(files)
}

fn flatten_into(
    database: &Database,
    tree_oid: &ObjectId,
    prefix: &str,
    files: &mut PathMap,
) -> anyhow::Result<()> {
    let tree = database.parse_object_as_tree(tree_oid)?;

    for (name, entry) in tree.into_entries() {
        let path = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };

        match entry.kind {
            EntryKind::Blob => {
                files.insert(path, entry.oid);
            }
            EntryKind::Tree => flatten_into(database, &entry.oid, &path, files)?,
        }
    }

    Ok(())
}
