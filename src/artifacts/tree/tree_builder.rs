use crate::areas::database::Database;
use crate::areas::ignore::Ignore;
use crate::areas::workspace::{Leaf, LeafKind, Workspace};
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::errors::{Result, VcsError};
use derive_new::new;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Decides the entry mode of a direct tree entry from its full path and id
pub type ModeResolver<'a> = dyn Fn(&str, &ObjectId) -> Result<EntryMode> + 'a;

#[derive(new)]
pub struct TreeBuilder<'r> {
    database: &'r Database,
}

impl TreeBuilder<'_> {
    /// Build and store the tree described by flat `path → id` records
    ///
    /// Records are grouped by their first path segment. A group with several
    /// members, or whose member lies deeper, becomes a sub-tree; a lone record
    /// becomes a direct entry whose mode comes from `modes`. A directory record
    /// sitting next to files of its own directory is dropped in favour of them.
    pub fn build_from_paths(
        &self,
        records: &BTreeMap<String, ObjectId>,
        ignore: &dyn Ignore,
        modes: &ModeResolver<'_>,
    ) -> Result<ObjectId> {
        let records = records
            .iter()
            .filter(|(path, _)| !ignore.is_ignored(Path::new(path.as_str())))
            .map(|(path, oid)| (path.as_str(), oid))
            .collect::<Vec<_>>();

        self.build_level("", &records, modes)
    }

    fn build_level(
        &self,
        prefix: &str,
        records: &[(&str, &ObjectId)],
        modes: &ModeResolver<'_>,
    ) -> Result<ObjectId> {
        let mut groups: BTreeMap<&str, Vec<(&str, &ObjectId)>> = BTreeMap::new();
        for &(path, oid) in records {
            let (head, rest) = path.split_once('/').unwrap_or((path, ""));
            groups.entry(head).or_default().push((rest, oid));
        }

        let mut entries = Vec::with_capacity(groups.len());
        for (name, members) in groups {
            let full_path = join(prefix, name);

            let entry = match members.as_slice() {
                [("", oid)] => {
                    TreeEntry::new(modes(&full_path, oid)?, name.to_string(), (*oid).clone())
                }
                _ => {
                    let children = members
                        .into_iter()
                        .filter(|(rest, _)| !rest.is_empty())
                        .collect::<Vec<_>>();
                    let oid = self.build_level(&full_path, &children, modes)?;
                    TreeEntry::new(EntryMode::Directory, name.to_string(), oid)
                }
            };
            entries.push(entry);
        }

        let oid = self.database.store(&Tree::new(entries))?;
        tracing::trace!(prefix, %oid, "built tree from records");

        Ok(oid)
    }

    /// Build and store the tree of a working-tree directory
    pub fn build_from_directory(
        &self,
        workspace: &Workspace,
        path: &str,
        ignore: &dyn Ignore,
    ) -> Result<ObjectId> {
        if !workspace.is_dir(path) {
            return Err(VcsError::InvalidPath(workspace.absolute(path)));
        }

        let leaves = workspace.walk(path, ignore)?;
        let hashed = self.fold(workspace, leaves)?;

        hashed
            .into_iter()
            .find(|(leaf, _)| leaf.path == path)
            .map(|(_, oid)| oid)
            .ok_or_else(|| VcsError::PathNotReadable(workspace.absolute(path)))
    }

    /// Store every walked leaf bottom-up: a blob per file, a tree per directory
    ///
    /// `leaves` must list children before their parent, as `Workspace::walk`
    /// does. Files that cannot be read are logged and left out.
    pub fn fold(&self, workspace: &Workspace, leaves: Vec<Leaf>) -> Result<Vec<(Leaf, ObjectId)>> {
        let mut pending: HashMap<String, Vec<TreeEntry>> = HashMap::new();
        let mut hashed = Vec::with_capacity(leaves.len());

        for leaf in leaves {
            let (parent, name) = split_parent(&leaf.path);

            let (mode, oid) = match leaf.kind {
                LeafKind::File => {
                    let content = match workspace.read_file(&leaf.path) {
                        Ok(content) => content,
                        Err(e) => {
                            tracing::warn!(path = %leaf.path, error = %e, "skipping unreadable file");
                            continue;
                        }
                    };
                    let mode = EntryMode::from_executable(workspace.is_executable(&leaf.path));
                    (mode, self.database.put(ObjectType::Blob, &content)?)
                }
                LeafKind::Directory => {
                    let children = pending.remove(&leaf.path).unwrap_or_default();
                    (EntryMode::Directory, self.database.store(&Tree::new(children))?)
                }
            };

            if !leaf.path.is_empty() {
                pending
                    .entry(parent.to_string())
                    .or_default()
                    .push(TreeEntry::new(mode, name.to_string(), oid.clone()));
            }
            hashed.push((leaf, oid));
        }

        Ok(hashed)
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

fn split_parent(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}
