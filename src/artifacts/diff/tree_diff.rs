use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Result, VcsError};
use bitflags::bitflags;
use derive_new::new;
use std::collections::BTreeMap;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DiffFilter: u32 {
        const ADDED = 0b0001;
        const DELETED = 0b0010;
        const MODIFIED = 0b0100;
    }
}

impl DiffFilter {
    /// Parse a `--diff-filter` value such as `AM`
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c {
                'A' => filter |= Self::ADDED,
                'D' => filter |= Self::DELETED,
                'M' => filter |= Self::MODIFIED,
                _ => return None,
            }
        }

        Some(filter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    New,
    Modified,
    Deleted,
}

impl ChangeKind {
    pub fn matches_filter(&self, filter: DiffFilter) -> bool {
        match self {
            ChangeKind::New => filter.contains(DiffFilter::ADDED),
            ChangeKind::Deleted => filter.contains(DiffFilter::DELETED),
            ChangeKind::Modified => filter.contains(DiffFilter::MODIFIED),
        }
    }

    pub fn status_char(&self) -> char {
        match self {
            ChangeKind::New => 'A',
            ChangeKind::Deleted => 'D',
            ChangeKind::Modified => 'M',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::New => "new",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Changed paths and how they changed, in path order
pub type ChangeSet = BTreeMap<String, ChangeKind>;

/// Flat `path → blob id` view of a tree
pub type FlatTree = BTreeMap<String, ObjectId>;

/// Classify every path of `new` against `old`; unchanged paths are omitted
pub fn compare(old: &FlatTree, new: &FlatTree) -> ChangeSet {
    let mut changes = ChangeSet::new();

    for (path, oid) in new {
        match old.get(path) {
            None => {
                changes.insert(path.clone(), ChangeKind::New);
            }
            Some(previous) if previous != oid => {
                changes.insert(path.clone(), ChangeKind::Modified);
            }
            Some(_) => {}
        }
    }

    for path in old.keys().filter(|path| !new.contains_key(*path)) {
        changes.insert(path.clone(), ChangeKind::Deleted);
    }

    changes
}

/// Keep only the changes selected by `filter`
pub fn filter_changes(changes: ChangeSet, filter: DiffFilter) -> ChangeSet {
    changes
        .into_iter()
        .filter(|(_, kind)| kind.matches_filter(filter))
        .collect()
}

#[derive(Debug, new)]
pub struct TreeDiff<'r> {
    database: &'r Database,
}

impl TreeDiff<'_> {
    /// Compare two trees, or commits through their trees
    pub fn compare_oids(&self, old: &ObjectId, new: &ObjectId) -> Result<ChangeSet> {
        let old = self.flatten(old)?;
        let new = self.flatten(new)?;

        Ok(compare(&old, &new))
    }

    /// Resolve a commit to its tree; a tree resolves to itself
    pub fn resolve_tree(&self, oid: &ObjectId) -> Result<ObjectId> {
        match self.database.object_type(oid)? {
            ObjectType::Tree => Ok(oid.clone()),
            ObjectType::Commit => Ok(self.database.load_commit(oid)?.tree_oid().clone()),
            ObjectType::Blob => Err(VcsError::corrupt_object(oid, "expected a commit or a tree")),
        }
    }

    /// Every blob reachable from a tree or commit, keyed by its full path
    pub fn flatten(&self, oid: &ObjectId) -> Result<FlatTree> {
        let tree_oid = self.resolve_tree(oid)?;
        let mut flat = FlatTree::new();

        self.flatten_into(&tree_oid, "", &mut flat)?;

        Ok(flat)
    }

    fn flatten_into(&self, tree_oid: &ObjectId, prefix: &str, flat: &mut FlatTree) -> Result<()> {
        for entry in self.database.load_tree(tree_oid)?.into_entries() {
            let path = if prefix.is_empty() {
                entry.name.clone()
            } else {
                format!("{prefix}/{}", entry.name)
            };

            if entry.is_tree() {
                self.flatten_into(&entry.oid, &path, flat)?;
            } else {
                flat.insert(path, entry.oid);
            }
        }

        Ok(())
    }
}
