use crate::areas::ignore::Ignore;
use crate::areas::workspace::{LeafKind, Workspace};
use crate::artifacts::diff::tree_diff::{ChangeKind, ChangeSet};
use crate::artifacts::objects::object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

#[derive(new)]
pub struct Inspector<'r> {
    workspace: &'r Workspace,
    ignore: &'r dyn Ignore,
}

impl Inspector<'_> {
    /// Address a file's content would get as a blob, without storing it
    pub fn hash_file(&self, path: &str) -> Result<ObjectId> {
        let content = self.workspace.read_file(path)?;
        Ok(object::hash_frame(&object::frame(ObjectType::Blob, &content)))
    }

    fn try_hash_file(&self, path: &str) -> Option<ObjectId> {
        match self.hash_file(path) {
            Ok(oid) => Some(oid),
            Err(e) => {
                tracing::warn!(path, error = %e, "skipping unreadable file");
                None
            }
        }
    }

    /// Classify working tree files against `baseline`
    ///
    /// Files without a baseline record are `New`, files hashing differently are
    /// `Modified`, and baseline records with nothing on disk are `Deleted`.
    /// Unchanged files are omitted. Recorded files the walk leaves out, such as
    /// an explicitly staged hidden file, are still compared.
    pub fn compare_workspace(&self, baseline: &BTreeMap<String, ObjectId>) -> Result<ChangeSet> {
        let mut changes = ChangeSet::new();

        let files = self
            .workspace
            .walk("", self.ignore)?
            .into_iter()
            .filter(|leaf| leaf.kind == LeafKind::File)
            .map(|leaf| leaf.path)
            .collect::<BTreeSet<_>>();

        for path in &files {
            let Some(oid) = self.try_hash_file(path) else {
                continue;
            };

            match baseline.get(path) {
                None => {
                    changes.insert(path.clone(), ChangeKind::New);
                }
                Some(recorded) if recorded != &oid => {
                    changes.insert(path.clone(), ChangeKind::Modified);
                }
                Some(_) => {}
            }
        }

        for (path, recorded) in baseline {
            if !self.workspace.exists(path) {
                changes.insert(path.clone(), ChangeKind::Deleted);
            } else if !files.contains(path)
                && self.workspace.is_file(path)
                && self.try_hash_file(path).is_some_and(|oid| &oid != recorded)
            {
                changes.insert(path.clone(), ChangeKind::Modified);
            }
        }

        Ok(changes)
    }
}
