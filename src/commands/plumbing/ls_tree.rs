use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::diff::tree_diff::TreeDiff;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// List a tree, or the tree of a commit
    pub fn ls_tree(&self, object: &str, recursive: bool) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let oid = Revision::parse(object)?.resolve(self)?;
        let tree_oid = TreeDiff::new(self.database()).resolve_tree(&oid)?;

        self.print_tree(&tree_oid, "", recursive)
    }

    fn print_tree(&self, tree_oid: &ObjectId, prefix: &str, recursive: bool) -> anyhow::Result<()> {
        let tree = self.database().load_tree(tree_oid)?;

        for entry in tree.entries() {
            let path = if prefix.is_empty() {
                entry.name.clone()
            } else {
                format!("{prefix}/{}", entry.name)
            };

            if recursive && entry.is_tree() {
                self.print_tree(&entry.oid, &path, recursive)?;
            } else {
                writeln!(
                    self.writer(),
                    "{} {} {}\t{}",
                    entry.mode,
                    entry.object_type(),
                    entry.oid,
                    path
                )?;
            }
        }

        Ok(())
    }
}
