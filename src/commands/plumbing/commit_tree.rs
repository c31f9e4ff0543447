use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_type::ObjectType;

impl Repository {
    /// Create a commit for an existing tree and move the current branch to it
    pub fn commit_tree(
        &self,
        tree: &str,
        parent: Option<&str>,
        message: &str,
    ) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let tree_oid = Revision::parse(tree)?.resolve(self)?;
        let kind = self.database().object_type(&tree_oid)?;
        if kind != ObjectType::Tree {
            anyhow::bail!("object {tree_oid} is a {kind}, not a tree");
        }

        let parent = parent
            .map(|parent| Revision::parse(parent)?.resolve_commit(self))
            .transpose()?;

        let author = Author::load_from_env()?;
        let oid = self.create_commit(tree_oid, parent, author, message.trim().to_string())?;

        writeln!(self.writer(), "{oid}")?;

        Ok(())
    }
}
