use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::VcsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Print the object's content
    Pretty,
    /// Print the object's kind
    Type,
}

impl Repository {
    pub fn cat_file(&self, object: &str, mode: CatFileMode) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let oid = Revision::parse(object)?.resolve(self)?;
        let (kind, payload) = self.database().get(&oid)?;

        match mode {
            CatFileMode::Type => writeln!(self.writer(), "{kind}")?,
            CatFileMode::Pretty => match kind {
                ObjectType::Blob | ObjectType::Commit => self.writer().write_all(&payload)?,
                ObjectType::Tree => {
                    let tree = Tree::deserialize(payload)
                        .map_err(|e| VcsError::corrupt_object(&oid, e.0))?;
                    if !tree.is_empty() {
                        writeln!(self.writer(), "{}", tree.display())?;
                    }
                }
            },
        }

        Ok(())
    }
}
