use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use anyhow::Context;
use std::path::Path;

impl Repository {
    pub fn hash_object(&self, file: &Path, write: bool) -> anyhow::Result<()> {
        let content =
            std::fs::read(file).with_context(|| format!("Unable to read {}", file.display()))?;
        let blob = Blob::from(content);

        let oid = if write {
            self.ensure_initialized()?;
            self.database().store(&blob)?
        } else {
            blob.object_id()
        };

        writeln!(self.writer(), "{oid}")?;

        Ok(())
    }
}
