use crate::areas::repository::Repository;

impl Repository {
    pub fn write_tree_command(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let oid = self.write_tree()?;
        writeln!(self.writer(), "{oid}")?;

        Ok(())
    }
}
