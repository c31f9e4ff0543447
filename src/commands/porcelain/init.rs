use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            writeln!(
                self.writer(),
                "Reinitialized existing repository in {}",
                self.control_path().display()
            )?;
            return Ok(());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .vcs/objects directory")?;

        self.refs()
            .init()
            .context("Failed to create initial HEAD reference")?;

        let index = self.index()?;
        if !index.path().exists() {
            fs::write(index.path(), b"").context("Failed to create .vcs/index file")?;
        }

        writeln!(
            self.writer(),
            "Initialized empty repository in {}",
            self.control_path().display()
        )?;

        Ok(())
    }
}
