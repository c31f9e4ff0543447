use crate::areas::repository::Repository;
use anyhow::Context;
use std::path::PathBuf;

impl Repository {
    pub fn add_paths(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for path in paths {
            self.add(path)
                .with_context(|| format!("Unable to add {}", path.display()))?;
        }

        Ok(())
    }

    pub fn remove_paths(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for path in paths {
            let removed = self
                .remove(path)
                .with_context(|| format!("Unable to remove {}", path.display()))?;

            if removed {
                writeln!(self.writer(), "rm '{}'", self.workspace().normalize(path)?)?;
            } else {
                tracing::warn!(path = %path.display(), "path was not staged");
            }
        }

        Ok(())
    }
}
