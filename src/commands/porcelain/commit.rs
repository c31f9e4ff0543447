use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Author;
use crate::errors::VcsError;

impl Repository {
    pub fn commit_command(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let author = Author::load_from_env()?;
        let message = message.trim().to_string();

        let oid = match self.commit(author, message) {
            Ok(oid) => oid,
            Err(VcsError::NoChangesToCommit) => {
                writeln!(self.writer(), "No changes to commit")?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let branch = self.refs().current_branch()?;
        let commit = self.database().load_commit(&oid)?;
        let is_root = match commit.parent() {
            Some(_) => "",
            None => " (root-commit)",
        };

        writeln!(
            self.writer(),
            "[{branch}{is_root} {}] {}",
            oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
