use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use colored::Colorize;

impl Repository {
    /// Create `name` at the current tip, or list branches when no name is given
    pub fn branch(&self, name: Option<&str>) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        match name {
            Some(name) => {
                let branch = BranchName::try_parse(name)?;
                self.refs().create_branch(&branch)?;
            }
            None => self.list_branches()?,
        }

        Ok(())
    }

    fn list_branches(&self) -> anyhow::Result<()> {
        let current = self.refs().current_branch().ok();

        for branch in self.refs().list_branches()? {
            if current.as_ref() == Some(&branch) {
                writeln!(self.writer(), "* {}", branch.as_ref().green())?;
            } else {
                writeln!(self.writer(), "  {branch}")?;
            }
        }

        Ok(())
    }

    /// Point HEAD at another branch; working tree and index are left as they are
    pub fn switch(&self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch = BranchName::try_parse(name)?;
        self.refs().set_head(&branch)?;

        writeln!(self.writer(), "Switched to branch '{branch}'")?;

        Ok(())
    }
}
