use crate::areas::repository::Repository;
use crate::artifacts::diff::tree_diff::{ChangeKind, ChangeSet};
use colored::Colorize;

// Terminology:
// - staged changes: index records that differ from the last commit
// - working tree changes: files on disk that differ from the last commit with
//   the staged records applied on top (new, modified or deleted)
impl Repository {
    pub fn status(&self, porcelain: bool) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let staged = self.diff_index_vs_head()?;
        let working = self.diff_workspace_vs_tracked()?;

        if porcelain {
            self.print_porcelain_status(&staged, &working)
        } else {
            self.print_long_status(&staged, &working)
        }
    }

    fn print_porcelain_status(&self, staged: &ChangeSet, working: &ChangeSet) -> anyhow::Result<()> {
        for (path, kind) in staged {
            writeln!(self.writer(), "{}  {path}", kind.status_char())?;
        }

        for (path, kind) in working {
            match kind {
                ChangeKind::New => writeln!(self.writer(), "?? {path}")?,
                _ => writeln!(self.writer(), " {} {path}", kind.status_char())?,
            }
        }

        Ok(())
    }

    fn print_long_status(&self, staged: &ChangeSet, working: &ChangeSet) -> anyhow::Result<()> {
        let branch = self.refs().current_branch()?;
        writeln!(self.writer(), "On branch {branch}")?;

        if staged.is_empty() && working.is_empty() {
            writeln!(self.writer(), "nothing to commit, working tree clean")?;
            return Ok(());
        }

        if !staged.is_empty() {
            writeln!(self.writer(), "\nChanges to be committed:")?;
            for (path, kind) in staged {
                let line = format!("{:<10}{path}", format!("{}:", kind.label()));
                writeln!(self.writer(), "\t{}", line.green())?;
            }
        }

        if !working.is_empty() {
            writeln!(self.writer(), "\nChanges in working tree:")?;
            for (path, kind) in working {
                let line = format!("{:<10}{path}", format!("{}:", kind.label()));
                writeln!(self.writer(), "\t{}", line.red())?;
            }
        }

        Ok(())
    }
}
