use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::diff::text_diff::{self, LineChange, TextEdit};
use crate::artifacts::diff::tree_diff::{self, ChangeKind, DiffFilter, TreeDiff};
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;

#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    /// Staged changes against the last commit instead of the working tree
    pub cached: bool,
    pub filter: Option<DiffFilter>,
    /// Only print the status letter and path of each change
    pub name_status: bool,
    /// Zero revisions, or two to compare against each other
    pub revisions: Vec<String>,
}

impl Repository {
    pub fn diff(&self, opts: &DiffOptions) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        match opts.revisions.as_slice() {
            [] if opts.cached => self.diff_head_index(opts),
            [] => self.diff_index_workspace(opts),
            [old, new] => self.diff_revisions(old, new, opts),
            _ => anyhow::bail!("expected either no revisions or exactly two"),
        }
    }

    fn diff_index_workspace(&self, opts: &DiffOptions) -> anyhow::Result<()> {
        let tracked = self.tracked_files()?;
        // untracked files have nothing to compare against
        let changes = self
            .diff_workspace_vs_tracked()?
            .into_iter()
            .filter(|(_, kind)| *kind != ChangeKind::New)
            .collect();

        for (path, kind) in Self::apply_filter(changes, opts.filter) {
            let edits = match kind {
                ChangeKind::Deleted => self.render_text_diff(tracked.get(&path), None)?,
                _ => {
                    let old = self.render_blob(tracked.get(&path))?;
                    let new = String::from_utf8_lossy(&self.workspace().read_file(&path)?)
                        .into_owned();
                    text_diff::positional_diff(&old, &new)
                }
            };

            self.print_change(&path, kind, &edits, opts)?;
        }

        Ok(())
    }

    fn diff_head_index(&self, opts: &DiffOptions) -> anyhow::Result<()> {
        let head = self.head_files()?;
        let staged = self.staged_files()?;

        for (path, kind) in Self::apply_filter(self.diff_index_vs_head()?, opts.filter) {
            let edits = self.render_text_diff(head.get(&path), staged.get(&path))?;
            self.print_change(&path, kind, &edits, opts)?;
        }

        Ok(())
    }

    fn diff_revisions(&self, old: &str, new: &str, opts: &DiffOptions) -> anyhow::Result<()> {
        let old = Revision::parse(old)?.resolve(self)?;
        let new = Revision::parse(new)?.resolve(self)?;

        let tree_diff = TreeDiff::new(self.database());
        let old_files = tree_diff.flatten(&old)?;
        let new_files = tree_diff.flatten(&new)?;

        for (path, kind) in Self::apply_filter(self.diff_trees(&old, &new)?, opts.filter) {
            let edits = self.render_text_diff(old_files.get(&path), new_files.get(&path))?;
            self.print_change(&path, kind, &edits, opts)?;
        }

        Ok(())
    }

    fn render_blob(&self, oid: Option<&ObjectId>) -> anyhow::Result<String> {
        match oid {
            Some(oid) => Ok(self.database().load_blob(oid)?.text()),
            None => Ok(String::new()),
        }
    }

    fn apply_filter(
        changes: tree_diff::ChangeSet,
        filter: Option<DiffFilter>,
    ) -> tree_diff::ChangeSet {
        match filter {
            Some(filter) => tree_diff::filter_changes(changes, filter),
            None => changes,
        }
    }

    fn print_change(
        &self,
        path: &str,
        kind: ChangeKind,
        edits: &[TextEdit],
        opts: &DiffOptions,
    ) -> anyhow::Result<()> {
        if opts.name_status {
            writeln!(self.writer(), "{}\t{path}", kind.status_char())?;
            return Ok(());
        }

        let (old_path, new_path) = match kind {
            ChangeKind::New => ("/dev/null".to_string(), format!("b/{path}")),
            ChangeKind::Deleted => (format!("a/{path}"), "/dev/null".to_string()),
            ChangeKind::Modified => (format!("a/{path}"), format!("b/{path}")),
        };

        writeln!(
            self.writer(),
            "{}",
            format!("diff --vcs a/{path} b/{path}").bold()
        )?;
        writeln!(self.writer(), "{}", format!("--- {old_path}").bold())?;
        writeln!(self.writer(), "{}", format!("+++ {new_path}").bold())?;

        for edit in edits {
            let line = match edit.change {
                LineChange::Removed => edit.to_string().red(),
                LineChange::Added => edit.to_string().green(),
            };
            writeln!(self.writer(), "{line}")?;
        }

        Ok(())
    }
}
