//! Repository context
//!
//! `Repository` owns every component of one repository (object store, staging
//! index, references, working tree, ignore rules) plus the writer commands
//! print to. Operations reload the staging index before touching it and
//! persist it right after every mutation.

use crate::areas::database::Database;
use crate::areas::ignore::{Ignore, IgnoreRules};
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::areas::{CONTROL_DIR, INDEX_FILE, OBJECTS_DIR};
use crate::artifacts::diff::text_diff::{self, TextEdit};
use crate::artifacts::diff::tree_diff::{self, ChangeKind, ChangeSet, FlatTree, TreeDiff};
use crate::artifacts::log::rev_list::History;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::status::inspector::Inspector;
use crate::artifacts::tree::tree_builder::TreeBuilder;
use crate::errors::{Result, VcsError};
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    ignore: IgnoreRules,
}

impl Repository {
    /// Open the repository rooted at `path`, creating the directory if needed
    ///
    /// The control directory does not have to exist yet; see
    /// [`Repository::ensure_initialized`].
    pub fn new(path: impl AsRef<Path>, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Unable to create {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;

        let control_path = path.join(CONTROL_DIR);
        let index = Index::new(control_path.join(INDEX_FILE).into_boxed_path());
        let database = Database::new(control_path.join(OBJECTS_DIR).into_boxed_path());
        let refs = Refs::new(control_path.into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let ignore = IgnoreRules::load(path.clone().into_boxed_path())?;

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
            ignore,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn control_path(&self) -> Box<Path> {
        self.path.join(CONTROL_DIR).into_boxed_path()
    }

    pub fn is_initialized(&self) -> bool {
        self.control_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(VcsError::NotARepository(self.path.to_path_buf()))
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn ignore(&self) -> &IgnoreRules {
        &self.ignore
    }

    /// The staging index, freshly reloaded from disk
    pub fn index(&self) -> Result<RefMut<'_, Index>> {
        let mut index = self.index.borrow_mut();
        index.rehydrate()?;
        Ok(index)
    }

    /// Stage a file, or every file and directory below a directory
    ///
    /// An ignored path is skipped without error.
    pub fn add(&self, path: &Path) -> Result<()> {
        let relative = self.workspace.normalize(path)?;
        let absolute = self.workspace.absolute(&relative);

        if !relative.is_empty() && self.ignore.is_ignored(Path::new(&relative)) {
            tracing::debug!(path = %relative, "skipping ignored path");
            return Ok(());
        }

        let metadata = std::fs::symlink_metadata(&absolute)
            .map_err(|_| VcsError::PathNotReadable(absolute.clone()))?;

        let mut index = self.index()?;

        if metadata.is_dir() {
            let leaves = self.workspace.walk(&relative, &self.ignore)?;
            let hashed = TreeBuilder::new(&self.database).fold(&self.workspace, leaves)?;

            for (leaf, oid) in hashed {
                // the repository root has no record of its own
                if !leaf.path.is_empty() {
                    index.add(leaf.path, oid);
                }
            }
        } else if metadata.is_file() {
            let content = self.workspace.read_file(&relative)?;
            let oid = self.database.put(ObjectType::Blob, &content)?;
            index.add(relative.clone(), oid);
        } else {
            tracing::warn!(path = %relative, "skipping symbolic link");
            return Ok(());
        }

        index.write_updates()?;
        tracing::debug!(path = %relative, entries = index.len(), "staged path");

        Ok(())
    }

    /// Unstage a path and any records below it; returns whether anything was removed
    pub fn remove(&self, path: &Path) -> Result<bool> {
        let relative = self.workspace.normalize(path)?;
        let mut index = self.index()?;

        let nested_prefix = format!("{relative}/");
        let mut doomed = index
            .entries()
            .map(|(path, _)| path)
            .filter(|path| {
                relative.is_empty() || **path == relative || path.starts_with(&nested_prefix)
            })
            .cloned()
            .collect::<Vec<_>>();

        // an ancestor's tree record still holds the removed path
        if !doomed.is_empty() {
            doomed.extend(
                ancestors(&relative)
                    .filter(|ancestor| index.entries().any(|(path, _)| path.as_str() == *ancestor))
                    .map(str::to_string),
            );
        }

        let removed = doomed
            .iter()
            .fold(false, |removed, path| index.remove(path) || removed);
        index.write_updates()?;

        Ok(removed)
    }

    /// Build and store the tree described by the staging index
    pub fn write_tree(&self) -> Result<ObjectId> {
        let records = self.index()?.snapshot();

        TreeBuilder::new(&self.database).build_from_paths(
            &records,
            &self.ignore,
            &|path: &str, oid: &ObjectId| self.mode_of(path, oid),
        )
    }

    fn mode_of(&self, path: &str, oid: &ObjectId) -> Result<EntryMode> {
        match self.database.object_type(oid)? {
            ObjectType::Tree => Ok(EntryMode::Directory),
            _ => Ok(EntryMode::from_executable(
                self.workspace.is_executable(path),
            )),
        }
    }

    /// Store a commit and move the current branch to it
    pub fn create_commit(
        &self,
        tree: ObjectId,
        parent: Option<ObjectId>,
        author: Author,
        message: String,
    ) -> Result<ObjectId> {
        let branch = self.refs.current_branch()?;

        let commit = Commit::new(parent, tree, author, message);
        let oid = self.database.store(&commit)?;
        self.refs.update_branch(&branch, &oid)?;

        tracing::info!(%oid, branch = %branch, "created commit");

        Ok(oid)
    }

    /// Commit whatever is staged on top of the current branch, then clear the index
    pub fn commit(&self, author: Author, message: String) -> Result<ObjectId> {
        if self.index()?.is_empty() {
            return Err(VcsError::NoChangesToCommit);
        }

        let tree = self.write_tree()?;
        let parent = self.refs.read_head()?;
        let oid = self.create_commit(tree, parent, author, message)?;

        let mut index = self.index()?;
        index.clear();
        index.write_updates()?;

        Ok(oid)
    }

    /// Lazy walk from `start` back to the root commit
    pub fn history(&self, start: Option<ObjectId>) -> History<'_, Database> {
        History::new(&self.database, start)
    }

    /// Working tree files against the staging index
    pub fn diff_workspace_vs_index(&self) -> Result<ChangeSet> {
        let records = self.index()?.snapshot();

        Inspector::new(&self.workspace, &self.ignore).compare_workspace(&records)
    }

    /// Working tree files against the last commit with staged records on top
    pub fn diff_workspace_vs_tracked(&self) -> Result<ChangeSet> {
        let baseline = self.tracked_files()?;

        Inspector::new(&self.workspace, &self.ignore).compare_workspace(&baseline)
    }

    /// Staged files against the last commit
    ///
    /// The index only holds what was staged since the last commit, so nothing
    /// is ever reported as deleted.
    pub fn diff_index_vs_head(&self) -> Result<ChangeSet> {
        let head = self.head_files()?;
        let staged = self.staged_files()?;

        Ok(tree_diff::compare(&head, &staged)
            .into_iter()
            .filter(|(_, kind)| *kind != ChangeKind::Deleted)
            .collect())
    }

    /// Two commits or trees against each other
    pub fn diff_trees(&self, old: &ObjectId, new: &ObjectId) -> Result<ChangeSet> {
        TreeDiff::new(&self.database).compare_oids(old, new)
    }

    /// Positional line diff between two blobs; a missing side reads as empty
    pub fn render_text_diff(
        &self,
        old: Option<&ObjectId>,
        new: Option<&ObjectId>,
    ) -> Result<Vec<TextEdit>> {
        let old = self.blob_text(old)?;
        let new = self.blob_text(new)?;

        Ok(text_diff::positional_diff(&old, &new))
    }

    fn blob_text(&self, oid: Option<&ObjectId>) -> Result<String> {
        match oid {
            Some(oid) => Ok(self.database.load_blob(oid)?.text()),
            None => Ok(String::new()),
        }
    }

    /// Files of the current branch tip; empty before the first commit
    pub fn head_files(&self) -> Result<FlatTree> {
        match self.refs.read_head()? {
            Some(head) => TreeDiff::new(&self.database).flatten(&head),
            None => Ok(FlatTree::new()),
        }
    }

    /// File records of the staging index, without directory records
    pub fn staged_files(&self) -> Result<FlatTree> {
        let records = self.index()?.snapshot();
        let mut files = FlatTree::new();

        for (path, oid) in records {
            if self.database.object_type(&oid)? != ObjectType::Tree {
                files.insert(path, oid);
            }
        }

        Ok(files)
    }

    /// Last commit's files overlaid with the staged ones
    pub fn tracked_files(&self) -> Result<FlatTree> {
        let mut tracked = self.head_files()?;
        tracked.extend(self.staged_files()?);

        Ok(tracked)
    }
}

/// `a/b/c` → `a/b`, `a`
fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(path.rsplit_once('/').map(|(parent, _)| parent), |parent| {
        parent.rsplit_once('/').map(|(parent, _)| parent)
    })
}
