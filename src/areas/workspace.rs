//! Working directory access
//!
//! Paths handed to the rest of the crate are repository-root-relative strings
//! with `/` separators; the root itself is the empty string.

use crate::areas::ignore::Ignore;
use crate::errors::{Result, VcsError};
use derive_new::new;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    File,
    Directory,
}

/// One walked entry, relative to the repository root
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Leaf {
    pub path: String,
    pub kind: LeafKind,
}

impl Leaf {
    pub fn is_dir(&self) -> bool {
        self.kind == LeafKind::Directory
    }
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute location of a root-relative path
    pub fn absolute(&self, relative: &str) -> PathBuf {
        if relative.is_empty() {
            self.path.to_path_buf()
        } else {
            self.path.join(relative)
        }
    }

    /// Turn an absolute or root-relative path into its index key
    ///
    /// `.` and `..` are resolved lexically; anything ending up outside the
    /// repository root is rejected with `InvalidPath`.
    pub fn normalize(&self, path: &Path) -> Result<String> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path.join(path)
        };

        let relative = match absolute.strip_prefix(&self.path) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => self.strip_canonical(&absolute)?,
        };

        let mut segments: Vec<String> = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(name) => segments.push(name.to_string_lossy().to_string()),
                Component::CurDir => {}
                Component::ParentDir => {
                    if segments.pop().is_none() {
                        return Err(VcsError::InvalidPath(path.to_path_buf()));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(VcsError::InvalidPath(path.to_path_buf()));
                }
            }
        }

        Ok(segments.join("/"))
    }

    // the root is canonical, so symlinked spellings of it need resolving first
    fn strip_canonical(&self, absolute: &Path) -> Result<PathBuf> {
        let invalid = || VcsError::InvalidPath(absolute.to_path_buf());

        let canonical = match absolute.canonicalize() {
            Ok(canonical) => canonical,
            Err(_) => {
                let parent = absolute.parent().ok_or_else(invalid)?;
                let name = absolute.file_name().ok_or_else(invalid)?;
                parent.canonicalize().map_err(|_| invalid())?.join(name)
            }
        };

        canonical
            .strip_prefix(&self.path)
            .map(Path::to_path_buf)
            .map_err(|_| invalid())
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.absolute(relative).exists()
    }

    pub fn is_dir(&self, relative: &str) -> bool {
        self.absolute(relative).is_dir()
    }

    pub fn is_file(&self, relative: &str) -> bool {
        self.absolute(relative).is_file()
    }

    pub fn is_executable(&self, relative: &str) -> bool {
        is_executable::is_executable(self.absolute(relative))
    }

    pub fn read_file(&self, relative: &str) -> Result<Vec<u8>> {
        let absolute = self.absolute(relative);

        std::fs::read(&absolute).map_err(|e| {
            tracing::debug!(path = %absolute.display(), error = %e, "cannot read file");
            VcsError::PathNotReadable(absolute)
        })
    }

    /// Walk `start` recursively, children before their parent directory
    ///
    /// Hidden entries, the control directory, ignored paths and symbolic links
    /// are left out. Entries that cannot be read are logged and skipped.
    /// The result includes `start` itself as the last leaf.
    pub fn walk(&self, start: &str, ignore: &dyn Ignore) -> Result<Vec<Leaf>> {
        let absolute = self.absolute(start);

        if std::fs::symlink_metadata(&absolute).is_err() {
            return Err(VcsError::PathNotReadable(absolute));
        }

        // pre-order, so a rejected directory prunes exactly its own subtree
        let visited = WalkDir::new(&absolute)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || self.is_visible(entry, ignore))
            .filter_map(|entry| match entry {
                Ok(entry) => self.to_leaf(&entry).map(|leaf| (entry.depth(), leaf)),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    None
                }
            });
        let leaves = contents_first(visited);

        tracing::debug!(start, leaves = leaves.len(), "walked workspace");

        Ok(leaves)
    }

    fn is_visible(&self, entry: &DirEntry, ignore: &dyn Ignore) -> bool {
        if entry.file_name().to_string_lossy().starts_with('.') {
            return false;
        }

        match entry.path().strip_prefix(&self.path) {
            Ok(relative) => !ignore.is_ignored(relative),
            Err(_) => false,
        }
    }

    fn to_leaf(&self, entry: &DirEntry) -> Option<Leaf> {
        let file_type = entry.file_type();

        if file_type.is_symlink() {
            tracing::warn!(path = %entry.path().display(), "skipping symbolic link");
            return None;
        }

        let kind = if file_type.is_dir() {
            LeafKind::Directory
        } else if file_type.is_file() {
            LeafKind::File
        } else {
            return None;
        };

        let relative = self.normalize(entry.path()).ok()?;

        Some(Leaf::new(relative, kind))
    }
}

/// Reorder a pre-order walk so every directory follows its whole subtree
fn contents_first(visited: impl IntoIterator<Item = (usize, Leaf)>) -> Vec<Leaf> {
    let mut open_dirs: Vec<(usize, Leaf)> = Vec::new();
    let mut leaves = Vec::new();

    for (depth, leaf) in visited {
        while open_dirs.last().is_some_and(|(open, _)| *open >= depth) {
            leaves.extend(open_dirs.pop().map(|(_, dir)| dir));
        }

        if leaf.is_dir() {
            open_dirs.push((depth, leaf));
        } else {
            leaves.push(leaf);
        }
    }
    leaves.extend(open_dirs.into_iter().rev().map(|(_, dir)| dir));

    leaves
}
