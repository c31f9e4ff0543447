//! Staging index
//!
//! The index records which content goes into the next commit, as a mapping
//! from repository-root-relative path to object id. Besides file records it
//! may hold directory records (`dir → tree id`) written when a directory is
//! staged, which keeps empty directories alive in the next commit.
//!
//! ## File Format
//!
//! One `path:hash` record per line, sorted by path. The separator is the last
//! `:` on the line, so paths may themselves contain colons.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, VcsError};
use file_guard::Lock;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.vcs/index`)
    path: Box<Path>,
    entries: BTreeMap<String, ObjectId>,
    /// Set when the in-memory entries differ from the file
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reload the entries from disk, discarding anything held in memory
    ///
    /// A missing file is an empty index. Reading takes a shared lock.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;

        self.entries = Self::parse(&content)?;
        tracing::trace!(entries = self.entries.len(), "loaded index");

        Ok(())
    }

    fn parse(content: &str) -> Result<BTreeMap<String, ObjectId>> {
        let mut entries = BTreeMap::new();

        for (number, line) in content.lines().enumerate() {
            let line_number = number + 1;

            if line.trim().is_empty() {
                continue;
            }

            let (path, hash) = line.rsplit_once(':').ok_or_else(|| VcsError::CorruptIndex {
                line: line_number,
                reason: "missing ':' separator".to_string(),
            })?;

            if path.is_empty() {
                return Err(VcsError::CorruptIndex {
                    line: line_number,
                    reason: "empty path".to_string(),
                });
            }

            let oid = ObjectId::try_parse(hash).map_err(|_| VcsError::CorruptIndex {
                line: line_number,
                reason: format!("invalid object id {hash:?}"),
            })?;

            entries.insert(path.to_string(), oid);
        }

        Ok(entries)
    }

    /// Persist the entries if anything changed since the last load or write
    ///
    /// Writing takes an exclusive lock on the index file.
    pub fn write_updates(&mut self) -> Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, Lock::Exclusive, 0, 1)?;

        let content = self
            .entries
            .iter()
            .map(|(path, oid)| format!("{path}:{oid}\n"))
            .collect::<String>();

        lock.deref_mut().write_all(content.as_bytes())?;
        lock.deref_mut().sync_all()?;

        self.changed = false;
        tracing::debug!(entries = self.entries.len(), "wrote index");

        Ok(())
    }

    /// Insert or replace the record for `path`
    pub fn add(&mut self, path: String, oid: ObjectId) {
        if self.entries.get(&path) != Some(&oid) {
            self.entries.insert(path, oid);
            self.changed = true;
        }
    }

    /// Drop the record for `path`, returning whether there was one
    pub fn remove(&mut self, path: &str) -> bool {
        let removed = self.entries.remove(path).is_some();
        self.changed |= removed;
        removed
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.changed = true;
        }
    }

    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn is_tracked(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &ObjectId)> {
        self.entries.iter()
    }

    /// Owned copy of the current records
    pub fn snapshot(&self) -> BTreeMap<String, ObjectId> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
