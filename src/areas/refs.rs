//! Branch references and HEAD
//!
//! ## File Format
//!
//! - `HEAD` holds `ref: refs/heads/<branch>\n`
//! - `refs/heads/<branch>` holds the 40-hex id of the branch tip, or nothing
//!   for a branch without commits
//!
//! Every ref write goes through a temporary file in the same directory that is
//! then renamed over the target, so readers never observe a partial ref.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, VcsError};
use derive_new::new;
use fake::rand;
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing the symbolic HEAD
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the control directory (typically `.vcs`)
    path: Box<Path>,
}

impl Refs {
    /// Point HEAD at the default branch and create it without commits
    pub fn init(&self) -> Result<()> {
        let main = BranchName::default_branch();

        std::fs::create_dir_all(self.heads_path())?;
        self.write_ref_file(&self.branch_path(&main), "")?;
        self.write_symbolic_head(&main)?;

        Ok(())
    }

    /// Name of the branch HEAD points to
    pub fn current_branch(&self) -> Result<BranchName> {
        let content = match std::fs::read_to_string(self.head_path()) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VcsError::DetachedOrMissingHead);
            }
            Err(e) => return Err(e.into()),
        };

        let re = regex::Regex::new(SYMREF_REGEX).map_err(|_| VcsError::DetachedOrMissingHead)?;
        let captures = re
            .captures(content.trim())
            .ok_or(VcsError::DetachedOrMissingHead)?;

        BranchName::try_parse(&captures[1]).map_err(|_| VcsError::DetachedOrMissingHead)
    }

    /// Tip of a branch; `None` for a branch without commits
    pub fn read_branch(&self, name: &BranchName) -> Result<Option<ObjectId>> {
        let content = match std::fs::read_to_string(self.branch_path(name)) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VcsError::BranchNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        ObjectId::try_parse(content).map(Some).map_err(|_| {
            VcsError::CorruptHistory(format!("branch {name} holds {content:?}"))
        })
    }

    /// Tip of the current branch
    pub fn read_head(&self) -> Result<Option<ObjectId>> {
        self.read_branch(&self.current_branch()?)
    }

    /// Move the current branch to `oid`
    pub fn update_head(&self, oid: &ObjectId) -> Result<()> {
        self.update_branch(&self.current_branch()?, oid)
    }

    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> Result<()> {
        self.write_ref_file(&self.branch_path(name), &format!("{oid}\n"))?;
        tracing::info!(branch = %name, %oid, "moved branch");

        Ok(())
    }

    /// Create `name` at the tip of the current branch
    pub fn create_branch(&self, name: &BranchName) -> Result<Option<ObjectId>> {
        if self.branch_exists(name) {
            return Err(VcsError::BranchAlreadyExists(name.to_string()));
        }

        let tip = self.read_head()?;
        let content = tip.as_ref().map(|oid| format!("{oid}\n")).unwrap_or_default();
        self.write_ref_file(&self.branch_path(name), &content)?;
        tracing::info!(branch = %name, tip = ?tip, "created branch");

        Ok(tip)
    }

    /// Point HEAD at an existing branch; the working tree is left alone
    pub fn set_head(&self, name: &BranchName) -> Result<()> {
        if !self.branch_exists(name) {
            return Err(VcsError::BranchNotFound(name.to_string()));
        }

        self.write_symbolic_head(name)?;
        tracing::info!(branch = %name, "switched HEAD");

        Ok(())
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_file()
    }

    /// All branches, sorted by name
    pub fn list_branches(&self) -> Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                // leftover temp files fail validation
                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn write_symbolic_head(&self, name: &BranchName) -> Result<()> {
        self.write_ref_file(&self.head_path(), &format!("ref: {}\n", name.to_ref_path()))
    }

    fn write_ref_file(&self, path: &Path, content: &str) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| VcsError::InvalidPath(path.to_path_buf()))?;
        std::fs::create_dir_all(parent)?;

        let temp_path = parent.join(format!(".ref-{}.tmp", rand::random::<u32>()));
        let mut temp_file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.sync_all()?;

        std::fs::rename(&temp_path, path)?;

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.path.join("refs").join("heads").into_boxed_path()
    }

    fn branch_path(&self, name: &BranchName) -> Box<Path> {
        self.path.join(name.to_ref_path()).into_boxed_path()
    }
}
