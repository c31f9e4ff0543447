//! Error types for vcs.

use std::path::PathBuf;

/// Result type alias using [`VcsError`].
pub type Result<T> = std::result::Result<T, VcsError>;

/// Errors raised by the object store, staging index, reference store and the
/// graph/diff logic built on top of them.
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    /// The path does not exist or cannot be read.
    #[error("cannot read path: {0}")]
    PathNotReadable(PathBuf),

    /// The path escapes the repository root.
    #[error("path is outside the repository: {0}")]
    InvalidPath(PathBuf),

    /// The string is not a 40-character hexadecimal object address.
    #[error("invalid object id: {0:?}")]
    InvalidObjectId(String),

    /// No object is stored under the given address.
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// The object frame is malformed or does not match its address.
    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: String, reason: String },

    /// A record of the index file cannot be parsed.
    #[error("corrupt index at line {line}: {reason}")]
    CorruptIndex { line: usize, reason: String },

    /// The parent chain loops or references something that is not a commit.
    #[error("corrupt history: {0}")]
    CorruptHistory(String),

    /// HEAD is absent or is not a symbolic reference to a branch.
    #[error("HEAD is detached or missing")]
    DetachedOrMissingHead,

    /// The staging index is empty at commit time.
    #[error("no changes to commit")]
    NoChangesToCommit,

    /// No control directory was found at the repository root.
    #[error("not a vcs repository: {0}")]
    NotARepository(PathBuf),

    /// The branch reference file does not exist.
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// A branch with this name already exists.
    #[error("branch already exists: {0}")]
    BranchAlreadyExists(String),

    /// The branch name violates the reference naming rules.
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    /// Underlying I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl VcsError {
    pub(crate) fn corrupt_object(oid: impl ToString, reason: impl Into<String>) -> Self {
        VcsError::CorruptObject {
            oid: oid.to_string(),
            reason: reason.into(),
        }
    }
}
