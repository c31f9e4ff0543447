//! Command implementations
//!
//! - `plumbing`: low-level commands for direct object manipulation (hash-object, cat-file, ls-tree)
//! - `porcelain`: user-facing commands for version control workflows (add, commit, log, etc.)
//!
//! Every command is a method on `Repository` and prints through its writer.

pub mod plumbing;
pub mod porcelain;
