//! Porcelain commands
//!
//! - `init`: create the control directory
//! - `add` / `rm`: stage and unstage paths
//! - `commit`: record the staged snapshot on the current branch
//! - `status`: staged changes and working tree changes
//! - `diff`: line diffs of working tree, staged or committed changes
//! - `log`: history of the current branch
//! - `branch` / `switch`: create, list and select branches

pub mod add;
pub mod branch;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod status;
