//! Commit history traversal
//!
//! History is linear: every commit has at most one parent. The walk starts at
//! a commit and follows parent links back to the root, newest first.

pub mod rev_list;
