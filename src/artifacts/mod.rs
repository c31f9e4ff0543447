//! Version control data structures and algorithms
//!
//! - `branch`: branch names and revision parsing
//! - `diff`: path-level tree comparison and positional line diffs
//! - `log`: commit history traversal
//! - `objects`: object kinds (blob, tree, commit) and their encoding
//! - `status`: working tree inspection
//! - `tree`: building nested trees from index records or directories

pub mod branch;
pub mod diff;
pub mod log;
pub mod objects;
pub mod status;
pub mod tree;
