//! Plumbing commands
//!
//! Direct access to objects and references, mostly useful for scripting and
//! for inspecting what the porcelain commands produced.
//!
//! - `hash-object`: compute a file's blob id, optionally storing it
//! - `cat-file`: print an object's kind or contents
//! - `write-tree`: store the tree described by the staging index
//! - `ls-tree`: list the entries of a tree
//! - `commit-tree`: create a commit object and advance the current branch

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_tree;
pub mod write_tree;
