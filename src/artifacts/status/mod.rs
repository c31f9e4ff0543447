//! Working tree status inspection
//!
//! Compares the files on disk against a baseline of `path → blob id` records,
//! hashing file contents without storing them.

pub mod inspector;
