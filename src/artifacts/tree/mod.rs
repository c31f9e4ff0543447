//! Tree construction
//!
//! Two ways of turning a set of files into a stored tree object:
//!
//! - from the flat `path → id` records of the staging index
//! - straight from a directory in the working tree, walk first, then fold
//!
//! Both produce byte-identical trees for the same logical contents.

pub mod tree_builder;
