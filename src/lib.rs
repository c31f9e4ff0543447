//! A minimal content-addressed version control engine
//!
//! - `areas`: on-disk components of a repository (objects, index, refs, working tree)
//! - `artifacts`: object model and the algorithms built on it
//! - `commands`: plumbing and porcelain command implementations
//! - `errors`: library error type

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
