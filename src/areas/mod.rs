//! Core repository components
//!
//! - `database`: content-addressed object store for blobs, trees and commits
//! - `index`: staging index mapping paths to object ids
//! - `refs`: branch references and HEAD
//! - `workspace`: working directory walk and path normalisation
//! - `ignore`: ignore predicate and `.vcsignore` rules
//! - `repository`: the context object tying the above together

pub mod database;
pub mod ignore;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;

/// Name of the control directory at the repository root
pub const CONTROL_DIR: &str = ".vcs";

/// Name of the staging index file inside the control directory
pub const INDEX_FILE: &str = "index";

/// Name of the object store directory inside the control directory
pub const OBJECTS_DIR: &str = "objects";
