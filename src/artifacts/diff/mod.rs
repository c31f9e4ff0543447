//! Change detection
//!
//! - `tree_diff`: path-level comparison of flattened trees and index snapshots
//! - `text_diff`: naive positional line diff between two blobs

pub mod text_diff;
pub mod tree_diff;
