//! Object types and their canonical encodings
//!
//! Every piece of content is stored as an object addressed by the SHA-1 of its frame:
//!
//! - **Blob**: file content (raw bytes)
//! - **Tree**: directory listing (modes, names and child addresses)
//! - **Commit**: snapshot with metadata (tree, optional parent, author, message)
//!
//! The frame hashed and stored on disk is `<kind> <size>\0<payload>`.

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_RAW_LENGTH: usize = 20;
