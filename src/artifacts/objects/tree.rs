//! Tree object
//!
//! Trees are directory snapshots. They list files (blobs) and subdirectories
//! (other trees) along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries are kept sorted by name (byte-wise), so two trees with the same
//! logical contents always hash to the same address.

use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{DecodeResult, Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::{BufMut, Bytes, BytesMut};
use derive_new::new;

/// One named child reference inside a tree
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn is_tree(&self) -> bool {
        self.mode.is_tree()
    }

    pub fn object_type(&self) -> ObjectType {
        if self.is_tree() {
            ObjectType::Tree
        } else {
            ObjectType::Blob
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree from entries in any order
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        Tree { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = TreeEntry> {
        self.entries.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Bytes {
        let mut payload = BytesMut::new();

        for entry in &self.entries {
            payload.put_slice(entry.mode.as_str().as_bytes());
            payload.put_u8(b' ');
            payload.put_slice(entry.name.as_bytes());
            payload.put_u8(b'\0');
            payload.put_slice(&entry.oid.to_raw());
        }

        payload.freeze()
    }
}

impl Unpackable for Tree {
    fn deserialize(payload: Bytes) -> DecodeResult<Self> {
        let mut entries = Vec::new();
        let mut rest = &payload[..];

        while !rest.is_empty() {
            let space = rest
                .iter()
                .position(|&b| b == b' ')
                .ok_or("unexpected EOF in mode")?;
            let mode = std::str::from_utf8(&rest[..space]).map_err(|_| "mode is not UTF-8")?;
            let mode = EntryMode::try_from(mode)?;
            rest = &rest[space + 1..];

            let nul = rest
                .iter()
                .position(|&b| b == b'\0')
                .ok_or("unexpected EOF in name")?;
            let name = std::str::from_utf8(&rest[..nul])
                .map_err(|_| "entry name is not UTF-8")?
                .to_string();
            rest = &rest[nul + 1..];

            let mut raw = rest;
            let oid = ObjectId::read_raw_from(&mut raw)
                .map_err(|_| format!("unexpected EOF in object id of {name:?}"))?;
            rest = raw;

            entries.push(TreeEntry::new(mode, name, oid));
        }

        // stored order is authoritative; it is already sorted for trees we wrote
        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode,
                    entry.object_type(),
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
