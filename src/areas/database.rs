//! Object database
//!
//! Content-addressed storage for blobs, trees and commits. Each object is
//! framed, hashed with SHA-1, zlib-compressed and written to
//! `objects/<first 2 hex chars>/<remaining 38 hex chars>`.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{self, Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Result, VcsError};
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Frame, hash and persist a payload, returning its address
    ///
    /// Storing the same `(kind, payload)` twice is a no-op the second time.
    pub fn put(&self, kind: ObjectType, payload: &[u8]) -> Result<ObjectId> {
        let framed = object::frame(kind, payload);
        let oid = object::hash_frame(&framed);
        let object_path = self.path.join(oid.to_path());

        if object_path.exists() {
            tracing::trace!(%oid, "object already stored");
            return Ok(oid);
        }

        self.write_object(&object_path, framed)?;
        tracing::debug!(%oid, kind = kind.as_str(), size = payload.len(), "stored object");

        Ok(oid)
    }

    /// Persist a typed object
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        self.put(object.object_type(), &object.serialize())
    }

    /// Read an object back as its kind and raw payload
    pub fn get(&self, oid: &ObjectId) -> Result<(ObjectType, Bytes)> {
        let object_path = self.path.join(oid.to_path());

        let compressed = match std::fs::read(&object_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VcsError::ObjectNotFound(oid.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let framed = Self::decompress(&compressed)
            .map_err(|e| VcsError::corrupt_object(oid, format!("cannot inflate: {e}")))?;

        // the address doubles as an integrity check
        let actual = object::hash_frame(&framed);
        if &actual != oid {
            return Err(VcsError::corrupt_object(
                oid,
                format!("content hashes to {actual}"),
            ));
        }

        object::parse_frame(framed).map_err(|e| VcsError::corrupt_object(oid, e.0))
    }

    pub fn exists(&self, oid: &ObjectId) -> bool {
        self.path.join(oid.to_path()).is_file()
    }

    pub fn object_type(&self, oid: &ObjectId) -> Result<ObjectType> {
        let (kind, _) = self.get(oid)?;
        Ok(kind)
    }

    pub fn load_blob(&self, oid: &ObjectId) -> Result<Blob> {
        self.load_as(oid, ObjectType::Blob)
    }

    pub fn load_tree(&self, oid: &ObjectId) -> Result<Tree> {
        self.load_as(oid, ObjectType::Tree)
    }

    pub fn load_commit(&self, oid: &ObjectId) -> Result<Commit> {
        self.load_as(oid, ObjectType::Commit)
    }

    fn load_as<T: Unpackable>(&self, oid: &ObjectId, expected: ObjectType) -> Result<T> {
        let (kind, payload) = self.get(oid)?;

        if kind != expected {
            return Err(VcsError::corrupt_object(
                oid,
                format!("expected {expected}, found {kind}"),
            ));
        }

        T::deserialize(payload).map_err(|e| VcsError::corrupt_object(oid, e.0))
    }

    fn write_object(&self, object_path: &Path, framed: Bytes) -> Result<()> {
        let object_dir = object_path
            .parent()
            .ok_or_else(|| VcsError::InvalidPath(object_path.to_path_buf()))?;
        std::fs::create_dir_all(object_dir)?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());
        let compressed = Self::compress(&framed)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)?;
        file.write_all(&compressed)?;
        file.sync_all()?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path)?;

        Ok(())
    }

    fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn decompress(data: &[u8]) -> std::io::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;

        Ok(decompressed.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all objects whose address starts with the given hex prefix
    ///
    /// Used to resolve abbreviated hashes. Several matches mean the prefix is ambiguous.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        if prefix.len() < 2 || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Vec::new());
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path: PathBuf = self.path.join(dir_name);
        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = std::fs::read_dir(&dir_path)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let file_name = entry.file_name().to_string_lossy().to_string();
                file_name
                    .starts_with(file_prefix)
                    .then(|| ObjectId::try_parse(format!("{dir_name}{file_name}")).ok())
                    .flatten()
            })
            .collect::<Vec<_>>();
        matches.sort();

        Ok(matches)
    }
}
