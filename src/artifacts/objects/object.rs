//! Object framing and hashing
//!
//! The frame is `<kind> <decimal length>\0<payload>`. The address of an object
//! is the SHA-1 of its frame, so it depends only on `(kind, payload)`.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::Write;

/// Reason an object payload or frame could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct DecodeError(pub String);

impl From<String> for DecodeError {
    fn from(reason: String) -> Self {
        DecodeError(reason)
    }
}

impl From<&str> for DecodeError {
    fn from(reason: &str) -> Self {
        DecodeError(reason.to_string())
    }
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

pub trait Packable {
    /// Kind-specific payload, without the frame header
    fn serialize(&self) -> Bytes;
}

pub trait Unpackable {
    fn deserialize(payload: Bytes) -> DecodeResult<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn object_id(&self) -> ObjectId {
        hash_frame(&frame(self.object_type(), &self.serialize()))
    }
}

/// Prefix the payload with its `<kind> <length>\0` header
pub fn frame(kind: ObjectType, payload: &[u8]) -> Bytes {
    let mut framed = Vec::with_capacity(payload.len() + 16);
    // writing into a Vec cannot fail
    let _ = write!(framed, "{} {}\0", kind.as_str(), payload.len());
    framed.extend_from_slice(payload);

    Bytes::from(framed)
}

pub fn hash_frame(framed: &[u8]) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(framed);

    let digest = hasher.finalize();
    ObjectId::from_raw(&digest).unwrap_or_else(|_| unreachable!("SHA-1 digests are 20 bytes"))
}

/// Split a frame back into its kind and payload
///
/// The header ends at the first NUL; the kind ends at the first space inside it.
pub fn parse_frame(framed: Bytes) -> DecodeResult<(ObjectType, Bytes)> {
    let nul = framed
        .iter()
        .position(|&b| b == b'\0')
        .ok_or("missing NUL after header")?;
    let header = std::str::from_utf8(&framed[..nul]).map_err(|_| "header is not UTF-8")?;
    let (kind, length) = header
        .split_once(' ')
        .ok_or("missing space in header")?;

    let kind = ObjectType::try_from(kind)?;
    let length = length
        .parse::<usize>()
        .map_err(|_| format!("invalid length {length:?}"))?;

    let payload = framed.slice(nul + 1..);
    if payload.len() != length {
        return Err(format!(
            "declared length {length} but payload has {} bytes",
            payload.len()
        )
        .into());
    }

    Ok((kind, payload))
}
