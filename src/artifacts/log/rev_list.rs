use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Result, VcsError};
use std::collections::HashSet;

/// Where a history walk loads commits from
pub trait CommitSource {
    /// Load `oid` as a commit; anything else stored there is `CorruptHistory`
    fn resolve_commit(&self, oid: &ObjectId) -> Result<Commit>;
}

impl CommitSource for Database {
    fn resolve_commit(&self, oid: &ObjectId) -> Result<Commit> {
        let (kind, payload) = self.get(oid)?;

        if kind != ObjectType::Commit {
            return Err(VcsError::CorruptHistory(format!(
                "{oid} is a {kind}, not a commit"
            )));
        }

        Commit::deserialize(payload).map_err(|e| VcsError::corrupt_object(oid, e.0))
    }
}

/// Lazy walk over a commit and its ancestors
///
/// Yields `(id, commit)` pairs newest first and stops after the root commit.
/// A commit seen twice means the chain loops: that is reported once as
/// `CorruptHistory` and the walk ends. Any other failure also ends the walk.
pub struct History<'s, S: CommitSource + ?Sized> {
    source: &'s S,
    next_oid: Option<ObjectId>,
    seen: HashSet<ObjectId>,
}

impl<'s, S: CommitSource + ?Sized> History<'s, S> {
    pub fn new(source: &'s S, start: Option<ObjectId>) -> Self {
        History {
            source,
            next_oid: start,
            seen: HashSet::new(),
        }
    }
}

impl<S: CommitSource + ?Sized> Iterator for History<'_, S> {
    type Item = Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next_oid.take()?;

        if !self.seen.insert(oid.clone()) {
            tracing::warn!(%oid, "parent chain loops");
            return Some(Err(VcsError::CorruptHistory(format!(
                "commit {oid} is its own ancestor"
            ))));
        }

        match self.source.resolve_commit(&oid) {
            Ok(commit) => {
                self.next_oid = commit.parent().cloned();
                Some(Ok((oid, commit)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
