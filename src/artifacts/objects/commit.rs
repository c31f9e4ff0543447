//! Commit object
//!
//! Commits link a tree snapshot to its (optional) parent commit and record who
//! made the change and when.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <<email>> <RFC 2822 timestamp>
//! committer <name> <<email>> <RFC 2822 timestamp>
//!
//! <commit message>
//! ```
//!
//! The `parent` line is absent for the root commit.

use crate::artifacts::objects::object::{DecodeError, DecodeResult, Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Author or committer information
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<Utc>,
}

impl Author {
    /// Create a new author stamped with the current UTC time
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: Utc::now(),
        }
    }

    pub fn new_with_timestamp(name: String, email: String, timestamp: DateTime<Utc>) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Load author information from environment variables
    ///
    /// Reads `VCS_AUTHOR_NAME`, `VCS_AUTHOR_EMAIL`, and optionally `VCS_AUTHOR_DATE`
    /// (RFC 2822). Without a date the current time is used.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let name = std::env::var("VCS_AUTHOR_NAME").context("VCS_AUTHOR_NAME not set")?;
        let email = std::env::var("VCS_AUTHOR_EMAIL").context("VCS_AUTHOR_EMAIL not set")?;

        match std::env::var("VCS_AUTHOR_DATE") {
            Ok(date) => {
                let timestamp = DateTime::parse_from_rfc2822(&date)
                    .with_context(|| format!("VCS_AUTHOR_DATE is not an RFC 2822 date: {date}"))?;
                Ok(Author::new_with_timestamp(
                    name,
                    email,
                    timestamp.with_timezone(&Utc),
                ))
            }
            Err(_) => Ok(Author::new(name, email)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// "Name <email> Sun, 18 Oct 2026 09:30:00 +0000"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {}",
            self.name,
            self.email,
            self.timestamp.to_rfc2822()
        )
    }

    /// "Sun Oct 18 09:30:00 2026 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl TryFrom<&str> for Author {
    type Error = DecodeError;

    fn try_from(value: &str) -> DecodeResult<Self> {
        // Format: "name <email> timestamp"
        let email_start = value.find('<').ok_or("invalid author: missing '<'")?;
        let email_end = value.find('>').ok_or("invalid author: missing '>'")?;
        if email_end < email_start {
            return Err("invalid author: '>' before '<'".into());
        }

        let name = value[..email_start].trim().to_string();
        let email = value[email_start + 1..email_end].to_string();
        let date = value[email_end + 1..].trim();

        let timestamp = DateTime::parse_from_rfc2822(date)
            .map_err(|_| format!("invalid author timestamp {date:?}"))?
            .with_timezone(&Utc);

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

/// Commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit, absent for the root commit
    parent: Option<ObjectId>,
    /// Tree object representing the snapshot
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    /// Create a new commit whose committer is the author
    pub fn new(parent: Option<ObjectId>, tree_oid: ObjectId, author: Author, message: String) -> Self {
        Commit {
            parent,
            tree_oid,
            committer: author.clone(),
            author,
            message,
        }
    }

    /// First line of the message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.author.timestamp()
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Bytes {
        Bytes::from(self.lines().join("\n"))
    }
}

impl Unpackable for Commit {
    fn deserialize(payload: Bytes) -> DecodeResult<Self> {
        let content = std::str::from_utf8(&payload).map_err(|_| "commit is not UTF-8")?;
        let (headers, message) = content.split_once("\n\n").unwrap_or((content, ""));

        let mut tree_oid = None;
        let mut parent = None;
        let mut author = None;
        let mut committer = None;

        for line in headers.lines() {
            let (key, value) = line
                .split_once(' ')
                .ok_or_else(|| format!("invalid header line {line:?}"))?;

            match key {
                "tree" => tree_oid = Some(parse_oid(value, "tree")?),
                "parent" => parent = Some(parse_oid(value, "parent")?),
                "author" => author = Some(Author::try_from(value)?),
                "committer" => committer = Some(Author::try_from(value)?),
                _ => return Err(format!("unknown header {key:?}").into()),
            }
        }

        let tree_oid = tree_oid.ok_or("missing tree line")?;
        let author = author.ok_or("missing author line")?;
        let committer = committer.ok_or("missing committer line")?;

        Ok(Commit {
            parent,
            tree_oid,
            author,
            committer,
            message: message.to_string(),
        })
    }
}

fn parse_oid(value: &str, field: &str) -> DecodeResult<ObjectId> {
    ObjectId::try_parse(value).map_err(|_| format!("invalid {field} hash {value:?}").into())
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.lines().join("\n")
    }
}
