use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::areas::refs::HEAD_REF_NAME;
use anyhow::Context;

/// Shortest abbreviated object id accepted on the command line
const MIN_ABBREVIATED_LENGTH: usize = 4;

/// A command-line name for an object
///
/// - `HEAD` or `@`: tip of the current branch
/// - a branch name: its tip
/// - a full or abbreviated (at least 4 hex characters) object id
/// - `<revision>^`: parent commit
/// - `<revision>~<n>`: n-th ancestor
///
/// Branch names win over object ids when both match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Name(String),
    Parent(Box<Revision>),
    Ancestor(Box<Revision>, usize),
}

impl Revision {
    pub fn parse(revision: &str) -> anyhow::Result<Self> {
        let parent = regex::Regex::new(PARENT_REGEX)?;
        let ancestor = regex::Regex::new(ANCESTOR_REGEX)?;

        if let Some(captures) = parent.captures(revision) {
            return Ok(Revision::Parent(Box::new(Self::parse(&captures[1])?)));
        }

        if let Some(captures) = ancestor.captures(revision) {
            let generations = captures[2]
                .parse::<usize>()
                .with_context(|| format!("invalid ancestor count in {revision}"))?;
            return Ok(Revision::Ancestor(
                Box::new(Self::parse(&captures[1])?),
                generations,
            ));
        }

        if revision.is_empty() {
            anyhow::bail!("empty revision");
        }

        Ok(Revision::Name(revision.to_string()))
    }

    /// Resolve to an object id of any kind
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Name(name) => Self::resolve_name(name, repository),
            Revision::Parent(base) => Self::parent_of(&base.resolve(repository)?, repository),
            Revision::Ancestor(base, generations) => {
                let mut oid = base.resolve(repository)?;
                for _ in 0..*generations {
                    oid = Self::parent_of(&oid, repository)?;
                }
                Ok(oid)
            }
        }
    }

    /// Resolve to an object id that must be a commit
    pub fn resolve_commit(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        let oid = self.resolve(repository)?;
        let kind = repository.database().object_type(&oid)?;

        if kind != ObjectType::Commit {
            anyhow::bail!("object {oid} is a {kind}, not a commit");
        }

        Ok(oid)
    }

    fn resolve_name(name: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        if name == HEAD_REF_NAME || name == "@" {
            let branch = repository.refs().current_branch()?;
            return repository
                .refs()
                .read_head()?
                .with_context(|| format!("your current branch '{branch}' does not have any commits yet"));
        }

        if let Ok(branch) = BranchName::try_parse(name)
            && repository.refs().branch_exists(&branch)
        {
            return repository
                .refs()
                .read_branch(&branch)?
                .with_context(|| format!("branch '{branch}' does not have any commits yet"));
        }

        Self::resolve_oid(name, repository)
    }

    fn resolve_oid(name: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        if name.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(name)?;
            if !repository.database().exists(&oid) {
                anyhow::bail!("object {oid} not found");
            }
            return Ok(oid);
        }

        if name.len() < MIN_ABBREVIATED_LENGTH || !name.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("unknown revision '{name}'");
        }

        let mut matches = repository.database().find_objects_by_prefix(name)?;

        match matches.len() {
            0 => anyhow::bail!("unknown revision '{name}'"),
            1 => Ok(matches.remove(0)),
            _ => {
                let candidates = matches
                    .iter()
                    .map(|oid| format!("  {}", oid.to_short_oid()))
                    .collect::<Vec<_>>()
                    .join("\n");
                anyhow::bail!("short object id {name} is ambiguous; candidates are:\n{candidates}")
            }
        }
    }

    fn parent_of(oid: &ObjectId, repository: &Repository) -> anyhow::Result<ObjectId> {
        let commit = repository
            .database()
            .load_commit(oid)
            .with_context(|| format!("object {oid} is not a commit"))?;

        commit
            .parent()
            .cloned()
            .with_context(|| format!("commit {oid} has no parent"))
    }
}
