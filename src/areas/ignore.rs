//! Ignore rules
//!
//! Paths can be excluded from staging and status through `.vcsignore` at the
//! repository root. Each non-empty line that does not start with `#` is a glob:
//!
//! - `*` matches within one path segment, `**` across segments, `?` one character
//! - a pattern without `/` matches a segment at any depth (`*.log`, `target`)
//! - a pattern containing `/` is anchored at the root (`docs/build`)
//! - a trailing `/` is accepted and ignored (`target/`)
//!
//! A matching directory excludes everything underneath it.

use crate::areas::CONTROL_DIR;
use anyhow::Context;
use regex::Regex;
use std::path::{Component, Path};

/// Name of the ignore file at the repository root
pub const IGNORE_FILE: &str = ".vcsignore";

/// Predicate deciding whether a path takes part in staging, tree building and status
pub trait Ignore {
    /// `path` is either absolute or relative to the repository root
    fn is_ignored(&self, path: &Path) -> bool;
}

impl<F> Ignore for F
where
    F: Fn(&Path) -> bool,
{
    fn is_ignored(&self, path: &Path) -> bool {
        self(path)
    }
}

#[derive(Debug, Clone)]
pub struct IgnoreRules {
    root: Box<Path>,
    patterns: Vec<Regex>,
}

impl IgnoreRules {
    /// Rules that only exclude the control directory
    pub fn new(root: Box<Path>) -> Self {
        IgnoreRules {
            root,
            patterns: Vec::new(),
        }
    }

    /// Read `.vcsignore` under `root`, if there is one
    pub fn load(root: Box<Path>) -> anyhow::Result<Self> {
        let mut rules = Self::new(root);
        let ignore_file = rules.root.join(IGNORE_FILE);

        if !ignore_file.exists() {
            tracing::debug!(path = %ignore_file.display(), "no ignore file");
            return Ok(rules);
        }

        let content = std::fs::read_to_string(&ignore_file)
            .with_context(|| format!("Unable to read {}", ignore_file.display()))?;

        for line in content.lines() {
            rules.add_pattern(line);
        }

        Ok(rules)
    }

    /// Add one glob pattern; blank lines and comments are skipped
    pub fn add_pattern(&mut self, pattern: &str) {
        let pattern = pattern.trim();
        if pattern.is_empty() || pattern.starts_with('#') {
            return;
        }

        match Regex::new(&Self::glob_to_regex(pattern)) {
            Ok(regex) => self.patterns.push(regex),
            Err(e) => tracing::warn!(pattern, error = %e, "skipping invalid ignore pattern"),
        }
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }

    fn glob_to_regex(pattern: &str) -> String {
        let pattern = pattern.trim_end_matches('/');
        let anchored = pattern.contains('/');
        let pattern = pattern.trim_start_matches('/');

        let mut body = String::new();
        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '*' if chars.peek() == Some(&'*') => {
                    chars.next();
                    body.push_str(".*");
                }
                '*' => body.push_str("[^/]*"),
                '?' => body.push_str("[^/]"),
                c => body.push_str(&regex::escape(&c.to_string())),
            }
        }

        if anchored {
            format!("^{body}(/.*)?$")
        } else {
            format!("^(.*/)?{body}(/.*)?$")
        }
    }

    fn relative(&self, path: &Path) -> Option<String> {
        let relative = if path.is_absolute() {
            path.strip_prefix(&self.root).ok()?
        } else {
            path
        };

        let segments = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().to_string()),
                _ => None,
            })
            .collect::<Vec<_>>();

        Some(segments.join("/"))
    }
}

impl Ignore for IgnoreRules {
    fn is_ignored(&self, path: &Path) -> bool {
        let Some(relative) = self.relative(path) else {
            // outside the repository: nothing to ignore
            return false;
        };

        if relative == CONTROL_DIR || relative.starts_with(&format!("{CONTROL_DIR}/")) {
            return true;
        }

        self.patterns.iter().any(|regex| regex.is_match(&relative))
    }
}
