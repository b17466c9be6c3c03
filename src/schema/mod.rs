//! Content schema: turns untyped JSON documents into validated `Case` and
//! `Puzzle` values.
//!
//! Validation is a single pass that keeps going after the first problem. A
//! document is accepted whole or rejected with every violation found, each
//! located by a path such as `puzzles[2].params.segments[0].length`.
use crate::case::Case;
use crate::puzzle::Puzzle;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

mod case;
mod params;
mod puzzle;
mod reader;
mod rules;

pub use rules::{Rule, RuleSet};

use reader::{Node, Violations};

/// One broken constraint in a content document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Location in the document; empty for the document root.
    pub path: String,
    /// Machine-readable rule code, or the name of a named rule.
    pub rule: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "(root)"
        } else {
            self.path.as_str()
        };
        write!(f, "{path}: {} [{}]", self.message, self.rule)
    }
}

/// A rejected content document with all of its violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentInvalid {
    pub violations: Vec<Violation>,
}

impl ContentInvalid {
    fn from_violations(violations: Violations) -> Self {
        let mut violations = violations.into_vec();
        if violations.is_empty() {
            violations.push(Violation {
                path: String::new(),
                rule: "type",
                message: "document could not be read".to_string(),
            });
        }
        ContentInvalid { violations }
    }

    /// Violations whose path starts with `prefix`.
    pub fn at<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations
            .iter()
            .filter(move |violation| violation.path.starts_with(prefix))
    }

    pub fn has_rule(&self, rule: &str) -> bool {
        self.violations.iter().any(|violation| violation.rule == rule)
    }
}

impl fmt::Display for ContentInvalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.violations.len();
        write!(
            f,
            "content invalid: {count} violation{}",
            if count == 1 { "" } else { "s" }
        )?;
        for violation in &self.violations {
            write!(f, "\n  {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ContentInvalid {}

fn finish<T>(parsed: Option<T>, out: Violations) -> Result<T, ContentInvalid> {
    match parsed {
        Some(value) if out.is_empty() => Ok(value),
        _ => Err(ContentInvalid::from_violations(out)),
    }
}

/// Validate a case document.
pub fn parse_case(document: &Value) -> Result<Case, ContentInvalid> {
    let mut out = Violations::default();
    let parsed = case::read_case(&mut out, &Node::root(document));
    finish(parsed, out)
}

/// Validate a standalone puzzle document. Its `unlocksEvidenceId` is only
/// checked for shape, since there is no enclosing case to resolve it against.
pub fn parse_puzzle(document: &Value) -> Result<Puzzle, ContentInvalid> {
    let mut out = Violations::default();
    let parsed = puzzle::read_puzzle(&mut out, &Node::root(document));
    finish(parsed, out)
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
