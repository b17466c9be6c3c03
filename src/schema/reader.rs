//! Located reads over untyped JSON.
//!
//! Every read records a violation (with its path) instead of returning early,
//! so a single pass reports everything wrong with a document. Objects are
//! closed: `Fields::finish` flags any key that no read asked for.
use super::Violation;
use crate::puzzle::Vocabulary;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

const ID_PATTERN: &str = r"^[a-z][a-z0-9_]*$";
const ISO_DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

fn id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ID_PATTERN).expect("regex for content ids"))
}

fn iso_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ISO_DATE_PATTERN).expect("regex for ISO dates"))
}

/// Accumulated violations for one document.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    items: Vec<Violation>,
}

impl Violations {
    pub(crate) fn push(&mut self, path: &str, rule: &'static str, message: impl Into<String>) {
        self.items.push(Violation {
            path: path.to_string(),
            rule,
            message: message.into(),
        });
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn into_vec(self) -> Vec<Violation> {
        self.items
    }
}

/// Inclusive numeric domain for an integer field.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bounds {
    min: Option<i64>,
    max: Option<i64>,
}

impl Bounds {
    pub(crate) const ANY: Bounds = Bounds {
        min: None,
        max: None,
    };

    pub(crate) const fn at_least(min: i64) -> Self {
        Bounds {
            min: Some(min),
            max: None,
        }
    }

    pub(crate) const fn between(min: i64, max: i64) -> Self {
        Bounds {
            min: Some(min),
            max: Some(max),
        }
    }

    fn describe_miss(&self, n: i64) -> Option<String> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if n < min || n > max => {
                Some(format!("must be between {min} and {max} (got {n})"))
            }
            (Some(min), None) if n < min => Some(format!("must be >= {min} (got {n})")),
            (None, Some(max)) if n > max => Some(format!("must be <= {max} (got {n})")),
            _ => None,
        }
    }
}

/// Allowed length of an array field.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Count {
    min: usize,
    max: Option<usize>,
}

impl Count {
    pub(crate) const ANY: Count = Count { min: 0, max: None };

    pub(crate) const fn at_least(min: usize) -> Self {
        Count { min, max: None }
    }

    pub(crate) const fn at_most(max: usize) -> Self {
        Count { min: 0, max: Some(max) }
    }

    pub(crate) const fn between(min: usize, max: usize) -> Self {
        Count {
            min,
            max: Some(max),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A value together with its location in the document.
#[derive(Debug, Clone)]
pub(crate) struct Node<'a> {
    pub(crate) path: String,
    pub(crate) value: &'a Value,
}

impl<'a> Node<'a> {
    pub(crate) fn root(value: &'a Value) -> Self {
        Node {
            path: String::new(),
            value,
        }
    }

    fn key_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn wrong_type(&self, out: &mut Violations, expected: &str) {
        out.push(
            &self.path,
            "type",
            format!("expected {expected}, got {}", json_type(self.value)),
        );
    }

    pub(crate) fn text(&self, out: &mut Violations) -> Option<String> {
        match self.value {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::String(_) => {
                out.push(&self.path, "non_empty", "must not be empty");
                None
            }
            _ => {
                self.wrong_type(out, "string");
                None
            }
        }
    }

    pub(crate) fn id(&self, out: &mut Violations) -> Option<String> {
        let text = self.text(out)?;
        if !id_regex().is_match(&text) {
            out.push(
                &self.path,
                "id_pattern",
                format!("{text:?} must match {ID_PATTERN}"),
            );
            return None;
        }
        Some(text)
    }

    pub(crate) fn iso_date(&self, out: &mut Violations) -> Option<String> {
        let text = self.text(out)?;
        if !iso_date_regex().is_match(&text) {
            out.push(
                &self.path,
                "date_pattern",
                format!("{text:?} must be a YYYY-MM-DD date"),
            );
            return None;
        }
        Some(text)
    }

    pub(crate) fn int(&self, out: &mut Violations, bounds: Bounds) -> Option<i64> {
        let Value::Number(number) = self.value else {
            self.wrong_type(out, "integer");
            return None;
        };
        let parsed = number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        });
        let Some(n) = parsed else {
            out.push(
                &self.path,
                "integer",
                format!("expected an integer, got {number}"),
            );
            return None;
        };
        if let Some(message) = bounds.describe_miss(n) {
            out.push(&self.path, "range", message);
            return None;
        }
        Some(n)
    }

    pub(crate) fn number(&self, out: &mut Violations) -> Option<f64> {
        match self.value.as_f64() {
            Some(f) if f.is_finite() => Some(f),
            _ => {
                self.wrong_type(out, "number");
                None
            }
        }
    }

    pub(crate) fn flag(&self, out: &mut Violations) -> Option<bool> {
        let flag = self.value.as_bool();
        if flag.is_none() {
            self.wrong_type(out, "boolean");
        }
        flag
    }

    pub(crate) fn choice<T: Vocabulary>(&self, out: &mut Violations) -> Option<T> {
        let Value::String(name) = self.value else {
            self.wrong_type(out, "string");
            return None;
        };
        let choice = T::from_name(name);
        if choice.is_none() {
            out.push(
                &self.path,
                "enum",
                format!("{name:?} is not one of {}", T::expected()),
            );
        }
        choice
    }

    pub(crate) fn items(&self, out: &mut Violations, count: Count) -> Option<Vec<Node<'a>>> {
        let Value::Array(values) = self.value else {
            self.wrong_type(out, "array");
            return None;
        };
        if values.len() < count.min {
            out.push(
                &self.path,
                "min_items",
                format!("needs at least {} item(s), found {}", count.min, values.len()),
            );
        }
        if let Some(max) = count.max.filter(|max| values.len() > *max) {
            out.push(
                &self.path,
                "max_items",
                format!("allows at most {max} item(s), found {}", values.len()),
            );
        }
        Some(
            values
                .iter()
                .enumerate()
                .map(|(index, value)| Node {
                    path: format!("{}[{index}]", self.path),
                    value,
                })
                .collect(),
        )
    }

    pub(crate) fn fields(&self, out: &mut Violations) -> Option<Fields<'a>> {
        let Value::Object(map) = self.value else {
            self.wrong_type(out, "object");
            return None;
        };
        Some(Fields {
            node: self.clone(),
            map,
            seen: Vec::new(),
        })
    }
}

/// Reader over one closed JSON object.
pub(crate) struct Fields<'a> {
    node: Node<'a>,
    map: &'a Map<String, Value>,
    seen: Vec<&'static str>,
}

impl<'a> Fields<'a> {
    pub(crate) fn path_of(&self, key: &str) -> String {
        self.node.key_path(key)
    }

    /// Look up an optional key and mark it as known.
    pub(crate) fn take(&mut self, key: &'static str) -> Option<Node<'a>> {
        self.seen.push(key);
        self.map.get(key).map(|value| Node {
            path: self.node.key_path(key),
            value,
        })
    }

    pub(crate) fn require(&mut self, out: &mut Violations, key: &'static str) -> Option<Node<'a>> {
        let node = self.take(key);
        if node.is_none() {
            out.push(&self.node.key_path(key), "required", "missing required field");
        }
        node
    }

    pub(crate) fn text(&mut self, out: &mut Violations, key: &'static str) -> Option<String> {
        self.require(out, key)?.text(out)
    }

    pub(crate) fn opt_text(&mut self, out: &mut Violations, key: &'static str) -> Option<String> {
        self.take(key)?.text(out)
    }

    pub(crate) fn text_or(
        &mut self,
        out: &mut Violations,
        key: &'static str,
        default: &str,
    ) -> String {
        match self.take(key) {
            Some(node) => node.text(out).unwrap_or_else(|| default.to_string()),
            None => default.to_string(),
        }
    }

    pub(crate) fn id(&mut self, out: &mut Violations, key: &'static str) -> Option<String> {
        self.require(out, key)?.id(out)
    }

    pub(crate) fn opt_id(&mut self, out: &mut Violations, key: &'static str) -> Option<String> {
        self.take(key)?.id(out)
    }

    pub(crate) fn int(
        &mut self,
        out: &mut Violations,
        key: &'static str,
        bounds: Bounds,
    ) -> Option<i64> {
        self.require(out, key)?.int(out, bounds)
    }

    pub(crate) fn opt_int(
        &mut self,
        out: &mut Violations,
        key: &'static str,
        bounds: Bounds,
    ) -> Option<i64> {
        self.take(key)?.int(out, bounds)
    }

    pub(crate) fn int_or(
        &mut self,
        out: &mut Violations,
        key: &'static str,
        default: i64,
        bounds: Bounds,
    ) -> i64 {
        match self.take(key) {
            Some(node) => node.int(out, bounds).unwrap_or(default),
            None => default,
        }
    }

    pub(crate) fn number(&mut self, out: &mut Violations, key: &'static str) -> Option<f64> {
        self.require(out, key)?.number(out)
    }

    pub(crate) fn number_or(
        &mut self,
        out: &mut Violations,
        key: &'static str,
        default: f64,
    ) -> f64 {
        match self.take(key) {
            Some(node) => node.number(out).unwrap_or(default),
            None => default,
        }
    }

    pub(crate) fn flag_or(
        &mut self,
        out: &mut Violations,
        key: &'static str,
        default: bool,
    ) -> bool {
        match self.take(key) {
            Some(node) => node.flag(out).unwrap_or(default),
            None => default,
        }
    }

    pub(crate) fn choice<T: Vocabulary>(
        &mut self,
        out: &mut Violations,
        key: &'static str,
    ) -> Option<T> {
        self.require(out, key)?.choice(out)
    }

    pub(crate) fn opt_choice<T: Vocabulary>(
        &mut self,
        out: &mut Violations,
        key: &'static str,
    ) -> Option<T> {
        self.take(key)?.choice(out)
    }

    pub(crate) fn choice_or<T: Vocabulary>(
        &mut self,
        out: &mut Violations,
        key: &'static str,
        default: T,
    ) -> T {
        match self.take(key) {
            Some(node) => node.choice(out).unwrap_or(default),
            None => default,
        }
    }

    /// Required array; items that fail to read are dropped after reporting.
    pub(crate) fn list<T>(
        &mut self,
        out: &mut Violations,
        key: &'static str,
        count: Count,
        read: impl Fn(&mut Violations, &Node<'a>) -> Option<T>,
    ) -> Option<Vec<T>> {
        let nodes = self.require(out, key)?.items(out, count)?;
        Some(nodes.iter().filter_map(|node| read(out, node)).collect())
    }

    pub(crate) fn opt_list<T>(
        &mut self,
        out: &mut Violations,
        key: &'static str,
        count: Count,
        read: impl Fn(&mut Violations, &Node<'a>) -> Option<T>,
    ) -> Option<Vec<T>> {
        let nodes = self.take(key)?.items(out, count)?;
        Some(nodes.iter().filter_map(|node| read(out, node)).collect())
    }

    pub(crate) fn list_or_empty<T>(
        &mut self,
        out: &mut Violations,
        key: &'static str,
        count: Count,
        read: impl Fn(&mut Violations, &Node<'a>) -> Option<T>,
    ) -> Vec<T> {
        self.opt_list(out, key, count, read).unwrap_or_default()
    }

    pub(crate) fn texts(
        &mut self,
        out: &mut Violations,
        key: &'static str,
        count: Count,
    ) -> Option<Vec<String>> {
        self.list(out, key, count, |out, node| node.text(out))
    }

    /// Report every key that no read asked for.
    pub(crate) fn finish(self, out: &mut Violations) {
        for key in self.map.keys() {
            if !self.seen.iter().any(|seen| seen == key) {
                out.push(&self.node.key_path(key), "unknown_field", "unrecognized field");
            }
        }
    }
}
