//! Lenient readers for submitted answers.
//!
//! Answers come straight from the player, so every reader maps a wrong shape
//! to an empty or missing value instead of failing.
use serde_json::{Map, Value};

/// Ordered token ids. A non-array reads as empty; a non-string entry keeps
/// its slot but matches no token.
pub(crate) fn id_list(answer: &Value) -> Vec<&str> {
    match answer {
        Value::Array(items) => items.iter().map(|item| item.as_str().unwrap_or("")).collect(),
        _ => Vec::new(),
    }
}

/// String form used when collapsing duplicate selections, so `1` and `"1"`
/// name the same item.
pub(crate) fn selection_key(item: &Value) -> String {
    match item {
        Value::String(text) => text.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) => super::format_number(f),
            None => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// `answer[key]` as an id list.
pub(crate) fn id_list_at<'a>(answer: &'a Value, key: &str) -> Vec<&'a str> {
    answer.get(key).map(id_list).unwrap_or_default()
}

/// The per-round map under `answers`, when the answer has one.
pub(crate) fn round_answers(answer: &Value) -> Option<&Map<String, Value>> {
    answer.get("answers").and_then(Value::as_object)
}

/// A finite number, or a string that parses as one after trimming.
pub(crate) fn typed_number(answer: &Value) -> Option<f64> {
    let n = match answer {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// `answer[key]` when it is a finite JSON number.
pub(crate) fn number_at(answer: &Value, key: &str) -> Option<f64> {
    answer
        .get(key)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}

/// `entry[key]` as a string, or `""`.
pub(crate) fn text_at<'a>(entry: &'a Value, key: &str) -> &'a str {
    entry.get(key).and_then(Value::as_str).unwrap_or("")
}
