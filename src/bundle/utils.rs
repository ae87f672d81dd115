//! Safe lookups into loosely-shaped recognizer JSON.

use serde_json::Value;

/// Walk `path` through nested objects and return the leaf as text.
///
/// Strings are returned as-is; numbers and booleans are rendered.
/// A missing key at any depth, a non-object step, or a null/structured
/// leaf all yield `None`.
pub fn lookup_text(value: &Value, path: &[&str]) -> Option<String> {
    let leaf = path.iter().try_fold(value, |node, key| node.get(key))?;
    match leaf {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Try each path in order and return the first non-empty text.
///
/// Falls back to the empty string, never fails.
pub fn first_text(value: &Value, paths: &[&[&str]]) -> String {
    paths
        .iter()
        .filter_map(|path| lookup_text(value, path))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Same as [`first_text`] across several candidate roots, in order.
///
/// Used where a field may come from the front or the back of a document.
pub fn first_text_of(roots: &[Option<&Value>], paths: &[&[&str]]) -> String {
    roots
        .iter()
        .flatten()
        .map(|root| first_text(root, paths))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}
