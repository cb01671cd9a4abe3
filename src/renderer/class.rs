//! Class list rendering

use crate::escape::escape;
use crate::value::{Map, Value};

/// Render a class value as a space-delimited class string
///
/// - Arrays render each element recursively, skip empty results and join the
///   rest with a single space. When `escaping` is given, the flag at the same
///   index decides whether that top-level element is escaped. Nested arrays
///   are not escaped element by element.
/// - Maps contribute every non-empty key whose value is truthy.
/// - Anything else renders as text, or as nothing when falsy.
///
/// # Example
///
/// ```rust
/// use pug_runtime::{classes, Value};
///
/// let value = Value::from(vec![Value::from(vec!["a", "b"]), Value::from("c")]);
/// assert_eq!(classes(&value, None), "a b c");
/// ```
pub fn classes(value: &Value, escaping: Option<&[bool]>) -> String {
    match value {
        Value::Array(items) => classes_array(items, escaping),
        Value::Map(map) => classes_map(map),
        Value::Object(obj) => classes(&obj.to_json(), None),
        other if other.is_truthy() => other.to_string(),
        _ => String::new(),
    }
}

fn classes_array(items: &[Value], escaping: Option<&[bool]>) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        let class_name = classes(item, None);
        if class_name.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        let escape_this = escaping
            .and_then(|flags| flags.get(i))
            .copied()
            .unwrap_or(false);
        if escape_this {
            out.push_str(&escape(&class_name));
        } else {
            out.push_str(&class_name);
        }
    }
    out
}

fn classes_map(map: &Map) -> String {
    map.iter()
        .filter(|(key, value)| !key.is_empty() && value.is_truthy())
        .map(|(key, _)| key.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
