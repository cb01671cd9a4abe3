//! Inline style rendering

use crate::value::Value;

/// Render a style value as a `property:value;` declaration string
///
/// Maps produce one declaration per entry in order. Strings pass through
/// unchanged, so a trailing semicolon is the caller's business. Falsy input
/// renders as nothing.
///
/// # Example
///
/// ```rust
/// use pug_runtime::{style, Value};
///
/// let value: Value = serde_json::json!({"color": "red", "margin": "0"}).into();
/// assert_eq!(style(&value), "color:red;margin:0;");
/// ```
pub fn style(value: &Value) -> String {
    if !value.is_truthy() {
        return String::new();
    }
    match value {
        Value::Map(map) => {
            let mut out = String::new();
            for (property, value) in map {
                out.push_str(&format!("{}:{};", property, value));
            }
            out
        }
        // Sequences enumerate their indices as property names
        Value::Array(items) => {
            let mut out = String::new();
            for (i, value) in items.iter().enumerate() {
                out.push_str(&format!("{}:{};", i, value));
            }
            out
        }
        Value::Object(obj) => style(&obj.to_json()),
        other => other.to_string(),
    }
}

/// Append a `;` to non-empty declarations that do not already end with one
pub(crate) fn terminated(declarations: String) -> String {
    if declarations.is_empty() || declarations.ends_with(';') {
        declarations
    } else {
        declarations + ";"
    }
}
