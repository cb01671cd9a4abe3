//! Attribute serialization

use std::borrow::Cow;

use crate::escape::escape;
use crate::value::{AttributeMap, Value};

use super::{classes, style};

/// Render one attribute as ` key="value"`, or nothing when it is omitted
///
/// Rules, applied in order:
/// 1. `false`, `null`, and falsy `class`/`style` values are omitted.
/// 2. `true` renders as a boolean attribute: ` key` when `terse`, otherwise
///    ` key="key"`.
/// 3. Objects are replaced by their JSON projection.
/// 4. Non-strings are JSON-stringified. If that text contains `"` and no
///    escaping was requested, it is single-quoted with `'` written as `&#39;`.
/// 5. `escaped` runs the text through [`escape`].
///
/// # Example
///
/// ```rust
/// use pug_runtime::{attr, Value};
///
/// assert_eq!(attr("disabled", &Value::from(true), false, true), " disabled");
/// assert_eq!(attr("href", &Value::Null, false, true), "");
/// assert_eq!(attr("data-n", &Value::from(3), false, true), r#" data-n="3""#);
/// ```
pub fn attr(key: &str, value: &Value, escaped: bool, terse: bool) -> String {
    match value {
        Value::Bool(false) | Value::Null => return String::new(),
        v if !v.is_truthy() && (key == "class" || key == "style") => return String::new(),
        Value::Bool(true) => {
            return if terse {
                format!(" {}", key)
            } else {
                format!(r#" {}="{}""#, key, key)
            };
        }
        _ => {}
    }

    let value: Cow<'_, Value> = match value {
        Value::Object(obj) => Cow::Owned(obj.to_json()),
        other => Cow::Borrowed(other),
    };

    let text: Cow<'_, str> = match value.as_ref() {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => {
            let json = other.json_string();
            if !escaped && json.contains('"') {
                return format!(" {}='{}'", key, json.replace('\'', "&#39;"));
            }
            Cow::Owned(json)
        }
    };

    let text = if escaped { escape(&text).into_owned() } else { text.into_owned() };
    format!(r#" {}="{}""#, key, text)
}

/// Render a whole attribute map
///
/// `class` goes through [`classes`] and is always emitted first, wherever it
/// sits in the map. `style` goes through [`style`]. Every other attribute is
/// rendered unescaped in map order.
///
/// # Example
///
/// ```rust
/// use pug_runtime::{attrs, AttributeMap};
///
/// let map = AttributeMap::new().with("id", "x").with("class", "a");
/// assert_eq!(attrs(&map, false), r#" class="a" id="x""#);
/// ```
pub fn attrs(map: &AttributeMap, terse: bool) -> String {
    let mut class_attr = String::new();
    let mut rest = String::new();

    for (key, value) in map {
        match key.as_str() {
            "class" => {
                let rendered = Value::String(classes(value, None));
                class_attr = attr(key, &rendered, false, terse);
            }
            "style" => {
                let rendered = Value::String(style(value));
                rest.push_str(&attr(key, &rendered, false, terse));
            }
            _ => rest.push_str(&attr(key, value, false, terse)),
        }
    }

    class_attr + &rest
}
