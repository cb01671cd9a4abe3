//! HTML escaping for text and attribute values

use std::borrow::Cow;

use crate::value::Value;

/// Escape `"`, `&`, `<` and `>` as named entities
///
/// Input without any of those characters is returned borrowed, untouched.
/// Otherwise the text is copied span by span in a single left-to-right pass.
/// This is best-effort escaping for markup, not sanitization: an existing
/// entity such as `&amp;` is escaped again.
///
/// # Example
///
/// ```rust
/// use pug_runtime::escape;
///
/// assert_eq!(escape("a < b"), "a &lt; b");
/// assert!(matches!(escape("plain"), std::borrow::Cow::Borrowed(_)));
/// ```
pub fn escape(html: &str) -> Cow<'_, str> {
    let Some(first) = html.bytes().position(needs_escape) else {
        return Cow::Borrowed(html);
    };

    let mut out = String::with_capacity(html.len() + 8);
    let mut last = 0;
    // All four targets are ASCII, so byte offsets are char boundaries
    for (i, byte) in html.bytes().enumerate().skip(first) {
        let entity = match byte {
            b'"' => "&quot;",
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            _ => continue,
        };
        out.push_str(&html[last..i]);
        out.push_str(entity);
        last = i + 1;
    }
    out.push_str(&html[last..]);
    Cow::Owned(out)
}

/// Coerce a value to text, then escape it
pub fn escape_value(value: &Value) -> String {
    match value {
        Value::String(s) => escape(s).into_owned(),
        other => escape(&other.to_string()).into_owned(),
    }
}

fn needs_escape(byte: u8) -> bool {
    matches!(byte, b'"' | b'&' | b'<' | b'>')
}
