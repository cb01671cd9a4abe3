//! Attribute map merging
//!
//! Mixins and includes pass attribute sets that overlap with the ones a tag
//! already carries. Merging folds the right-hand map into the left-hand one:
//!
//! - `class` values are concatenated into an array, rendered later by
//!   [`classes`](crate::classes)
//! - `style` values are normalized and concatenated, each side terminated
//!   with `;`
//! - everything else is last-write-wins
//!
//! The left-hand map is the one that changes. [`merge_into`] works on a
//! mutable borrow, [`merge`] takes the left map by value and hands it back,
//! and [`merged`] leaves both inputs alone.

use std::mem;

use crate::renderer::style::{style, terminated};
use crate::value::{AttributeMap, Value};

/// Merge `b` into `a` in place, returning `a`
pub fn merge_into<'a>(a: &'a mut AttributeMap, b: &AttributeMap) -> &'a mut AttributeMap {
    for (key, value) in b {
        match key.as_str() {
            "class" => {
                let current = a.get_mut(key).map(mem::take).unwrap_or_default();
                let mut list = match current {
                    Value::Array(items) => items,
                    v if v.is_truthy() => vec![v],
                    _ => Vec::new(),
                };
                match value {
                    Value::Array(items) => list.extend(items.iter().cloned()),
                    v if v.is_truthy() => list.push(v.clone()),
                    _ => {}
                }
                a.insert(key.as_str(), Value::Array(list));
            }
            "style" => {
                let left = terminated(a.get(key).map(style).unwrap_or_default());
                let right = terminated(style(value));
                a.insert(key.as_str(), left + &right);
            }
            _ => {
                a.insert(key.as_str(), value.clone());
            }
        }
    }
    a
}

/// Merge `b` into `a`, consuming `a` and returning it
///
/// # Example
///
/// ```rust
/// use pug_runtime::{classes, merge, AttributeMap};
///
/// let a = AttributeMap::new().with("class", "a").with("id", "first");
/// let b = AttributeMap::new().with("class", "b").with("id", "second");
/// let merged = merge(a, &b);
///
/// assert_eq!(classes(merged.get("class").unwrap(), None), "a b");
/// assert_eq!(merged.get("id").unwrap().as_str(), Some("second"));
/// ```
pub fn merge(mut a: AttributeMap, b: &AttributeMap) -> AttributeMap {
    merge_into(&mut a, b);
    a
}

/// Merge without touching either input
pub fn merged(a: &AttributeMap, b: &AttributeMap) -> AttributeMap {
    merge(a.clone(), b)
}

/// Left-fold [`merge`] over a sequence of maps
///
/// The first map is the accumulator. An empty sequence yields an empty map.
pub fn merge_all<I>(maps: I) -> AttributeMap
where
    I: IntoIterator<Item = AttributeMap>,
{
    let mut maps = maps.into_iter();
    let first = maps.next().unwrap_or_default();
    maps.fold(first, |acc, next| merge(acc, &next))
}
