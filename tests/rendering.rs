//! Integration tests for escaping, class/style/attribute rendering and merging

use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::json;

use pug_runtime::{
    attr, attrs, classes, escape, merge, merge_all, merge_into, style, AttributeMap, ToJson,
    Value,
};

fn map(value: serde_json::Value) -> AttributeMap {
    serde_json::from_value(value).expect("Should deserialize")
}

/// Wrap rendered attributes in a tag so snapshots have no leading space
fn tag(name: &str, attributes: &str) -> String {
    format!("<{}{}>", name, attributes)
}

#[test]
fn test_escape_is_identity_without_special_chars() {
    let input = "plain text, no markup";
    assert_eq!(escape(input), input);
    assert_eq!(escape(&escape(input)), input);
}

#[test]
fn test_escape_single_ampersand() {
    let escaped = escape("salt & pepper");
    assert_eq!(escaped.matches("&amp;").count(), 1);
    assert_eq!(escaped.matches('&').count(), 1);
}

#[test]
fn test_classes_examples() {
    assert_eq!(classes(&json!(["a", "b"]).into(), None), "a b");
    assert_eq!(classes(&json!({"a": true, "b": false, "c": 1}).into(), None), "a c");
    assert_eq!(classes(&json!([["a", "b"], "c"]).into(), None), "a b c");
    assert_eq!(classes(&json!(["<b>"]).into(), Some(&[true][..])), "&lt;b&gt;");
    assert_eq!(classes(&json!(["<b>"]).into(), None), "<b>");
}

#[test]
fn test_classes_mixed_shapes() {
    let value: Value = json!(["btn", {"active": true, "hidden": false}, ["lg", ""], null]).into();
    assert_eq!(classes(&value, None), "btn active lg");
}

#[test]
fn test_style_example() {
    assert_eq!(
        style(&json!({"color": "red", "margin": "0"}).into()),
        "color:red;margin:0;"
    );
}

#[test]
fn test_attr_examples() {
    assert_eq!(attr("disabled", &Value::from(true), false, true), " disabled");
    assert_eq!(
        attr("disabled", &Value::from(true), false, false),
        " disabled=\"disabled\""
    );
    assert_eq!(attr("class", &Value::from(""), false, false), "");
    assert_eq!(attr("href", &Value::Null, false, false), "");
}

#[test]
fn test_attrs_class_first() {
    let attributes = map(json!({"id": "x", "class": "a"}));
    assert_eq!(attrs(&attributes, false), r#" class="a" id="x""#);
}

#[test]
fn test_attrs_full_tag() {
    let attributes = map(json!({
        "href": "/users?id=1",
        "data-user": {"name": "Ada", "admin": true},
        "class": ["link", {"current": true}],
        "style": {"color": "red"},
        "hidden": false,
        "download": true,
    }));
    assert_snapshot!(
        tag("a", &attrs(&attributes, true)),
        @r#"<a class="link current" href="/users?id=1" data-user='{"name":"Ada","admin":true}' style="color:red;" download>"#
    );
}

#[test]
fn test_attrs_verbose_doctype() {
    let attributes = map(json!({"checked": true, "type": "checkbox"}));
    assert_snapshot!(
        tag("input", &attrs(&attributes, false)),
        @r#"<input checked="checked" type="checkbox">"#
    );
}

#[test]
fn test_attr_with_to_json_object() {
    #[derive(Debug)]
    struct Published {
        year: i32,
        month: u32,
    }

    impl ToJson for Published {
        fn to_json(&self) -> Value {
            Value::String(format!("{}-{:02}", self.year, self.month))
        }
    }

    let value = Value::object(Published { year: 2024, month: 3 });
    assert_eq!(attr("datetime", &value, true, true), r#" datetime="2024-03""#);
}

#[test]
fn test_merge_then_classes() {
    let merged = merge(map(json!({"class": "a"})), &map(json!({"class": "b"})));
    assert_eq!(classes(merged.get("class").unwrap(), None), "a b");
}

#[test]
fn test_merge_into_is_identity() {
    let mut left = map(json!({"class": "a"}));
    let right = map(json!({"class": "b", "id": "x"}));
    let left_ptr: *const AttributeMap = &left;
    let returned = merge_into(&mut left, &right);
    assert!(std::ptr::eq(returned, left_ptr));
    assert_eq!(left.get("id"), Some(&Value::from("x")));
}

#[test]
fn test_merge_round_trip_without_class_or_style() {
    let attributes = map(json!({
        "id": "main",
        "tabindex": 0,
        "data-config": {"a": [1, 2]},
        "disabled": true,
        "title": null,
    }));
    let merged = merge(AttributeMap::new(), &attributes);
    assert_eq!(attrs(&merged, false), attrs(&attributes, false));
}

#[test]
fn test_mixin_attribute_merge() {
    let merged = merge_all(vec![
        map(json!({"class": ["btn"], "style": "color:red", "type": "button"})),
        map(json!({"class": {"primary": true}, "style": {"margin": "0"}})),
        map(json!({"type": "submit", "class": "wide"})),
    ]);
    assert_snapshot!(
        tag("button", &attrs(&merged, true)),
        @r#"<button class="btn primary wide" style="color:red;margin:0;" type="submit">"#
    );
}
