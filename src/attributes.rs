//! Attribute serialization.
//!
//! Turns the attribute map of a tag element into the attribute portion of its
//! opening tag. Names are canonicalized through a fixed alias table, boolean
//! attributes are emitted bare, and `dangerouslySetInnerHTML` is pulled out as
//! the element's raw inner HTML instead of being emitted.

use alloc::borrow::Cow;
use alloc::string::String;

use hyperons_core::{Map, Value};
use hyperons_escape::{escape, format_number, style_to_string};

/// DOM property names that map to a differently spelled HTML attribute.
///
/// `className` is listed for completeness; the serializer handles it before
/// consulting the table.
const ATTRIBUTE_ALIASES: [(&str, &str); 30] = [
    ("acceptCharset", "acceptcharset"),
    ("accessKey", "accesskey"),
    ("allowFullScreen", "allowfullscreen"),
    ("autoCapitalize", "autocapitalize"),
    ("autoComplete", "autocomplete"),
    ("autoCorrect", "autocorrect"),
    ("autoFocus", "autofocus"),
    ("autoPlay", "autoplay"),
    ("charSet", "charset"),
    ("className", "class"),
    ("colSpan", "colspan"),
    ("contentEditable", "contenteditable"),
    ("crossOrigin", "crossorigin"),
    ("dateTime", "datetime"),
    ("defaultChecked", "checked"),
    ("defaultSelected", "selected"),
    ("defaultValue", "value"),
    ("htmlFor", "for"),
    ("httpEquiv", "http-equiv"),
    ("longDesc", "longdesc"),
    ("maxLength", "maxlength"),
    ("minLength", "minlength"),
    ("noModule", "nomodule"),
    ("noValidate", "novalidate"),
    ("readOnly", "readonly"),
    ("referrerPolicy", "referrerpolicy"),
    ("rowSpan", "rowspan"),
    ("spellCheck", "spellcheck"),
    ("tabIndex", "tabindex"),
    ("useMap", "usemap"),
];

// <https://developer.mozilla.org/en-US/docs/Web/HTML/Attributes>
const BOOLEAN_ATTRIBUTES: [&str; 22] = [
    "async",
    "allowfullscreen",
    "allowpaymentrequest",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "hidden",
    "ismap",
    "multiple",
    "muted",
    "novalidate",
    "nowrap",
    "open",
    "readonly",
    "required",
    "reversed",
    "selected",
];

// <https://html.spec.whatwg.org/multipage/syntax.html#void-elements>
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Returns the HTML attribute name for a property name.
#[must_use]
pub fn canonical_name(prop: &str) -> &str {
    ATTRIBUTE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == prop)
        .map_or(prop, |(_, name)| *name)
}

/// Returns `true` if `name` is an attribute whose presence alone carries meaning.
#[must_use]
pub fn is_boolean_attribute(name: &str) -> bool {
    BOOLEAN_ATTRIBUTES.iter().any(|&attribute| attribute == name)
}

/// Returns `true` if `tag` can have no content and is written self-closed.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|&element| element == tag)
}

/// JavaScript truthiness of an attribute value.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a scalar attribute value; `None` for values that are dropped.
fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(
            n.as_f64().map_or_else(|| n.to_string(), format_number),
        )),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// The attribute portion of an opening tag.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Attributes {
    /// Serialized attributes, each with its leading space.
    pub html: String,
    /// Raw HTML replacing the element's children, if supplied.
    pub inner_html: Option<String>,
}

/// Serializes `attrs` into the attribute portion of an opening tag.
#[must_use]
pub fn serialize_attributes(attrs: &Map<String, Value>) -> Attributes {
    let mut out = Attributes::default();

    for (prop, value) in attrs {
        match prop.as_str() {
            "children" | "key" | "ref" => {}
            // Most common attribute, so it short-circuits the table lookups.
            "class" | "className" => {
                if is_truthy(value) {
                    if let Some(text) = scalar_text(value) {
                        push_attribute(&mut out.html, "class", &text);
                    }
                }
            }
            "style" => {
                let css = match value {
                    Value::Object(style) => style_to_string(style),
                    other => scalar_text(other).map(Cow::into_owned).unwrap_or_default(),
                };
                push_attribute(&mut out.html, "style", &css);
            }
            "dangerouslySetInnerHTML" => {
                out.inner_html = value
                    .get("__html")
                    .and_then(scalar_text)
                    .filter(|html| !html.is_empty())
                    .map(Cow::into_owned);
            }
            _ => {
                let name = canonical_name(prop);
                if is_boolean_attribute(name) {
                    if is_truthy(value) {
                        out.html.push(' ');
                        out.html.push_str(name);
                    }
                } else if let Some(text) = scalar_text(value) {
                    push_attribute(&mut out.html, name, &text);
                }
            }
        }
    }

    out
}

fn push_attribute(html: &mut String, name: &str, value: &str) {
    html.push(' ');
    html.push_str(name);
    html.push_str("=\"");
    html.push_str(&escape(value));
    html.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperons_core::json;

    fn serialize(value: Value) -> Attributes {
        match value {
            Value::Object(attrs) => serialize_attributes(&attrs),
            _ => unreachable!("attributes must be an object"),
        }
    }

    #[test]
    fn test_tables_are_complete() {
        assert_eq!(ATTRIBUTE_ALIASES.len(), 30);
        assert_eq!(BOOLEAN_ATTRIBUTES.len(), 22);
        assert_eq!(VOID_ELEMENTS.len(), 14);
    }

    #[test]
    fn test_reserved_props_are_skipped() {
        let attrs = serialize(json!({ "children": "x", "key": 1, "ref": "r", "id": "a" }));
        assert_eq!(attrs.html, r#" id="a""#);
    }

    #[test]
    fn test_class_only_when_truthy() {
        assert_eq!(serialize(json!({ "className": "a b" })).html, r#" class="a b""#);
        assert_eq!(serialize(json!({ "class": "" })).html, "");
        assert_eq!(serialize(json!({ "className": null })).html, "");
        assert_eq!(serialize(json!({ "className": "<x>" })).html, r#" class="&lt;x&gt;""#);
    }

    #[test]
    fn test_style_object() {
        let attrs = serialize(json!({ "style": { "fontSize": "2em", "color": "red" } }));
        assert_eq!(attrs.html, r#" style="font-size:2em;color:red""#);
    }

    #[test]
    fn test_style_object_is_escaped() {
        let attrs = serialize(json!({ "style": { "fontFamily": "\"A B\"" } }));
        assert_eq!(attrs.html, r#" style="font-family:&quot;A B&quot;""#);
    }

    #[test]
    fn test_empty_style_still_emitted() {
        assert_eq!(serialize(json!({ "style": {} })).html, r#" style="""#);
    }

    #[test]
    fn test_aliases() {
        let attrs = serialize(json!({ "htmlFor": "name", "tabIndex": -1, "httpEquiv": "refresh" }));
        assert_eq!(attrs.html, r#" for="name" tabindex="-1" http-equiv="refresh""#);
    }

    #[test]
    fn test_boolean_attributes() {
        assert_eq!(serialize(json!({ "checked": true })).html, " checked");
        assert_eq!(serialize(json!({ "checked": false })).html, "");
        assert_eq!(serialize(json!({ "readOnly": 1 })).html, " readonly");
        assert_eq!(serialize(json!({ "defaultChecked": "" })).html, "");
    }

    #[test]
    fn test_value_kinds() {
        let attrs = serialize(json!({
            "title": "a \"quoted\" title",
            "width": 100,
            "draggable": false,
            "data": [1, 2],
            "onclick": null
        }));
        assert_eq!(
            attrs.html,
            r#" title="a &quot;quoted&quot; title" width="100" draggable="false""#
        );
    }

    #[test]
    fn test_inner_html_is_recorded_not_emitted() {
        let attrs = serialize(json!({ "dangerouslySetInnerHTML": { "__html": "<b>x</b>" } }));
        assert_eq!(attrs.html, "");
        assert_eq!(attrs.inner_html.as_deref(), Some("<b>x</b>"));
    }

    #[test]
    fn test_empty_inner_html_is_ignored() {
        let attrs = serialize(json!({ "dangerouslySetInnerHTML": { "__html": "" } }));
        assert_eq!(attrs.inner_html, None);
    }

    #[test]
    fn test_void_elements() {
        assert!(is_void_element("img"));
        assert!(is_void_element("wbr"));
        assert!(!is_void_element("div"));
    }
}
