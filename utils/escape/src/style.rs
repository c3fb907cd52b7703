//! Inline style serialization.

use alloc::borrow::Cow;
use alloc::string::String;
use heck::ToKebabCase;
use serde_json::{Map, Value};

use crate::format_number;

/// Converts a camelCase style property name into its CSS (kebab-case) form.
///
/// Names that already contain a dash are returned unchanged, which covers
/// kebab-case names and custom properties such as `--accent`. A leading
/// uppercase letter yields a leading dash (`WebkitTransition` becomes
/// `-webkit-transition`), and the lowercase `ms` vendor prefix gets one too.
/// Runs of capitals form one word, so `backgroundURL` becomes `background-url`.
#[must_use]
pub fn to_kebab_case(name: &str) -> Cow<'_, str> {
    if name.contains('-') || !name.bytes().any(|b| b.is_ascii_uppercase()) {
        return Cow::Borrowed(name);
    }

    let mut kebab = name.to_kebab_case();
    if name.starts_with(|c: char| c.is_ascii_uppercase()) || kebab.starts_with("ms-") {
        kebab.insert(0, '-');
    }
    Cow::Owned(kebab)
}

/// Serializes an inline style object into a `property:value` declaration list.
///
/// Declarations keep the object's insertion order and are joined with `;`.
/// Strings are used verbatim, numbers are printed with [`format_number`] and
/// booleans as `true`/`false`. `null`, arrays and nested objects carry no CSS
/// meaning and are skipped.
#[must_use]
pub fn style_to_string(style: &Map<String, Value>) -> String {
    let mut css = String::new();
    for (name, value) in style {
        let value: Cow<'_, str> = match value {
            Value::String(s) => Cow::Borrowed(s),
            Value::Number(n) => Cow::Owned(n.as_f64().map_or_else(|| n.to_string(), format_number)),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Null | Value::Array(_) | Value::Object(_) => continue,
        };
        if !css.is_empty() {
            css.push(';');
        }
        css.push_str(&to_kebab_case(name));
        css.push(':');
        css.push_str(&value);
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test input must be an object"),
        }
    }

    #[test]
    fn test_empty_style() {
        assert_eq!(style_to_string(&Map::new()), "");
    }

    #[test]
    fn test_camel_case_properties() {
        let style = object(json!({ "color": "red", "fontSize": "12px", "zIndex": 3 }));
        assert_eq!(style_to_string(&style), "color:red;font-size:12px;z-index:3");
    }

    #[test]
    fn test_kebab_and_custom_properties_untouched() {
        let style = object(json!({ "background-color": "blue", "--accentColor": "#fff" }));
        assert_eq!(
            style_to_string(&style),
            "background-color:blue;--accentColor:#fff"
        );
    }

    #[test]
    fn test_vendor_prefixes() {
        assert_eq!(to_kebab_case("WebkitTransition"), "-webkit-transition");
        assert_eq!(to_kebab_case("msTransform"), "-ms-transform");
        assert_eq!(to_kebab_case("MozUserSelect"), "-moz-user-select");
    }

    #[test]
    fn test_acronyms_stay_together() {
        assert_eq!(to_kebab_case("backgroundURL"), "background-url");
        assert_eq!(to_kebab_case("zIndex"), "z-index");
    }

    #[test]
    fn test_null_values_skipped() {
        let style = object(json!({ "color": null, "margin": 0 }));
        assert_eq!(style_to_string(&style), "margin:0");
    }
}
