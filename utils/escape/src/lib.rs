//! # Text transforms for HTML output
//!
//! Pure, stateless helpers used by the `hyperons` renderer:
//!
//! - [`escape`] makes arbitrary text safe to place in element content or in a
//!   double-quoted attribute value.
//! - [`style_to_string`] turns an inline style object into a CSS declaration list.
//! - [`format_number`] prints numbers the way a browser prints them in markup.
//!
//! ```
//! use hyperons_escape::escape;
//!
//! assert_eq!(escape("<a href=\"#\">Tom & Jerry</a>"), "&lt;a href=&quot;#&quot;&gt;Tom &amp; Jerry&lt;/a&gt;");
//! ```

extern crate alloc;

mod number;
mod style;

pub use number::format_number;
pub use style::{style_to_string, to_kebab_case};

use alloc::borrow::Cow;
use alloc::string::String;

/// Returns the entity for a character that must be escaped, if any.
#[inline]
const fn entity(c: u8) -> Option<&'static str> {
    match c {
        b'&' => Some("&amp;"),
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        b'"' => Some("&quot;"),
        b'\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escapes the five HTML-significant characters (`& < > " '`).
///
/// Text that contains none of them is returned borrowed, so the common case
/// does not allocate.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let Some(first) = bytes.iter().position(|&b| entity(b).is_some()) else {
        return Cow::Borrowed(text);
    };

    let mut escaped = String::with_capacity(text.len() + 8);
    escaped.push_str(&text[..first]);

    let mut start = first;
    for (index, &byte) in bytes.iter().enumerate().skip(first) {
        if let Some(entity) = entity(byte) {
            // All escaped characters are ASCII, so `index` is a char boundary.
            escaped.push_str(&text[start..index]);
            escaped.push_str(entity);
            start = index + 1;
        }
    }
    escaped.push_str(&text[start..]);

    Cow::Owned(escaped)
}
