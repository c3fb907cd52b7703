//! Element properties.
//!
//! [`Props`] carries everything an element was created with: an ordered attribute
//! map (arbitrary JSON-like values, in insertion order) and the element's children.
//! Tag elements serialize the attributes into markup; component functions read
//! them as their input.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt::{self, Debug};
use serde_json::{Map, Value};

use crate::Element;

/// Properties of an element: attributes plus children.
///
/// # Example
///
/// ```
/// use hyperons_core::Props;
///
/// let props = Props::new()
///     .attr("className", "card")
///     .attr("tabIndex", 0)
///     .child("Hello");
/// assert_eq!(props.get_str("className"), Some("card"));
/// ```
#[derive(Default)]
pub struct Props {
    attrs: Map<String, Value>,
    children: Box<Element>,
}

impl Props {
    /// Creates empty properties with no children.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any previous value under the same name.
    ///
    /// Replacing keeps the attribute's original position.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Replaces the children.
    #[must_use]
    pub fn children(mut self, children: impl Into<Element>) -> Self {
        *self.children = children.into();
        self
    }

    /// Appends one child, turning the children into a list if needed.
    #[must_use]
    pub fn child(mut self, child: impl Into<Element>) -> Self {
        let child = child.into();
        *self.children = match core::mem::take(&mut *self.children) {
            Element::Null => Element::List(alloc::vec![child]),
            Element::List(mut list) => {
                list.push(child);
                Element::List(list)
            }
            single => Element::List(alloc::vec![single, child]),
        };
        self
    }

    /// Returns the attribute stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Returns the attribute stored under `name` if it is a string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// All attributes, in insertion order.
    #[must_use]
    pub const fn attrs(&self) -> &Map<String, Value> {
        &self.attrs
    }

    /// Borrows the children.
    #[must_use]
    pub fn children_ref(&self) -> &Element {
        &self.children
    }

    /// Returns `true` if children were supplied.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !matches!(*self.children, Element::Null)
    }

    /// Moves the children out, leaving [`Element::Null`] behind.
    pub fn take_children(&mut self) -> Element {
        core::mem::take(&mut *self.children)
    }

    /// Splits the properties into attributes and children.
    #[must_use]
    pub fn into_parts(self) -> (Map<String, Value>, Element) {
        (self.attrs, *self.children)
    }
}

impl From<Map<String, Value>> for Props {
    fn from(attrs: Map<String, Value>) -> Self {
        Self {
            attrs,
            children: Box::default(),
        }
    }
}

impl Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Props")
            .field("attrs", &self.attrs)
            .field("children", &self.children)
            .finish()
    }
}
