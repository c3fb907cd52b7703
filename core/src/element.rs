//! The element model.
//!
//! An [`Element`] is one node of the tree handed to the renderer. The set of
//! variants is closed: text and numbers become escaped text, booleans and
//! [`Element::Null`] render nothing, lists render their members in order, and
//! the structured variants (tags, components, fragments, providers, deferred
//! values) each get their own handling in the render engine.
//!
//! Most elements are built through conversions and the [`h`] helper:
//!
//! ```
//! use hyperons_core::{Element, ElementType, Props, h};
//!
//! let list = h(
//!     "ul",
//!     Props::new().attr("className", "menu"),
//!     ["Home", "About"].map(|label| h("li", Props::new(), [label.into()])),
//! );
//! let grouped = h(ElementType::Fragment, Props::new(), [list, Element::from(42)]);
//! # let _ = grouped;
//! ```

use alloc::{borrow::Cow, boxed::Box, rc::Rc, string::String, vec::Vec};
use core::any::{Any, type_name};
use core::fmt::{self, Debug};
use core::future::Future;
use core::pin::Pin;
use core::task::{Context as TaskContext, Poll};

use futures::future::{FutureExt, LocalBoxFuture};

use crate::{BoxError, ContextId, Environment, Props, RenderError};

/// A node of the element tree.
#[derive(Default)]
pub enum Element {
    /// Text content, escaped on output.
    Text(String),
    /// A number, printed the way browsers print numbers.
    Number(f64),
    /// A boolean; renders nothing.
    Bool(bool),
    /// Absence of a value; renders nothing.
    #[default]
    Null,
    /// An ordered sequence of elements.
    List(Vec<Element>),
    /// A value that resolves to an element later.
    Deferred(Deferred),
    /// A concrete HTML tag.
    Tag(TagElement),
    /// A component function applied to its props.
    Component(ComponentElement),
    /// Transparent grouping of children.
    Fragment(Box<Element>),
    /// Binds a context value for a subtree.
    Provider(ProviderElement),
}

impl Element {
    /// Creates a tag element.
    #[must_use]
    pub fn tag(tag: impl Into<Cow<'static, str>>, props: Props) -> Self {
        Self::Tag(TagElement {
            tag: tag.into(),
            props,
        })
    }

    /// Creates a component element from an infallible component function.
    #[must_use]
    pub fn component<F>(component: F, props: Props) -> Self
    where
        F: Fn(Props, &Environment) -> Self + 'static,
    {
        Self::Component(ComponentElement {
            component: ComponentFn::new(component),
            props,
        })
    }

    /// Creates a component element from a component function that may fail.
    ///
    /// A failure is a synchronous render error and can be recovered by an
    /// enclosing error boundary.
    #[must_use]
    pub fn try_component<F, E>(component: F, props: Props) -> Self
    where
        F: Fn(Props, &Environment) -> Result<Self, E> + 'static,
        E: Into<BoxError>,
    {
        Self::Component(ComponentElement {
            component: ComponentFn::fallible(component),
            props,
        })
    }

    /// Groups children without emitting any markup of its own.
    #[must_use]
    pub fn fragment(children: impl Into<Self>) -> Self {
        Self::Fragment(Box::new(children.into()))
    }

    /// Creates an element that is rendered once `future` completes.
    #[must_use]
    pub fn deferred<Fut>(future: Fut) -> Self
    where
        Fut: Future + 'static,
        Fut::Output: Into<Self>,
    {
        Self::Deferred(Deferred::new(future.map(|element| Ok(element.into()))))
    }

    /// Creates an element that is rendered once `future` completes successfully.
    ///
    /// An error fails the whole render; error boundaries do not intercept it.
    #[must_use]
    pub fn try_deferred<Fut, T, E>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + 'static,
        T: Into<Self>,
        E: Into<BoxError>,
    {
        Self::Deferred(Deferred::new(future.map(
            |result| -> Result<Self, BoxError> { result.map(Into::into).map_err(Into::into) },
        )))
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Number(number) => f.debug_tuple("Number").field(number).finish(),
            Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Self::Null => f.write_str("Null"),
            Self::List(list) => f.debug_tuple("List").field(list).finish(),
            Self::Deferred(deferred) => deferred.fmt(f),
            Self::Tag(tag) => tag.fmt(f),
            Self::Component(component) => component.fmt(f),
            Self::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
            Self::Provider(provider) => provider.fmt(f),
        }
    }
}

// ============================================================================
// Structured variants
// ============================================================================

/// A concrete HTML tag with its props.
#[derive(Debug)]
pub struct TagElement {
    /// The tag name, e.g. `div`.
    pub tag: Cow<'static, str>,
    /// Attributes and children.
    pub props: Props,
}

type ComponentFnInner = dyn Fn(Props, &Environment) -> Result<Element, BoxError>;

/// A shared component function.
///
/// Components receive their props and the context map in effect at their
/// position in the tree, and return the element to render in their place.
#[derive(Clone)]
pub struct ComponentFn {
    name: &'static str,
    func: Rc<ComponentFnInner>,
}

impl ComponentFn {
    /// Wraps an infallible component function.
    pub fn new<F>(component: F) -> Self
    where
        F: Fn(Props, &Environment) -> Element + 'static,
    {
        Self {
            name: type_name::<F>(),
            func: Rc::new(move |props: Props, env: &Environment| Ok(component(props, env))),
        }
    }

    /// Wraps a component function that may fail.
    pub fn fallible<F, E>(component: F) -> Self
    where
        F: Fn(Props, &Environment) -> Result<Element, E> + 'static,
        E: Into<BoxError>,
    {
        Self {
            name: type_name::<F>(),
            func: Rc::new(
                move |props: Props, env: &Environment| -> Result<Element, BoxError> {
                    component(props, env).map_err(Into::into)
                },
            ),
        }
    }

    /// The component's name, derived from the function's type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Invokes the component.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Component`] if the component function fails.
    pub fn call(&self, props: Props, env: &Environment) -> Result<Element, RenderError> {
        (self.func)(props, env).map_err(|source| RenderError::component(self.name, source))
    }
}

impl Debug for ComponentFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentFn").field(&self.name).finish()
    }
}

/// A component function applied to its props.
#[derive(Debug)]
pub struct ComponentElement {
    /// The component function.
    pub component: ComponentFn,
    /// Props passed to the component.
    pub props: Props,
}

/// Binds a value to a context id for the provider's subtree.
pub struct ProviderElement {
    /// Identity of the context being bound.
    pub id: ContextId,
    /// The bound value.
    pub value: Rc<dyn Any>,
    /// The subtree that sees the binding.
    pub children: Box<Element>,
}

impl ProviderElement {
    /// Returns `true` if this provider installs an error boundary.
    #[must_use]
    pub fn is_error_boundary(&self) -> bool {
        self.id == ContextId::ERROR_BOUNDARY
    }
}

impl Debug for ProviderElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("id", &self.id)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// An element that is not available yet.
///
/// Deferred values are registered with the render controller and awaited
/// concurrently with their siblings; the result is spliced back in at the
/// deferred value's original position.
pub struct Deferred(LocalBoxFuture<'static, Result<Element, BoxError>>);

impl Deferred {
    /// Wraps a future resolving to an element.
    pub fn new(future: impl Future<Output = Result<Element, BoxError>> + 'static) -> Self {
        Self(future.boxed_local())
    }
}

impl Future for Deferred {
    type Output = Result<Element, BoxError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Self::Output> {
        self.0.as_mut().poll(cx)
    }
}

impl Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred")
    }
}

// ============================================================================
// Construction helper
// ============================================================================

/// The `type` of an element built with [`h`].
#[derive(Debug, Clone)]
pub enum ElementType {
    /// A tag name.
    Tag(Cow<'static, str>),
    /// A component function.
    Component(ComponentFn),
    /// The fragment marker.
    Fragment,
}

impl From<&'static str> for ElementType {
    fn from(tag: &'static str) -> Self {
        Self::Tag(Cow::Borrowed(tag))
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        Self::Tag(Cow::Owned(tag))
    }
}

impl From<ComponentFn> for ElementType {
    fn from(component: ComponentFn) -> Self {
        Self::Component(component)
    }
}

/// Builds an element from a type, props and call-site children.
///
/// Children given here replace any children already present in `props`,
/// unless none are given, in which case the props' children are kept.
pub fn h(
    ty: impl Into<ElementType>,
    mut props: Props,
    children: impl IntoIterator<Item = Element>,
) -> Element {
    let children: Vec<Element> = children.into_iter().collect();
    if !children.is_empty() || !props.has_children() {
        props = props.children(Element::List(children));
    }

    match ty.into() {
        ElementType::Tag(tag) => Element::tag(tag, props),
        ElementType::Component(component) => Element::Component(ComponentElement { component, props }),
        ElementType::Fragment => Element::fragment(props.take_children()),
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<&str> for Element {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for Element {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Element {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<Cow<'_, str>> for Element {
    fn from(text: Cow<'_, str>) -> Self {
        Self::Text(text.into_owned())
    }
}

impl From<char> for Element {
    fn from(c: char) -> Self {
        Self::Text(c.into())
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Element {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for Element {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<()> for Element {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Self>> From<Option<T>> for Element {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Element {
    fn from(list: Vec<T>) -> Self {
        Self::List(list.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>, const N: usize> From<[T; N]> for Element {
    fn from(list: [T; N]) -> Self {
        Self::List(list.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> FromIterator<T> for Element {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_primitive_conversions() {
        assert!(matches!(Element::from("hi"), Element::Text(text) if text == "hi"));
        assert!(matches!(Element::from(3_u8), Element::Number(n) if n == 3.0));
        assert!(matches!(Element::from(false), Element::Bool(false)));
        assert!(matches!(Element::from(()), Element::Null));
        assert!(matches!(Element::from(None::<&str>), Element::Null));
    }

    #[test]
    fn test_list_conversions() {
        let list = Element::from(vec!["a", "b"]);
        assert!(matches!(list, Element::List(items) if items.len() == 2));

        let collected: Element = (1..=3).collect();
        assert!(matches!(collected, Element::List(items) if items.len() == 3));
    }

    #[test]
    fn test_h_uses_call_site_children() {
        let element = h("p", Props::new().children("ignored"), [Element::from("kept")]);
        let Element::Tag(tag) = element else {
            panic!("expected a tag element");
        };
        match tag.props.children_ref() {
            Element::List(items) => {
                assert!(matches!(items.as_slice(), [Element::Text(text)] if text == "kept"));
            }
            other => panic!("unexpected children {other:?}"),
        }
    }

    #[test]
    fn test_h_keeps_prop_children_without_call_site_children() {
        let element = h("p", Props::new().children("kept"), []);
        let Element::Tag(tag) = element else {
            panic!("expected a tag element");
        };
        assert!(matches!(tag.props.children_ref(), Element::Text(text) if text == "kept"));
    }

    #[test]
    fn test_h_fragment() {
        let element = h(ElementType::Fragment, Props::new(), [Element::from(1)]);
        assert!(matches!(element, Element::Fragment(children) if matches!(*children, Element::List(_))));
    }

    #[test]
    fn test_component_name_in_error() {
        fn broken(_props: Props, _env: &Environment) -> Result<Element, &'static str> {
            Err("nope")
        }
        let component = ComponentFn::fallible(broken);
        let error = component
            .call(Props::new(), &Environment::new())
            .expect_err("component must fail");
        assert!(matches!(error, RenderError::Component { component, .. } if component.ends_with("broken")));
    }

    #[test]
    fn test_deferred_resolves() {
        let Element::Deferred(deferred) = Element::deferred(async { "later" }) else {
            panic!("expected a deferred element");
        };
        let element = futures::executor::block_on(deferred).expect("deferred must resolve");
        assert!(matches!(element, Element::Text(text) if text == "later"));
    }
}
